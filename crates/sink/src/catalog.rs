//! The analytical query catalog.
//!
//! Nine named, parameterless SELECT statements over the `sales` table,
//! written for the SQLite dialect (window functions; `strftime` over the
//! text-encoded date column). The pipeline only stores the text — any SQL
//! client runs them — but the tests here execute each statement against an
//! in-memory sink to pin its semantics.

/// A named catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct CatalogQuery {
    /// Stable identifier.
    pub name: &'static str,
    /// One-line description of the business question answered.
    pub description: &'static str,
    /// The statement text.
    pub sql: &'static str,
}

/// Find a catalog entry by name.
pub fn find(name: &str) -> Option<&'static CatalogQuery> {
    CATALOG.iter().find(|q| q.name == name)
}

/// All catalog entries.
pub const CATALOG: [CatalogQuery; 9] = [
    CatalogQuery {
        name: "payment_method_totals",
        description: "Transaction count and quantity sold per payment method",
        sql: "\
SELECT payment_method,
       COUNT(*) AS no_payments,
       SUM(quantity) AS no_qty
FROM sales
GROUP BY payment_method
ORDER BY no_payments DESC",
    },
    CatalogQuery {
        name: "top_rated_category_per_branch",
        description: "Highest average-rated category in each branch, ties included",
        sql: "\
SELECT branch, category, avg_rating
FROM (
    SELECT branch,
           category,
           AVG(rating) AS avg_rating,
           RANK() OVER (PARTITION BY branch ORDER BY AVG(rating) DESC) AS rnk
    FROM sales
    GROUP BY branch, category
)
WHERE rnk = 1",
    },
    CatalogQuery {
        name: "busiest_day_per_branch",
        description: "Weekday with the most transactions in each branch",
        sql: "\
SELECT branch, day_name, no_transactions
FROM (
    SELECT branch,
           CASE CAST(strftime('%w', date) AS INTEGER)
               WHEN 0 THEN 'Sunday'
               WHEN 1 THEN 'Monday'
               WHEN 2 THEN 'Tuesday'
               WHEN 3 THEN 'Wednesday'
               WHEN 4 THEN 'Thursday'
               WHEN 5 THEN 'Friday'
               ELSE 'Saturday'
           END AS day_name,
           COUNT(*) AS no_transactions,
           RANK() OVER (PARTITION BY branch ORDER BY COUNT(*) DESC) AS rnk
    FROM sales
    GROUP BY branch, day_name
)
WHERE rnk = 1",
    },
    CatalogQuery {
        name: "quantity_per_payment_method",
        description: "Quantity sold per payment method",
        sql: "\
SELECT payment_method, SUM(quantity) AS total_quantity
FROM sales
GROUP BY payment_method
ORDER BY total_quantity DESC",
    },
    CatalogQuery {
        name: "rating_by_city_category",
        description: "Min/max/avg rating per city and category",
        sql: "\
SELECT city, category,
       MIN(rating) AS min_rating,
       MAX(rating) AS max_rating,
       AVG(rating) AS avg_rating
FROM sales
GROUP BY city, category
ORDER BY city, category",
    },
    CatalogQuery {
        name: "revenue_and_profit_per_category",
        description: "Total revenue and profit per category",
        sql: "\
SELECT category,
       SUM(total) AS total_revenue,
       SUM(total * profit_margin) AS total_profit
FROM sales
GROUP BY category
ORDER BY total_revenue DESC",
    },
    CatalogQuery {
        name: "preferred_payment_per_branch",
        description: "Most used payment method in each branch",
        sql: "\
SELECT branch, payment_method, total_trans
FROM (
    SELECT branch, payment_method,
           COUNT(*) AS total_trans,
           RANK() OVER (PARTITION BY branch ORDER BY COUNT(*) DESC) AS rnk
    FROM sales
    GROUP BY branch, payment_method
)
WHERE rnk = 1",
    },
    CatalogQuery {
        name: "shift_invoices_per_branch",
        description: "Invoice counts per branch and shift (Morning/Afternoon/Evening)",
        sql: "\
SELECT branch,
       CASE
           WHEN time < '12:00:00' THEN 'Morning'
           WHEN time < '18:00:00' THEN 'Afternoon'
           ELSE 'Evening'
       END AS shift,
       COUNT(*) AS num_invoices
FROM sales
WHERE time IS NOT NULL
GROUP BY branch, shift
ORDER BY branch, num_invoices DESC",
    },
    CatalogQuery {
        name: "revenue_decline_by_branch",
        description: "Top-5 branches by year-over-year revenue percentage decline",
        sql: "\
WITH revenue_2022 AS (
    SELECT branch, SUM(total) AS revenue
    FROM sales
    WHERE strftime('%Y', date) = '2022'
    GROUP BY branch
),
revenue_2023 AS (
    SELECT branch, SUM(total) AS revenue
    FROM sales
    WHERE strftime('%Y', date) = '2023'
    GROUP BY branch
)
SELECT r2022.branch,
       r2022.revenue AS last_year_revenue,
       r2023.revenue AS current_year_revenue,
       ROUND((r2022.revenue - r2023.revenue) / r2022.revenue * 100, 2) AS drop_ratio
FROM revenue_2022 AS r2022
JOIN revenue_2023 AS r2023 ON r2022.branch = r2023.branch
WHERE r2022.revenue > r2023.revenue
ORDER BY drop_ratio DESC
LIMIT 5",
    },
];
