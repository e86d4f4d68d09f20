//! Core record types for the sales-etl pipeline.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A raw CSV row, exactly as read from the source file.
///
/// Every field keeps its original string value; `None` means the field was
/// empty or the column was absent from the header. Column lookup is by
/// header name, with aliases covering the two header dialects this dataset
/// family ships with (`Invoice ID` vs `invoice_id`, `Product line` vs
/// `category`, and so on).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(alias = "Invoice ID")]
    pub invoice_id: Option<String>,
    #[serde(alias = "Branch")]
    pub branch: Option<String>,
    #[serde(alias = "City")]
    pub city: Option<String>,
    #[serde(alias = "Customer type")]
    pub customer_type: Option<String>,
    #[serde(alias = "Gender")]
    pub gender: Option<String>,
    #[serde(alias = "Product line")]
    pub product_line: Option<String>,
    pub category: Option<String>,
    #[serde(alias = "Unit price")]
    pub unit_price: Option<String>,
    #[serde(alias = "Quantity")]
    pub quantity: Option<String>,
    #[serde(alias = "Tax 5%")]
    pub tax: Option<String>,
    #[serde(alias = "Total")]
    pub total: Option<String>,
    #[serde(alias = "Date")]
    pub date: Option<String>,
    #[serde(alias = "Time")]
    pub time: Option<String>,
    #[serde(alias = "Payment")]
    pub payment_method: Option<String>,
    pub cogs: Option<String>,
    #[serde(alias = "gross margin percentage")]
    pub gross_margin_pct: Option<String>,
    #[serde(alias = "gross income")]
    pub gross_income: Option<String>,
    #[serde(alias = "Rating")]
    pub rating: Option<String>,
    pub profit_margin: Option<String>,
}

/// A typed sales transaction after cleaning.
///
/// Required fields are plain values; everything the Cleaner may legitimately
/// leave absent is an `Option`. `total` starts out `None` and is filled in
/// by the enricher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Unique transaction identifier.
    pub invoice_id: String,
    /// Short branch code (e.g. "WALM003").
    pub branch: String,
    pub city: Option<String>,
    pub customer_type: Option<String>,
    pub gender: Option<String>,
    pub product_line: Option<String>,
    pub category: Option<String>,
    /// Price per unit, non-negative.
    pub unit_price: f64,
    /// Units sold.
    pub quantity: u32,
    pub tax: Option<f64>,
    /// Derived: unit_price * quantity. `None` until enrichment.
    pub total: Option<f64>,
    /// Transaction date.
    pub date: NaiveDate,
    /// Time of day, 24-hour clock.
    pub time: Option<NaiveTime>,
    pub payment_method: Option<String>,
    pub cogs: Option<f64>,
    pub gross_margin_pct: Option<f64>,
    pub gross_income: Option<f64>,
    /// Customer rating, bounded (default 0-10).
    pub rating: Option<f64>,
    /// Profit as a fraction of revenue.
    pub profit_margin: Option<f64>,
}

impl SalesRecord {
    /// The total this record should carry after enrichment.
    #[inline]
    pub fn expected_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_raw_record_tuple_equality() {
        let a = RawRecord {
            invoice_id: Some("A-1".to_string()),
            quantity: Some("3".to_string()),
            ..RawRecord::default()
        };
        let b = a.clone();
        assert_eq!(a, b);

        let c = RawRecord {
            quantity: Some("4".to_string()),
            ..a.clone()
        };
        assert_ne!(a, c);
    }

    #[test]
    fn test_expected_total() {
        let record = SalesRecord {
            invoice_id: "A-1".to_string(),
            branch: "B1".to_string(),
            city: None,
            customer_type: None,
            gender: None,
            product_line: None,
            category: None,
            unit_price: 10.0,
            quantity: 3,
            tax: None,
            total: None,
            date: NaiveDate::from_ymd_opt(2022, 1, 5).unwrap(),
            time: None,
            payment_method: None,
            cogs: None,
            gross_margin_pct: None,
            gross_income: None,
            rating: None,
            profit_margin: None,
        };
        assert_relative_eq!(record.expected_total(), 30.0);
    }
}
