//! Destination table schema.
//!
//! The column set and declared types are fixed; dates are stored as
//! `YYYY-MM-DD` text and times as `HH:MM:SS` text so the catalog queries
//! can use `strftime` and lexicographic comparison.

/// Name of the destination table.
pub const TABLE_NAME: &str = "sales";

/// Destination columns in insert order, with their declared SQL types.
pub const COLUMNS: &[(&str, &str)] = &[
    ("invoice_id", "VARCHAR(20)"),
    ("branch", "VARCHAR(10)"),
    ("city", "VARCHAR(50)"),
    ("customer_type", "VARCHAR(50)"),
    ("gender", "VARCHAR(10)"),
    ("product_line", "VARCHAR(100)"),
    ("unit_price", "FLOAT"),
    ("quantity", "INT"),
    ("tax", "FLOAT"),
    ("total", "FLOAT"),
    ("date", "DATE"),
    ("time", "TIME"),
    ("payment_method", "VARCHAR(20)"),
    ("cogs", "FLOAT"),
    ("gross_margin_pct", "FLOAT"),
    ("gross_income", "FLOAT"),
    ("rating", "FLOAT"),
    ("category", "VARCHAR(50)"),
    ("profit_margin", "FLOAT"),
];

/// Build the CREATE TABLE statement for the destination table.
pub fn create_table_sql() -> String {
    let columns = COLUMNS
        .iter()
        .map(|(name, sql_type)| {
            if *name == "invoice_id" {
                format!("    {name} {sql_type} PRIMARY KEY")
            } else {
                format!("    {name} {sql_type}")
            }
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("CREATE TABLE IF NOT EXISTS {TABLE_NAME} (\n{columns}\n)")
}

/// Build the parameterized INSERT statement matching [`COLUMNS`].
pub fn insert_sql() -> String {
    let names = COLUMNS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=COLUMNS.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {TABLE_NAME} ({names}) VALUES ({placeholders})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_sql() {
        let sql = create_table_sql();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS sales"));
        assert!(sql.contains("invoice_id VARCHAR(20) PRIMARY KEY"));
        assert!(sql.contains("profit_margin FLOAT"));
    }

    #[test]
    fn test_insert_sql_placeholder_count() {
        let sql = insert_sql();
        assert_eq!(sql.matches('?').count(), COLUMNS.len());
        assert!(sql.contains("?19"));
    }
}
