//! SQLite destination.
//!
//! Ensures the destination table exists (refusing to run against an
//! incompatible one) and inserts cleaned records best-effort: a row that
//! violates a constraint is skipped and counted, the batch continues.

use crate::schema::{create_table_sql, insert_sql, COLUMNS, TABLE_NAME};
use rusqlite::{params, Connection, ErrorCode};
use sales_core::{Error, Result, SalesRecord};
use std::path::Path;

/// Outcome of a batch insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertReport {
    /// Rows written.
    pub inserted: usize,
    /// Rows skipped on a constraint violation.
    pub skipped: usize,
}

/// SQLite-backed destination for cleaned sales records.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| Error::connection(format!("{}: {e}", path.display())))?;
        Ok(Self { conn })
    }

    /// Open an in-memory database. Used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection, e.g. to run catalog queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the destination table if absent; verify its column types if
    /// present. A declared-type mismatch or missing column is fatal.
    pub fn ensure_schema(&self) -> Result<()> {
        let existing = self.table_columns()?;
        if existing.is_empty() {
            self.conn.execute(&create_table_sql(), [])?;
            tracing::info!(table = TABLE_NAME, "destination table created");
            return Ok(());
        }

        for (name, expected) in COLUMNS {
            match existing.iter().find(|(n, _)| n == name) {
                None => {
                    return Err(Error::schema_conflict(*name, "absent", *expected));
                }
                Some((_, actual)) if !actual.eq_ignore_ascii_case(expected) => {
                    return Err(Error::schema_conflict(*name, actual.as_str(), *expected));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Insert a batch of records, skipping (and counting) rows that violate
    /// a constraint. Deliberately not transactional across the batch.
    pub fn insert_batch(&mut self, records: &[SalesRecord]) -> Result<InsertReport> {
        let mut report = InsertReport::default();
        let mut stmt = self.conn.prepare(&insert_sql())?;

        for record in records {
            let date = record.date.format("%Y-%m-%d").to_string();
            let time = record.time.map(|t| t.format("%H:%M:%S").to_string());

            let result = stmt.execute(params![
                record.invoice_id,
                record.branch,
                record.city,
                record.customer_type,
                record.gender,
                record.product_line,
                record.unit_price,
                record.quantity,
                record.tax,
                record.total,
                date,
                time,
                record.payment_method,
                record.cogs,
                record.gross_margin_pct,
                record.gross_income,
                record.rating,
                record.category,
                record.profit_margin,
            ]);

            match result {
                Ok(_) => report.inserted += 1,
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    tracing::warn!(invoice_id = %record.invoice_id, "constraint violation, row skipped");
                    report.skipped += 1;
                }
                Err(other) => return Err(other.into()),
            }
        }

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "batch insert complete"
        );
        Ok(report)
    }

    /// Number of rows currently in the destination table.
    pub fn row_count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {TABLE_NAME}"),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Declared (name, type) pairs of the destination table, empty when the
    /// table does not exist.
    fn table_columns(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({TABLE_NAME})"))?;
        let columns = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(columns)
    }
}
