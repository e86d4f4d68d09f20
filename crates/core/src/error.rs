//! Error types for the sales-etl pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the sales-etl pipeline.
///
/// Fatal conditions (missing source file, unreachable destination,
/// incompatible destination schema) abort the run. Row-level problems are
/// not represented here: the Cleaner and Sink skip and count those locally.
#[derive(Error, Debug)]
pub enum Error {
    /// The source file does not exist or cannot be read.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    /// A data row's field count does not match the header.
    #[error("malformed row at line {line}: expected {expected} fields, got {got}")]
    MalformedRow {
        line: u64,
        expected: usize,
        got: usize,
    },

    /// The destination database could not be opened.
    #[error("connection error: {0}")]
    Connection(String),

    /// An existing destination table has an incompatible column type.
    #[error("schema conflict on column `{column}`: existing type {existing}, expected {expected}")]
    SchemaConflict {
        column: String,
        existing: String,
        expected: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// SQLite error.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a source-not-found error.
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Error::SourceNotFound(path.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Error::Connection(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a schema-conflict error.
    pub fn schema_conflict(
        column: impl Into<String>,
        existing: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Error::SchemaConflict {
            column: column.into(),
            existing: existing.into(),
            expected: expected.into(),
        }
    }
}
