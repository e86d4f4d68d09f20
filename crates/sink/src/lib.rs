//! Relational destination for the sales-etl pipeline.
//!
//! This crate provides:
//! - The destination table schema
//! - A SQLite sink with best-effort batch insert
//! - The catalog of analytical queries run against the destination

pub mod catalog;
pub mod schema;
pub mod sqlite;

pub use catalog::{find, CatalogQuery, CATALOG};
pub use sqlite::{InsertReport, SqliteSink};
