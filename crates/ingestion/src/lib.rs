//! Data loading and cleaning for the sales-etl pipeline.
//!
//! This crate handles:
//! - CSV loading into raw string records
//! - Deduplication and missing-value handling
//! - Type coercion (currency, integers, dates, times)

pub mod cleaner;
pub mod loader;

pub use cleaner::{CleanStats, Cleaner};
pub use loader::load;
