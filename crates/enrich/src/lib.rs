//! Feature enrichment for the sales-etl pipeline.
//!
//! Derives columns from already-cleaned records:
//! - `total` (unit_price * quantity)
//! - `category` fallback from `product_line`
//! - `gross_income` from total and profit margin

pub mod enricher;

pub use enricher::{enrich_all, enrich_record};
