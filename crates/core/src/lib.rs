//! Core types and configuration for the sales-etl pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Record types (raw CSV rows, typed sales records)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{CleanConfig, Config, SinkConfig, SourceConfig};
pub use error::{Error, Result};
pub use types::*;
