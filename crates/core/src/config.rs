//! Configuration structures for the sales-etl pipeline.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source file configuration.
    pub source: SourceConfig,
    /// Cleaning configuration.
    pub clean: CleanConfig,
    /// Destination configuration.
    pub sink: SinkConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            clean: CleanConfig::default(),
            sink: SinkConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}

/// Source file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the delimited source file.
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/sales.csv"),
        }
    }
}

/// Cleaning configuration.
///
/// The currency strip list, missing-value markers and date/time format
/// lists are deliberately configuration rather than hard-coded: source
/// exports of this dataset disagree on all three.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Substrings removed from currency fields before parsing (e.g. "$").
    pub currency_strip: Vec<String>,
    /// Field values treated as missing, compared case-insensitively after
    /// trimming. The empty string is always treated as missing.
    pub missing_markers: Vec<String>,
    /// chrono format strings tried in order when parsing dates.
    pub date_formats: Vec<String>,
    /// chrono format strings tried in order when parsing times.
    pub time_formats: Vec<String>,
    /// Lowest valid rating.
    pub rating_min: f64,
    /// Highest valid rating.
    pub rating_max: f64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            currency_strip: vec!["$".to_string(), ",".to_string()],
            missing_markers: vec![
                "na".to_string(),
                "n/a".to_string(),
                "null".to_string(),
                "nan".to_string(),
            ],
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%d/%m/%y".to_string(),
                "%m/%d/%Y".to_string(),
                "%d-%m-%Y".to_string(),
            ],
            time_formats: vec!["%H:%M:%S".to_string(), "%H:%M".to_string()],
            rating_min: 0.0,
            rating_max: 10.0,
        }
    }
}

/// Destination configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Path of the destination SQLite database file.
    pub database_path: PathBuf,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/sales.db"),
        }
    }
}
