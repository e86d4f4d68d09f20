//! Pipeline runner.
//!
//! Usage: `sales-etl [config.json]`. Without an argument the default
//! configuration is used. `SALES_SOURCE_PATH` and `SALES_DB_PATH`
//! environment variables override the corresponding config entries.

use anyhow::Context;
use sales_core::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = match std::env::args().nth(1) {
        Some(path) => Config::from_json_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => Config::default(),
    };

    if let Ok(path) = std::env::var("SALES_SOURCE_PATH") {
        config.source.path = path.into();
    }
    if let Ok(path) = std::env::var("SALES_DB_PATH") {
        config.sink.database_path = path.into();
    }

    let report = sales_pipeline::run(&config).context("pipeline run failed")?;

    println!(
        "rows in: {}, written: {}, duplicates: {}, missing required: {}, parse failures: {}, constraint skips: {}",
        report.clean.rows_in,
        report.insert.inserted,
        report.clean.duplicates_dropped,
        report.clean.missing_required_dropped,
        report.clean.parse_failures_dropped,
        report.insert.skipped,
    );
    Ok(())
}
