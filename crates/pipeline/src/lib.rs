//! The linear ETL run: Loader -> Cleaner -> Enricher -> Sink.
//!
//! Single-threaded, whole-dataset batch. Row-level problems are skipped and
//! counted by the individual stages; only a missing source file, an
//! unreachable destination, or an incompatible destination schema abort
//! the run.

use sales_core::{Config, Result};
use sales_ingestion::{loader, CleanStats, Cleaner};
use sales_sink::{InsertReport, SqliteSink};

/// Summary of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Cleaning counters.
    pub clean: CleanStats,
    /// Sink counters.
    pub insert: InsertReport,
}

/// Run the full pipeline described by `config`.
pub fn run(config: &Config) -> Result<PipelineReport> {
    tracing::info!(source = %config.source.path.display(), "pipeline starting");

    let raw = loader::load(&config.source.path)?;

    let mut cleaner = Cleaner::new(&config.clean);
    let mut records = cleaner.clean(raw);

    sales_enrich::enrich_all(&mut records);

    let mut sink = SqliteSink::open(&config.sink.database_path)?;
    sink.ensure_schema()?;
    let insert = sink.insert_batch(&records)?;

    let report = PipelineReport {
        clean: cleaner.stats().clone(),
        insert,
    };
    tracing::info!(
        rows_in = report.clean.rows_in,
        rows_written = report.insert.inserted,
        "pipeline finished"
    );
    Ok(report)
}
