//! CSV loading.
//!
//! Turns a comma-delimited source file with a header row into an ordered
//! sequence of [`RawRecord`]s. Field values stay as strings; all type work
//! happens later in the Cleaner.

use sales_core::{Error, RawRecord, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load all rows from a CSV file at `path`.
///
/// Fails with [`Error::SourceNotFound`] when the path is unreadable and
/// [`Error::MalformedRow`] when a row's field count does not match the
/// header.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|_| Error::source_not_found(path.display().to_string()))?;
    load_from_reader(file)
}

/// Load all rows from any reader producing CSV text.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let record: RawRecord = row.map_err(map_row_error)?;
        records.push(record);
    }

    tracing::debug!(rows = records.len(), "source file loaded");
    Ok(records)
}

fn map_row_error(err: csv::Error) -> Error {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        return Error::MalformedRow {
            line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            expected: *expected_len as usize,
            got: *len as usize,
        };
    }
    Error::Csv(err)
}
