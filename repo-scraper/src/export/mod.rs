//! CSV export of [`OutputRecord`]s.

mod error;

pub use error::ExportError;

use crate::record::OutputRecord;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes the header row followed by one row per record.
///
/// The header is written even when `records` is empty.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a row cannot be serialized or written.
pub fn write_records<W: Write>(writer: W, records: &[OutputRecord]) -> Result<(), ExportError> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv.write_record(OutputRecord::HEADERS)?;
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes `records` to a CSV file at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_csv(path: &Path, records: &[OutputRecord]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    write_records(file, records)?;
    info!(path = %path.display(), rows = records.len(), "Wrote CSV export");
    Ok(())
}
