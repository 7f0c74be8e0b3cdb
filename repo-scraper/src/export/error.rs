//! Export error types.

use thiserror::Error;

/// Errors that can occur while writing the export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create or write the output file.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a row.
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}
