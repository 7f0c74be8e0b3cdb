//! Runner error types.

use crate::config::ConfigError;
use crate::export::ExportError;
use crate::forge::ForgeError;

/// Errors that can occur during a scraping run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// The repository listing failed; nothing was exported.
    #[error("Failed to list repositories: {0}")]
    Listing(#[source] ForgeError),

    /// Writing the export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}
