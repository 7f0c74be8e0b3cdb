//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while building the scraper configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse settings file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting has an invalid value.
    #[error("Invalid setting '{key}': {message}")]
    ValidationError { key: String, message: String },

    /// No username was configured.
    #[error("GitHub username is not set; provide --username or GITHUB_USERNAME")]
    MissingUsername,
}
