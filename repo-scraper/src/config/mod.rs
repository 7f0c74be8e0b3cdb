//! Scraper configuration.
//!
//! [`ScraperConfig`] carries the credentials and output location supplied by
//! the caller; [`FetchSettings`] holds the tunable request policy, optionally
//! loaded from a TOML file.

mod error;

pub use error::ConfigError;

use crate::fetcher::DEFAULT_PAGE_SIZE;
use crate::rate_limit::{RateLimiter, RetryPolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default export file name.
pub const DEFAULT_OUTPUT_PATH: &str = "my_github_repositories.csv";

/// Request policy settings, read from a kebab-case TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct FetchSettings {
    /// Repositories per listing page (1-100).
    pub per_page: u8,

    /// Minimum spacing between requests, in milliseconds.
    pub request_interval_ms: u64,

    /// Retries after a rate-limit response; 0 aborts immediately.
    pub max_retries: u32,

    /// First backoff after a rate-limit response, in milliseconds.
    pub initial_backoff_ms: u64,

    /// Longest single backoff, in milliseconds.
    pub max_backoff_ms: u64,

    /// API root for GitHub Enterprise installations.
    pub api_base_url: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        let retry = RetryPolicy::default();
        Self {
            per_page: DEFAULT_PAGE_SIZE,
            request_interval_ms: 100,
            max_retries: retry.max_retries,
            initial_backoff_ms: retry.initial_backoff.as_millis() as u64,
            max_backoff_ms: retry.max_backoff.as_millis() as u64,
            api_base_url: None,
        }
    }
}

impl FetchSettings {
    /// Loads and validates settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading fetch settings");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks value ranges and URL syntax.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=DEFAULT_PAGE_SIZE).contains(&self.per_page) {
            return Err(ConfigError::ValidationError {
                key: "per-page".to_string(),
                message: format!("must be between 1 and {DEFAULT_PAGE_SIZE}"),
            });
        }

        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err(ConfigError::ValidationError {
                key: "initial-backoff-ms".to_string(),
                message: "must not exceed max-backoff-ms".to_string(),
            });
        }

        if let Some(base) = &self.api_base_url {
            if Url::parse(base).is_err() {
                return Err(ConfigError::ValidationError {
                    key: "api-base-url".to_string(),
                    message: format!("not a valid URL: {base}"),
                });
            }
        }

        Ok(())
    }

    /// Builds the request pacer.
    #[must_use]
    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(Duration::from_millis(self.request_interval_ms))
    }

    /// Builds the rate-limit retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }
}

/// Configuration for a scraping run.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// User whose repositories are listed.
    username: String,
    /// Personal access token; `None` limits the run to public data.
    token: Option<String>,
    /// Destination of the CSV export.
    output_path: PathBuf,
    /// Request policy.
    settings: FetchSettings,
}

impl ScraperConfig {
    /// Creates a configuration with default output path and settings.
    ///
    /// Blank tokens are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingUsername`] if `username` is blank.
    pub fn new(username: impl Into<String>, token: Option<String>) -> Result<Self, ConfigError> {
        let username = username.into().trim().to_string();
        if username.is_empty() {
            return Err(ConfigError::MissingUsername);
        }

        Ok(Self {
            username,
            token: token.filter(|token| !token.trim().is_empty()),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            settings: FetchSettings::default(),
        })
    }

    /// Sets a custom output path.
    #[must_use]
    pub fn with_output_path(mut self, output_path: PathBuf) -> Self {
        self.output_path = output_path;
        self
    }

    /// Sets the request policy.
    #[must_use]
    pub fn with_settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the configured username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the configured token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the output file path.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Returns the request policy.
    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }
}
