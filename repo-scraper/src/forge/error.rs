//! Forge API error types.

use thiserror::Error;

/// Errors returned by a [`ForgeClient`](super::ForgeClient).
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Bad or missing credentials for a resource that requires them.
    #[error("Authentication failed (HTTP {status}): {message}")]
    AuthFailed { status: u16, message: String },

    /// The API quota is exhausted.
    #[error("Rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// The requested resource does not exist.
    #[error("Resource not found")]
    NotFound,

    /// Any other non-success status.
    #[error("Unexpected HTTP status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// Transport-level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed payload.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ForgeError {
    /// Maps an HTTP error status and message to an error kind.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::AuthFailed { status, message },
            429 => Self::RateLimited { message },
            403 if message.to_lowercase().contains("rate limit") => Self::RateLimited { message },
            403 => Self::AuthFailed { status, message },
            404 => Self::NotFound,
            _ => Self::UnexpectedStatus { status, message },
        }
    }

    /// Returns true if waiting and retrying may succeed.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
