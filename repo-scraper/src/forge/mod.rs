//! Access to the forge (GitHub) REST API.
//!
//! [`ForgeClient`] abstracts the three endpoints the scraper consumes so the
//! fetch logic can run against [`GitHubForge`] in production and an in-memory
//! fake in tests.

mod error;
mod github;
mod types;

pub use error::ForgeError;
pub use github::GitHubForge;
pub use types::{LanguageBreakdown, ReadmePayload, RepositorySummary};

use async_trait::async_trait;

/// The subset of the forge API used by the scraper.
#[async_trait]
pub trait ForgeClient: Send + Sync {
    /// Fetches one page of `username`'s repositories (`page` is 1-based).
    async fn list_repositories_page(
        &self,
        username: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<RepositorySummary>, ForgeError>;

    /// Fetches the README of `owner/repo`.
    async fn readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, ForgeError>;

    /// Fetches the language breakdown of `owner/repo`.
    async fn languages(&self, owner: &str, repo: &str) -> Result<LanguageBreakdown, ForgeError>;
}
