//! Paced, rate-limit-aware access to a user's repositories.
//!
//! The [`Fetcher`] wraps a [`ForgeClient`] with the scraper's policies:
//! every request goes through the [`RateLimiter`], rate-limit responses are
//! retried per the [`RetryPolicy`], and README/language failures degrade to
//! placeholder values instead of errors.

mod readme;

pub use readme::{ReadmeContent, NO_README, README_ERROR};

use crate::forge::{ForgeClient, ForgeError, LanguageBreakdown, RepositorySummary};
use crate::rate_limit::{RateLimiter, RetryPolicy};
use std::future::Future;
use tracing::{debug, info, info_span, warn, Instrument};

/// Repositories requested per listing page.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Fetches repository data for a single user.
pub struct Fetcher<C> {
    client: C,
    username: String,
    per_page: u8,
    limiter: RateLimiter,
    retry: RetryPolicy,
}

impl<C: ForgeClient> Fetcher<C> {
    /// Creates a fetcher with default pacing, retries and page size.
    pub fn new(client: C, username: impl Into<String>) -> Self {
        Self {
            client,
            username: username.into(),
            per_page: DEFAULT_PAGE_SIZE,
            limiter: RateLimiter::default(),
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the request pacing.
    #[must_use]
    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// Sets the rate-limit retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the listing page size, clamped to `1..=100`.
    #[must_use]
    pub fn with_page_size(mut self, per_page: u8) -> Self {
        self.per_page = per_page.clamp(1, DEFAULT_PAGE_SIZE);
        self
    }

    /// Returns the user whose repositories are fetched.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Lists all repositories of the user, in API order.
    ///
    /// Pages are requested until one comes back shorter than the page size.
    ///
    /// # Errors
    ///
    /// Returns the first [`ForgeError`] that survives the retry policy.
    /// Pages fetched before the failure are discarded.
    pub async fn list_repositories(&self) -> Result<Vec<RepositorySummary>, ForgeError> {
        let span = info_span!("list_repositories", username = %self.username);

        async {
            let mut repositories = Vec::new();
            let mut page = 1u32;

            loop {
                let batch = self
                    .request(|| {
                        self.client
                            .list_repositories_page(&self.username, page, self.per_page)
                    })
                    .await?;

                let received = batch.len();
                repositories.extend(batch);
                debug!(page, received, total = repositories.len(), "Fetched repository page");

                if received < usize::from(self.per_page) {
                    break;
                }
                page += 1;
            }

            info!(count = repositories.len(), pages = page, "Listed repositories");
            Ok(repositories)
        }
        .instrument(span)
        .await
    }

    /// Fetches a README preview for `repo`.
    ///
    /// Never fails: a missing README yields [`ReadmeContent::NotFound`] and
    /// any other failure is logged and yields [`ReadmeContent::Unavailable`].
    pub async fn fetch_readme(&self, repo: &str) -> ReadmeContent {
        let result = self
            .request(|| self.client.readme(&self.username, repo))
            .await
            .and_then(|payload| ReadmeContent::from_payload(&payload));

        match result {
            Ok(content) => content,
            Err(ForgeError::NotFound) => {
                debug!(repo, "Repository has no README");
                ReadmeContent::NotFound
            }
            Err(e) => {
                warn!(repo, error = %e, "Failed to fetch README");
                ReadmeContent::Unavailable
            }
        }
    }

    /// Fetches the language breakdown for `repo`.
    ///
    /// Never fails: any error yields an empty breakdown.
    pub async fn fetch_languages(&self, repo: &str) -> LanguageBreakdown {
        match self
            .request(|| self.client.languages(&self.username, repo))
            .await
        {
            Ok(languages) => languages,
            Err(e) => {
                warn!(repo, error = %e, "Failed to fetch languages");
                LanguageBreakdown::default()
            }
        }
    }

    /// Sends one paced request, retrying rate-limit responses.
    async fn request<T, F, Fut>(&self, call: F) -> Result<T, ForgeError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ForgeError>>,
    {
        let mut attempt = 0;
        loop {
            self.limiter.acquire().await;
            match call().await {
                Err(e) if e.is_rate_limited() => {
                    if !self.retry.wait(attempt).await {
                        return Err(e);
                    }
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
