//! Orchestrates a scraping run.

mod error;

pub use error::RunnerError;

use crate::category::classify;
use crate::config::ScraperConfig;
use crate::export::write_csv;
use crate::fetcher::Fetcher;
use crate::forge::{ForgeClient, GitHubForge, RepositorySummary};
use crate::record::OutputRecord;
use crate::summary::RunSummary;
use tracing::{error, info, info_span, warn, Instrument};

/// Drives the fetcher over every repository of the configured user.
pub struct Runner<C = GitHubForge> {
    config: ScraperConfig,
    fetcher: Fetcher<C>,
}

impl Runner<GitHubForge> {
    /// Builds a runner talking to the GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the settings are invalid or the client
    /// cannot be constructed.
    pub fn new(config: ScraperConfig) -> Result<Self, RunnerError> {
        config.settings().validate()?;
        let forge = GitHubForge::new(config.token(), config.settings().api_base_url.as_deref())?;
        Ok(Self::with_client(config, forge))
    }
}

impl<C: ForgeClient> Runner<C> {
    /// Builds a runner over an arbitrary forge client.
    pub fn with_client(config: ScraperConfig, client: C) -> Self {
        let settings = config.settings();
        let fetcher = Fetcher::new(client, config.username())
            .with_page_size(settings.per_page)
            .with_rate_limiter(settings.rate_limiter())
            .with_retry_policy(settings.retry_policy());
        Self { config, fetcher }
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Returns the fetcher used by this runner.
    pub fn fetcher(&self) -> &Fetcher<C> {
        &self.fetcher
    }

    /// Fetches and classifies every repository, in listing order.
    ///
    /// Each listed repository yields exactly one record; README and language
    /// failures only degrade the affected columns.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Listing`] if the repositories cannot be listed.
    pub async fn collect_records(&self) -> Result<Vec<OutputRecord>, RunnerError> {
        info!(username = %self.config.username(), "Fetching repositories");
        if self.config.token().is_none() {
            warn!("No token configured; only public repositories are visible and rate limits are lower");
        }

        let repositories = self.fetcher.list_repositories().await.map_err(|e| {
            error!(error = %e, "Failed to list repositories");
            RunnerError::Listing(e)
        })?;

        if repositories.is_empty() {
            warn!("No repositories found");
            return Ok(Vec::new());
        }

        let total = repositories.len();
        info!(count = total, "Found repositories, processing");

        let mut records = Vec::with_capacity(total);
        for (index, repo) in repositories.into_iter().enumerate() {
            records.push(process_repository(&self.fetcher, repo, index + 1, total).await);
        }

        Ok(records)
    }

    /// Executes the full run: collect records, write the CSV export.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if listing or exporting fails.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let records = self.collect_records().await?;
        write_csv(self.config.output_path(), &records)?;

        let summary = RunSummary::from_records(&records);
        info!(
            path = %self.config.output_path().display(),
            total = summary.repositories_processed,
            "Scraping completed"
        );
        Ok(summary)
    }
}

async fn process_repository<C: ForgeClient>(
    fetcher: &Fetcher<C>,
    repo: RepositorySummary,
    index: usize,
    total: usize,
) -> OutputRecord {
    let span = info_span!("repository", name = %repo.name, index, total);

    async {
        info!("Processing {index}/{total}: {}", repo.name);

        let readme = fetcher.fetch_readme(&repo.name).await;
        let languages = fetcher.fetch_languages(&repo.name).await;
        let category = classify(
            repo.language.as_deref(),
            &repo.topics,
            repo.description.as_deref(),
            &repo.name,
        );

        OutputRecord::new(repo, readme, &languages, category)
    }
    .instrument(span)
    .await
}
