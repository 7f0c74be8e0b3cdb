#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod category;
pub mod config;
pub mod export;
pub mod fetcher;
pub mod forge;
pub mod normalize;
pub mod rate_limit;
pub mod record;
pub mod runner;
pub mod summary;

pub use category::{classify, Category};
pub use config::{ConfigError, FetchSettings, ScraperConfig, DEFAULT_OUTPUT_PATH};
pub use export::{write_csv, write_records, ExportError};
pub use fetcher::{Fetcher, ReadmeContent, NO_README, README_ERROR};
pub use forge::{
    ForgeClient, ForgeError, GitHubForge, LanguageBreakdown, ReadmePayload, RepositorySummary,
};
pub use normalize::{normalize_readme, README_PREVIEW_LEN};
pub use rate_limit::{RateLimiter, RetryPolicy};
pub use record::OutputRecord;
pub use runner::{Runner, RunnerError};
pub use summary::RunSummary;
