//! CLI for the repository scraper.
//!
//! Lists a GitHub user's repositories, fetches README previews and language
//! breakdowns, classifies each repository and writes the catalogue to CSV.

use clap::Parser;
use repo_scraper::{
    Category, FetchSettings, RunSummary, Runner, RunnerError, ScraperConfig, DEFAULT_OUTPUT_PATH,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Repo Scraper - Export a GitHub user's repositories, READMEs and categories to CSV.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub username whose repositories are exported.
    #[arg(long, env = "GITHUB_USERNAME")]
    username: String,

    /// GitHub Personal Access Token (optional; enables private repositories and higher limits).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Path of the CSV file to write.
    #[arg(long, short, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Path to a TOML file with request settings (page size, pacing, retries).
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up GITHUB_USERNAME / GITHUB_TOKEN from a local .env file, if any.
    let _ = dotenvy::dotenv();

    init_tracing();

    let args = Args::parse();

    let result = run(args).await;
    match &result {
        Ok(summary) => print_summary(summary),
        Err(RunnerError::Listing(e)) => {
            error!(error = %e, "Could not list repositories, nothing was exported");
        }
        Err(e) => error!(error = %e, "Critical failure"),
    }

    ExitCode::from(exit_status(&result))
}

/// Maps the run outcome to the process exit status.
///
/// - `0`: export written
/// - `1`: repositories could not be listed
/// - `2`: configuration, client or export failure
fn exit_status(result: &Result<RunSummary, RunnerError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(RunnerError::Listing(_)) => 1,
        Err(_) => 2,
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let settings = match &args.settings {
        Some(path) => FetchSettings::load(path)?,
        None => FetchSettings::default(),
    };

    let config = ScraperConfig::new(args.username, args.token)?
        .with_output_path(args.output)
        .with_settings(settings);

    let runner = Runner::new(config)?;
    let summary = runner.run().await?;
    println!(
        "\nScraping completed! Data saved to {}",
        runner.config().output_path().display()
    );
    Ok(summary)
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Total repositories processed: {}",
        summary.repositories_processed
    );
    println!("  READMEs found: {}", summary.readmes_found);
    println!("  READMEs missing: {}", summary.readmes_missing);
    println!("  READMEs failed: {}", summary.readmes_failed);
    println!("  Without language data: {}", summary.without_languages);
    if summary.has_failures() {
        println!("  Note: some READMEs could not be fetched; see the log for details.");
    }

    if !summary.categories.is_empty() {
        println!("  Categories:");
        for category in Category::ALL {
            if let Some(count) = summary.categories.get(&category) {
                println!("    {category}: {count}");
            }
        }
    }
}
