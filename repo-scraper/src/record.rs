//! Flattened per-repository export rows.

use crate::category::Category;
use crate::fetcher::ReadmeContent;
use crate::forge::{LanguageBreakdown, RepositorySummary};
use serde::Serialize;

/// Separator used for list-valued columns.
const LIST_SEPARATOR: &str = ", ";

/// One exported row.
///
/// Field order is the column order of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub name: String,
    pub description: Option<String>,
    pub readme_content: ReadmeContent,
    pub url: String,
    pub clone_url: String,
    pub ssh_url: String,
    pub homepage: Option<String>,
    /// Primary language from the listing, not the language breakdown.
    pub language: Option<String>,
    pub languages_used: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub size_kb: u64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub is_private: bool,
    pub is_fork: bool,
    pub is_archived: bool,
    pub has_issues: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub open_issues_count: u64,
    pub default_branch: Option<String>,
    pub category: Category,
    pub topics: String,
}

impl OutputRecord {
    /// Column names, in export order.
    pub const HEADERS: [&'static str; 26] = [
        "name",
        "description",
        "readme_content",
        "url",
        "clone_url",
        "ssh_url",
        "homepage",
        "language",
        "languages_used",
        "stars",
        "forks",
        "watchers",
        "size_kb",
        "created_at",
        "updated_at",
        "pushed_at",
        "is_private",
        "is_fork",
        "is_archived",
        "has_issues",
        "has_wiki",
        "has_pages",
        "open_issues_count",
        "default_branch",
        "category",
        "topics",
    ];

    /// Merges a repository with its fetched and derived data.
    #[must_use]
    pub fn new(
        repo: RepositorySummary,
        readme: ReadmeContent,
        languages: &LanguageBreakdown,
        category: Category,
    ) -> Self {
        Self {
            languages_used: languages.names().collect::<Vec<_>>().join(LIST_SEPARATOR),
            topics: repo.topics.join(LIST_SEPARATOR),
            name: repo.name,
            description: repo.description,
            readme_content: readme,
            url: repo.html_url,
            clone_url: repo.clone_url,
            ssh_url: repo.ssh_url,
            homepage: repo.homepage,
            language: repo.language,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            watchers: repo.watchers_count,
            size_kb: repo.size,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at: repo.pushed_at,
            is_private: repo.private,
            is_fork: repo.fork,
            is_archived: repo.archived,
            has_issues: repo.has_issues,
            has_wiki: repo.has_wiki,
            has_pages: repo.has_pages,
            open_issues_count: repo.open_issues_count,
            default_branch: repo.default_branch,
            category,
        }
    }
}
