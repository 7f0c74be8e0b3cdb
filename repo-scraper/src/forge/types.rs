//! Payloads returned by the forge API.

use serde::Deserialize;

/// A repository as returned by the user repository listing.
///
/// Only the fields that end up in the exported catalogue are kept.
/// Everything optional on the API side is optional here too, so a sparse
/// payload never fails the whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositorySummary {
    /// Repository name (without owner).
    pub name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Web URL of the repository.
    #[serde(default)]
    pub html_url: String,

    /// HTTPS clone URL.
    #[serde(default)]
    pub clone_url: String,

    /// SSH clone URL.
    #[serde(default)]
    pub ssh_url: String,

    /// Project homepage.
    #[serde(default)]
    pub homepage: Option<String>,

    /// Primary language detected by the forge.
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub stargazers_count: u64,

    #[serde(default)]
    pub forks_count: u64,

    #[serde(default)]
    pub watchers_count: u64,

    #[serde(default)]
    pub open_issues_count: u64,

    /// Repository size in kilobytes.
    #[serde(default)]
    pub size: u64,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub fork: bool,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub has_issues: bool,

    #[serde(default)]
    pub has_wiki: bool,

    #[serde(default)]
    pub has_pages: bool,

    /// ISO-8601 timestamps, kept verbatim.
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub pushed_at: Option<String>,

    /// Default branch name (e.g., "main").
    #[serde(default)]
    pub default_branch: Option<String>,

    /// Topic labels attached to the repository.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Body of the README endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReadmePayload {
    /// Encoded file content.
    #[serde(default)]
    pub content: String,

    /// Encoding of `content`, normally `"base64"`.
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Languages used by a repository, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBreakdown {
    entries: Vec<(String, u64)>,
}

impl LanguageBreakdown {
    /// Builds a breakdown from `(language, bytes)` pairs.
    ///
    /// Entries are ordered by byte count, descending, with ties broken by name.
    pub fn new(entries: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    /// Language names in breakdown order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Bytes attributed to `language`, if present.
    #[must_use]
    pub fn bytes(&self, language: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, bytes)| *bytes)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
