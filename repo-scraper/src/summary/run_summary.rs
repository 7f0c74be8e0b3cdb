//! Run summary types.

use crate::category::Category;
use crate::fetcher::ReadmeContent;
use crate::record::OutputRecord;
use std::collections::BTreeMap;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of repositories exported.
    pub repositories_processed: usize,

    /// Repositories with a README preview.
    pub readmes_found: usize,

    /// Repositories without a README.
    pub readmes_missing: usize,

    /// Repositories whose README could not be fetched or decoded.
    pub readmes_failed: usize,

    /// Repositories with no language breakdown.
    pub without_languages: usize,

    /// Repository count per category.
    pub categories: BTreeMap<Category, usize>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a summary over exported records.
    #[must_use]
    pub fn from_records(records: &[OutputRecord]) -> Self {
        let mut summary = Self::new();
        for record in records {
            summary.record(record);
        }
        summary
    }

    /// Updates the summary with one record.
    pub fn record(&mut self, record: &OutputRecord) {
        self.repositories_processed += 1;
        match record.readme_content {
            ReadmeContent::Preview(_) => self.readmes_found += 1,
            ReadmeContent::NotFound => self.readmes_missing += 1,
            ReadmeContent::Unavailable => self.readmes_failed += 1,
        }
        if record.languages_used.is_empty() {
            self.without_languages += 1;
        }
        *self.categories.entry(record.category).or_default() += 1;
    }

    /// Returns true if any README could not be retrieved.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.readmes_failed > 0
    }
}
