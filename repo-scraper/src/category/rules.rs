//! Ordered classification rules.

use super::Category;

/// Condition under which a [`Rule`] fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Primary language is listed, or any keyword occurs.
    LanguageOrKeyword,
    /// Primary language is listed and a keyword occurs.
    LanguageAndKeyword,
    /// Any keyword occurs; languages are ignored.
    Keyword,
}

/// One entry of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub trigger: Trigger,
    /// Primary languages, compared case-insensitively.
    pub languages: &'static [&'static str],
    /// Lowercase substrings searched in topics, description and name.
    pub keywords: &'static [&'static str],
}

impl Rule {
    fn matches(&self, language: Option<&str>, haystack: &str) -> bool {
        let language_hit = language.is_some_and(|language| {
            self.languages
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(language))
        });
        let keyword_hit = self.keywords.iter().any(|keyword| haystack.contains(keyword));

        match self.trigger {
            Trigger::LanguageOrKeyword => language_hit || keyword_hit,
            Trigger::LanguageAndKeyword => language_hit && keyword_hit,
            Trigger::Keyword => keyword_hit,
        }
    }
}

/// Classification rules; the first match wins.
pub const RULES: &[Rule] = &[
    Rule {
        category: Category::WebDevelopment,
        trigger: Trigger::LanguageOrKeyword,
        languages: &["JavaScript", "TypeScript", "HTML", "CSS"],
        keywords: &["react", "vue", "angular", "website", "frontend"],
    },
    Rule {
        category: Category::MobileDevelopment,
        trigger: Trigger::LanguageOrKeyword,
        languages: &["Swift", "Kotlin", "Dart"],
        keywords: &["android", "ios", "mobile", "flutter"],
    },
    Rule {
        category: Category::DataScience,
        trigger: Trigger::LanguageAndKeyword,
        languages: &["Python", "R"],
        keywords: &[
            "ml",
            "machine-learning",
            "data-science",
            "jupyter",
            "notebook",
            "pandas",
            "tensorflow",
        ],
    },
    Rule {
        category: Category::ApiBackend,
        trigger: Trigger::Keyword,
        languages: &[],
        keywords: &["api", "backend", "server", "database", "rest"],
    },
    Rule {
        category: Category::ToolsUtilities,
        trigger: Trigger::Keyword,
        languages: &[],
        keywords: &["script", "tool", "cli", "automation", "utility"],
    },
    Rule {
        category: Category::LearningTutorial,
        trigger: Trigger::Keyword,
        languages: &[],
        keywords: &["tutorial", "learning", "course", "example", "demo"],
    },
];

/// Assigns a category to a repository.
///
/// Keywords are matched case-insensitively as substrings of the topics,
/// description and repository name. Falls back to [`Category::Other`].
#[must_use]
pub fn classify(
    primary_language: Option<&str>,
    topics: &[String],
    description: Option<&str>,
    repo_name: &str,
) -> Category {
    let haystack = build_haystack(topics, description, repo_name);

    RULES
        .iter()
        .find(|rule| rule.matches(primary_language, &haystack))
        .map_or(Category::Other, |rule| rule.category)
}

fn build_haystack(topics: &[String], description: Option<&str>, repo_name: &str) -> String {
    let mut parts: Vec<&str> = topics.iter().map(String::as_str).collect();
    parts.extend(description);
    parts.push(repo_name);
    parts.join(" ").to_lowercase()
}
