//! In-memory forge used by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use repo_scraper::{ForgeClient, ForgeError, LanguageBreakdown, ReadmePayload, RepositorySummary};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Canned response of the fake forge.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16),
    Network,
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<T, ForgeError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status) => Err(ForgeError::from_status(*status, "fake failure")),
            Reply::Network => Err(ForgeError::Network("connection reset".to_string())),
        }
    }
}

/// Forge that replays canned responses and records every request.
///
/// Listing pages are consumed in order; once exhausted an empty page is
/// returned. READMEs default to 404 and languages to an empty breakdown.
#[derive(Default)]
pub struct FakeForge {
    pages: Mutex<VecDeque<Reply<Vec<RepositorySummary>>>>,
    readmes: HashMap<String, Reply<ReadmePayload>>,
    languages: HashMap<String, Reply<Vec<(String, u64)>>>,
    requests: Mutex<Vec<String>>,
}

impl FakeForge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, reply: Reply<Vec<RepositorySummary>>) -> Self {
        self.pages.lock().unwrap().push_back(reply);
        self
    }

    /// Queues pages of generated repositories with the given sizes.
    pub fn with_page_sizes(mut self, sizes: &[usize]) -> Self {
        let mut next = 0;
        for &size in sizes {
            let page = (next..next + size).map(|i| repo(&format!("repo-{i}"))).collect();
            next += size;
            self = self.with_page(Reply::Ok(page));
        }
        self
    }

    pub fn with_readme_text(mut self, name: &str, text: &str) -> Self {
        self.readmes
            .insert(name.to_string(), Reply::Ok(encoded_readme(text)));
        self
    }

    pub fn with_readme(mut self, name: &str, reply: Reply<ReadmePayload>) -> Self {
        self.readmes.insert(name.to_string(), reply);
        self
    }

    pub fn with_languages(mut self, name: &str, reply: Reply<Vec<(String, u64)>>) -> Self {
        self.languages.insert(name.to_string(), reply);
        self
    }

    /// Every request, formatted as `kind:target`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of listing pages requested.
    pub fn page_requests(&self) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.starts_with("page:"))
            .count()
    }

    fn log(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }
}

#[async_trait]
impl ForgeClient for FakeForge {
    async fn list_repositories_page(
        &self,
        username: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<RepositorySummary>, ForgeError> {
        self.log(format!("page:{username}:{page}:{per_page}"));
        let reply = self.pages.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.produce(),
            None => Ok(Vec::new()),
        }
    }

    async fn readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, ForgeError> {
        self.log(format!("readme:{owner}/{repo}"));
        match self.readmes.get(repo) {
            Some(reply) => reply.produce(),
            None => Err(ForgeError::NotFound),
        }
    }

    async fn languages(&self, owner: &str, repo: &str) -> Result<LanguageBreakdown, ForgeError> {
        self.log(format!("languages:{owner}/{repo}"));
        match self.languages.get(repo) {
            Some(reply) => reply.produce().map(LanguageBreakdown::new),
            None => Ok(LanguageBreakdown::default()),
        }
    }
}

pub fn repo(name: &str) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        html_url: format!("https://github.com/octocat/{name}"),
        clone_url: format!("https://github.com/octocat/{name}.git"),
        ssh_url: format!("git@github.com:octocat/{name}.git"),
        default_branch: Some("main".to_string()),
        created_at: Some("2020-01-01T00:00:00Z".to_string()),
        updated_at: Some("2024-06-01T12:00:00Z".to_string()),
        has_issues: true,
        ..Default::default()
    }
}

pub fn encoded_readme(text: &str) -> ReadmePayload {
    ReadmePayload {
        content: STANDARD.encode(text),
        encoding: Some("base64".to_string()),
    }
}

pub fn languages(entries: &[(&str, u64)]) -> Vec<(String, u64)> {
    entries
        .iter()
        .map(|(name, bytes)| (name.to_string(), *bytes))
        .collect()
}
