//! [`ForgeClient`] implementation backed by octocrab.

use super::{ForgeClient, ForgeError, LanguageBreakdown, ReadmePayload, RepositorySummary};
use crate::normalize::truncate_chars;
use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Public GitHub API root.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Longest error body kept when the body is not a GitHub error document.
const MAX_ERROR_BODY: usize = 200;

/// Query string for the user repository listing.
#[derive(Debug)]
struct ListParams {
    page: u32,
    per_page: u8,
}

impl ListParams {
    fn query(&self) -> String {
        format!(
            "page={}&per_page={}&sort=updated&direction=desc",
            self.page, self.per_page
        )
    }
}

/// GitHub error document, e.g. `{"message": "Bad credentials"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// GitHub REST API client.
///
/// octocrab's own retry layer is disabled: pacing and retries belong to the
/// [`Fetcher`](crate::fetcher::Fetcher), and every request it issues goes out
/// exactly once.
#[derive(Debug, Clone)]
pub struct GitHubForge {
    octocrab: Octocrab,
    api_base: String,
}

impl GitHubForge {
    /// Builds a client, authenticated when `token` is given.
    ///
    /// Without a token only public data is visible and the unauthenticated
    /// rate limit applies.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_base_url` is not a valid URI or the HTTP
    /// client cannot be constructed.
    pub fn new(token: Option<&str>, api_base_url: Option<&str>) -> Result<Self, octocrab::Error> {
        // ring and aws-lc-rs can both be linked in; rustls needs one chosen.
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None);
        if let Some(token) = token {
            builder = builder.personal_token(token.to_string());
        }
        let api_base = api_base_url.unwrap_or(DEFAULT_API_BASE);
        builder = builder.base_uri(api_base.to_string())?;

        Ok(Self {
            octocrab: builder.build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Sends a GET to `route` and decodes a successful JSON body.
    ///
    /// The status is checked before the body is parsed, so non-JSON error
    /// pages (e.g. from a proxy) still map by status.
    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T, ForgeError> {
        let uri = format!("{}{route}", self.api_base);
        let response = self.octocrab._get(uri).await.map_err(map_error)?;
        let status = response.status();
        let body = self
            .octocrab
            .body_to_string(response)
            .await
            .map_err(map_error)?;

        if !status.is_success() {
            return Err(ForgeError::from_status(status.as_u16(), error_message(&body)));
        }

        serde_json::from_str(&body).map_err(|e| ForgeError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ForgeClient for GitHubForge {
    async fn list_repositories_page(
        &self,
        username: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<RepositorySummary>, ForgeError> {
        let params = ListParams { page, per_page };
        let route = format!("/users/{username}/repos?{}", params.query());
        debug!(route = %route, "Requesting repository page");

        self.get_json(&route).await
    }

    async fn readme(&self, owner: &str, repo: &str) -> Result<ReadmePayload, ForgeError> {
        let route = format!("/repos/{owner}/{repo}/readme");
        debug!(route = %route, "Requesting README");

        self.get_json(&route).await
    }

    async fn languages(&self, owner: &str, repo: &str) -> Result<LanguageBreakdown, ForgeError> {
        let route = format!("/repos/{owner}/{repo}/languages");
        debug!(route = %route, "Requesting languages");

        let languages: HashMap<String, u64> = self.get_json(&route).await?;
        Ok(LanguageBreakdown::new(languages))
    }
}

/// Extracts the message of an error response.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => error.message,
        Err(_) => truncate_chars(body.trim(), MAX_ERROR_BODY).to_string(),
    }
}

/// Converts a transport-level octocrab error into the scraper's taxonomy.
fn map_error(error: octocrab::Error) -> ForgeError {
    match error {
        octocrab::Error::GitHub { source, .. } => {
            ForgeError::from_status(source.status_code.as_u16(), source.message.clone())
        }
        other => ForgeError::Network(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{Fetcher, ReadmeContent};
    use crate::rate_limit::{RateLimiter, RetryPolicy};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Canned reply for requests whose path contains `prefix`.
    struct Route {
        prefix: &'static str,
        status: u16,
        content_type: &'static str,
        body: &'static str,
    }

    const fn json(prefix: &'static str, status: u16, body: &'static str) -> Route {
        Route {
            prefix,
            status,
            content_type: "application/json",
            body,
        }
    }

    /// Minimal HTTP/1.1 server that answers one request per connection and
    /// records each request line.
    struct StubServer {
        base: String,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl StubServer {
        async fn start(routes: Vec<Route>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let base = format!("http://{}", listener.local_addr().unwrap());
            let requests = Arc::new(Mutex::new(Vec::new()));
            let log = Arc::clone(&requests);

            tokio::spawn(async move {
                while let Ok((mut socket, _)) = listener.accept().await {
                    let mut head = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => head.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&head).to_string();
                    let line = head.lines().next().unwrap_or_default().to_string();
                    log.lock().unwrap().push(line.clone());

                    let (status, content_type, body) = routes
                        .iter()
                        .find(|route| line.contains(route.prefix))
                        .map_or((404, "application/json", r#"{"message":"Not Found"}"#), |route| {
                            (route.status, route.content_type, route.body)
                        });
                    let response = format!(
                        "HTTP/1.1 {status} Stub\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
            });

            Self { base, requests }
        }

        fn forge(&self) -> GitHubForge {
            GitHubForge::new(None, Some(&self.base)).unwrap()
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    fn single_shot(forge: GitHubForge) -> Fetcher<GitHubForge> {
        Fetcher::new(forge, "octocat")
            .with_rate_limiter(RateLimiter::unlimited())
            .with_retry_policy(RetryPolicy::no_retry())
    }

    #[test]
    fn list_query_uses_update_order() {
        let params = ListParams {
            page: 3,
            per_page: 100,
        };
        assert_eq!(
            params.query(),
            "page=3&per_page=100&sort=updated&direction=desc"
        );
    }

    #[test]
    fn error_message_prefers_github_document() {
        assert_eq!(error_message(r#"{"message":"Bad credentials"}"#), "Bad credentials");
        assert_eq!(error_message("  <html>Bad Gateway</html>\n"), "<html>Bad Gateway</html>");
        assert_eq!(error_message(&"x".repeat(1000)).len(), MAX_ERROR_BODY);
    }

    #[tokio::test]
    async fn can_build_anonymous_client() {
        assert!(GitHubForge::new(None, None).is_ok());
    }

    #[tokio::test]
    async fn can_build_client_for_enterprise_host() {
        let forge = GitHubForge::new(Some("ghp_example"), Some("https://ghe.example.com/api/v3/"))
            .unwrap();
        assert_eq!(forge.api_base, "https://ghe.example.com/api/v3");
    }

    #[tokio::test]
    async fn lists_and_decodes_repositories() {
        let server = StubServer::start(vec![json(
            "/users/octocat/repos",
            200,
            r#"[{"name":"hello","language":"Rust","topics":["cli"]}]"#,
        )])
        .await;
        let fetcher = single_shot(server.forge());

        let repos = fetcher.list_repositories().await.unwrap();

        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "hello");
        assert_eq!(repos[0].topics, vec!["cli"]);
        assert_eq!(
            server.requests(),
            ["GET /users/octocat/repos?page=1&per_page=100&sort=updated&direction=desc HTTP/1.1"]
        );
    }

    #[tokio::test]
    async fn rate_limited_listing_is_sent_once_without_retries() {
        let server =
            StubServer::start(vec![json("/users/", 429, r#"{"message":"slow down"}"#)]).await;
        let fetcher = single_shot(server.forge());

        let result = fetcher.list_repositories().await;

        assert!(matches!(result, Err(ForgeError::RateLimited { message }) if message == "slow down"));
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn server_errors_are_not_resent() {
        let server = StubServer::start(vec![
            json("/readme", 500, r#"{"message":"boom"}"#),
            json("/languages", 503, r#"{"message":"unavailable"}"#),
        ])
        .await;
        let fetcher = single_shot(server.forge());

        assert_eq!(fetcher.fetch_readme("proj").await, ReadmeContent::Unavailable);
        assert!(fetcher.fetch_languages("proj").await.is_empty());
        assert_eq!(
            server.requests(),
            [
                "GET /repos/octocat/proj/readme HTTP/1.1",
                "GET /repos/octocat/proj/languages HTTP/1.1",
            ]
        );
    }

    #[tokio::test]
    async fn missing_readme_maps_to_not_found() {
        let server = StubServer::start(Vec::new()).await;
        let fetcher = single_shot(server.forge());

        assert_eq!(fetcher.fetch_readme("proj").await, ReadmeContent::NotFound);
    }

    #[tokio::test]
    async fn non_json_error_pages_keep_their_status() {
        let server = StubServer::start(vec![
            Route {
                prefix: "/readme",
                status: 502,
                content_type: "text/html",
                body: "<html>Bad Gateway</html>",
            },
            Route {
                prefix: "/languages",
                status: 429,
                content_type: "text/html",
                body: "<html>Too Many Requests</html>",
            },
        ])
        .await;
        let forge = server.forge();

        let readme = forge.readme("octocat", "proj").await;
        assert!(matches!(readme, Err(ForgeError::UnexpectedStatus { status: 502, .. })));

        let languages = forge.languages("octocat", "proj").await;
        assert!(matches!(languages, Err(ForgeError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let server = StubServer::start(vec![json("/languages", 200, "not json")]).await;

        let result = server.forge().languages("octocat", "proj").await;

        assert!(matches!(result, Err(ForgeError::Decode(_))));
    }
}
