use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::github::models::{GithubRepo, GithubUser};

const USER_AGENT: &str = "FocusEdu-GitHubAnalyzer";
const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_TIMEOUT: Duration = Duration::from_secs(10);
const REPO_PAGE_TIMEOUT: Duration = Duration::from_secs(15);
const REPOS_PER_PAGE: usize = 100;
const MAX_REPO_PAGES: u32 = 10;

/// Messages are part of the API contract: route status codes are derived from them.
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub user not found")]
    UserNotFound,

    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Request timeout. Please try again.")]
    Timeout,

    #[error("GitHub API error: {reason} ({status})")]
    Api { status: u16, reason: String },

    #[error("Failed to fetch GitHub user data")]
    UserFetch,

    #[error("Failed to fetch GitHub repositories")]
    RepoFetch,
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().user_agent(USER_AGENT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(&config.github_api_url, config.github_token.clone())
    }

    fn get(&self, url: String, timeout: Duration) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .timeout(timeout)
            .header(header::ACCEPT, ACCEPT);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn fetch_user(&self, username: &str) -> Result<GithubUser, GithubError> {
        let response = self
            .get(format!("{}/users/{username}", self.base_url), USER_TIMEOUT)
            .send()
            .await
            .map_err(|e| request_error(e, GithubError::UserFetch))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(GithubError::UserNotFound),
            StatusCode::FORBIDDEN => return Err(GithubError::RateLimited),
            status if !status.is_success() => return Err(api_error(status)),
            _ => {}
        }

        response
            .json::<GithubUser>()
            .await
            .map_err(|e| request_error(e, GithubError::UserFetch))
    }

    /// Pages through the user's repositories, most recently updated first.
    ///
    /// A 404 ends pagination. Timeouts and rate limits always fail; any other
    /// error returns the repositories collected so far, if there are any.
    pub async fn fetch_repos(&self, username: &str) -> Result<Vec<GithubRepo>, GithubError> {
        let mut repos: Vec<GithubRepo> = Vec::new();

        for page in 1..=MAX_REPO_PAGES {
            match self.fetch_repo_page(username, page).await {
                Ok(None) => break,
                Ok(Some(page_repos)) => {
                    let count = page_repos.len();
                    repos.extend(page_repos);
                    if count < REPOS_PER_PAGE {
                        break;
                    }
                }
                Err(e @ (GithubError::Timeout | GithubError::RateLimited)) => return Err(e),
                Err(e) if !repos.is_empty() => {
                    warn!("Repository page {page} failed, returning partial results: {e}");
                    break;
                }
                Err(e) => {
                    warn!("Repository fetch failed: {e}");
                    return Err(GithubError::RepoFetch);
                }
            }
        }

        debug!("Fetched {} repositories for {username}", repos.len());
        Ok(repos)
    }

    /// `Ok(None)` when the listing does not exist.
    async fn fetch_repo_page(
        &self,
        username: &str,
        page: u32,
    ) -> Result<Option<Vec<GithubRepo>>, GithubError> {
        let url = format!(
            "{}/users/{username}/repos?per_page={REPOS_PER_PAGE}&page={page}&sort=updated",
            self.base_url
        );
        let response = self
            .get(url, REPO_PAGE_TIMEOUT)
            .send()
            .await
            .map_err(|e| request_error(e, GithubError::RepoFetch))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::FORBIDDEN => return Err(GithubError::RateLimited),
            status if !status.is_success() => return Err(api_error(status)),
            _ => {}
        }

        let page_repos = response
            .json::<Vec<GithubRepo>>()
            .await
            .map_err(|e| request_error(e, GithubError::RepoFetch))?;
        Ok((!page_repos.is_empty()).then_some(page_repos))
    }
}

fn request_error(error: reqwest::Error, otherwise: GithubError) -> GithubError {
    if error.is_timeout() {
        GithubError::Timeout
    } else {
        debug!("GitHub request failed: {error}");
        otherwise
    }
}

fn api_error(status: StatusCode) -> GithubError {
    GithubError::Api {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

/// Accepts a profile URL, `github.com/<u>`, `@<u>` or a bare username.
/// Returns `None` when nothing usable remains.
pub fn sanitize_username(raw: &str) -> Option<String> {
    static URL_PREFIX: OnceLock<Regex> = OnceLock::new();
    let url_prefix = URL_PREFIX.get_or_init(|| {
        Regex::new(r"(?i)^(https?://(www\.)?)?github\.com/").expect("static pattern is valid")
    });

    let trimmed = raw.trim();
    let without_host = url_prefix.replace(trimmed, "");
    let first_segment = without_host
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let username = first_segment.strip_prefix('@').unwrap_or(first_segment);

    (!username.is_empty()).then(|| username.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode as StubStatus;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    #[test]
    fn test_sanitize_accepts_common_forms() {
        assert_eq!(sanitize_username("octocat").as_deref(), Some("octocat"));
        assert_eq!(sanitize_username("  @octocat ").as_deref(), Some("octocat"));
        assert_eq!(
            sanitize_username("https://github.com/octocat").as_deref(),
            Some("octocat")
        );
        assert_eq!(
            sanitize_username("HTTP://www.GitHub.com/octocat/hello-world?tab=repos").as_deref(),
            Some("octocat")
        );
        assert_eq!(
            sanitize_username("github.com/octocat#readme").as_deref(),
            Some("octocat")
        );
    }

    #[test]
    fn test_sanitize_rejects_empty() {
        assert_eq!(sanitize_username(""), None);
        assert_eq!(sanitize_username("https://github.com/"), None);
        assert_eq!(sanitize_username("@"), None);
    }

    #[test]
    fn test_error_messages_drive_status_mapping() {
        assert!(GithubError::UserNotFound.to_string().contains("not found"));
        assert!(GithubError::RateLimited.to_string().contains("rate limit"));
        assert_eq!(
            GithubError::Timeout.to_string(),
            "Request timeout. Please try again."
        );
    }

    #[tokio::test]
    async fn test_unreachable_api_reports_fetch_failure() {
        let client = GithubClient::new("http://127.0.0.1:9", None).unwrap();
        assert!(matches!(
            client.fetch_user("octocat").await,
            Err(GithubError::UserFetch)
        ));
        assert!(matches!(
            client.fetch_repos("octocat").await,
            Err(GithubError::RepoFetch)
        ));
    }

    // ── Stub GitHub API ────────────────────────────────────────────────────

    async fn serve_stub(router: Router) -> GithubClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        GithubClient::new(&format!("http://{addr}"), None).unwrap()
    }

    fn repo_page(count: usize) -> Value {
        Value::Array(
            (0..count)
                .map(|i| json!({"name": format!("repo-{i}"), "stargazers_count": 1}))
                .collect(),
        )
    }

    /// Serves a full first page, then answers every later page with `later`.
    fn paged_repos(later: StubStatus) -> Router {
        Router::new().route(
            "/users/:name/repos",
            get(move |Query(params): Query<HashMap<String, String>>| async move {
                let response: Response = if params.get("page").map(String::as_str) == Some("1") {
                    Json(repo_page(REPOS_PER_PAGE)).into_response()
                } else {
                    later.into_response()
                };
                response
            }),
        )
    }

    fn fixed_status(path: &str, status: StubStatus) -> Router {
        Router::new().route(path, get(move || async move { status }))
    }

    #[tokio::test]
    async fn test_failed_later_page_returns_partial_repos() {
        let client = serve_stub(paged_repos(StubStatus::INTERNAL_SERVER_ERROR)).await;
        let repos = client.fetch_repos("octocat").await.unwrap();
        assert_eq!(repos.len(), REPOS_PER_PAGE);
        assert_eq!(repos[0].name, "repo-0");
    }

    #[tokio::test]
    async fn test_repo_listing_404_ends_pagination() {
        let client = serve_stub(paged_repos(StubStatus::NOT_FOUND)).await;
        assert_eq!(client.fetch_repos("octocat").await.unwrap().len(), REPOS_PER_PAGE);

        let client = serve_stub(fixed_status("/users/:name/repos", StubStatus::NOT_FOUND)).await;
        assert!(client.fetch_repos("octocat").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_rate_limit() {
        let client = serve_stub(paged_repos(StubStatus::FORBIDDEN)).await;
        assert!(matches!(
            client.fetch_repos("octocat").await,
            Err(GithubError::RateLimited)
        ));

        let client = serve_stub(fixed_status("/users/:name", StubStatus::FORBIDDEN)).await;
        assert!(matches!(
            client.fetch_user("octocat").await,
            Err(GithubError::RateLimited)
        ));
    }

    #[tokio::test]
    async fn test_first_page_failure_is_repo_fetch_error() {
        let client = serve_stub(fixed_status(
            "/users/:name/repos",
            StubStatus::INTERNAL_SERVER_ERROR,
        ))
        .await;
        assert!(matches!(
            client.fetch_repos("octocat").await,
            Err(GithubError::RepoFetch)
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let client = serve_stub(fixed_status("/users/:name", StubStatus::NOT_FOUND)).await;
        assert!(matches!(
            client.fetch_user("ghost").await,
            Err(GithubError::UserNotFound)
        ));
    }
}
