use crate::error::{TrackerError, TrackerResult};
use reqwest::Client;
use reqwest::{StatusCode, Url};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repositories requested from the list endpoint. Only one page is ever read.
pub const REPOS_PER_PAGE: u32 = 100;

/// Language name to byte count, as returned by a repository's `languages_url`.
pub type LanguageBytes = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub languages_url: String,
    pub commits_url: String,
}

/// Public profile of a GitHub user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
}

impl Repository {
    /// Commit list URL with the `{/sha}` template segment stripped.
    pub fn commits_list_url(&self) -> String {
        self.commits_url.replace("{/sha}", "")
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!("stacktrack/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Clone)]
pub struct GithubClient {
    config: Arc<ClientConfig>,
    http: Arc<Client>,
}

impl GithubClient {
    /// Create an unauthenticated REST client.
    pub fn new(config: ClientConfig) -> TrackerResult<Self> {
        let http = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            config: Arc::new(config),
            http: Arc::new(http),
        })
    }

    pub fn api_url(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }

    /// API URL with `segments` appended as percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> TrackerResult<Url> {
        let base = self.api_url();
        let mut url =
            Url::parse(base).map_err(|e| TrackerError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| TrackerError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Low-level GET returning the decoded body. Non-2xx is an error; there is no retry.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> TrackerResult<T> {
        debug!(%url, "GET");

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TrackerError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|source| TrackerError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// List the first page (up to 100) of a user's repositories.
    pub async fn list_repositories(&self, username: &str) -> TrackerResult<Vec<Repository>> {
        if username.is_empty() {
            return Err(TrackerError::EmptyUsername);
        }

        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &REPOS_PER_PAGE.to_string());

        not_found_as_user(self.get_json(url.as_str()).await, username)
    }

    /// Profile of `username`: display name, avatar and follower counts.
    pub async fn user_profile(&self, username: &str) -> TrackerResult<UserProfile> {
        if username.is_empty() {
            return Err(TrackerError::EmptyUsername);
        }

        let url = self.endpoint(&["users", username])?;
        not_found_as_user(self.get_json(url.as_str()).await, username)
    }

    /// Per-language byte breakdown for one repository.
    pub async fn languages(&self, repo: &Repository) -> TrackerResult<LanguageBytes> {
        self.get_json(&repo.languages_url).await
    }

    /// Length of the first commit page requested with `per_page=1`, so 0 or 1.
    ///
    /// This is a proxy rather than a real commit count; it never exceeds 1.
    pub async fn commit_page_len(&self, repo: &Repository) -> TrackerResult<u64> {
        let url = format!("{}?per_page=1", repo.commits_list_url());
        let page: Vec<Value> = self.get_json(&url).await?;
        Ok(page.len() as u64)
    }
}

fn not_found_as_user<T>(result: TrackerResult<T>, username: &str) -> TrackerResult<T> {
    match result {
        Err(TrackerError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
            Err(TrackerError::NotFound(username.to_string()))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(commits_url: &str) -> Repository {
        Repository {
            id: 1,
            name: "hello".to_string(),
            description: None,
            html_url: "https://github.com/octocat/hello".to_string(),
            languages_url: "https://api.github.com/repos/octocat/hello/languages".to_string(),
            commits_url: commits_url.to_string(),
        }
    }

    #[test]
    fn strips_sha_template_from_commits_url() {
        let r = repo("https://api.github.com/repos/octocat/hello/commits{/sha}");
        assert_eq!(
            r.commits_list_url(),
            "https://api.github.com/repos/octocat/hello/commits"
        );
    }

    #[test]
    fn deserializes_repository_with_null_description() {
        let json = serde_json::json!({
            "id": 7,
            "name": "spoon-knife",
            "description": null,
            "html_url": "https://github.com/octocat/spoon-knife",
            "languages_url": "https://api.github.com/repos/octocat/spoon-knife/languages",
            "commits_url": "https://api.github.com/repos/octocat/spoon-knife/commits{/sha}",
            "stargazers_count": 12
        });
        let r: Repository = serde_json::from_value(json).unwrap();
        assert_eq!(r.id, 7);
        assert!(r.description.is_none());
    }

    #[test]
    fn api_url_drops_trailing_slash() {
        let client = GithubClient::new(ClientConfig {
            api_url: "http://localhost:1234/".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();
        assert_eq!(client.api_url(), "http://localhost:1234");
    }

    #[test]
    fn endpoint_encodes_username_segment() {
        let client = GithubClient::new(ClientConfig {
            api_url: "http://localhost:1234".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();
        let url = client.endpoint(&["users", "a/b?x", "repos"]).unwrap();
        assert_eq!(url.path(), "/users/a%2Fb%3Fx/repos");
        assert!(url.query().is_none());
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let client = GithubClient::new(ClientConfig {
            api_url: "https://ghe.example.com/api/v3/".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();
        let url = client.endpoint(&["users", "octocat"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/users/octocat");
    }

    #[test]
    fn invalid_api_url_is_an_error() {
        let client = GithubClient::new(ClientConfig {
            api_url: "not a url".to_string(),
            ..ClientConfig::default()
        })
        .unwrap();
        assert!(matches!(
            client.endpoint(&["users"]),
            Err(TrackerError::InvalidUrl(_))
        ));
    }
}
