use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::config::SiteConfig;

/// GitHub rejects requests without a User-Agent, so send our own.
const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// One repository as returned by the GitHub REST API. Raw fetch results
/// carry no pinned flag; classification happens in `projects` and
/// produces a separate type.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: i64,
    #[serde(default)]
    pub forks_count: i64,
    #[serde(default)]
    pub watchers_count: i64,
    pub html_url: String,
}

#[derive(Debug)]
pub enum FetchError {
    /// Network unreachable, DNS failure, or timeout.
    Transport(String),
    /// Non-2xx response. 403/429 cover the unauthenticated rate limit.
    Http(u16),
    /// Response body was not the expected JSON array.
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport error: {}", msg),
            FetchError::Http(status) => write!(f, "GitHub returned HTTP {}", status),
            FetchError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

/// Build the bounded list endpoint for an account:
/// `<base>/users/<account>/repos?sort=updated&per_page=<N>`
pub fn repos_url(api_base: &str, account: &str, per_page: i64) -> Result<Url, FetchError> {
    let mut url = Url::parse(api_base)
        .map_err(|e| FetchError::Transport(format!("bad API base '{}': {}", api_base, e)))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::Transport(format!("API base '{}' cannot take a path", api_base)))?
        .pop_if_empty()
        .extend(&["users", account, "repos"]);
    url.query_pairs_mut()
        .append_pair("sort", "updated")
        .append_pair("per_page", &per_page.to_string());
    Ok(url)
}

/// Fetch up to `per_page` of the account's public repositories, most
/// recently updated first. One outbound GET, bounded by the configured
/// timeout; the caller decides what a failure means for the panel.
pub fn fetch(cfg: &SiteConfig, per_page: i64) -> Result<Vec<Repo>, FetchError> {
    let url = repos_url(&cfg.github_api_base, &cfg.github_user, per_page)?;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(cfg.fetch_timeout_secs))
        .build()
        .map_err(|e| FetchError::Transport(format!("HTTP client error: {}", e)))?;

    let resp = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.github+json")
        .send()
        .map_err(|e| FetchError::Transport(format!("GitHub request failed: {}", e)))?;

    if !resp.status().is_success() {
        return Err(FetchError::Http(resp.status().as_u16()));
    }

    resp.json::<Vec<Repo>>()
        .map_err(|e| FetchError::Decode(format!("GitHub JSON parse error: {}", e)))
}
