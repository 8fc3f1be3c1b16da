use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::config::Config;
use crate::error::{check_status, Error, Result};
use crate::types::{GitHubSearchResponse, RepoDetail, RepoSummary};

/// The two GitHub REST calls the direct backend needs.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Repositories matching `query`, most-starred first.
    async fn search_repos(&self, query: &str, per_page: usize) -> Result<Vec<RepoSummary>>;

    async fn get_repo(&self, owner: &str, name: &str) -> Result<RepoDetail>;
}

/// `Authorization` value for `token`, marked sensitive so it stays out of debug output.
pub fn bearer(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| Error::Config("GitHub token contains characters not allowed in a header".into()))?;
    value.set_sensitive(true);
    Ok(value)
}

pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = token {
            headers.insert(AUTHORIZATION, bearer(token)?);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("reposearch/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        if config.github_token.is_none() {
            tracing::warn!("No GITHUB_API_TOKEN set; GitHub allows 10 unauthenticated searches per minute");
        }
        Self::new(config.github_api_url(), config.github_token.as_deref())
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn search_repos(&self, query: &str, per_page: usize) -> Result<Vec<RepoSummary>> {
        let url = format!(
            "{}/search/repositories?q={}&sort=stars&order=desc&per_page={}",
            self.base_url,
            urlencoding::encode(query),
            per_page
        );
        tracing::debug!(%url, "searching GitHub");

        let resp = check_status(self.http.get(&url).send().await?).await?;
        let body: GitHubSearchResponse = resp
            .json()
            .await
            .map_err(|e| Error::Payload(format!("search response: {}", e)))?;
        Ok(body.items)
    }

    async fn get_repo(&self, owner: &str, name: &str) -> Result<RepoDetail> {
        let url = format!(
            "{}/repos/{}/{}",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(name)
        );
        tracing::debug!(%url, "fetching repository detail");

        let resp = check_status(self.http.get(&url).send().await?).await?;
        resp.json()
            .await
            .map_err(|e| Error::Payload(format!("detail for {}/{}: {}", owner, name, e)))
    }
}
