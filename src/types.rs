use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Clone)]
pub struct Owner {
    pub login: String,
}

/// One item of `GET /search/repositories`.
#[derive(Deserialize, Debug, Clone)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub language: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct GitHubSearchResponse {
    pub items: Vec<RepoSummary>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct License {
    pub spdx_id: Option<String>,
    pub name: Option<String>,
}

/// The fields of `GET /repos/{owner}/{repo}` merged onto a summary.
#[derive(Deserialize, Debug, Clone)]
pub struct RepoDetail {
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<License>,
    pub updated_at: Option<DateTime<Utc>>,
    pub watchers_count: u32,
}

/// A repository as shown to the user, whichever backend produced it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub stars: u32,
    pub forks: u32,
    pub watchers: u32,
    pub language: Option<String>,
    pub license: Option<String>,
    pub topics: Vec<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SearchResult {
    /// Summary overwritten with the detail fields.
    pub fn enriched(summary: RepoSummary, detail: RepoDetail) -> Self {
        let license = detail.license.and_then(|l| l.spdx_id.or(l.name));
        Self {
            name: summary.name,
            full_name: Some(summary.full_name),
            description: summary.description,
            url: summary.html_url,
            stars: summary.stargazers_count,
            forks: summary.forks_count,
            watchers: detail.watchers_count,
            language: summary.language,
            license,
            topics: detail.topics,
            updated_at: detail.updated_at,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ProxySearchRequest<'a> {
    pub query: &'a str,
}

/// A record from the backend search service. Anything beyond these fields is dropped.
#[derive(Deserialize, Debug, Clone)]
pub struct ProxyRecord {
    pub name: String,
    pub description: Option<String>,
    pub forks: u32,
    pub stars: u32,
    pub watchers: u32,
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct ProxySearchResponse {
    pub results: Vec<ProxyRecord>,
}

impl From<ProxyRecord> for SearchResult {
    fn from(record: ProxyRecord) -> Self {
        Self {
            name: record.name,
            full_name: None,
            description: record.description,
            url: record.url,
            stars: record.stars,
            forks: record.forks,
            watchers: record.watchers,
            language: None,
            license: None,
            topics: Vec::new(),
            updated_at: None,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: Option<f64>,
}

/// One CSV row after validation, in the ingestion wire format.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UploadRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "Stars")]
    pub stars: String,
    #[serde(rename = "Forks")]
    pub forks: String,
    #[serde(rename = "Issues")]
    pub issues: String,
    #[serde(rename = "Watchers")]
    pub watchers: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Topics")]
    pub topics: Vec<String>,
}
