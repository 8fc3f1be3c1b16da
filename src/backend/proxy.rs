use async_trait::async_trait;

use super::SearchBackend;
use crate::error::{check_status, Error, Result};
use crate::search::Query;
use crate::types::{HealthReport, ProxySearchRequest, ProxySearchResponse, SearchResult};

/// Forwards queries to the backend search service.
pub struct ProxyBackend {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("reposearch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /health` on the search service.
    pub async fn health(&self) -> Result<HealthReport> {
        let url = format!("{}/health", self.base_url);
        let resp = check_status(self.http.get(&url).send().await?).await?;
        resp.json()
            .await
            .map_err(|e| Error::Payload(format!("health response: {}", e)))
    }
}

/// Decodes the service's `{ "results": [...] }` body into normalised results.
pub(crate) fn parse_results(body: &str) -> Result<Vec<SearchResult>> {
    let response: ProxySearchResponse = serde_json::from_str(body)
        .map_err(|e| Error::Payload(format!("search service response: {}", e)))?;
    Ok(response.results.into_iter().map(SearchResult::from).collect())
}

#[async_trait]
impl SearchBackend for ProxyBackend {
    fn name(&self) -> &'static str {
        "proxy"
    }

    async fn search(&self, query: &Query) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(%url, %query, "forwarding search");

        let resp = self
            .http
            .post(&url)
            .json(&ProxySearchRequest {
                query: query.as_str(),
            })
            .send()
            .await?;
        let body = check_status(resp).await?.text().await?;
        parse_results(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn search_posts_query_as_json() {
        let server = capture::respond_once(
            200,
            r#"{"results":[{"name":"tokio","description":null,"forks":2,"stars":9,"watchers":1,"url":"https://github.com/tokio-rs/tokio"}]}"#,
        )
        .await;
        let backend = ProxyBackend::new(&server.base_url).unwrap();

        let results = backend.search(&Query::parse("tokio").unwrap()).await.unwrap();

        let request = server.request().await;
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/search");
        assert!(request.header("content-type").unwrap().starts_with("application/json"));
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body, serde_json::json!({ "query": "tokio" }));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].stars, 9);
    }

    #[tokio::test]
    async fn health_reads_status_from_get() {
        let server = capture::respond_once(200, r#"{"status":"healthy","timestamp":1700000000.5}"#).await;
        let backend = ProxyBackend::new(&server.base_url).unwrap();

        let report = backend.health().await.unwrap();

        let request = server.request().await;
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/health");
        assert_eq!(report.status, "healthy");
    }

    #[test]
    fn keeps_only_the_card_fields() {
        let body = r#"{
            "status": 200,
            "results": [
                {
                    "doc_id": "17",
                    "name": "tokio",
                    "description": "A runtime for writing reliable asynchronous applications",
                    "url": "https://github.com/tokio-rs/tokio",
                    "watchers": 30,
                    "language": "Rust",
                    "Topics": ["async"],
                    "stars": 25000,
                    "forks": 2300,
                    "freq": 4,
                    "density": 0.2,
                    "final_score": 1.7
                }
            ],
            "search_time_ms": 3.1,
            "total_count": 1
        }"#;

        let results = parse_results(body).unwrap();
        assert_eq!(results.len(), 1);
        let tokio = &results[0];
        assert_eq!(tokio.name, "tokio");
        assert_eq!(tokio.stars, 25000);
        assert_eq!(tokio.forks, 2300);
        assert_eq!(tokio.watchers, 30);
        assert_eq!(tokio.url, "https://github.com/tokio-rs/tokio");
        assert_eq!(tokio.language, None);
        assert!(tokio.topics.is_empty());
    }

    #[test]
    fn error_body_is_a_schema_violation() {
        let err = parse_results(r#"{"error":"No query provided","status":400}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    }

    #[test]
    fn preserves_service_order() {
        let body = r#"{"results":[
            {"name":"b","description":null,"forks":0,"stars":1,"watchers":0,"url":"u1"},
            {"name":"a","description":"","forks":0,"stars":9,"watchers":0,"url":"u2"}
        ]}"#;
        let names: Vec<String> = parse_results(body).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
