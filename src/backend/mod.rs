mod github;
mod proxy;

pub use github::GitHubBackend;
pub use proxy::ProxyBackend;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{BackendKind, Config};
use crate::error::Result;
use crate::github::GitHubClient;
use crate::search::Query;
use crate::types::SearchResult;

/// One way of answering a search. Exactly one is chosen at startup.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// All-or-nothing: any failure fails the whole search.
    async fn search(&self, query: &Query) -> Result<Vec<SearchResult>>;
}

pub fn from_config(config: &Config) -> Result<Arc<dyn SearchBackend>> {
    tracing::debug!(backend = ?config.backend, "selecting search backend");
    let backend: Arc<dyn SearchBackend> = match config.backend {
        BackendKind::Github => Arc::new(GitHubBackend::new(GitHubClient::from_config(config)?)),
        BackendKind::Proxy => Arc::new(ProxyBackend::new(config.search_service_url())?),
    };
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_configured_backend() {
        let mut config = Config::default();
        assert_eq!(from_config(&config).unwrap().name(), "github");

        config.backend = BackendKind::Proxy;
        assert_eq!(from_config(&config).unwrap().name(), "proxy");
    }
}
