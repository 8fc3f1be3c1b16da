use async_trait::async_trait;
use futures::future::try_join_all;

use super::SearchBackend;
use crate::error::Result;
use crate::github::GitHubApi;
use crate::search::{Query, MAX_RESULTS};
use crate::types::SearchResult;

/// Searches GitHub directly, then fetches each hit's details concurrently.
pub struct GitHubBackend<C> {
    client: C,
}

impl<C: GitHubApi> GitHubBackend<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: GitHubApi> SearchBackend for GitHubBackend<C> {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn search(&self, query: &Query) -> Result<Vec<SearchResult>> {
        let mut summaries = self.client.search_repos(query.as_str(), MAX_RESULTS).await?;
        summaries.truncate(MAX_RESULTS);

        // try_join_all yields in input order and bails on the first error.
        let enriched = try_join_all(summaries.into_iter().map(|summary| async move {
            tracing::debug!(id = summary.id, repo = %summary.full_name, "enriching");
            let detail = self
                .client
                .get_repo(&summary.owner.login, &summary.name)
                .await?;
            Ok::<_, crate::error::Error>(SearchResult::enriched(summary, detail))
        }))
        .await?;

        Ok(enriched)
    }
}
