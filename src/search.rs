use std::time::{Duration, Instant};

use crate::backend::SearchBackend;
use crate::error::Result;
use crate::types::SearchResult;

/// Most results a single search ever returns.
pub const MAX_RESULTS: usize = 10;

/// A trimmed, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// `None` for blank input, which must never reach a backend.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Query(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub results: Vec<SearchResult>,
    pub elapsed: Duration,
}

/// Runs one search. Failures are logged here with their cause; callers only
/// need the kind.
pub async fn run(backend: &dyn SearchBackend, query: &Query) -> Result<Outcome> {
    let started = Instant::now();
    match backend.search(query).await {
        Ok(mut results) => {
            results.truncate(MAX_RESULTS);
            let elapsed = started.elapsed();
            tracing::info!(
                backend = backend.name(),
                %query,
                count = results.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "search complete"
            );
            Ok(Outcome { results, elapsed })
        }
        Err(e) => {
            tracing::error!(backend = backend.name(), %query, kind = %e.kind(), "Error searching repositories: {}", e);
            Err(e)
        }
    }
}
