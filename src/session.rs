//! View state for a run of searches.
//!
//! Every dispatched search gets a [`Ticket`] with a sequence number. Only the
//! completion carrying the latest ticket may change what is shown; anything
//! older was superseded and is dropped.

use std::time::Duration;

use crate::error::ErrorKind;
use crate::search::{Outcome, Query};
use crate::types::SearchResult;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing searched yet, or the query was cleared.
    Idle,
    Loading { query: Query },
    Loaded {
        query: Query,
        results: Vec<SearchResult>,
        elapsed: Duration,
    },
    Failed { query: Query, kind: ErrorKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub query: Query,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Submit {
    /// Dispatch a search for this ticket.
    Dispatch(Ticket),
    /// Blank input; nothing to send.
    Cleared,
    /// The same query is already in flight.
    AlreadyLoading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

#[derive(Debug)]
pub struct SearchSession {
    state: ViewState,
    last_issued: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
            last_issued: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading { .. })
    }

    pub fn submit(&mut self, raw: &str) -> Submit {
        let Some(query) = Query::parse(raw) else {
            // Clearing the box also orphans any in-flight request.
            self.last_issued += 1;
            self.state = ViewState::Idle;
            return Submit::Cleared;
        };

        if let ViewState::Loading { query: in_flight } = &self.state {
            if *in_flight == query {
                return Submit::AlreadyLoading;
            }
            tracing::debug!(superseded = %in_flight, by = %query, "superseding in-flight search");
        }

        self.last_issued += 1;
        self.state = ViewState::Loading {
            query: query.clone(),
        };
        Submit::Dispatch(Ticket {
            seq: self.last_issued,
            query,
        })
    }

    pub fn complete(&mut self, ticket: &Ticket, result: Result<Outcome, ErrorKind>) -> Applied {
        if ticket.seq != self.last_issued {
            tracing::debug!(seq = ticket.seq, latest = self.last_issued, query = %ticket.query, "discarding stale search result");
            return Applied::Stale;
        }

        self.state = match result {
            Ok(outcome) => ViewState::Loaded {
                query: ticket.query.clone(),
                results: outcome.results,
                elapsed: outcome.elapsed,
            },
            Err(kind) => ViewState::Failed {
                query: ticket.query.clone(),
                kind,
            },
        };
        Applied::Current
    }
}
