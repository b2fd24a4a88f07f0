//! Fetch requests, completions, and request generations
//!
//! The app never performs I/O. It queues [`FetchRequest`]s, the runtime runs
//! them with [`execute`] and hands the [`FetchResponse`] back. Every request
//! carries a [`RequestTicket`]; each owner keeps a [`Generations`] counter and
//! only applies completions whose ticket is still current.

use serde::Serialize;

use crate::api::TmdbClient;
use crate::models::{ContentKind, SearchKind, SearchableItem};

/// Identity of one request within its owner's generation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Monotonic generation counter owned by one component
#[derive(Debug, Clone, Default)]
pub struct Generations {
    current: u64,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket
    pub fn begin(&mut self) -> RequestTicket {
        self.current += 1;
        RequestTicket {
            generation: self.current,
        }
    }

    /// Whether `ticket` belongs to the most recent request
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.current
    }

    /// Supersede the in-flight request without starting another
    pub fn invalidate(&mut self) {
        self.current += 1;
    }
}

/// Visible state of a fetch driven by the committed query
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum FetchOutcome {
    #[default]
    Idle,
    Loading,
    Success(Vec<SearchableItem>),
    Failure(String),
}

impl FetchOutcome {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchOutcome::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchOutcome::Loading)
    }

    /// Items of a successful fetch; empty otherwise
    pub fn items(&self) -> &[SearchableItem] {
        match self {
            FetchOutcome::Success(items) => items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchOutcome::Failure(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Work the runtime should perform on the app's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Search {
        ticket: RequestTicket,
        query: String,
        kind: SearchKind,
    },
    Trending {
        ticket: RequestTicket,
        kind: ContentKind,
    },
}

/// Completion of a [`FetchRequest`]; errors are already flattened to messages
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResponse {
    Search {
        ticket: RequestTicket,
        result: Result<Vec<SearchableItem>, String>,
    },
    Trending {
        ticket: RequestTicket,
        kind: ContentKind,
        result: Result<Vec<SearchableItem>, String>,
    },
}

/// Run one request against TMDB
pub async fn execute(client: &TmdbClient, request: FetchRequest) -> FetchResponse {
    match request {
        FetchRequest::Search {
            ticket,
            query,
            kind,
        } => FetchResponse::Search {
            ticket,
            result: client
                .search(&query, kind)
                .await
                .map_err(|e| e.to_string()),
        },
        FetchRequest::Trending { ticket, kind } => FetchResponse::Trending {
            ticket,
            kind,
            result: client.trending(kind).await.map_err(|e| e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let mut gens = Generations::new();
        let a = gens.begin();
        assert!(gens.is_current(a));

        let b = gens.begin();
        assert!(!gens.is_current(a));
        assert!(gens.is_current(b));
        assert!(b.generation() > a.generation());
    }

    #[test]
    fn test_invalidate_retires_in_flight_ticket() {
        let mut gens = Generations::new();
        let a = gens.begin();
        gens.invalidate();
        assert!(!gens.is_current(a));
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(FetchOutcome::default().is_idle());
        assert!(FetchOutcome::Loading.items().is_empty());
        assert_eq!(FetchOutcome::Failure("HTTP 500".into()).error(), Some("HTTP 500"));
        assert!(FetchOutcome::Success(vec![]).error().is_none());
    }
}
