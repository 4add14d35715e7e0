//! In-memory tracker backend

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use crate::client::{TicketStatus, TicketValidator, TrackerError};

/// Answers lookups from a fixed table. Unknown tickets do not exist.
#[derive(Debug, Default)]
pub struct StaticTracker {
    tickets: FxHashMap<String, Result<TicketStatus, TrackerError>>,
    lookups: AtomicUsize,
}

impl StaticTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticket(mut self, id: impl Into<String>, status: TicketStatus) -> Self {
        self.tickets.insert(id.into(), Ok(status));
        self
    }

    /// Make lookups of `id` fail with `error`
    pub fn with_failure(mut self, id: impl Into<String>, error: TrackerError) -> Self {
        self.tickets.insert(id.into(), Err(error));
        self
    }

    /// Number of lookups served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TicketValidator for StaticTracker {
    async fn lookup(&self, ticket: &str) -> Result<TicketStatus, TrackerError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.tickets
            .get(ticket)
            .cloned()
            .unwrap_or(Ok(TicketStatus::MISSING))
    }
}
