//! Ticket lookup contract and the client handed to the lint runner

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::options::{TrackerConfigError, TrackerKind, TrackerOptions};

/// Lookup verdict for one ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketStatus {
    pub exists: bool,
    pub closed: bool,
}

impl TicketStatus {
    pub const OPEN: Self = Self {
        exists: true,
        closed: false,
    };
    pub const CLOSED: Self = Self {
        exists: true,
        closed: true,
    };
    pub const MISSING: Self = Self {
        exists: false,
        closed: false,
    };
}

/// Failure of a single lookup; the caller reports it against that ticket only
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("network error: {0}")]
    Network(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Something that can answer "does this ticket exist, and is it closed"
#[async_trait]
pub trait TicketValidator: Send + Sync {
    async fn lookup(&self, ticket: &str) -> Result<TicketStatus, TrackerError>;
}

/// A validated tracker configuration bound to a lookup backend
#[derive(Clone)]
pub struct TrackerClient {
    options: TrackerOptions,
    backend: Arc<dyn TicketValidator>,
}

impl fmt::Debug for TrackerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerClient")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

impl TrackerClient {
    pub fn kind(&self) -> TrackerKind {
        self.options.kind()
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    /// Canonical id sent to the backend: `#12` and `GH-12` become `12` on
    /// GitHub/GitLab, other trackers use upper-cased keys.
    pub fn normalize(&self, ticket: &str) -> String {
        self.kind().normalize(ticket)
    }

    #[tracing::instrument(level = "debug", skip(self), fields(tracker = self.kind().as_str()))]
    pub async fn validate_ticket(&self, ticket: &str) -> Result<TicketStatus, TrackerError> {
        let id = self.normalize(ticket);
        self.backend.lookup(&id).await
    }
}

/// Build a client, failing fast when required per-tracker fields are absent
pub fn create_client(
    options: &TrackerOptions,
    backend: Arc<dyn TicketValidator>,
) -> Result<TrackerClient, TrackerConfigError> {
    options.validate()?;
    Ok(TrackerClient {
        options: options.clone(),
        backend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticTracker;

    fn github() -> TrackerOptions {
        TrackerOptions::Github {
            owner: Some("acme".into()),
            repo: Some("widgets".into()),
            token: None,
        }
    }

    #[test]
    fn test_create_client_fails_fast() {
        let options = TrackerOptions::Github {
            owner: Some("acme".into()),
            repo: None,
            token: None,
        };
        let err = create_client(&options, Arc::new(StaticTracker::new())).unwrap_err();
        assert_eq!(
            err,
            TrackerConfigError::MissingField {
                tracker: "github",
                field: "repo"
            }
        );
    }

    #[test]
    fn test_normalize() {
        let client = create_client(&github(), Arc::new(StaticTracker::new())).unwrap();
        assert_eq!(client.normalize("#42"), "42");
        assert_eq!(client.normalize("GH-42"), "42");

        let jira = TrackerOptions::Jira {
            base_url: Some("https://acme.atlassian.net".into()),
            token: None,
        };
        let client = create_client(&jira, Arc::new(StaticTracker::new())).unwrap();
        assert_eq!(client.normalize("proj-7"), "PROJ-7");
    }

    #[tokio::test]
    async fn test_validate_ticket_uses_normalized_id() {
        let backend = StaticTracker::new().with_ticket("42", TicketStatus::CLOSED);
        let client = create_client(&github(), Arc::new(backend)).unwrap();
        assert_eq!(client.validate_ticket("GH-42").await, Ok(TicketStatus::CLOSED));
        assert_eq!(client.validate_ticket("#7").await, Ok(TicketStatus::MISSING));
    }
}
