//! valid-ticket-reference
//!
//! Ticket ids referenced by TODO comments (`// TODO (PROJ-12): …`) must exist
//! in the configured issue tracker and, optionally, still be open.
//!
//! References are collected while the file is linted; lookups happen
//! afterwards in one [`TicketBatch`], one request per distinct ticket.

use std::sync::Arc;

use common::CommentGrammar;
use futures::future::join_all;
use indexmap::IndexMap;
use oxc_span::Span;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracker::{create_client, TicketValidator, TrackerClient, TrackerConfigError, TrackerOptions};

use super::todo_format::grammar;
use crate::comment::Comment;
use crate::config::ConfigError;
use crate::diagnostic::{message_data, Diagnostic, DiagnosticSeverity};
use crate::{RuleCategory, RuleMeta};

/// Normalized ticket id → comments referencing it, in first-seen order
pub type TicketRefs = IndexMap<String, Vec<TicketMention>>;

/// One comment referencing a ticket, with the id as the comment spells it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketMention {
    pub span: Span,
    pub written: String,
}

/// Configuration for valid-ticket-reference rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ValidTicketReferenceConfig {
    /// `{ "type": "github" | "gitlab" | "jira" | "linear", … }`
    pub tracker: Option<serde_json::Value>,
    /// Skip validation entirely
    pub offline: bool,
    pub prefixes: Vec<String>,
    pub ticket_pattern: String,
    pub report_closed: bool,
}

impl Default for ValidTicketReferenceConfig {
    fn default() -> Self {
        Self {
            tracker: None,
            offline: false,
            prefixes: vec!["TODO".to_string(), "FIXME".to_string()],
            ticket_pattern: r"[A-Z][A-Z0-9]*-\d+|#\d+".to_string(),
            report_closed: true,
        }
    }
}

/// valid-ticket-reference rule
#[derive(Debug, Clone)]
pub struct ValidTicketReference {
    offline: bool,
    report_closed: bool,
    grammar: CommentGrammar,
    ticket: Regex,
    tracker: Result<TrackerOptions, TrackerConfigError>,
}

impl RuleMeta for ValidTicketReference {
    const NAME: &'static str = "valid-ticket-reference";
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("ticketNotFound", "Ticket `{{ticket}}` does not exist in the issue tracker."),
        ("ticketClosed", "Ticket `{{ticket}}` is closed; resolve or update this comment."),
        ("trackerError", "Could not validate ticket `{{ticket}}`: {{error}}."),
        ("invalidTrackerConfig", "Invalid issue tracker configuration: {{error}}."),
    ];

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "tracker": {
                    "type": "object",
                    "properties": {
                        "type": { "enum": ["github", "gitlab", "jira", "linear"] }
                    },
                    "required": ["type"]
                },
                "offline": { "type": "boolean" },
                "prefixes": { "type": "array", "items": { "type": "string" }, "minItems": 1 },
                "ticketPattern": { "type": "string" },
                "reportClosed": { "type": "boolean" }
            },
            "additionalProperties": false
        })
    }
}

impl ValidTicketReference {
    pub fn with_config(config: ValidTicketReferenceConfig) -> Result<Self, ConfigError> {
        let grammar = grammar(Self::NAME, &config.prefixes)?;
        let ticket = Regex::new(&config.ticket_pattern).map_err(|source| ConfigError::InvalidPattern {
            rule: Self::NAME.to_string(),
            pattern: config.ticket_pattern.clone(),
            source,
        })?;
        let tracker = match &config.tracker {
            Some(value) => TrackerOptions::from_value(value),
            None => Err(TrackerConfigError::Invalid("missing `tracker` option".to_string())),
        };
        Ok(Self {
            offline: config.offline,
            report_closed: config.report_closed,
            grammar,
            ticket,
            tracker,
        })
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Program-level diagnostic for an unusable tracker configuration
    pub fn check_config(&self) -> Option<Diagnostic> {
        if self.offline {
            return None;
        }
        let err = self.tracker.as_ref().err()?;
        Some(Self::report(
            Span::new(0, 0),
            "invalidTrackerConfig",
            message_data([("error", err.to_string())]),
        ))
    }

    /// Record the tickets referenced by `comment`
    pub fn collect(&self, comment: &Comment, refs: &mut TicketRefs) {
        if self.offline {
            return;
        }
        let Some(check) = self.grammar.validate(comment.first_line()) else {
            return;
        };
        let Some(reference) = check.reference.as_deref() else {
            return;
        };
        for ticket in self.ticket.find_iter(reference) {
            let written = ticket.as_str();
            let key = match &self.tracker {
                Ok(options) => options.kind().normalize(written),
                Err(_) => written.to_string(),
            };
            let mentions = refs.entry(key).or_default();
            // `TODO (GH-1, #1)` is still one comment
            if mentions.last().is_some_and(|last| last.span == comment.span) {
                continue;
            }
            mentions.push(TicketMention {
                span: comment.span,
                written: written.to_string(),
            });
        }
    }

    /// Deferred lookups for the collected references. `None` when there is
    /// nothing to validate or no way to validate it.
    pub fn batch(&self, refs: TicketRefs, backend: Option<Arc<dyn TicketValidator>>) -> Option<TicketBatch> {
        if self.offline || refs.is_empty() {
            return None;
        }
        let options = self.tracker.as_ref().ok()?;
        let Some(backend) = backend else {
            tracing::warn!(tickets = refs.len(), "no issue tracker backend; skipping ticket validation");
            return None;
        };
        let client = create_client(options, backend).ok()?;
        Some(TicketBatch {
            client,
            refs,
            report_closed: self.report_closed,
            severity: DiagnosticSeverity::Warning,
        })
    }
}

/// Ticket lookups deferred to the end of a file
#[derive(Debug, Clone)]
pub struct TicketBatch {
    pub client: TrackerClient,
    pub refs: TicketRefs,
    pub report_closed: bool,
    /// Severity given to every resulting diagnostic
    pub severity: DiagnosticSeverity,
}

impl TicketBatch {
    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn ticket_count(&self) -> usize {
        self.refs.len()
    }

    /// Look up every distinct ticket concurrently. A failed lookup only
    /// affects the comments referencing that ticket.
    #[tracing::instrument(level = "debug", skip(self), fields(tickets = self.refs.len()))]
    pub async fn resolve(self) -> Vec<Diagnostic> {
        let client = &self.client;
        let lookups = self
            .refs
            .iter()
            .map(|(ticket, mentions)| async move { (ticket, mentions, client.validate_ticket(ticket).await) });
        let results = join_all(lookups).await;

        let mut diagnostics = Vec::new();
        for (ticket, mentions, result) in results {
            let (message_id, error) = match result {
                Ok(status) if !status.exists => ("ticketNotFound", None),
                Ok(status) if status.closed && self.report_closed => ("ticketClosed", None),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(%ticket, %err, "ticket lookup failed");
                    ("trackerError", Some(err.to_string()))
                }
            };
            for mention in mentions {
                let mut data = message_data([("ticket", mention.written.as_str())]);
                if let Some(error) = &error {
                    data.insert("error".to_string(), error.clone());
                }
                diagnostics
                    .push(ValidTicketReference::report(mention.span, message_id, data).with_severity(self.severity));
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tracker::{StaticTracker, TicketStatus, TrackerError};

    fn rule(config: serde_json::Value) -> ValidTicketReference {
        let config: ValidTicketReferenceConfig = serde_json::from_value(config).unwrap();
        ValidTicketReference::with_config(config).unwrap()
    }

    fn jira() -> serde_json::Value {
        json!({ "tracker": { "type": "jira", "baseUrl": "https://acme.atlassian.net" } })
    }

    fn collect(rule: &ValidTicketReference, sources: &[&'static str]) -> TicketRefs {
        let mut refs = TicketRefs::new();
        for source in sources {
            let comment = Comment::from_span(source, Span::new(0, source.len() as u32)).unwrap();
            rule.collect(&comment, &mut refs);
        }
        refs
    }

    #[test]
    fn test_offline_skips_everything() {
        let rule = rule(json!({ "offline": true }));
        assert!(rule.check_config().is_none());
        let refs = collect(&rule, &["// TODO (GH-123, GH-124): x"]);
        assert!(refs.is_empty());
        assert!(rule.batch(refs, Some(Arc::new(StaticTracker::new()))).is_none());
    }

    #[test]
    fn test_invalid_tracker_config() {
        let rule = rule(json!({ "tracker": { "type": "github", "owner": "acme" } }));
        let diagnostic = rule.check_config().unwrap();
        assert_eq!(diagnostic.message_id, "invalidTrackerConfig");
        assert_eq!(diagnostic.data["error"], "github tracker requires `repo`");
        assert_eq!(diagnostic.span(), Span::new(0, 0));
    }

    #[test]
    fn test_collects_distinct_tickets() {
        let rule = rule(jira());
        let refs = collect(
            &rule,
            &["// TODO (PROJ-1, PROJ-2): x", "// FIXME (PROJ-1): y", "// TODO: no reference"],
        );
        assert_eq!(refs.keys().cloned().collect::<Vec<_>>(), vec!["PROJ-1", "PROJ-2"]);
        assert_eq!(refs["PROJ-1"].len(), 2);
    }

    #[test]
    fn test_missing_backend_skips_validation() {
        let rule = rule(jira());
        let refs = collect(&rule, &["// TODO (PROJ-1): x"]);
        assert!(rule.batch(refs, None).is_none());
    }

    #[tokio::test]
    async fn test_resolve_one_lookup_per_ticket() {
        let backend = Arc::new(
            StaticTracker::new()
                .with_ticket("PROJ-1", TicketStatus::OPEN)
                .with_ticket("PROJ-2", TicketStatus::CLOSED)
                .with_failure("PROJ-4", TrackerError::RateLimited),
        );
        let rule = rule(jira());
        let refs = collect(
            &rule,
            &[
                "// TODO (PROJ-1): a",
                "// TODO (PROJ-2): b",
                "// TODO (PROJ-3): c",
                "// TODO (PROJ-4): d",
                "// FIXME (PROJ-2): e",
            ],
        );
        let batch = rule.batch(refs, Some(backend.clone())).unwrap();
        let diagnostics = batch.resolve().await;

        assert_eq!(backend.lookups(), 4);
        let ids: Vec<_> = diagnostics.iter().map(|d| d.message_id.as_str()).collect();
        assert_eq!(ids, vec!["ticketClosed", "ticketClosed", "ticketNotFound", "trackerError"]);
        assert_eq!(diagnostics[3].data["error"], "rate limited");
    }

    fn github() -> serde_json::Value {
        json!({ "tracker": { "type": "github", "owner": "acme", "repo": "widgets" } })
    }

    #[test]
    fn test_repeated_ticket_in_one_comment() {
        let rule = rule(github());
        let refs = collect(&rule, &["// TODO (GH-1, GH-1): x"]);
        assert_eq!(refs["1"].len(), 1);

        let refs = collect(&rule, &["// TODO (GH-1, #1): x"]);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs["1"][0].written, "GH-1");
    }

    #[tokio::test]
    async fn test_spellings_of_one_issue_share_a_lookup() {
        let backend = Arc::new(StaticTracker::new().with_ticket("1", TicketStatus::CLOSED));
        let rule = rule(github());
        let refs = collect(&rule, &["// TODO (#1): a", "// TODO (GH-1): bb"]);
        let diagnostics = rule.batch(refs, Some(backend.clone())).unwrap().resolve().await;

        assert_eq!(backend.lookups(), 1);
        let written: Vec<_> = diagnostics.iter().map(|d| d.data["ticket"].as_str()).collect();
        assert_eq!(written, vec!["#1", "GH-1"]);
        assert!(diagnostics.iter().all(|d| d.message_id == "ticketClosed"));
    }

    #[tokio::test]
    async fn test_closed_tickets_can_be_allowed() {
        let backend = Arc::new(StaticTracker::new().with_ticket("PROJ-2", TicketStatus::CLOSED));
        let mut config = jira();
        config["reportClosed"] = json!(false);
        let rule = rule(config);
        let refs = collect(&rule, &["// TODO (PROJ-2): b"]);
        let diagnostics = rule.batch(refs, Some(backend)).unwrap().resolve().await;
        assert!(diagnostics.is_empty());
    }
}
