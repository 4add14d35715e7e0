//! todo-age
//!
//! Escalate TODO comments as they age. Age comes from an [`AgeSource`]; the
//! default reads an ISO date written in the comment itself
//! (`// TODO (2024-01-31): drop shim`). A blame-backed source can be plugged
//! in by the host.

use std::fmt::Debug;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use common::CommentGrammar;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::todo_format::grammar;
use crate::comment::Comment;
use crate::config::ConfigError;
use crate::diagnostic::{message_data, Diagnostic, DiagnosticSeverity};
use crate::{RuleCategory, RuleMeta};

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").expect("static date pattern compiles"));

/// Provides the age of a comment in whole days
pub trait AgeSource: Send + Sync + Debug {
    fn age_in_days(&self, comment: &Comment) -> Option<u32>;
}

/// Reads the first `YYYY-MM-DD` date in the comment text
#[derive(Debug, Clone, Copy)]
pub struct InlineDateSource {
    pub today: NaiveDate,
}

impl InlineDateSource {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Default for InlineDateSource {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

impl AgeSource for InlineDateSource {
    fn age_in_days(&self, comment: &Comment) -> Option<u32> {
        let date = ISO_DATE
            .captures_iter(comment.text)
            .find_map(|caps| NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok())?;
        let days = (self.today - date).num_days();
        u32::try_from(days).ok()
    }
}

/// Configuration for todo-age rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TodoAgeConfig {
    pub max_age_days: u32,
    pub critical_age_days: u32,
    pub prefixes: Vec<String>,
}

impl Default for TodoAgeConfig {
    fn default() -> Self {
        Self {
            max_age_days: 30,
            critical_age_days: 90,
            prefixes: vec!["TODO".to_string(), "FIXME".to_string()],
        }
    }
}

/// todo-age rule
#[derive(Debug, Clone)]
pub struct TodoAge {
    config: TodoAgeConfig,
    grammar: CommentGrammar,
    source: Arc<dyn AgeSource>,
}

impl Default for TodoAge {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleMeta for TodoAge {
    const NAME: &'static str = "todo-age";
    const CATEGORY: RuleCategory = RuleCategory::Analysis;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("todoOld", "This TODO is {{age}} days old (limit {{max}} days)."),
        (
            "todoCritical",
            "This TODO is {{age}} days old, past the critical age of {{critical}} days.",
        ),
    ];

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "maxAgeDays": { "type": "integer", "minimum": 0 },
                "criticalAgeDays": { "type": "integer", "minimum": 0 },
                "prefixes": { "type": "array", "items": { "type": "string" }, "minItems": 1 }
            },
            "additionalProperties": false
        })
    }
}

impl TodoAge {
    pub fn new() -> Self {
        Self::with_config(TodoAgeConfig::default()).expect("default prefixes compile")
    }

    pub fn with_config(config: TodoAgeConfig) -> Result<Self, ConfigError> {
        let grammar = grammar(Self::NAME, &config.prefixes)?;
        Ok(Self {
            config,
            grammar,
            source: Arc::new(InlineDateSource::default()),
        })
    }

    /// Replace the age source
    pub fn with_age_source(mut self, source: Arc<dyn AgeSource>) -> Self {
        self.source = source;
        self
    }

    pub fn check(&self, comment: &Comment) -> Option<Diagnostic> {
        self.grammar.detect(comment.first_line())?;
        let age = self.source.age_in_days(comment)?;

        if age > self.config.critical_age_days {
            let data = message_data([("age", age), ("critical", self.config.critical_age_days)]);
            return Some(Self::report(comment.span, "todoCritical", data).with_severity(DiagnosticSeverity::Error));
        }
        if age > self.config.max_age_days {
            let data = message_data([("age", age), ("max", self.config.max_age_days)]);
            return Some(Self::report(comment.span, "todoOld", data));
        }
        None
    }
}
