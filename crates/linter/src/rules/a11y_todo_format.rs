//! a11y-todo-format
//!
//! Accessibility TODOs (`A11Y-TODO`, `ALLY-TODO`) must carry a reference,
//! optionally a WCAG success criterion such as `WCAG-1.4.3`.

use common::CommentGrammar;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::todo_format::{grammar, rewrite_comment};
use crate::comment::Comment;
use crate::config::ConfigError;
use crate::context::LintContext;
use crate::diagnostic::{message_data, Diagnostic};
use crate::{RuleCategory, RuleMeta};

const PLACEHOLDER: &str = "WCAG-X.X.X";
const DEFAULT_DESCRIPTION: &str = "add description";

static WCAG_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bWCAG[-\s]?\d+\.\d+\.\d+\b").expect("static WCAG pattern compiles"));

/// Configuration for a11y-todo-format rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct A11yTodoFormatConfig {
    pub prefixes: Vec<String>,
    /// Require the reference to name a WCAG success criterion
    pub require_wcag_reference: bool,
}

impl Default for A11yTodoFormatConfig {
    fn default() -> Self {
        Self {
            prefixes: vec!["A11Y-TODO".to_string(), "ALLY-TODO".to_string()],
            require_wcag_reference: false,
        }
    }
}

/// a11y-todo-format rule
#[derive(Debug, Clone)]
pub struct A11yTodoFormat {
    config: A11yTodoFormatConfig,
    grammar: CommentGrammar,
}

impl Default for A11yTodoFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleMeta for A11yTodoFormat {
    const NAME: &'static str = "a11y-todo-format";
    const CATEGORY: RuleCategory = RuleCategory::Style;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        (
            "invalidA11yTodoFormat",
            "Accessibility TODOs must follow the format `{{prefix}} (WCAG-X.X.X): description`.",
        ),
        (
            "missingWcagReference",
            "Accessibility TODO reference `{{reference}}` does not name a WCAG success criterion (e.g. `WCAG-1.4.3`).",
        ),
    ];

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "prefixes": { "type": "array", "items": { "type": "string" }, "minItems": 1 },
                "requireWcagReference": { "type": "boolean" }
            },
            "additionalProperties": false
        })
    }
}

impl A11yTodoFormat {
    pub fn new() -> Self {
        Self::with_config(A11yTodoFormatConfig::default()).expect("default prefixes compile")
    }

    pub fn with_config(config: A11yTodoFormatConfig) -> Result<Self, ConfigError> {
        let grammar = grammar(Self::NAME, &config.prefixes)?;
        Ok(Self { config, grammar })
    }

    pub fn check(&self, comment: &Comment, ctx: &LintContext) -> Option<Diagnostic> {
        let line = comment.first_line();
        let check = self.grammar.validate(line)?;

        if !check.matches {
            let diagnostic = Self::report(
                comment.span,
                "invalidA11yTodoFormat",
                message_data([("prefix", check.prefix.as_str())]),
            );
            let fix = self
                .grammar
                .rewrite(line, PLACEHOLDER, DEFAULT_DESCRIPTION)
                .and_then(|fixed| rewrite_comment(comment, ctx, &fixed));
            return Some(match fix {
                Some(fix) => diagnostic.with_fix(fix),
                None => diagnostic,
            });
        }

        let reference = check.reference.as_deref().unwrap_or_default();
        if self.config.require_wcag_reference && !WCAG_REFERENCE.is_match(reference) {
            return Some(Self::report(
                comment.span,
                "missingWcagReference",
                message_data([("reference", reference)]),
            ));
        }
        None
    }
}
