//! no-commented-code
//!
//! Disallow commented-out code. Every comment is classified on its own, so
//! `threshold` and `allowPatterns` apply per comment. Doc comments are never
//! candidates.

use common::CodeClassifier;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::comment::Comment;
use crate::config::{compile_patterns, ConfigError};
use crate::context::LintContext;
use crate::diagnostic::{message_data, Diagnostic};
use crate::{RuleCategory, RuleMeta};

/// Configuration for no-commented-code rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NoCommentedCodeConfig {
    /// Minimum number of code-like lines before a comment is reported
    pub threshold: usize,
    /// Regexes tested against the whole trimmed comment; a match exempts it
    pub allow_patterns: Vec<String>,
}

impl Default for NoCommentedCodeConfig {
    fn default() -> Self {
        Self {
            threshold: 1,
            allow_patterns: Vec::new(),
        }
    }
}

/// no-commented-code rule
#[derive(Debug, Clone, Default)]
pub struct NoCommentedCode {
    classifier: CodeClassifier,
}

impl RuleMeta for NoCommentedCode {
    const NAME: &'static str = "no-commented-code";
    const CATEGORY: RuleCategory = RuleCategory::Pedantic;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "commentedCode",
        "Commented-out code ({{lines}} line(s)) should be removed; version control keeps the history.",
    )];

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "threshold": { "type": "integer", "minimum": 1 },
                "allowPatterns": { "type": "array", "items": { "type": "string" } }
            },
            "additionalProperties": false
        })
    }
}

impl NoCommentedCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NoCommentedCodeConfig) -> Result<Self, ConfigError> {
        let allow = compile_patterns(Self::NAME, &config.allow_patterns)?;
        Ok(Self {
            classifier: CodeClassifier::new(config.threshold, allow),
        })
    }

    /// Check every comment of the file
    pub fn check(&self, ctx: &LintContext) -> Vec<Diagnostic> {
        ctx.comments()
            .iter()
            .filter(|comment| !comment.is_jsdoc())
            .filter_map(|comment| self.check_comment(comment))
            .collect()
    }

    fn check_comment(&self, comment: &Comment) -> Option<Diagnostic> {
        let classification = self.classifier.classify(comment.text);
        if !classification.is_code {
            return None;
        }
        Some(Self::report(
            comment.span,
            "commentedCode",
            message_data([("lines", classification.code_line_count)]),
        ))
    }
}
