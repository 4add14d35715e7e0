//! no-stale-references
//!
//! Backtick-quoted identifiers in comments (`` `parseConfig` ``) must still
//! name something declared in the file.

use common::words::is_well_known;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::comment::Comment;
use crate::config::{compile_patterns, ConfigError};
use crate::diagnostic::{message_data, Diagnostic};
use crate::{RuleCategory, RuleMeta};
use oxc_span::Span;

static BACKTICK_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("static backtick pattern compiles"));

/// `name`, `name()`, `name.member`, `name.member()`, chained
static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_$][\w$]*)(?:\(\)|\.[A-Za-z_$][\w$]*(?:\(\))?)*$")
        .expect("static reference pattern compiles")
});

/// Configuration for no-stale-references rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NoStaleReferencesConfig {
    /// Shorter identifiers are never checked
    pub min_length: usize,
    pub ignore_patterns: Vec<String>,
}

impl Default for NoStaleReferencesConfig {
    fn default() -> Self {
        Self {
            min_length: 3,
            ignore_patterns: Vec::new(),
        }
    }
}

/// no-stale-references rule
#[derive(Debug, Clone)]
pub struct NoStaleReferences {
    min_length: usize,
    ignore: Vec<Regex>,
}

impl Default for NoStaleReferences {
    fn default() -> Self {
        Self {
            min_length: NoStaleReferencesConfig::default().min_length,
            ignore: Vec::new(),
        }
    }
}

impl RuleMeta for NoStaleReferences {
    const NAME: &'static str = "no-stale-references";
    const CATEGORY: RuleCategory = RuleCategory::Analysis;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "staleRef",
        "Comment references `{{name}}`, which is not declared in this file.",
    )];

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "minLength": { "type": "integer", "minimum": 1 },
                "ignorePatterns": { "type": "array", "items": { "type": "string" } }
            },
            "additionalProperties": false
        })
    }
}

impl NoStaleReferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NoStaleReferencesConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            min_length: config.min_length,
            ignore: compile_patterns(Self::NAME, &config.ignore_patterns)?,
        })
    }

    fn is_candidate(&self, name: &str) -> bool {
        name.len() >= self.min_length
            && !is_well_known(name)
            && !self.ignore.iter().any(|pattern| pattern.is_match(name))
    }

    /// Report every quoted identifier of `comment` missing from `symbols`
    pub fn check(&self, comment: &Comment, symbols: &FxHashSet<String>) -> Vec<Diagnostic> {
        let base = comment.content_start();
        BACKTICK_SPAN
            .captures_iter(comment.text)
            .filter_map(|caps| {
                let quoted = caps.get(1)?;
                if quoted.as_str().contains(char::is_whitespace) {
                    return None;
                }
                let root = REFERENCE.captures(quoted.as_str())?.get(1)?.as_str();
                if !self.is_candidate(root) || symbols.contains(root) {
                    return None;
                }
                let start = base + quoted.start() as u32;
                let span = Span::new(start, start + root.len() as u32);
                Some(Self::report(span, "staleRef", message_data([("name", root)])))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn symbols(names: &[&str]) -> FxHashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn check(rule: &NoStaleReferences, source: &str, names: &[&str]) -> Vec<Diagnostic> {
        let comment = Comment::from_span(source, Span::new(0, source.len() as u32)).unwrap();
        rule.check(&comment, &symbols(names))
    }

    #[test]
    fn test_reports_unknown_identifier() {
        let source = "// Uses `parseConfig` and `loadFile()` to start";
        let diagnostics = check(&NoStaleReferences::new(), source, &["parseConfig"]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].data["name"], "loadFile");
        let start = diagnostics[0].start as usize;
        assert_eq!(&source[start..diagnostics[0].end as usize], "loadFile");
    }

    #[test]
    fn test_member_access_checks_root() {
        let rule = NoStaleReferences::new();
        assert!(check(&rule, "// see `config.timeout`", &["config"]).is_empty());
        assert_eq!(check(&rule, "// see `settings.timeout()`", &["config"]).len(), 1);
    }

    #[test]
    fn test_skipped_spans() {
        let rule = NoStaleReferences::new();
        // Snippets, short names, globals and common words
        assert!(check(&rule, "// run `npm install` first", &[]).is_empty());
        assert!(check(&rule, "// `id` is unique", &[]).is_empty());
        assert!(check(&rule, "// returns a `Promise` or `null`", &[]).is_empty());
        assert!(check(&rule, "// see `a-b` here", &[]).is_empty());
    }

    #[test]
    fn test_ignore_patterns() {
        let rule = NoStaleReferences::with_config(NoStaleReferencesConfig {
            ignore_patterns: vec!["^legacy".to_string()],
            ..Default::default()
        })
        .unwrap();
        assert!(check(&rule, "// replaces `legacyLoader`", &[]).is_empty());
        assert_eq!(check(&rule, "// replaces `oldLoader`", &[]).len(), 1);
    }
}
