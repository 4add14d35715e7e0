//! todo-format
//!
//! Require TODO/FIXME comments to follow `PREFIX (REFERENCE): description`.

use common::CommentGrammar;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::comment::Comment;
use crate::config::ConfigError;
use crate::context::LintContext;
use crate::diagnostic::{message_data, Diagnostic, Fix};
use crate::{RuleCategory, RuleMeta};

/// Configuration for todo-format rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct TodoFormatConfig {
    /// Prefixes subject to the format, matched case-insensitively
    pub prefixes: Vec<String>,
    /// Reference inserted by the autofix
    pub placeholder_reference: String,
    /// Description inserted by the autofix when none can be salvaged
    pub default_description: String,
}

impl Default for TodoFormatConfig {
    fn default() -> Self {
        Self {
            prefixes: vec!["TODO".to_string(), "FIXME".to_string()],
            placeholder_reference: "TICKET-XXX".to_string(),
            default_description: "add description".to_string(),
        }
    }
}

/// todo-format rule
#[derive(Debug, Clone)]
pub struct TodoFormat {
    config: TodoFormatConfig,
    grammar: CommentGrammar,
}

impl Default for TodoFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleMeta for TodoFormat {
    const NAME: &'static str = "todo-format";
    const CATEGORY: RuleCategory = RuleCategory::Style;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "invalidTodoFormat",
        "{{prefix}} comments must follow the format `{{prefix}} (REFERENCE): description`.",
    )];

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "prefixes": { "type": "array", "items": { "type": "string" }, "minItems": 1 },
                "placeholderReference": { "type": "string" },
                "defaultDescription": { "type": "string" }
            },
            "additionalProperties": false
        })
    }
}

impl TodoFormat {
    pub fn new() -> Self {
        Self::with_config(TodoFormatConfig::default()).expect("default prefixes compile")
    }

    pub fn with_config(config: TodoFormatConfig) -> Result<Self, ConfigError> {
        let grammar = grammar(Self::NAME, &config.prefixes)?;
        Ok(Self { config, grammar })
    }

    pub fn config(&self) -> &TodoFormatConfig {
        &self.config
    }

    /// Check a single comment
    pub fn check(&self, comment: &Comment, ctx: &LintContext) -> Option<Diagnostic> {
        let line = comment.first_line();
        let check = self.grammar.validate(line)?;
        if check.matches {
            return None;
        }

        let diagnostic = Self::report(
            comment.span,
            "invalidTodoFormat",
            message_data([("prefix", check.prefix.as_str())]),
        );
        let fix = self
            .grammar
            .rewrite(
                line,
                &self.config.placeholder_reference,
                &self.config.default_description,
            )
            .and_then(|fixed| rewrite_comment(comment, ctx, &fixed));

        Some(match fix {
            Some(fix) => diagnostic.with_fix(fix),
            None => diagnostic,
        })
    }
}

pub(crate) fn grammar(rule: &str, prefixes: &[String]) -> Result<CommentGrammar, ConfigError> {
    CommentGrammar::new(prefixes.iter().cloned()).map_err(|source| ConfigError::InvalidPattern {
        rule: rule.to_string(),
        pattern: prefixes.join("|"),
        source,
    })
}

/// Replace a single-line comment with `text`, keeping its delimiter style.
///
/// A comment sitting directly between `{` and `}` (a JSX expression
/// container) is always rewritten as a block comment, since a line comment
/// would swallow the closing brace.
pub(crate) fn rewrite_comment(comment: &Comment, ctx: &LintContext, text: &str) -> Option<Fix> {
    if comment.is_multiline() {
        return None;
    }

    let replacement = if ctx.is_in_braces(comment) {
        format!("/* {text} */")
    } else if comment.is_line() {
        format!("// {text}")
    } else if comment.is_jsdoc() {
        format!("/** {text} */")
    } else {
        format!("/* {text} */")
    };

    Some(Fix::new(comment.span, replacement).with_message(format!("Rewrite as `{text}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::collect_comments;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;
    use pretty_assertions::assert_eq;

    fn run(rule: &TodoFormat, source: &str) -> Vec<Diagnostic> {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::jsx()).parse();
        let ctx = LintContext::from_comments(source, SourceType::jsx(), collect_comments(source, &ret.program));
        ctx.comments()
            .iter()
            .filter_map(|comment| rule.check(comment, &ctx))
            .collect()
    }

    fn fixed(source: &str) -> String {
        let diagnostics = run(&TodoFormat::new(), source);
        assert_eq!(diagnostics.len(), 1, "{source}");
        diagnostics[0].fix().expect("fix").apply(source)
    }

    #[test]
    fn test_rule_name() {
        assert_eq!(TodoFormat::NAME, "todo-format");
    }

    #[test]
    fn test_valid_comments() {
        let rule = TodoFormat::new();
        assert!(run(&rule, "// TODO (PROJ-1): ship it\nlet a;").is_empty());
        assert!(run(&rule, "/* fixme(bob): handle nulls */\nlet a;").is_empty());
        assert!(run(&rule, "// a regular comment\nlet a;").is_empty());
    }

    #[test]
    fn test_fixes_keep_style() {
        assert_eq!(fixed("// TODO: ship it\nlet a;"), "// TODO (TICKET-XXX): ship it\nlet a;");
        assert_eq!(fixed("/* fixme */\nlet a;"), "/* FIXME (TICKET-XXX): add description */\nlet a;");
        assert_eq!(fixed("// todo(alice) tidy\nlet a;"), "// TODO (alice): tidy\nlet a;");
    }

    #[test]
    fn test_jsx_container_uses_block_comment() {
        let source = "const el = <div>{// TODO: label\n}</div>;";
        assert_eq!(fixed(source), "const el = <div>{/* TODO (TICKET-XXX): label */\n}</div>;");
    }

    #[test]
    fn test_multiline_comment_has_no_fix() {
        let diagnostics = run(&TodoFormat::new(), "/*\n * TODO: one\n * two\n */\nlet a;");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].fixes.is_empty());
        assert_eq!(diagnostics[0].message_id, "invalidTodoFormat");
        assert_eq!(diagnostics[0].data["prefix"], "TODO");
    }

    #[test]
    fn test_custom_prefixes() {
        let config: TodoFormatConfig =
            serde_json::from_str(r#"{ "prefixes": ["NOTE"], "placeholderReference": "N/A" }"#).unwrap();
        let rule = TodoFormat::with_config(config).unwrap();
        assert!(run(&rule, "// TODO: anything\nlet a;").is_empty());
        let diagnostics = run(&rule, "// note: check\nlet a;");
        assert_eq!(diagnostics[0].fix().unwrap().replacement, "// NOTE (N/A): check");
    }
}
