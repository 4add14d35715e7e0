//! jsdoc-params
//!
//! Reconcile a function's doc comment with its signature: duplicate, missing,
//! extra and out-of-order `@param` tags, type/description policy for params
//! and returns, and `@returns` presence.

use common::text::body_lines;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::comment::Comment;
use crate::context::LintContext;
use crate::diagnostic::{message_data, Diagnostic, Fix, MessageData};
use crate::function::FunctionInfo;
use crate::jsdoc::{DocTag, ParsedDocComment};
use crate::utils::line_indent;
use crate::{RuleCategory, RuleMeta};

/// Doc comments carrying one of these tags describe something else
const SKIP_TAGS: &[&str] = &["inheritdoc", "override", "type", "typedef", "callback"];

/// Configuration for jsdoc-params rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct JsdocParamsConfig {
    pub check_param_names: bool,
    pub check_param_order: bool,
    pub require_param_type: bool,
    pub require_param_description: bool,
    pub require_return_type: bool,
    pub require_return_description: bool,
    pub require_returns: bool,
    /// Report `@returns` on functions that never return a value
    pub check_unnecessary_returns: bool,
}

impl Default for JsdocParamsConfig {
    fn default() -> Self {
        Self {
            check_param_names: true,
            check_param_order: true,
            require_param_type: true,
            require_param_description: true,
            require_return_type: true,
            require_return_description: false,
            require_returns: true,
            check_unnecessary_returns: false,
        }
    }
}

/// jsdoc-params rule
#[derive(Debug, Clone, Default)]
pub struct JsdocParams {
    config: JsdocParamsConfig,
}

impl RuleMeta for JsdocParams {
    const NAME: &'static str = "jsdoc-params";
    const CATEGORY: RuleCategory = RuleCategory::Correctness;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("duplicateParam", "Duplicate @param `{{name}}`."),
        ("missingParam", "Missing @param for parameter `{{name}}`."),
        ("extraParam", "@param `{{name}}` does not match any parameter of the function."),
        (
            "paramOrderMismatch",
            "@param `{{name}}` is documented at position {{actual}} but declared at position {{expected}}.",
        ),
        ("missingParamType", "@param `{{name}}` is missing a type."),
        ("missingParamDescription", "@param `{{name}}` is missing a description."),
        ("missingReturnType", "@returns is missing a type."),
        ("missingReturnDescription", "@returns is missing a description."),
        ("missingReturns", "Function returns a value but its doc comment has no @returns tag."),
        ("unnecessaryReturns", "@returns is documented but the function never returns a value."),
    ];

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "checkParamNames": { "type": "boolean" },
                "checkParamOrder": { "type": "boolean" },
                "requireParamType": { "type": "boolean" },
                "requireParamDescription": { "type": "boolean" },
                "requireReturnType": { "type": "boolean" },
                "requireReturnDescription": { "type": "boolean" },
                "requireReturns": { "type": "boolean" },
                "checkUnnecessaryReturns": { "type": "boolean" }
            },
            "additionalProperties": false
        })
    }
}

impl JsdocParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JsdocParamsConfig) -> Self {
        Self { config }
    }

    /// Check a function against its doc comment. Malformed doc comments are
    /// treated as absent.
    pub fn check(&self, function: &FunctionInfo, doc: &Comment, ctx: &LintContext) -> Vec<Diagnostic> {
        let parsed = match ParsedDocComment::parse(doc.text, doc.content_start()) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(%err, start = doc.span.start, "skipping malformed doc comment");
                return Vec::new();
            }
        };
        if SKIP_TAGS.iter().any(|tag| parsed.has_tag(tag)) {
            return Vec::new();
        }
        self.reconcile(&parsed, function, doc, ctx)
    }

    /// Compare parsed tags with the function signature
    pub fn reconcile(
        &self,
        doc: &ParsedDocComment,
        function: &FunctionInfo,
        comment: &Comment,
        ctx: &LintContext,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        // Duplicates; only first occurrences take part in position bookkeeping
        let mut seen = FxHashSet::default();
        let mut unique: Vec<(&str, &DocTag)> = Vec::new();
        for tag in doc.params().filter(|tag| !tag.is_nested()) {
            let Some(name) = tag.name.as_deref() else {
                continue;
            };
            if seen.insert(name) {
                unique.push((name, tag));
            } else {
                diagnostics.push(Self::report(tag.span, "duplicateParam", name_data(name)));
            }
        }

        let doc_index: FxHashMap<&str, usize> =
            unique.iter().enumerate().map(|(idx, (name, _))| (*name, idx)).collect();
        let formal_index: FxHashMap<&str, usize> = function
            .params
            .iter()
            .filter_map(|param| param.name.as_deref().map(|name| (name, param.position)))
            .collect();

        if self.config.check_param_names {
            for param in &function.params {
                let Some(name) = param.name.as_deref() else {
                    continue;
                };
                if !doc_index.contains_key(name) {
                    let fix = insert_doc_line(comment, doc, ctx, &format!("@param {{*}} {name} - [description]"), true)
                        .with_message(format!("Add @param for `{name}`"));
                    diagnostics.push(Self::report(comment.span, "missingParam", name_data(name)).with_fix(fix));
                }
            }

            for (idx, (name, tag)) in unique.iter().enumerate() {
                // A tag in the slot of a destructured parameter names that parameter
                let names_destructured = function
                    .params
                    .get(idx)
                    .is_some_and(|param| param.name.is_none());
                if !formal_index.contains_key(name) && !names_destructured {
                    diagnostics.push(Self::report(tag.span, "extraParam", name_data(name)));
                }
            }
        }

        if self.config.check_param_order {
            let documented: Vec<(&str, usize)> = function
                .params
                .iter()
                .filter_map(|param| param.name.as_deref().map(|name| (name, param.position)))
                .filter(|(name, _)| doc_index.contains_key(name))
                .collect();
            let doc_order: Vec<&str> = unique
                .iter()
                .map(|(name, _)| *name)
                .filter(|name| formal_index.contains_key(name))
                .collect();

            for (expected_rank, (name, declared)) in documented.iter().enumerate() {
                let actual = doc_index[name];
                let actual_rank = doc_order.iter().position(|other| other == name);
                if actual != *declared && actual_rank != Some(expected_rank) {
                    let data = message_data([
                        ("name", name.to_string()),
                        ("expected", (declared + 1).to_string()),
                        ("actual", (actual + 1).to_string()),
                    ]);
                    diagnostics.push(Self::report(unique[actual].1.span, "paramOrderMismatch", data));
                }
            }
        }

        for tag in doc.params() {
            let name = tag.name.as_deref().unwrap_or_default();
            if self.config.require_param_type && tag.type_text.is_none() {
                diagnostics.push(Self::report(tag.span, "missingParamType", name_data(name)));
            }
            if self.config.require_param_description && tag.description.is_none() {
                diagnostics.push(Self::report(tag.span, "missingParamDescription", name_data(name)));
            }
        }
        for tag in doc.returns() {
            if self.config.require_return_type && tag.type_text.is_none() {
                diagnostics.push(Self::report(tag.span, "missingReturnType", MessageData::new()));
            }
            if self.config.require_return_description && tag.description.is_none() {
                diagnostics.push(Self::report(tag.span, "missingReturnDescription", MessageData::new()));
            }
        }

        let returns_tag = doc.returns().next();
        if self.config.require_returns && function.returns_value && returns_tag.is_none() {
            let fix = insert_doc_line(comment, doc, ctx, "@returns {*} [description]", false)
                .with_message("Add @returns");
            diagnostics.push(Self::report(comment.span, "missingReturns", MessageData::new()).with_fix(fix));
        }

        if let Some(tag) = returns_tag {
            let documents_nothing = tag
                .type_text
                .as_deref()
                .is_some_and(|ty| matches!(ty, "void" | "undefined" | "never"));
            if self.config.check_unnecessary_returns
                && !function.returns_value
                && function.has_body
                && !function.is_async
                && !function.is_generator
                && !documents_nothing
            {
                diagnostics.push(Self::report(tag.span, "unnecessaryReturns", MessageData::new()));
            }
        }

        diagnostics
    }
}

fn name_data(name: &str) -> MessageData {
    message_data([("name", name)])
}

/// Insert a tag line into a doc comment.
///
/// With `before_returns`, the line goes above the first `@returns` tag line;
/// otherwise (or without one) above the closing `*/` line. Comments whose
/// closing delimiter shares a line with content are rewritten in multi-line
/// form.
fn insert_doc_line(
    comment: &Comment,
    doc: &ParsedDocComment,
    ctx: &LintContext,
    line: &str,
    before_returns: bool,
) -> Fix {
    let text = comment.text;
    let content_start = comment.content_start();
    let returns_tag = doc.returns().next().filter(|_| before_returns);

    if let Some(last_nl) = text.rfind('\n') {
        let closing = &text[last_nl + 1..];
        if closing.trim().is_empty() {
            let offset = match returns_tag {
                Some(tag) => {
                    let rel = (tag.span.start - content_start) as usize;
                    text[..rel].rfind('\n').map(|nl| content_start + nl as u32 + 1)
                }
                None => Some(content_start + last_nl as u32 + 1),
            };
            if let Some(offset) = offset {
                return Fix::insert(offset, format!("{closing}* {line}\n"));
            }
        }
    }

    let indent = line_indent(ctx.source_text(), comment.span.start);
    let mut lines: Vec<&str> = body_lines(text).filter(|l| !l.is_empty()).collect();
    let at = if returns_tag.is_some() {
        lines
            .iter()
            .position(|l| l.starts_with("@return"))
            .unwrap_or(lines.len())
    } else {
        lines.len()
    };
    lines.insert(at, line);

    let mut rebuilt = String::from("/**\n");
    for l in lines {
        rebuilt.push_str(indent);
        rebuilt.push_str(" * ");
        rebuilt.push_str(l);
        rebuilt.push('\n');
    }
    rebuilt.push_str(indent);
    rebuilt.push_str(" */");
    Fix::new(comment.span, rebuilt)
}
