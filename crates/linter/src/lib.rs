//! Comment lint rules
//!
//! Lint rules that inspect source comments: structured TODO formats,
//! commented-out code, comments that restate the code, JSDoc parameter
//! reconciliation, comment ratios, TODO aging, stale identifier references and
//! issue-tracker ticket validation. Rules run over the oxc AST and its comment
//! stream in a single pass (see [`LintRunner`]).

pub mod comment;
pub mod config;
pub mod function;
pub mod jsdoc;
pub mod rules;
pub mod utils;
pub mod visitor;
mod context;
mod diagnostic;

use oxc_span::Span;

pub use comment::{Comment, CommentKind};
pub use config::{ConfigError, RuleSetting, Severity};
pub use context::LintContext;
pub use diagnostic::{message_data, render_message, Diagnostic, DiagnosticSeverity, Fix, MessageData};
pub use function::{FunctionInfo, ParameterDescriptor};
pub use jsdoc::{DocParseError, DocTag, ParsedDocComment};
pub use rules::*;
pub use visitor::{lint, lint_with_config, LintResult, LintRunner, RulesConfig};

/// Rule category for comment rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Rules that detect code that is likely to be incorrect
    Correctness,
    /// Rules that suggest improvements
    Pedantic,
    /// Rules that encourage best practices
    Style,
    /// File-level metrics and heuristics
    Analysis,
}

/// Rule metadata
pub trait RuleMeta {
    const NAME: &'static str;
    const CATEGORY: RuleCategory;
    /// messageId to message template, `{{key}}` placeholders filled from diagnostic data
    const MESSAGES: &'static [(&'static str, &'static str)];

    /// JSON-Schema-shaped options descriptor
    fn schema() -> serde_json::Value;

    fn message_template(message_id: &str) -> Option<&'static str> {
        Self::MESSAGES
            .iter()
            .find(|(id, _)| *id == message_id)
            .map(|(_, template)| *template)
    }

    /// Build a warning for `message_id`, rendering its template with `data`
    fn report(span: Span, message_id: &str, data: MessageData) -> Diagnostic {
        let message = match Self::message_template(message_id) {
            Some(template) => render_message(template, &data),
            None => message_id.to_string(),
        };
        Diagnostic::warning(Self::NAME, span, message)
            .with_message_id(message_id)
            .with_data(data)
    }
}
