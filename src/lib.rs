//! Comment Lint
//!
//! Lint rules for source comments, built on OXC: structured TODO formats,
//! commented-out code, comments that restate the code, JSDoc/parameter
//! reconciliation and a few file-level analyses.
//!
//! ## Usage
//!
//! ```rust
//! use comment_lint::{lint_source, RulesConfig};
//! use oxc_span::SourceType;
//!
//! let source = "// TODO fix this\nlet a = 1;\n";
//! let result = lint_source(source, SourceType::mjs(), RulesConfig::default()).unwrap();
//! assert_eq!(result.diagnostics[0].message_id, "invalidTodoFormat");
//! ```

use std::sync::Arc;

#[cfg(feature = "napi")]
use napi_derive::napi;

use once_cell::sync::Lazy;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use thiserror::Error;

pub use comment_linter::{
    Diagnostic, DiagnosticSeverity, Fix, LintResult, LintRunner, RuleSetting, RulesConfig, Severity,
};
pub use presets::{Preset, PresetDefinition, PresetError, PresetRegistry};
pub use tracker::{StaticTracker, TicketStatus, TicketValidator, TrackerError, TrackerOptions};

#[derive(Debug, Error)]
pub enum LintError {
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("could not parse source: {0}")]
    Parse(String),
}

static BUILTIN_PRESETS: Lazy<PresetRegistry> = Lazy::new(PresetRegistry::builtin);

/// Built-in presets, resolved once per process
pub fn builtin_presets() -> &'static PresetRegistry {
    &BUILTIN_PRESETS
}

/// Source type for a file name, falling back to TSX
pub fn source_type_for(filename: &str) -> SourceType {
    SourceType::from_path(filename).unwrap_or(SourceType::tsx())
}

/// Parse `source` and run the rules in `config`.
///
/// Ticket lookups are left in [`LintResult::tickets`]; see
/// [`lint_source_with_tickets`].
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lint_source(source: &str, source_type: SourceType, config: RulesConfig) -> Result<LintResult, LintError> {
    run(source, source_type, config, None)
}

/// [`lint_source`], then resolve ticket references against `backend`
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub async fn lint_source_with_tickets(
    source: &str,
    source_type: SourceType,
    config: RulesConfig,
    backend: Arc<dyn TicketValidator>,
) -> Result<LintResult, LintError> {
    let result = run(source, source_type, config, Some(backend))?;
    Ok(result.resolve_tickets().await)
}

/// Lint with a named preset from `registry`
pub fn lint_with_preset(
    source: &str,
    source_type: SourceType,
    registry: &PresetRegistry,
    preset: &str,
) -> Result<LintResult, LintError> {
    let preset = registry
        .get(preset)
        .ok_or_else(|| LintError::UnknownPreset(preset.to_string()))?;
    lint_source(source, source_type, preset.rules_config())
}

fn run(
    source: &str,
    source_type: SourceType,
    config: RulesConfig,
    backend: Option<Arc<dyn TicketValidator>>,
) -> Result<LintResult, LintError> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if ret.panicked {
        let message = ret
            .errors
            .first()
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unrecoverable syntax error".to_string());
        return Err(LintError::Parse(message));
    }
    if !ret.errors.is_empty() {
        tracing::debug!(errors = ret.errors.len(), "linting a program with recoverable syntax errors");
    }

    let ctx = comment_linter::LintContext::new(source, source_type, &ret.program);
    let mut runner = LintRunner::new(ctx, config);
    if let Some(backend) = backend {
        runner = runner.with_ticket_backend(backend);
    }
    Ok(runner.run(&ret.program))
}

/// Replacement edit exposed to JavaScript
#[cfg(feature = "napi")]
#[napi(object)]
pub struct JsFix {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

/// Diagnostic exposed to JavaScript
#[cfg(feature = "napi")]
#[napi(object)]
pub struct JsDiagnostic {
    pub rule: String,
    pub message_id: String,
    pub message: String,
    /// "error" or "warning"
    pub severity: String,
    pub start: u32,
    pub end: u32,
    /// One-based
    pub line: u32,
    /// Zero-based
    pub column: u32,
    pub fix: Option<JsFix>,
}

/// Lint options exposed to JavaScript
#[cfg(feature = "napi")]
#[napi(object)]
#[derive(Default)]
pub struct JsLintOptions {
    /// Source filename, used to pick the parser dialect
    /// @default "input.tsx"
    pub filename: Option<String>,

    /// Built-in preset name
    /// @default "recommended"
    pub preset: Option<String>,

    /// JSON rule map, e.g. `{"todo-age": ["warn", {"maxAgeDays": 14}]}`.
    /// Replaces the preset when given.
    pub rules: Option<String>,
}

/// Lint the comments of one file
#[cfg(feature = "napi")]
#[napi]
pub fn lint_comments(source: String, options: Option<JsLintOptions>) -> napi::Result<Vec<JsDiagnostic>> {
    let options = options.unwrap_or_default();
    let source_type = source_type_for(options.filename.as_deref().unwrap_or("input.tsx"));

    let config = match options.rules.as_deref() {
        Some(rules) => {
            let settings: indexmap::IndexMap<String, RuleSetting> = serde_json::from_str(rules)
                .map_err(|err| napi::Error::from_reason(format!("invalid rules: {err}")))?;
            RulesConfig::from_settings(&settings)
        }
        None => {
            let name = options.preset.as_deref().unwrap_or("recommended");
            builtin_presets()
                .get(name)
                .ok_or_else(|| napi::Error::from_reason(LintError::UnknownPreset(name.to_string()).to_string()))?
                .rules_config()
        }
    };

    let result = lint_source(&source, source_type, config).map_err(|err| napi::Error::from_reason(err.to_string()))?;
    let lines = comment_linter::utils::LineIndex::new(&source);
    Ok(result
        .diagnostics
        .into_iter()
        .map(|diagnostic| {
            let (line, column) = lines.line_col(diagnostic.start);
            JsDiagnostic {
                fix: diagnostic.fixes.first().map(|fix| JsFix {
                    start: fix.start,
                    end: fix.end,
                    text: fix.replacement.clone(),
                }),
                severity: match diagnostic.severity {
                    DiagnosticSeverity::Error => "error",
                    DiagnosticSeverity::Warning => "warning",
                }
                .to_string(),
                rule: diagnostic.rule,
                message_id: diagnostic.message_id,
                message: diagnostic.message,
                start: diagnostic.start,
                end: diagnostic.end,
                line: line as u32,
                column: column as u32,
            }
        })
        .collect())
}
