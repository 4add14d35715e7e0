//! Unified visitor pattern for running all lint rules in a single AST pass
//!
//! Comment-only rules run over the comment stream before traversal. The
//! traversal attaches doc comments to functions and records the statements and
//! member names that the adjacency and staleness rules need once it is done.
//! Declared names come from the semantic scope tree.
//! Ticket lookups are returned unresolved in [`LintResult::tickets`].

use std::sync::Arc;

use indexmap::IndexMap;
use oxc_ast::ast::{
    ArrowFunctionExpression, ExportDefaultDeclaration, ExportNamedDeclaration, Expression,
    ExpressionStatement, Function, MethodDefinition, ObjectProperty, Program, PropertyDefinition, PropertyKey,
    Statement, VariableDeclaration,
};
use oxc_ast_visit::{walk, Visit};
use oxc_semantic::SemanticBuilder;
use oxc_span::{GetSpan, SourceType, Span};
use oxc_syntax::scope::ScopeFlags;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::DeserializeOwned;
use tracker::TicketValidator;

use crate::comment::Comment;
use crate::config::{parse_options, ConfigError, RuleSetting, Severity};
use crate::context::LintContext;
use crate::diagnostic::{Diagnostic, DiagnosticSeverity};
use crate::function::FunctionInfo;
use crate::rules::{
    A11yTodoFormat, AdjacentStatements, CommentRatio, JsdocParams, NoCommentedCode, NoObviousComments,
    NoStaleReferences, TicketBatch, TicketRefs, TodoAge, TodoFormat, ValidTicketReference,
};
use crate::RuleMeta;

/// Rule ids may be written with the plugin namespace
const PLUGIN_PREFIX: &str = "comment-lint/";

/// Configuration for which rules are enabled
#[derive(Debug)]
pub struct RulesConfig {
    pub todo_format: Option<TodoFormat>,
    pub a11y_todo_format: Option<A11yTodoFormat>,
    pub no_commented_code: Option<NoCommentedCode>,
    pub no_obvious_comments: Option<NoObviousComments>,
    pub jsdoc_params: Option<JsdocParams>,
    pub comment_ratio: Option<CommentRatio>,
    pub todo_age: Option<TodoAge>,
    pub no_stale_references: Option<NoStaleReferences>,
    pub valid_ticket_reference: Option<ValidTicketReference>,
    severities: FxHashMap<&'static str, Severity>,
    errors: Vec<ConfigError>,
}

impl Default for RulesConfig {
    /// The recommended rule set
    fn default() -> Self {
        Self::none()
            .with_todo_format(TodoFormat::new())
            .with_a11y_todo_format(A11yTodoFormat::new())
            .with_no_commented_code(NoCommentedCode::new())
            .with_no_obvious_comments(NoObviousComments::new())
            .with_jsdoc_params(JsdocParams::new())
    }
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none() -> Self {
        Self {
            todo_format: None,
            a11y_todo_format: None,
            no_commented_code: None,
            no_obvious_comments: None,
            jsdoc_params: None,
            comment_ratio: None,
            todo_age: None,
            no_stale_references: None,
            valid_ticket_reference: None,
            severities: FxHashMap::default(),
            errors: Vec::new(),
        }
    }

    /// Build from a rule map such as a preset's `rules`.
    ///
    /// Unknown ids and malformed options disable the affected rule and are
    /// kept in [`RulesConfig::errors`].
    pub fn from_settings(settings: &IndexMap<String, RuleSetting>) -> Self {
        let mut config = Self::none();
        for (id, setting) in settings {
            config.apply(id, setting);
        }
        config
    }

    fn apply(&mut self, id: &str, setting: &RuleSetting) {
        let name = id.strip_prefix(PLUGIN_PREFIX).unwrap_or(id);
        let severity = setting.severity();
        let options = setting.options();
        let enabled = severity.is_enabled();
        let errors = &mut self.errors;

        let name: &'static str = match name {
            n if n == TodoFormat::NAME => {
                self.todo_format = build(errors, enabled, n, options, TodoFormat::with_config);
                TodoFormat::NAME
            }
            n if n == A11yTodoFormat::NAME => {
                self.a11y_todo_format = build(errors, enabled, n, options, A11yTodoFormat::with_config);
                A11yTodoFormat::NAME
            }
            n if n == NoCommentedCode::NAME => {
                self.no_commented_code = build(errors, enabled, n, options, NoCommentedCode::with_config);
                NoCommentedCode::NAME
            }
            n if n == NoObviousComments::NAME => {
                self.no_obvious_comments =
                    build(errors, enabled, n, options, |c| Ok(NoObviousComments::with_config(c)));
                NoObviousComments::NAME
            }
            n if n == JsdocParams::NAME => {
                self.jsdoc_params = build(errors, enabled, n, options, |c| Ok(JsdocParams::with_config(c)));
                JsdocParams::NAME
            }
            n if n == CommentRatio::NAME => {
                self.comment_ratio = build(errors, enabled, n, options, |c| Ok(CommentRatio::with_config(c)));
                CommentRatio::NAME
            }
            n if n == TodoAge::NAME => {
                self.todo_age = build(errors, enabled, n, options, TodoAge::with_config);
                TodoAge::NAME
            }
            n if n == NoStaleReferences::NAME => {
                self.no_stale_references = build(errors, enabled, n, options, NoStaleReferences::with_config);
                NoStaleReferences::NAME
            }
            n if n == ValidTicketReference::NAME => {
                self.valid_ticket_reference =
                    build(errors, enabled, n, options, ValidTicketReference::with_config);
                ValidTicketReference::NAME
            }
            unknown => {
                tracing::debug!(rule = unknown, "ignoring unknown rule");
                errors.push(ConfigError::UnknownRule(unknown.to_string()));
                return;
            }
        };
        self.severities.insert(name, severity);
    }

    /// Configuration problems collected by [`RulesConfig::from_settings`]
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    /// Configured level of `rule`; rules enabled through builders are `warn`
    pub fn severity(&self, rule: &str) -> Severity {
        self.severities.get(rule).copied().unwrap_or_default()
    }

    /// Ids of the enabled rules, in registration order
    pub fn enabled_rules(&self) -> Vec<&'static str> {
        [
            (TodoFormat::NAME, self.todo_format.is_some()),
            (A11yTodoFormat::NAME, self.a11y_todo_format.is_some()),
            (NoCommentedCode::NAME, self.no_commented_code.is_some()),
            (NoObviousComments::NAME, self.no_obvious_comments.is_some()),
            (JsdocParams::NAME, self.jsdoc_params.is_some()),
            (CommentRatio::NAME, self.comment_ratio.is_some()),
            (TodoAge::NAME, self.todo_age.is_some()),
            (NoStaleReferences::NAME, self.no_stale_references.is_some()),
            (ValidTicketReference::NAME, self.valid_ticket_reference.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, enabled)| enabled.then_some(name))
        .collect()
    }

    pub fn with_severity(mut self, rule: &'static str, severity: Severity) -> Self {
        self.severities.insert(rule, severity);
        self
    }

    pub fn with_todo_format(mut self, rule: TodoFormat) -> Self {
        self.todo_format = Some(rule);
        self
    }

    pub fn with_a11y_todo_format(mut self, rule: A11yTodoFormat) -> Self {
        self.a11y_todo_format = Some(rule);
        self
    }

    pub fn with_no_commented_code(mut self, rule: NoCommentedCode) -> Self {
        self.no_commented_code = Some(rule);
        self
    }

    pub fn with_no_obvious_comments(mut self, rule: NoObviousComments) -> Self {
        self.no_obvious_comments = Some(rule);
        self
    }

    pub fn with_jsdoc_params(mut self, rule: JsdocParams) -> Self {
        self.jsdoc_params = Some(rule);
        self
    }

    pub fn with_comment_ratio(mut self, rule: CommentRatio) -> Self {
        self.comment_ratio = Some(rule);
        self
    }

    pub fn with_todo_age(mut self, rule: TodoAge) -> Self {
        self.todo_age = Some(rule);
        self
    }

    pub fn with_no_stale_references(mut self, rule: NoStaleReferences) -> Self {
        self.no_stale_references = Some(rule);
        self
    }

    pub fn with_valid_ticket_reference(mut self, rule: ValidTicketReference) -> Self {
        self.valid_ticket_reference = Some(rule);
        self
    }
}

fn build<C, R>(
    errors: &mut Vec<ConfigError>,
    enabled: bool,
    rule: &str,
    options: Option<&serde_json::Value>,
    make: impl FnOnce(C) -> Result<R, ConfigError>,
) -> Option<R>
where
    C: DeserializeOwned + Default,
{
    if !enabled {
        return None;
    }
    match parse_options::<C>(rule, options).and_then(make) {
        Ok(rule) => Some(rule),
        Err(err) => {
            tracing::debug!(%err, "rule disabled by invalid configuration");
            errors.push(err);
            None
        }
    }
}

/// Unified visitor that runs all enabled rules during a single AST traversal
pub struct LintRunner<'a> {
    ctx: LintContext<'a>,
    config: RulesConfig,
    backend: Option<Arc<dyn TicketValidator>>,
    diagnostics: Vec<Diagnostic>,
    statements: AdjacentStatements,
    symbols: FxHashSet<String>,
    /// Function start → start of the node wrapping it
    anchors: FxHashMap<u32, u32>,
    tickets: TicketRefs,
}

impl<'a> LintRunner<'a> {
    pub fn new(ctx: LintContext<'a>, config: RulesConfig) -> Self {
        Self {
            ctx,
            config,
            backend: None,
            diagnostics: Vec::new(),
            statements: AdjacentStatements::default(),
            symbols: FxHashSet::default(),
            anchors: FxHashMap::default(),
            tickets: TicketRefs::new(),
        }
    }

    /// Backend used for `valid-ticket-reference` lookups
    pub fn with_ticket_backend(mut self, backend: Arc<dyn TicketValidator>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Run all enabled rules on the given program
    #[tracing::instrument(level = "debug", skip_all, fields(comments = self.ctx.comments().len()))]
    pub fn run(mut self, program: &Program<'a>) -> LintResult {
        self.report_config_errors();
        self.check_comments();
        if self.config.no_stale_references.is_some() {
            self.collect_symbols(program);
        }
        self.visit_program(program);
        self.check_after_traversal();

        let tickets = self.config.valid_ticket_reference.as_ref().and_then(|rule| {
            let severity = level(self.config.severity(ValidTicketReference::NAME));
            rule.batch(std::mem::take(&mut self.tickets), self.backend.clone())
                .map(|batch| batch.with_severity(severity))
        });

        let mut diagnostics = self.diagnostics;
        for diagnostic in &mut diagnostics {
            if self.config.severity(&diagnostic.rule) == Severity::Error {
                diagnostic.severity = DiagnosticSeverity::Error;
            }
        }
        diagnostics.sort_by_key(|d| (d.start, d.end));
        tracing::debug!(count = diagnostics.len(), "lint finished");

        LintResult { diagnostics, tickets }
    }

    fn report_config_errors(&mut self) {
        for err in &self.config.errors {
            self.diagnostics.push(
                Diagnostic::error(err.rule(), Span::new(0, 0), err.to_string()).with_message_id("invalidOptions"),
            );
        }
        if let Some(rule) = &self.config.valid_ticket_reference {
            self.diagnostics.extend(rule.check_config());
        }
    }

    /// Every name bound in any scope of `program`
    fn collect_symbols(&mut self, program: &Program<'a>) {
        let semantic = SemanticBuilder::new().build(program).semantic;
        self.symbols.extend(semantic.scoping().symbol_names().map(str::to_string));
    }

    /// Rules that only look at one comment at a time
    fn check_comments(&mut self) {
        let ctx = &self.ctx;
        let config = &self.config;
        for comment in ctx.comments() {
            if let Some(rule) = &config.todo_format {
                self.diagnostics.extend(rule.check(comment, ctx));
            }
            if let Some(rule) = &config.a11y_todo_format {
                self.diagnostics.extend(rule.check(comment, ctx));
            }
            if let Some(rule) = &config.todo_age {
                self.diagnostics.extend(rule.check(comment));
            }
            if let Some(rule) = &config.valid_ticket_reference {
                rule.collect(comment, &mut self.tickets);
            }
        }
        if let Some(rule) = &config.no_commented_code {
            self.diagnostics.extend(rule.check(ctx));
        }
    }

    /// Rules that need the statements and symbols recorded during traversal
    fn check_after_traversal(&mut self) {
        let ctx = &self.ctx;
        if let Some(rule) = &self.config.no_obvious_comments {
            for comment in ctx.comments() {
                self.diagnostics.extend(rule.check(comment, ctx, &self.statements));
            }
        }
        if let Some(rule) = &self.config.no_stale_references {
            for comment in ctx.comments() {
                self.diagnostics.extend(rule.check(comment, &self.symbols));
            }
        }
        if let Some(rule) = &self.config.comment_ratio {
            self.diagnostics.extend(rule.check(ctx));
        }
    }

    fn anchor(&mut self, inner: u32, outer: u32) {
        if outer < inner {
            self.anchors.insert(inner, outer);
        }
    }

    fn anchor_value(&mut self, value: &Expression<'a>, outer: u32) {
        if let Some(start) = function_start(value) {
            self.anchor(start, outer);
        }
    }

    fn check_doc(&mut self, start: u32, info: impl FnOnce() -> FunctionInfo) {
        let Some(rule) = &self.config.jsdoc_params else {
            return;
        };
        let Some(doc) = attached_doc(&self.ctx, &self.anchors, start) else {
            return;
        };
        let info = info();
        self.diagnostics.extend(rule.check(&info, doc, &self.ctx));
    }
}

fn level(severity: Severity) -> DiagnosticSeverity {
    severity.diagnostic_severity().unwrap_or(DiagnosticSeverity::Warning)
}

/// Start of a function-valued expression
fn function_start(expression: &Expression) -> Option<u32> {
    match expression.without_parentheses() {
        Expression::FunctionExpression(func) => Some(func.span.start),
        Expression::ArrowFunctionExpression(arrow) => Some(arrow.span.start),
        _ => None,
    }
}

/// Doc comment directly before `start`, or before one of its wrappers
fn attached_doc<'c, 'a>(
    ctx: &'c LintContext<'a>,
    anchors: &FxHashMap<u32, u32>,
    mut start: u32,
) -> Option<&'c Comment<'a>> {
    loop {
        if let Some(doc) = ctx.doc_comment_before(start) {
            return Some(doc);
        }
        start = *anchors.get(&start)?;
    }
}

impl<'a> Visit<'a> for LintRunner<'a> {
    fn visit_statement(&mut self, statement: &Statement<'a>) {
        self.statements.record(statement);
        walk::walk_statement(self, statement);
    }

    fn visit_property_key(&mut self, key: &PropertyKey<'a>) {
        match key {
            PropertyKey::StaticIdentifier(ident) => {
                self.symbols.insert(ident.name.to_string());
            }
            PropertyKey::PrivateIdentifier(ident) => {
                self.symbols.insert(ident.name.to_string());
            }
            _ => {}
        }
        walk::walk_property_key(self, key);
    }

    fn visit_variable_declaration(&mut self, decl: &VariableDeclaration<'a>) {
        if decl.declarations.len() == 1 {
            if let Some(init) = decl.declarations.first().and_then(|d| d.init.as_ref()) {
                self.anchor_value(init, decl.span.start);
            }
        }
        walk::walk_variable_declaration(self, decl);
    }

    fn visit_export_named_declaration(&mut self, export: &ExportNamedDeclaration<'a>) {
        if let Some(declaration) = &export.declaration {
            self.anchor(declaration.span().start, export.span.start);
        }
        walk::walk_export_named_declaration(self, export);
    }

    fn visit_export_default_declaration(&mut self, export: &ExportDefaultDeclaration<'a>) {
        self.anchor(export.declaration.span().start, export.span.start);
        walk::walk_export_default_declaration(self, export);
    }

    fn visit_method_definition(&mut self, method: &MethodDefinition<'a>) {
        self.anchor(method.value.span.start, method.span.start);
        walk::walk_method_definition(self, method);
    }

    fn visit_property_definition(&mut self, property: &PropertyDefinition<'a>) {
        if let Some(value) = &property.value {
            self.anchor_value(value, property.span.start);
        }
        walk::walk_property_definition(self, property);
    }

    fn visit_object_property(&mut self, property: &ObjectProperty<'a>) {
        self.anchor_value(&property.value, property.span.start);
        walk::walk_object_property(self, property);
    }

    fn visit_expression_statement(&mut self, statement: &ExpressionStatement<'a>) {
        if let Expression::AssignmentExpression(assign) = &statement.expression {
            self.anchor_value(&assign.right, statement.span.start);
        }
        walk::walk_expression_statement(self, statement);
    }

    fn visit_function(&mut self, func: &Function<'a>, flags: ScopeFlags) {
        self.check_doc(func.span.start, || FunctionInfo::from_function(func));
        walk::walk_function(self, func, flags);
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        self.check_doc(arrow.span.start, || FunctionInfo::from_arrow(arrow));
        walk::walk_arrow_function_expression(self, arrow);
    }
}

/// Result of running the linter
#[derive(Debug)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Ticket lookups still to be made, if any
    pub tickets: Option<TicketBatch>,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d.severity, DiagnosticSeverity::Error))
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Warning))
            .count()
    }

    /// Diagnostics of one rule
    pub fn for_rule<'r>(&'r self, rule: &'r str) -> impl Iterator<Item = &'r Diagnostic> + 'r {
        self.diagnostics.iter().filter(move |d| d.rule == rule)
    }

    /// Perform the deferred ticket lookups and merge their diagnostics
    pub async fn resolve_tickets(mut self) -> Self {
        if let Some(batch) = self.tickets.take() {
            self.diagnostics.extend(batch.resolve().await);
            self.diagnostics.sort_by_key(|d| (d.start, d.end));
        }
        self
    }
}

/// Convenience function to lint a program with default configuration
pub fn lint<'a>(source_text: &'a str, program: &Program<'a>) -> LintResult {
    lint_with_config(source_text, program.source_type, program, RulesConfig::new())
}

/// Convenience function to lint a program with custom configuration
pub fn lint_with_config<'a>(
    source_text: &'a str,
    source_type: SourceType,
    program: &Program<'a>,
    config: RulesConfig,
) -> LintResult {
    let ctx = LintContext::new(source_text, source_type, program);
    LintRunner::new(ctx, config).run(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse_and_lint(source: &str) -> LintResult {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::jsx()).parse();
        lint(source, &ret.program)
    }

    fn parse_and_lint_with_config(source: &str, config: RulesConfig) -> LintResult {
        let allocator = Allocator::default();
        let source_type = SourceType::tsx();
        let ret = Parser::new(&allocator, source, source_type).parse();
        lint_with_config(source, source_type, &ret.program, config)
    }

    fn settings(value: serde_json::Value) -> IndexMap<String, RuleSetting> {
        serde_json::from_value(value).unwrap()
    }

    fn ids(result: &LintResult) -> Vec<&str> {
        result.diagnostics.iter().map(|d| d.message_id.as_str()).collect()
    }

    #[test]
    fn test_lint_clean_code() {
        let result = parse_and_lint("// Keeps the cache warm between requests\nconst cache = new Map();\n");
        assert!(result.diagnostics.is_empty());
        assert!(result.tickets.is_none());
    }

    #[test]
    fn test_lint_todo_and_commented_code() {
        let result = parse_and_lint("// TODO fix this\nlet a = 1;\n// a = compute(a);\n");
        assert_eq!(ids(&result), vec!["invalidTodoFormat", "commentedCode"]);
    }

    #[test]
    fn test_doc_attached_through_wrappers() {
        let source = r#"
/**
 * Adds.
 * @param {number} a - first
 */
export const add = (a, b) => a + b;

class Calc {
  /**
   * @param {number} x - value
   * @returns {number} doubled
   */
  double(x, y) { return x * 2; }
}

const api = {
  /** @param {string} s - text */
  trim(s) { return s.trim(); },
};
"#;
        let result = parse_and_lint(source);
        let missing: Vec<_> = result
            .for_rule(JsdocParams::NAME)
            .map(|d| (d.message_id.as_str(), d.data.get("name").map(String::as_str)))
            .collect();
        assert_eq!(
            missing,
            vec![
                ("missingParam", Some("b")),
                ("missingReturns", None),
                ("missingParam", Some("y")),
                ("missingReturns", None),
            ]
        );
    }

    #[test]
    fn test_doc_separated_by_code_is_not_attached() {
        let source = "/** @param {number} z - unused */\nconst x = 1;\nfunction f(a) { return a; }\n";
        let result = parse_and_lint(source);
        assert!(result.for_rule(JsdocParams::NAME).next().is_none());
    }

    #[test]
    fn test_obvious_and_stale_after_traversal() {
        let config = RulesConfig::none()
            .with_no_obvious_comments(NoObviousComments::new())
            .with_no_stale_references(NoStaleReferences::new());
        let source = "let count = 0;\n// increment count\ncount++;\n// see `resetCounter` and `count`\n";
        let result = parse_and_lint_with_config(source, config);
        assert_eq!(ids(&result), vec!["obviousComment", "staleRef"]);
        assert_eq!(result.diagnostics[1].data["name"], "resetCounter");
    }

    #[test]
    fn test_class_members_and_types_are_symbols() {
        let config = RulesConfig::none().with_no_stale_references(NoStaleReferences::new());
        let source = "interface Shape { area(): number }\nclass Box { #size = 1; width = 2; }\n// uses `Shape`, `area`, `size` and `width`\n";
        let result = parse_and_lint_with_config(source, config);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_imports_and_type_aliases_are_symbols() {
        let config = RulesConfig::none().with_no_stale_references(NoStaleReferences::new());
        let source = "import { loadUser } from './users';\ntype UserId = string;\nenum Mode { Fast }\n// `loadUser` takes a `UserId` and a `Mode`\nloadUser('1');\n";
        let result = parse_and_lint_with_config(source, config);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_names_from_nested_scopes_are_symbols() {
        let config = RulesConfig::none().with_no_stale_references(NoStaleReferences::new());
        let source = "function outer() {\n  const inner = () => { let deepest = 1; return deepest; };\n  return inner;\n}\n// `outer`, `inner` and `deepest`\n";
        let result = parse_and_lint_with_config(source, config);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn test_from_settings() {
        let config = RulesConfig::from_settings(&settings(json!({
            "comment-lint/todo-format": "error",
            "no-commented-code": ["warn", { "threshold": 2 }],
            "jsdoc-params": "off",
        })));
        assert!(config.errors().is_empty());
        assert!(config.todo_format.is_some());
        assert!(config.no_commented_code.is_some());
        assert!(config.jsdoc_params.is_none());
        assert!(config.no_obvious_comments.is_none());
        assert_eq!(config.severity("todo-format"), Severity::Error);

        let result = parse_and_lint_with_config("// TODO fix\nlet a;\n// a();\n", config);
        assert_eq!(ids(&result), vec!["invalidTodoFormat"]);
        assert!(result.has_errors());
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_config_errors_become_diagnostics() {
        let config = RulesConfig::from_settings(&settings(json!({
            "no-such-rule": "warn",
            "todo-age": ["warn", { "maxAgeDays": "soon" }],
            "todo-format": "warn",
        })));
        assert_eq!(config.errors().len(), 2);

        let result = parse_and_lint_with_config("// TODO fix\nlet a;\n", config);
        assert_eq!(ids(&result), vec!["invalidOptions", "invalidOptions", "invalidTodoFormat"]);
        assert_eq!(result.diagnostics[0].rule, "no-such-rule");
        assert_eq!(result.diagnostics[1].rule, "todo-age");
    }

    #[test]
    fn test_escalated_diagnostics_keep_error() {
        let config = RulesConfig::none().with_todo_age(TodoAge::new());
        let result = parse_and_lint_with_config("// TODO (2001-01-01): remove shim\nlet a;\n", config);
        assert_eq!(ids(&result), vec!["todoCritical"]);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_ticket_refs_are_deferred() {
        let config = RulesConfig::from_settings(&settings(json!({
            "valid-ticket-reference": ["error", {
                "tracker": { "type": "github", "owner": "acme", "repo": "widgets" }
            }],
        })));
        let source = "// TODO (GH-1): a\n// TODO (GH-2, GH-1): b\nlet a;\n";
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();
        let ctx = LintContext::new(source, SourceType::mjs(), &ret.program);
        let result = LintRunner::new(ctx, config)
            .with_ticket_backend(Arc::new(tracker::StaticTracker::new()))
            .run(&ret.program);

        assert!(result.diagnostics.is_empty());
        let batch = result.tickets.as_ref().unwrap();
        assert_eq!(batch.ticket_count(), 2);
        assert_eq!(batch.severity, DiagnosticSeverity::Error);
    }
}
