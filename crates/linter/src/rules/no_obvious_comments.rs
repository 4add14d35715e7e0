//! no-obvious-comments
//!
//! Disallow comments that only restate the adjacent statement, such as
//! `// increment i` above `i++`.

use common::{is_obvious, Sensitivity, StatementCategory};
use oxc_ast::ast::{Declaration, Expression, Statement};
use oxc_span::{GetSpan, Span};
use oxc_syntax::operator::AssignmentOperator;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::comment::Comment;
use crate::context::LintContext;
use crate::diagnostic::{message_data, Diagnostic};
use crate::utils::starts_line;
use crate::{RuleCategory, RuleMeta};

/// Configuration for no-obvious-comments rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NoObviousCommentsConfig {
    pub sensitivity: Sensitivity,
    /// Check comments on the line(s) above a statement
    pub check_leading_comments: bool,
    /// Check comments after a statement on the same line
    pub check_trailing_comments: bool,
}

impl Default for NoObviousCommentsConfig {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::Medium,
            check_leading_comments: true,
            check_trailing_comments: true,
        }
    }
}

/// Statement categories keyed by where statements start and end
#[derive(Debug, Default)]
pub struct AdjacentStatements {
    by_start: FxHashMap<u32, StatementCategory>,
    by_end: FxHashMap<u32, StatementCategory>,
}

impl AdjacentStatements {
    /// Record a statement. Call in pre-order: the outermost statement keeps a
    /// shared start, the innermost a shared end.
    pub fn record(&mut self, statement: &Statement) {
        let category = statement_category(statement);
        let span = statement.span();
        self.by_start.entry(span.start).or_insert(category);
        self.by_end.insert(span.end, category);
    }

    pub fn starting_at(&self, offset: u32) -> Option<StatementCategory> {
        self.by_start.get(&offset).copied()
    }

    pub fn ending_at(&self, offset: u32) -> Option<StatementCategory> {
        self.by_end.get(&offset).copied()
    }
}

/// Classify a statement for template matching
pub fn statement_category(statement: &Statement) -> StatementCategory {
    match statement {
        Statement::ExpressionStatement(expr) => expression_category(&expr.expression),
        Statement::ReturnStatement(_) => StatementCategory::Return,
        Statement::VariableDeclaration(_) => StatementCategory::Declaration,
        Statement::FunctionDeclaration(_) => StatementCategory::FunctionDeclaration,
        Statement::ClassDeclaration(_) => StatementCategory::ClassDeclaration,
        Statement::ForStatement(_)
        | Statement::ForInStatement(_)
        | Statement::ForOfStatement(_)
        | Statement::WhileStatement(_)
        | Statement::DoWhileStatement(_) => StatementCategory::Loop,
        Statement::IfStatement(_) => StatementCategory::Conditional,
        Statement::SwitchStatement(_) => StatementCategory::Switch,
        Statement::TryStatement(_) => StatementCategory::TryCatch,
        Statement::BreakStatement(_) => StatementCategory::Break,
        Statement::ContinueStatement(_) => StatementCategory::Continue,
        Statement::ThrowStatement(_) => StatementCategory::Throw,
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::VariableDeclaration(_)) => StatementCategory::Declaration,
            Some(Declaration::FunctionDeclaration(_)) => StatementCategory::FunctionDeclaration,
            Some(Declaration::ClassDeclaration(_)) => StatementCategory::ClassDeclaration,
            _ => StatementCategory::Other,
        },
        _ => StatementCategory::Other,
    }
}

fn expression_category(expression: &Expression) -> StatementCategory {
    match expression {
        Expression::UpdateExpression(_) => StatementCategory::IncrementDecrement,
        Expression::AssignmentExpression(assign) => {
            let steps_by_literal = matches!(
                assign.operator,
                AssignmentOperator::Addition | AssignmentOperator::Subtraction
            ) && matches!(assign.right, Expression::NumericLiteral(_));
            if steps_by_literal {
                StatementCategory::IncrementDecrement
            } else {
                StatementCategory::Assignment
            }
        }
        Expression::CallExpression(_) | Expression::NewExpression(_) | Expression::ChainExpression(_) => {
            StatementCategory::Call
        }
        Expression::AwaitExpression(await_expr) => match expression_category(&await_expr.argument) {
            StatementCategory::Call => StatementCategory::Call,
            _ => StatementCategory::Other,
        },
        Expression::ParenthesizedExpression(paren) => expression_category(&paren.expression),
        _ => StatementCategory::Other,
    }
}

/// no-obvious-comments rule
#[derive(Debug, Clone, Default)]
pub struct NoObviousComments {
    config: NoObviousCommentsConfig,
}

impl RuleMeta for NoObviousComments {
    const NAME: &'static str = "no-obvious-comments";
    const CATEGORY: RuleCategory = RuleCategory::Pedantic;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[(
        "obviousComment",
        "Comment `{{comment}}` restates the code. Explain why, not what.",
    )];

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "sensitivity": { "enum": ["low", "medium", "high"] },
                "checkLeadingComments": { "type": "boolean" },
                "checkTrailingComments": { "type": "boolean" }
            },
            "additionalProperties": false
        })
    }
}

impl NoObviousComments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NoObviousCommentsConfig) -> Self {
        Self { config }
    }

    pub fn check(
        &self,
        comment: &Comment,
        ctx: &LintContext,
        statements: &AdjacentStatements,
    ) -> Option<Diagnostic> {
        if comment.is_jsdoc() {
            return None;
        }

        let category = if starts_line(ctx.source_text(), comment.span.start) {
            if !self.config.check_leading_comments {
                return None;
            }
            statement_after(comment.span, ctx, statements)?
        } else {
            if !self.config.check_trailing_comments {
                return None;
            }
            statement_before(comment.span, ctx, statements)?
        };

        if !is_obvious(comment.text, category, self.config.sensitivity) {
            return None;
        }

        Some(Self::report(
            comment.span,
            "obviousComment",
            message_data([("comment", comment.text.trim())]),
        ))
    }
}

/// Statement starting right after a leading comment, at most one line break away
fn statement_after(
    span: Span,
    ctx: &LintContext,
    statements: &AdjacentStatements,
) -> Option<StatementCategory> {
    let rest = &ctx.source_text()[span.end as usize..];
    let gap = rest.len() - rest.trim_start().len();
    if rest[..gap].matches('\n').count() > 1 {
        return None;
    }
    statements.starting_at(span.end + gap as u32)
}

/// Statement ending on the same line before a trailing comment
fn statement_before(
    span: Span,
    ctx: &LintContext,
    statements: &AdjacentStatements,
) -> Option<StatementCategory> {
    let before = &ctx.source_text()[..span.start as usize];
    let code_end = before.trim_end().len();
    if before[code_end..].contains('\n') {
        return None;
    }
    statements.ending_at(code_end as u32)
}
