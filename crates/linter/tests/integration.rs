//! Integration tests for comment-linter rules

use std::sync::Arc;

use comment_linter::{
    lint, lint_with_config, A11yTodoFormat, CommentRatio, CommentRatioConfig, JsdocParams, LintContext,
    LintResult, LintRunner, NoCommentedCode, NoCommentedCodeConfig, NoObviousComments, RulesConfig,
    ValidTicketReference, ValidTicketReferenceConfig,
};
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use pretty_assertions::assert_eq;
use tracker::{StaticTracker, TicketStatus, TrackerError};

fn run(source: &str, config: RulesConfig) -> LintResult {
    let allocator = Allocator::default();
    let source_type = SourceType::tsx();
    let ret = Parser::new(&allocator, source, source_type).parse();
    assert!(ret.errors.is_empty(), "parse errors: {:?}", ret.errors);
    lint_with_config(source, source_type, &ret.program, config)
}

fn ids(result: &LintResult) -> Vec<&str> {
    result.diagnostics.iter().map(|d| d.message_id.as_str()).collect()
}

fn jsdoc_only() -> RulesConfig {
    RulesConfig::none().with_jsdoc_params(JsdocParams::new())
}

#[test]
fn test_skip_patterns_win_over_any_threshold() {
    let source = "// TODO: call(x);\n// https://example.com/a.js\n// eslint-disable-next-line no-console\nlet a;\n";
    for threshold in 1..=3 {
        let rule = NoCommentedCode::with_config(NoCommentedCodeConfig {
            threshold,
            ..Default::default()
        })
        .unwrap();
        let result = run(source, RulesConfig::none().with_no_commented_code(rule));
        assert!(result.diagnostics.is_empty(), "threshold {threshold}");
    }
}

#[test]
fn test_lower_threshold_never_unflags() {
    let source = "/*\nconst a = 1;\nconst b = 2;\n*/\nlet c;\n";
    let flagged = |threshold| {
        let rule = NoCommentedCode::with_config(NoCommentedCodeConfig {
            threshold,
            ..Default::default()
        })
        .unwrap();
        !run(source, RulesConfig::none().with_no_commented_code(rule))
            .diagnostics
            .is_empty()
    };
    assert!(flagged(2));
    assert!(flagged(1));
    assert!(!flagged(3));
}

#[test]
fn test_threshold_counts_one_line_comment_at_a_time() {
    let rule = NoCommentedCode::with_config(NoCommentedCodeConfig {
        threshold: 2,
        ..Default::default()
    })
    .unwrap();
    let result = run("// start();\n// stop();\nlet a;\n", RulesConfig::none().with_no_commented_code(rule));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_swapped_params_two_mismatches() {
    let source = r#"
/**
 * @param {number} b - second
 * @param {number} a - first
 * @param {number} c - third
 */
function f(a, b, c) {}
"#;
    let result = run(source, jsdoc_only());
    assert_eq!(ids(&result), vec!["paramOrderMismatch", "paramOrderMismatch"]);
    let names: Vec<_> = result.diagnostics.iter().map(|d| d.data["name"].as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_reconcile_is_stable_across_runs() {
    let source = r#"
/**
 * @param x
 * @param {number} y - why
 * @param {number} y - twice
 * @param {string} gone - removed
 */
export function f(y, x, z) { return z; }
"#;
    let first = run(source, jsdoc_only());
    let second = run(source, jsdoc_only());
    assert_eq!(first.diagnostics, second.diagnostics);
    assert!(ids(&first).contains(&"duplicateParam"));
    assert!(ids(&first).contains(&"extraParam"));
}

#[test]
fn test_missing_param_fix_round_trip() {
    let source = r#"
/**
 * Scales a value.
 * @param {number} value - input
 * @returns {number} scaled
 */
const scale = (value, x) => value * x;
"#;
    let result = run(source, jsdoc_only());
    assert_eq!(ids(&result), vec!["missingParam"]);
    let fixed = result.diagnostics[0].fix().unwrap().apply(source);

    let rerun = run(&fixed, jsdoc_only());
    assert!(rerun.diagnostics.iter().all(|d| d.message_id != "missingParam"));
    assert!(rerun.diagnostics.is_empty());
}

#[test]
fn test_a11y_todo_fix() {
    let source = "// A11Y-TODO: fix contrast\nconst color = '#777';\n";
    let result = run(source, RulesConfig::none().with_a11y_todo_format(A11yTodoFormat::new()));
    assert_eq!(ids(&result), vec!["invalidA11yTodoFormat"]);
    let fixed = result.diagnostics[0].fix().unwrap().apply(source);
    assert_eq!(fixed, "// A11Y-TODO (WCAG-X.X.X): fix contrast\nconst color = '#777';\n");
}

#[test]
fn test_todo_fix_inside_jsx_container() {
    let source = "const view = <div>{/* TODO fix layout */}</div>;\n";
    let result = run(source, RulesConfig::none().with_todo_format(comment_linter::TodoFormat::new()));
    assert_eq!(ids(&result), vec!["invalidTodoFormat"]);
    let fixed = result.diagnostics[0].fix().unwrap().apply(source);
    assert_eq!(fixed, "const view = <div>{/* TODO (TICKET-XXX): fix layout */}</div>;\n");
}

#[test]
fn test_obvious_increment_and_decrement() {
    let config = || RulesConfig::none().with_no_obvious_comments(NoObviousComments::new());
    let increment = run("let i = 0;\n// increment i\ni++;\n", config());
    assert_eq!(ids(&increment), vec!["obviousComment"]);
    let decrement = run("let i = 0;\n// increment i\ni--;\n", config());
    assert_eq!(ids(&decrement), vec!["obviousComment"]);
}

#[test]
fn test_ratio_hundred_lines() {
    let mut source = String::from("// one\n// two\n// three\n");
    for i in 0..100 {
        source.push_str(&format!("export const v{i} = {i};\n"));
    }
    let rule = CommentRatio::with_config(CommentRatioConfig {
        min_ratio: 0.05,
        ..Default::default()
    });
    let result = run(&source, RulesConfig::none().with_comment_ratio(rule));
    assert_eq!(ids(&result), vec!["tooFewComments"]);
    assert_eq!(result.diagnostics[0].data["actual"], "3");
}

#[test]
fn test_offline_tickets_produce_nothing() {
    let rule = ValidTicketReference::with_config(ValidTicketReferenceConfig {
        offline: true,
        ..Default::default()
    })
    .unwrap();
    let result = run(
        "// TODO (GH-123, GH-124): x\nlet a;\n",
        RulesConfig::none().with_valid_ticket_reference(rule),
    );
    assert!(result.diagnostics.is_empty());
    assert!(result.tickets.is_none());
}

#[test]
fn test_duplicate_param_reported_once() {
    let source = r#"
/**
 * @param {number} x - value
 * @param {number} x - value
 * @param {number} y - value
 * @param {number} z - value
 */
function f(x, y, z) {}
"#;
    let result = run(source, jsdoc_only());
    assert_eq!(ids(&result), vec!["duplicateParam"]);
    assert_eq!(result.diagnostics[0].data["name"], "x");
}

#[test]
fn test_modifier_words_as_parameter_names() {
    let source = "/** Does it. */\nfunction f(override = false, x) {}\n";
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::jsx()).parse();
    assert!(ret.errors.is_empty(), "parse errors: {:?}", ret.errors);
    let result = lint_with_config(source, SourceType::jsx(), &ret.program, jsdoc_only());

    assert_eq!(ids(&result), vec!["missingParam", "missingParam"]);
    let mut names: Vec<_> = result.diagnostics.iter().map(|d| d.data["name"].as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["override", "x"]);
}

#[test]
fn test_default_config_on_javascript() {
    let source = r#"
// FIXME: handle empty input
/**
 * Sums values.
 * @param {number[]} values - numbers to add
 * @returns {number} total
 */
function sum(values) {
  // let total = 0;
  return values.reduce((a, b) => a + b, 0);
}
"#;
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();
    let result = lint(source, &ret.program);
    assert_eq!(ids(&result), vec!["invalidTodoFormat", "commentedCode"]);
}

#[tokio::test]
async fn test_ticket_lookups_after_traversal() {
    let backend = Arc::new(
        StaticTracker::new()
            .with_ticket("1", TicketStatus::OPEN)
            .with_ticket("2", TicketStatus::CLOSED)
            .with_failure("3", TrackerError::Network("connection reset".to_string())),
    );
    let rule = ValidTicketReference::with_config(ValidTicketReferenceConfig {
        tracker: Some(serde_json::json!({ "type": "github", "owner": "acme", "repo": "widgets" })),
        ..Default::default()
    })
    .unwrap();

    let source = "// TODO (#1): a\n// TODO (GH-2): b\n// FIXME (#3): c\n// TODO (#2): d\nlet a;\n";
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();
    let ctx = LintContext::new(source, SourceType::mjs(), &ret.program);
    let result = LintRunner::new(ctx, RulesConfig::none().with_valid_ticket_reference(rule))
        .with_ticket_backend(backend.clone())
        .run(&ret.program)
        .resolve_tickets()
        .await;

    // `GH-2` and `#2` name the same issue
    assert_eq!(backend.lookups(), 3);
    assert_eq!(ids(&result), vec!["ticketClosed", "trackerError", "ticketClosed"]);
    assert_eq!(result.diagnostics[0].data["ticket"], "GH-2");
    assert_eq!(result.diagnostics[1].data["error"], "network error: connection reset");
    assert_eq!(result.diagnostics[2].data["ticket"], "#2");
    assert!(result.tickets.is_none());
}
