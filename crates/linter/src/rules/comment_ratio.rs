//! comment-ratio
//!
//! File-level comment density. Comment lines are every physical line a
//! counted comment spans; code lines are lines with anything outside comments.

use once_cell::sync::Lazy;
use oxc_span::Span;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::comment::Comment;
use crate::context::LintContext;
use crate::diagnostic::{message_data, Diagnostic};
use crate::utils::LineIndex;
use crate::{RuleCategory, RuleMeta};

static ACTION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:TODO|FIXME|NOTE)\b").expect("static action prefix compiles"));

/// Configuration for comment-ratio rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CommentRatioConfig {
    pub min_ratio: f64,
    pub max_ratio: f64,
    /// Files with fewer lines are skipped
    pub min_lines: usize,
    /// Add blank lines to the denominator
    pub count_blank_lines: bool,
    pub ignore_jsdoc: bool,
    /// Leave TODO/FIXME/NOTE comments out of the comment tally
    pub ignore_todos: bool,
}

impl Default for CommentRatioConfig {
    fn default() -> Self {
        Self {
            min_ratio: 0.05,
            max_ratio: 0.6,
            min_lines: 10,
            count_blank_lines: false,
            ignore_jsdoc: false,
            ignore_todos: false,
        }
    }
}

/// Line tallies for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCounts {
    pub total: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
}

/// comment-ratio rule
#[derive(Debug, Clone, Default)]
pub struct CommentRatio {
    config: CommentRatioConfig,
}

impl RuleMeta for CommentRatio {
    const NAME: &'static str = "comment-ratio";
    const CATEGORY: RuleCategory = RuleCategory::Analysis;
    const MESSAGES: &'static [(&'static str, &'static str)] = &[
        ("noComments", "File has no comments (minimum ratio is {{min}}%)."),
        ("tooFewComments", "Comment ratio {{actual}}% is below the minimum of {{min}}%."),
        ("tooManyComments", "Comment ratio {{actual}}% is above the maximum of {{max}}%."),
    ];

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "minRatio": { "type": "number", "minimum": 0, "maximum": 1 },
                "maxRatio": { "type": "number", "minimum": 0, "maximum": 1 },
                "minLines": { "type": "integer", "minimum": 0 },
                "countBlankLines": { "type": "boolean" },
                "ignoreJsdoc": { "type": "boolean" },
                "ignoreTodos": { "type": "boolean" }
            },
            "additionalProperties": false
        })
    }
}

impl CommentRatio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CommentRatioConfig) -> Self {
        Self { config }
    }

    fn counts_comment(&self, comment: &Comment) -> bool {
        if self.config.ignore_jsdoc && comment.is_jsdoc() {
            return false;
        }
        !(self.config.ignore_todos && ACTION_PREFIX.is_match(comment.first_line()))
    }

    pub fn count_lines(&self, ctx: &LintContext) -> LineCounts {
        let source_text = ctx.source_text();
        let index = ctx.line_index();
        let total = index.line_count();
        let mut has_code = vec![false; total];
        let mut in_comment = vec![false; total];
        let mut counted = vec![false; total];

        let mut cursor = 0u32;
        for comment in ctx.comments() {
            mark_code(&mut has_code, index, source_text, cursor, comment.span.start);
            cursor = comment.span.end;

            let lines = index.line(comment.span.start)..=index.line(comment.span.end);
            let counts = self.counts_comment(comment);
            for line in lines {
                in_comment[line] = true;
                counted[line] |= counts;
            }
        }
        mark_code(&mut has_code, index, source_text, cursor, source_text.len() as u32);

        LineCounts {
            total,
            code: has_code.iter().filter(|&&code| code).count(),
            comment: counted.iter().filter(|&&c| c).count(),
            blank: (0..total).filter(|&line| !has_code[line] && !in_comment[line]).count(),
        }
    }

    pub fn check(&self, ctx: &LintContext) -> Option<Diagnostic> {
        let counts = self.count_lines(ctx);
        if counts.total < self.config.min_lines {
            return None;
        }
        let base = if self.config.count_blank_lines {
            counts.code + counts.blank
        } else {
            counts.code
        };
        if base == 0 {
            return None;
        }

        let ratio = counts.comment as f64 / base as f64;
        tracing::trace!(?counts, ratio, "comment ratio");

        let data = message_data([
            ("actual", percent(ratio)),
            ("min", percent(self.config.min_ratio)),
            ("max", percent(self.config.max_ratio)),
        ]);
        let file = Span::new(0, 0);
        if counts.comment == 0 && self.config.min_ratio > 0.0 {
            Some(Self::report(file, "noComments", data))
        } else if ratio < self.config.min_ratio {
            Some(Self::report(file, "tooFewComments", data))
        } else if ratio > self.config.max_ratio {
            Some(Self::report(file, "tooManyComments", data))
        } else {
            None
        }
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.0}", ratio * 100.0)
}

fn mark_code(has_code: &mut [bool], index: &LineIndex, source_text: &str, start: u32, end: u32) {
    let Some(segment) = source_text.get(start as usize..end as usize) else {
        return;
    };
    for (offset, c) in segment.char_indices() {
        if !c.is_whitespace() {
            has_code[index.line(start + offset as u32)] = true;
        }
    }
}
