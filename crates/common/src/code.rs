//! Commented-out code classifier

use regex::Regex;

use crate::patterns::{first_match, CODE_PATTERNS, SKIP_PATTERNS};
use crate::text::body_lines;

/// Verdict for a single physical comment line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    /// Matched a skip pattern; never counted as code
    Skipped(&'static str),
    /// Matched a code pattern
    Code(&'static str),
    /// Matched nothing
    Prose,
}

/// Classify one decoration-free line. Skip patterns always win.
pub fn classify_line(line: &str) -> LineVerdict {
    if let Some(pattern) = first_match(&SKIP_PATTERNS, line) {
        return LineVerdict::Skipped(pattern.name);
    }
    match first_match(&CODE_PATTERNS, line) {
        Some(pattern) => LineVerdict::Code(pattern.name),
        None => LineVerdict::Prose,
    }
}

/// Result of classifying a whole comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub is_code: bool,
    pub code_line_count: usize,
}

/// Decides whether a comment body is commented-out code
#[derive(Debug, Clone)]
pub struct CodeClassifier {
    threshold: usize,
    allow: Vec<Regex>,
}

impl Default for CodeClassifier {
    fn default() -> Self {
        Self::new(1, Vec::new())
    }
}

impl CodeClassifier {
    /// `threshold` is clamped to at least one line so that prose never qualifies.
    pub fn new(threshold: usize, allow: Vec<Regex>) -> Self {
        Self {
            threshold: threshold.max(1),
            allow,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Classify a comment body (delimiters already removed)
    pub fn classify(&self, text: &str) -> Classification {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Classification::default();
        }

        if let Some(pattern) = self.allow.iter().find(|re| re.is_match(trimmed)) {
            tracing::trace!(pattern = %pattern, "comment allowed by pattern");
            return Classification::default();
        }

        let code_line_count = body_lines(text)
            .filter(|line| !line.is_empty())
            .filter(|line| match classify_line(line) {
                LineVerdict::Code(name) => {
                    tracing::trace!(line, pattern = name, "code line");
                    true
                }
                _ => false,
            })
            .count();

        Classification {
            is_code: code_line_count >= self.threshold,
            code_line_count,
        }
    }
}
