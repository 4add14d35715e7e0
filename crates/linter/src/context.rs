//! Lint context for rule execution

use oxc_ast::ast::Program;
use oxc_span::{SourceType, Span};

use crate::comment::{collect_comments, Comment};
use crate::utils::{self, LineIndex};

/// Per-file state shared by every rule: source text, comments, line index
pub struct LintContext<'a> {
    /// Source code being linted
    source_text: &'a str,
    /// Source type (JS/TS/JSX etc)
    source_type: SourceType,
    /// Every comment in the file, ordered by position
    comments: Vec<Comment<'a>>,
    line_index: LineIndex,
}

impl<'a> LintContext<'a> {
    pub fn new(source_text: &'a str, source_type: SourceType, program: &Program<'a>) -> Self {
        Self::from_comments(source_text, source_type, collect_comments(source_text, program))
    }

    pub fn from_comments(
        source_text: &'a str,
        source_type: SourceType,
        comments: Vec<Comment<'a>>,
    ) -> Self {
        Self {
            source_text,
            source_type,
            comments,
            line_index: LineIndex::new(source_text),
        }
    }

    /// Get the source text
    pub fn source_text(&self) -> &'a str {
        self.source_text
    }

    /// Get the source type
    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn comments(&self) -> &[Comment<'a>] {
        &self.comments
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Get a slice of source text for a span
    pub fn span_text(&self, span: Span) -> &'a str {
        &self.source_text[span.start as usize..span.end as usize]
    }

    /// Significant character before `span` (the "token before")
    pub fn char_before(&self, span: Span) -> Option<char> {
        utils::char_before(self.source_text, &self.comments, span)
    }

    /// Significant character after `span` (the "token after")
    pub fn char_after(&self, span: Span) -> Option<char> {
        utils::char_after(self.source_text, &self.comments, span)
    }

    /// Whether `comment` sits directly inside `{ … }`, as in a JSX expression container
    pub fn is_in_braces(&self, comment: &Comment) -> bool {
        self.char_before(comment.span) == Some('{') && self.char_after(comment.span) == Some('}')
    }

    /// Last `/** … */` comment that only whitespace separates from `offset`
    pub fn doc_comment_before(&self, offset: u32) -> Option<&Comment<'a>> {
        let idx = self.comments.partition_point(|comment| comment.span.end <= offset);
        let comment = self.comments.get(idx.checked_sub(1)?)?;
        (comment.is_jsdoc() && utils::is_whitespace_between(self.source_text, comment.span.end, offset))
            .then_some(comment)
    }
}
