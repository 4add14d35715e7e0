//! Comments extracted from a parsed program

use oxc_ast::ast::Program;
use oxc_span::Span;

/// Comment delimiter style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// …`
    Line,
    /// `/* … */`
    Block,
}

/// A single source comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment<'a> {
    pub kind: CommentKind,
    /// Span including the delimiters
    pub span: Span,
    /// Text between the delimiters
    pub text: &'a str,
}

impl<'a> Comment<'a> {
    /// Build a comment from a span that starts at `//` or `/*`
    pub fn from_span(source_text: &'a str, span: Span) -> Option<Self> {
        let start = span.start as usize;
        let end = span.end as usize;
        let raw = source_text.get(start..end)?;

        if let Some(text) = raw.strip_prefix("//") {
            return Some(Self {
                kind: CommentKind::Line,
                span,
                text,
            });
        }

        let text = raw.strip_prefix("/*")?;
        Some(Self {
            kind: CommentKind::Block,
            span,
            text: text.strip_suffix("*/").unwrap_or(text),
        })
    }

    pub fn is_line(&self) -> bool {
        self.kind == CommentKind::Line
    }

    pub fn is_block(&self) -> bool {
        self.kind == CommentKind::Block
    }

    /// `/** … */` doc comment (but not a `/*** … */` banner)
    pub fn is_jsdoc(&self) -> bool {
        self.is_block() && self.text.starts_with('*') && !self.text.starts_with("**")
    }

    /// Offset of the first byte of `text`
    pub fn content_start(&self) -> u32 {
        self.span.start + 2
    }

    pub fn content_span(&self) -> Span {
        Span::new(self.content_start(), self.content_start() + self.text.len() as u32)
    }

    pub fn is_multiline(&self) -> bool {
        self.text.contains('\n')
    }

    /// First non-empty, decoration-free line of the comment
    pub fn first_line(&self) -> &'a str {
        common::text::first_line(self.text)
    }
}

/// Collect every comment of `program`, ordered by position.
///
/// Spans are normalised to include the delimiters whether or not the parser
/// reports them that way.
pub fn collect_comments<'a>(source_text: &'a str, program: &Program<'a>) -> Vec<Comment<'a>> {
    let mut comments: Vec<Comment<'a>> = program
        .comments
        .iter()
        .filter_map(|comment| {
            let span = with_delimiters(source_text, comment.span);
            let parsed = Comment::from_span(source_text, span);
            if parsed.is_none() {
                tracing::debug!(?span, "skipping comment with unexpected span");
            }
            parsed
        })
        .collect();
    comments.sort_by_key(|comment| comment.span.start);
    comments
}

fn with_delimiters(source_text: &str, span: Span) -> Span {
    let start = span.start as usize;
    let bytes = source_text.as_bytes();
    if bytes.get(start) == Some(&b'/') && matches!(bytes.get(start + 1), Some(b'/' | b'*')) {
        return span;
    }
    if start < 2 {
        return span;
    }
    match source_text.get(start - 2..start) {
        Some("//") => Span::new(span.start - 2, span.end),
        Some("/*") => Span::new(span.start - 2, span.end + 2),
        _ => span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collect_comments() {
        let source = "// first\nconst a = 1; /* second */\n/**\n * doc\n */\nfunction f() {}\n";
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::jsx()).parse();
        let comments = collect_comments(source, &ret.program);

        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].kind, CommentKind::Line);
        assert_eq!(comments[0].text, " first");
        assert_eq!(comments[1].text, " second ");
        assert!(comments[2].is_jsdoc());
        assert_eq!(comments[2].first_line(), "doc");
        assert_eq!(&source[comments[1].span.start as usize..comments[1].span.end as usize], "/* second */");
    }

    #[test]
    fn test_banner_is_not_jsdoc() {
        let comment = Comment::from_span("/*** banner ***/", Span::new(0, 16)).unwrap();
        assert!(!comment.is_jsdoc());
    }
}
