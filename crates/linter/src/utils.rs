//! Source text helpers shared by the rules

use oxc_span::Span;

use crate::comment::Comment;

/// Byte offsets of line starts, for offset → line/column lookups
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source_text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(
                source_text
                    .match_indices('\n')
                    .map(|(offset, _)| offset as u32 + 1),
            )
            .collect();
        Self { starts }
    }

    /// Zero-based line containing `offset`
    pub fn line(&self, offset: u32) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// One-based line and zero-based column of `offset`
    pub fn line_col(&self, offset: u32) -> (usize, usize) {
        let line = self.line(offset);
        (line + 1, (offset - self.starts[line]) as usize)
    }

    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.starts.get(line).copied()
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

/// Significant character before `span`, skipping whitespace and comments
pub fn char_before(source_text: &str, comments: &[Comment], span: Span) -> Option<char> {
    let mut offset = span.start as usize;
    loop {
        let rest = source_text.get(..offset)?;
        let trimmed = rest.trim_end();
        offset = trimmed.len();
        match comments.iter().find(|comment| comment.span.end as usize == offset) {
            Some(comment) => offset = comment.span.start as usize,
            None => return trimmed.chars().next_back(),
        }
    }
}

/// Significant character after `span`, skipping whitespace and comments
pub fn char_after(source_text: &str, comments: &[Comment], span: Span) -> Option<char> {
    let mut offset = span.end as usize;
    loop {
        let rest = source_text.get(offset..)?;
        let trimmed = rest.trim_start();
        offset += rest.len() - trimmed.len();
        match comments.iter().find(|comment| comment.span.start as usize == offset) {
            Some(comment) => offset = comment.span.end as usize,
            None => return trimmed.chars().next(),
        }
    }
}

/// Whether only whitespace separates `start..end`
pub fn is_whitespace_between(source_text: &str, start: u32, end: u32) -> bool {
    source_text
        .get(start as usize..end as usize)
        .is_some_and(|between| between.trim().is_empty())
}

fn line_prefix(source_text: &str, offset: u32) -> &str {
    let before = &source_text[..offset as usize];
    before.rfind('\n').map_or(before, |nl| &before[nl + 1..])
}

/// Whether only whitespace precedes `offset` on its line
pub fn starts_line(source_text: &str, offset: u32) -> bool {
    line_prefix(source_text, offset).trim().is_empty()
}

/// Leading whitespace of the line containing `offset`, if nothing else precedes it
pub fn line_indent(source_text: &str, offset: u32) -> &str {
    let line = line_prefix(source_text, offset);
    if line.trim().is_empty() {
        line
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nbc\n\nd");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_col(0), (1, 0));
        assert_eq!(index.line_col(3), (2, 1));
        assert_eq!(index.line(5), 2);
        assert_eq!(index.line(6), 3);
    }

    #[test]
    fn test_surrounding_chars() {
        let source = "<div>{ /* a */ /* b */ }</div>";
        let first = Comment::from_span(source, Span::new(7, 14)).unwrap();
        let second = Comment::from_span(source, Span::new(15, 22)).unwrap();
        let comments = [first, second];
        assert_eq!(char_before(source, &comments, second.span), Some('{'));
        assert_eq!(char_after(source, &comments, first.span), Some('}'));
    }

    #[test]
    fn test_line_indent() {
        let source = "class A {\n    /** doc */\n    m() {}\n}";
        let offset = source.find("/**").unwrap() as u32;
        assert_eq!(line_indent(source, offset), "    ");
        assert_eq!(line_indent("x; /* c */", 3), "");
        assert!(starts_line(source, offset));
        assert!(!starts_line("x; /* c */", 3));
    }
}
