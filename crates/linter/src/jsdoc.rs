//! JSDoc/TSDoc comment parser
//!
//! Parses the body of a `/** … */` comment into an ordered tag list. Only the
//! pieces the rules reconcile are extracted: tag name, `{type}`, parameter
//! name (with `[optional=default]` syntax) and free-text description. Tag
//! descriptions may continue over several lines.

use common::text::strip_decoration;
use oxc_span::Span;
use thiserror::Error;

/// Error for doc comments whose tag syntax cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocParseError {
    #[error("unbalanced `{{` in the type of @{tag}")]
    UnbalancedType { tag: String },
    #[error("unbalanced `[` in the name of @{tag}")]
    UnbalancedName { tag: String },
    #[error("@{tag} is missing a name")]
    MissingName { tag: String },
}

/// One `@tag` occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    /// Canonical tag name: `param` for `@arg`/`@argument`, `returns` for `@return`
    pub tag: String,
    /// Tag name as written
    pub raw_tag: String,
    pub name: Option<String>,
    pub type_text: Option<String>,
    pub description: Option<String>,
    /// `[name]` or `[name=default]`
    pub optional: bool,
    pub default_value: Option<String>,
    /// Index in tag order
    pub position: usize,
    /// First line of the tag, starting at `@`
    pub span: Span,
}

impl DocTag {
    pub fn is_param(&self) -> bool {
        self.tag == "param"
    }

    pub fn is_returns(&self) -> bool {
        self.tag == "returns"
    }

    /// `opts.key` / `items[].id` document a property of another parameter
    pub fn is_nested(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.contains('.') || name.contains('['))
    }
}

/// A doc comment split into its leading description and tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocComment<'a> {
    pub tags: Vec<DocTag>,
    pub description: Option<String>,
    pub raw_body: &'a str,
}

impl<'a> ParsedDocComment<'a> {
    /// Parse `body` (the text between `/*` and `*/`) starting at source offset `base`
    pub fn parse(body: &'a str, base: u32) -> Result<Self, DocParseError> {
        let mut tags = Vec::new();
        let mut description: Vec<&str> = Vec::new();
        let mut pending: Option<PendingTag> = None;
        let mut line_offset = 0usize;

        for raw_line in body.split('\n') {
            let line_start = base + line_offset as u32;
            line_offset += raw_line.len() + 1;
            let line = strip_decoration(raw_line);

            if let Some(rest) = line.strip_prefix('@') {
                if let Some(tag) = pending.take() {
                    tags.push(tag.finish(tags.len())?);
                }
                let at = raw_line.find('@').unwrap_or(0) as u32;
                let name_len = rest
                    .find(|c: char| c.is_whitespace() || c == '{')
                    .unwrap_or(rest.len());
                pending = Some(PendingTag {
                    raw_tag: rest[..name_len].to_string(),
                    text: rest[name_len..].to_string(),
                    span: Span::new(line_start + at, line_start + at + line.len() as u32),
                });
            } else if line.is_empty() {
                continue;
            } else if let Some(tag) = pending.as_mut() {
                tag.text.push(' ');
                tag.text.push_str(line);
            } else {
                description.push(line);
            }
        }
        if let Some(tag) = pending.take() {
            tags.push(tag.finish(tags.len())?);
        }

        Ok(Self {
            tags,
            description: (!description.is_empty()).then(|| description.join(" ")),
            raw_body: body,
        })
    }

    pub fn params(&self) -> impl Iterator<Item = &DocTag> {
        self.tags.iter().filter(|tag| tag.is_param())
    }

    pub fn returns(&self) -> impl Iterator<Item = &DocTag> {
        self.tags.iter().filter(|tag| tag.is_returns())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.tag.eq_ignore_ascii_case(tag))
    }
}

struct PendingTag {
    raw_tag: String,
    text: String,
    span: Span,
}

impl PendingTag {
    fn finish(self, position: usize) -> Result<DocTag, DocParseError> {
        let tag = match self.raw_tag.as_str() {
            "param" | "arg" | "argument" => "param",
            "return" | "returns" => "returns",
            other => other,
        }
        .to_string();

        let mut rest = self.text.trim();
        let mut type_text = None;
        if rest.starts_with('{') {
            let close = matching_close(rest, '{', '}').ok_or_else(|| DocParseError::UnbalancedType {
                tag: self.raw_tag.clone(),
            })?;
            let inner = rest[1..close].trim();
            type_text = (!inner.is_empty()).then(|| inner.to_string());
            rest = rest[close + 1..].trim_start();
        }

        let mut name = None;
        let mut optional = false;
        let mut default_value = None;
        if tag == "param" {
            if rest.starts_with('[') {
                let close = matching_close(rest, '[', ']').ok_or_else(|| DocParseError::UnbalancedName {
                    tag: self.raw_tag.clone(),
                })?;
                let inner = &rest[1..close];
                let (bare, default) = match inner.split_once('=') {
                    Some((bare, default)) => (bare, Some(default.trim().to_string())),
                    None => (inner, None),
                };
                name = Some(bare.trim().to_string());
                optional = true;
                default_value = default;
                rest = &rest[close + 1..];
            } else {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                if end == 0 {
                    return Err(DocParseError::MissingName { tag: self.raw_tag });
                }
                name = Some(rest[..end].to_string());
                rest = &rest[end..];
            }
        }

        let rest = rest.trim_start();
        let rest = rest.strip_prefix('-').unwrap_or(rest).trim();
        let description = (!rest.is_empty()).then(|| rest.to_string());

        Ok(DocTag {
            tag,
            raw_tag: self.raw_tag,
            name,
            type_text,
            description,
            optional,
            default_value,
            position,
            span: self.span,
        })
    }
}

/// Byte index of the bracket closing the one at index 0
fn matching_close(text: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}
