//! Diagnostic types for lint results

use indexmap::IndexMap;
use oxc_span::Span;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    Warning,
    Error,
}

/// Interpolation data attached to a diagnostic, in insertion order
pub type MessageData = IndexMap<String, String>;

/// Build [`MessageData`] from key/value pairs
pub fn message_data<K, V, I>(pairs: I) -> MessageData
where
    K: Into<String>,
    V: ToString,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.to_string()))
        .collect()
}

/// Substitute every `{{key}}` in `template` from `data`.
///
/// Unknown placeholders are left untouched.
pub fn render_message(template: &str, data: &MessageData) -> String {
    let mut rendered = template.to_string();
    for (key, value) in data {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}

/// A suggested fix for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    /// Start position of the span to replace
    pub start: u32,
    /// End position of the span to replace
    pub end: u32,
    /// The replacement text
    pub replacement: String,
    /// Description of what the fix does
    pub message: Option<String>,
}

impl Fix {
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            start: span.start,
            end: span.end,
            replacement: replacement.into(),
            message: None,
        }
    }

    /// Insert `text` at `offset` without replacing anything
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::new(Span::new(offset, offset), text)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Apply the fix to `source`, returning the edited text
    pub fn apply(&self, source: &str) -> String {
        let start = (self.start as usize).min(source.len());
        let end = (self.end as usize).clamp(start, source.len());
        let mut edited = String::with_capacity(source.len() + self.replacement.len());
        edited.push_str(&source[..start]);
        edited.push_str(&self.replacement);
        edited.push_str(&source[end..]);
        edited
    }
}

/// A lint diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The rule that produced this diagnostic
    pub rule: String,
    /// Stable message identifier, e.g. `missingParam`
    pub message_id: String,
    /// Interpolation data used to render `message`
    pub data: MessageData,
    /// Start position of the span
    pub start: u32,
    /// End position of the span
    pub end: u32,
    /// Rendered message
    pub message: String,
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Suggested fixes
    pub fixes: Vec<Fix>,
}

impl Diagnostic {
    pub fn new(rule: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message_id: String::new(),
            data: MessageData::new(),
            start: span.start,
            end: span.end,
            message: message.into(),
            severity: DiagnosticSeverity::Warning,
            fixes: Vec::new(),
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = message_id.into();
        self
    }

    pub fn with_data(mut self, data: MessageData) -> Self {
        self.data = data;
        self
    }

    pub fn with_severity(mut self, severity: DiagnosticSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }

    /// First fix, if any
    pub fn fix(&self) -> Option<&Fix> {
        self.fixes.first()
    }

    pub fn error(rule: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self::new(rule, span, message).with_severity(DiagnosticSeverity::Error)
    }

    pub fn warning(rule: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self::new(rule, span, message).with_severity(DiagnosticSeverity::Warning)
    }
}
