//! Structured comment grammar: `PREFIX (REFERENCE): description`

use regex::Regex;

/// A detected prefix and the text that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch<'t> {
    /// Prefix as configured (canonical casing)
    pub prefix: &'t str,
    /// Text after the prefix
    pub rest: &'t str,
}

/// Outcome of validating a comment line against the grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCheck {
    pub matches: bool,
    pub prefix: String,
    /// Reference text inside the parentheses, when present
    pub reference: Option<String>,
    pub description: Option<String>,
}

/// Prefix list plus the compiled detection and full-grammar patterns
#[derive(Debug, Clone)]
pub struct CommentGrammar {
    prefixes: Vec<String>,
    detect: Regex,
    full: Regex,
}

impl CommentGrammar {
    pub fn new<I, S>(prefixes: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        // Longest first so `A11Y-TODO` is preferred over a bare `TODO`
        prefixes.sort_by_key(|prefix| std::cmp::Reverse(prefix.len()));

        let alternation = prefixes
            .iter()
            .map(|prefix| regex::escape(prefix))
            .collect::<Vec<_>>()
            .join("|");

        let detect = Regex::new(&format!(r"(?i)^({alternation})(?:\b|$)"))?;
        let full = Regex::new(&format!(r"(?i)^({alternation})\s*\(([^)]*)\):\s*(\S.*)$"))?;

        Ok(Self {
            prefixes,
            detect,
            full,
        })
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Detect an allowed prefix at the start of trimmed `line`
    pub fn detect<'t>(&'t self, line: &'t str) -> Option<PrefixMatch<'t>> {
        let line = line.trim();
        let captures = self.detect.captures(line)?;
        let matched = captures.get(1)?;
        let prefix = self
            .prefixes
            .iter()
            .find(|prefix| prefix.eq_ignore_ascii_case(matched.as_str()))?;
        Some(PrefixMatch {
            prefix: prefix.as_str(),
            rest: &line[matched.end()..],
        })
    }

    /// Validate a line that starts with an allowed prefix.
    ///
    /// Returns `None` when the line is not subject to the grammar at all.
    pub fn validate(&self, line: &str) -> Option<FormatCheck> {
        let detected = self.detect(line)?;
        let line = line.trim();

        let Some(captures) = self.full.captures(line) else {
            return Some(FormatCheck {
                matches: false,
                prefix: detected.prefix.to_string(),
                reference: partial_reference(detected.rest),
                description: None,
            });
        };

        let reference = captures
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|reference| !reference.is_empty())
            .map(str::to_string);
        let description = captures.get(3).map(|m| m.as_str().trim().to_string());

        Some(FormatCheck {
            matches: reference.is_some(),
            prefix: detected.prefix.to_string(),
            reference,
            description,
        })
    }

    /// Rewrite a non-conforming line as `PREFIX (REFERENCE): description`.
    ///
    /// An existing parenthesised reference is kept; otherwise `placeholder`
    /// is used. Returns `None` when the line carries no allowed prefix.
    pub fn rewrite(&self, line: &str, placeholder: &str, default_description: &str) -> Option<String> {
        let detected = self.detect(line)?;
        let rest = detected.rest.trim_start();

        let (reference, rest) = match rest.strip_prefix('(').and_then(|inner| inner.split_once(')')) {
            Some((reference, after)) if !reference.trim().is_empty() => (reference.trim(), after),
            Some((_, after)) => (placeholder, after),
            None => (placeholder, rest),
        };

        let rest = rest.trim_start();
        let description = rest.strip_prefix(':').unwrap_or(rest).trim();
        let description = if description.is_empty() {
            default_description
        } else {
            description
        };

        Some(format!("{} ({reference}): {description}", detected.prefix))
    }
}

/// Reference inside a leading `( … )`, even when the rest of the line is malformed
fn partial_reference(rest: &str) -> Option<String> {
    let (reference, _) = rest.trim_start().strip_prefix('(')?.split_once(')')?;
    let reference = reference.trim();
    (!reference.is_empty()).then(|| reference.to_string())
}
