//! Comment text helpers

/// Strip block-comment decoration from a single physical line.
///
/// Removes surrounding whitespace and one leading `*` gutter, so that
/// ` * const a = 1;` becomes `const a = 1;`.
pub fn strip_decoration(line: &str) -> &str {
    let trimmed = line.trim();
    match trimmed.strip_prefix('*') {
        Some(rest) if !rest.starts_with('*') && !rest.starts_with('/') => rest.trim_start(),
        Some(rest) if rest.chars().all(|c| c == '*') => "",
        _ => trimmed,
    }
}

/// Iterate over the decoration-free physical lines of a comment body
pub fn body_lines(body: &str) -> impl Iterator<Item = &str> {
    body.lines().map(strip_decoration)
}

/// First non-empty decoration-free line of a comment body
pub fn first_line(body: &str) -> &str {
    body_lines(body).find(|line| !line.is_empty()).unwrap_or("")
}

/// Lowercase, collapse whitespace and drop trailing sentence punctuation
pub fn normalize(text: &str) -> String {
    let joined = body_lines(text)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let collapsed = joined
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | ':' | ';' | ',' | '?'))
        .trim()
        .to_string()
}

/// Split normalized text into words, ignoring stray punctuation tokens
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| matches!(c, ',' | '.' | ':' | ';' | '(' | ')')))
        .filter(|word| !word.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_decoration() {
        assert_eq!(strip_decoration("   * const a = 1;"), "const a = 1;");
        assert_eq!(strip_decoration("  plain text  "), "plain text");
        assert_eq!(strip_decoration(" *"), "");
        assert_eq!(strip_decoration("****"), "");
        assert_eq!(strip_decoration("**bold** text"), "**bold** text");
    }

    #[test]
    fn test_first_line_skips_gutter() {
        assert_eq!(first_line("*\n * TODO: fix\n * more"), "TODO: fix");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Increment   the Counter. "), "increment the counter");
        assert_eq!(normalize("*\n * Return X!\n "), "return x");
    }

    #[test]
    fn test_words() {
        assert_eq!(words("call foo(), then bar"), vec!["call", "foo", "then", "bar"]);
    }
}
