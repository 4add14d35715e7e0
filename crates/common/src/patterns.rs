//! Ordered pattern tables for commented-out code detection.
//!
//! Both tables are evaluated top to bottom and the first hit wins. The skip
//! table always runs before the code table: a line that looks like an action
//! comment, a JSDoc tag, a URL, a path, a license header, a linter directive or
//! short prose is never counted as code.

use once_cell::sync::Lazy;
use regex::Regex;

/// A named line pattern
#[derive(Debug)]
pub struct LinePattern {
    pub name: &'static str,
    pub regex: Regex,
}

impl LinePattern {
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

fn table(entries: &[(&'static str, &str)]) -> Vec<LinePattern> {
    entries
        .iter()
        .map(|(name, pattern)| LinePattern {
            name,
            regex: Regex::new(pattern).expect("static line pattern compiles"),
        })
        .collect()
}

/// Lines that are never code, in evaluation order
pub static SKIP_PATTERNS: Lazy<Vec<LinePattern>> = Lazy::new(|| {
    table(&[
        ("action-comment", r"(?i)^(?:todo|fixme|note|hack|xxx|bug)\b"),
        ("jsdoc-tag", r"^@[A-Za-z][\w-]*"),
        ("url", r"(?i)^[^;(){}=]*\b(?:https?|ftp)://"),
        (
            "file-path",
            r"^(?:(?:\.{1,2}/|~/|/)?(?:[\w@.-]+/)+[\w@.-]*|[A-Za-z]:\\\S*)$",
        ),
        (
            "license-header",
            r"(?i)^(?:copyright\b|\(c\)|©|licen[sc]ed?\b|spdx-license-identifier|all rights reserved|permission is hereby granted)",
        ),
        (
            "linter-directive",
            r"^(?:eslint(?:-disable|-enable)?(?:-next-line|-line)?\b|globals?\s|jshint\b|jslint\b|istanbul\s+ignore|c8\s+ignore|prettier-ignore|@ts-(?:ignore|expect-error|nocheck|check)|tslint:|webpackChunkName|#(?:end)?region\b|biome-ignore|oxlint-disable)",
        ),
        (
            "short-prose",
            r"^[A-Z][a-z']*(?:,?\s+[A-Za-z'][\w'-]*){0,11}[.!?:]?$",
        ),
    ])
});

/// Lines that look like JavaScript/TypeScript source, in evaluation order
pub static CODE_PATTERNS: Lazy<Vec<LinePattern>> = Lazy::new(|| {
    table(&[
        ("declaration", r"^(?:export\s+)?(?:const|let|var)\s+[\w$\[{]"),
        (
            "function",
            r"^(?:export\s+)?(?:default\s+)?(?:async\s+)?function\b\s*\*?\s*[\w$]*\s*\(",
        ),
        (
            "class",
            r"^(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+[\w$]+",
        ),
        (
            "import-export",
            r#"^(?:import\s+(?:[\w${*]|['"])|import\s*\(|export\s+(?:\{|\*|default\b|type\b|interface\b)|module\.exports\s*=|require\s*\()"#,
        ),
        ("arrow-function", r"(?:\([^()]*\)|[\w$]+)\s*=>"),
        (
            "return-throw",
            r"^(?:return|throw)\b(?:\s*;?$|\s+\S+\s*;?$|.*;$|\s+new\s+[\w$.]+\(|\s+[\w$.]+\(.*\)\s*;?$)",
        ),
        (
            "control-flow",
            r"^(?:(?:if|for|while|switch|catch|with)\s*\(|(?:else|try|finally|do)\s*\{|\}\s*(?:else|catch|finally|while)\b|(?:break|continue)\s*;$)",
        ),
        ("console-call", r"^(?:console|logger)\.[\w$]+\s*\("),
        ("method-chain", r"^\.[\w$]+\s*\("),
        (
            "update",
            r"^(?:[\w$.]+(?:\+\+|--)|(?:\+\+|--)[\w$.]+)\s*;?$",
        ),
        ("literal-assignment", r"^[\w$.\[\]'\x22]+\s*=\s*[\[{]"),
        (
            "assignment",
            r"^[\w$]+(?:\.[\w$]+|\[[^\]]*\])*\s*(?:[-+*/%&|^]|\*\*|<<|>>>?|\?\?|&&|\|\|)?=\s*[^=\s>]",
        ),
        (
            "call-statement",
            r"^(?:await\s+)?(?:new\s+)?[\w$]+(?:\??\.[\w$]+|\[[^\]]*\])*\s*\(.*\)\s*;?$",
        ),
        ("statement-terminator", r";\s*$"),
        ("block-delimiter", r"^[{}()\[\]]+[;,]?$"),
    ])
});

/// First pattern of `patterns` that matches `line`
pub fn first_match<'p>(patterns: &'p [LinePattern], line: &str) -> Option<&'p LinePattern> {
    patterns.iter().find(|pattern| pattern.is_match(line))
}
