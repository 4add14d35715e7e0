//! Obvious-comment classifier.
//!
//! A comment is obvious when it only paraphrases the statement next to it:
//! `// increment i` above `i++`. Templates are keyed by statement category and
//! evaluated in table order; a comment carrying any explanation marker is
//! never obvious.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::{normalize, words};
use crate::words::{EXPLANATION_MARKERS, FILLER_WORDS};

/// How permissive template matching is
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    /// The whole comment must be a template phrase
    Low,
    /// A template phrase plus a couple of filler words
    #[default]
    Medium,
    /// Also gerund and synonym phrasings, with more filler
    High,
}

impl Sensitivity {
    /// Number of filler words tolerated outside the template match
    fn filler_budget(self) -> usize {
        match self {
            Sensitivity::Low => 0,
            Sensitivity::Medium => 2,
            Sensitivity::High => 4,
        }
    }
}

/// What kind of statement sits next to the comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementCategory {
    IncrementDecrement,
    Return,
    Call,
    Assignment,
    Declaration,
    Loop,
    Conditional,
    Switch,
    TryCatch,
    Break,
    Continue,
    Throw,
    FunctionDeclaration,
    ClassDeclaration,
    Other,
}

/// Optional article plus one target token, e.g. ` the counter`
const TARGET: &str = r"(?:\s+(?:the|a|an|this|that|our|new)\b)?(?:\s+[a-z_$][\w$.\[\]]*)?";

struct Template {
    category: StatementCategory,
    level: Sensitivity,
    pattern: &'static str,
}

const fn template(category: StatementCategory, level: Sensitivity, pattern: &'static str) -> Template {
    Template {
        category,
        level,
        pattern,
    }
}

use Sensitivity::{High, Low};
use StatementCategory::*;

const TEMPLATES: &[Template] = &[
    template(IncrementDecrement, Low, r"(?:increment|decrement|increase|decrease)s?{T}"),
    template(Return, Low, r"returns?{T}"),
    template(Call, Low, r"(?:call|invoke|execute|run)s?{T}(?:\s+(?:function|method))?"),
    template(Assignment, Low, r"(?:set|assign|update|store|save)s?{T}"),
    template(
        Declaration,
        Low,
        r"(?:declare|define)s?\s+(?:a\s+)?(?:new\s+)?(?:variable|constant|const)(?:\s+[\w$]+)?",
    ),
    template(
        Declaration,
        Low,
        r"(?:declare|define|create|initialize|initialise|init|instantiate|set)s?{T}",
    ),
    template(Loop, Low, r"(?:loop|iterate)s?(?:\s+(?:over|through))?{T}"),
    template(Loop, Low, r"for(?:\s+each)?(?:\s+loop)?{T}"),
    template(Conditional, Low, r"(?:if|check)(?:\s+(?:if|whether))?{T}(?:\s+statement)?"),
    template(Switch, Low, r"switch(?:\s+(?:on|over|statement))?{T}"),
    template(TryCatch, Low, r"try(?:\s*(?:/|and|-)?\s*catch)?(?:\s+block)?"),
    template(Break, Low, r"break(?:\s+out)?(?:\s+of)?(?:\s+(?:the\s+)?loop)?"),
    template(Continue, Low, r"continue(?:\s+(?:the\s+)?loop)?"),
    template(Continue, Low, r"skip(?:\s+to)?\s+(?:the\s+)?next(?:\s+iteration)?"),
    template(Throw, Low, r"throws?(?:\s+(?:an?|the))?(?:\s+(?:new\s+)?(?:error|exception))?"),
    template(
        FunctionDeclaration,
        Low,
        r"(?:(?:declare|define|create)s?\s+(?:a\s+)?)?(?:function|method)(?:\s+[\w$]+)?",
    ),
    template(
        ClassDeclaration,
        Low,
        r"(?:(?:declare|define|create)s?\s+(?:a\s+)?)?class(?:\s+[\w$]+)?",
    ),
    template(
        IncrementDecrement,
        High,
        r"(?:incrementing|decrementing|increasing|decreasing|bump(?:s|ing)?|add(?:s|ing)?\s+(?:one|1)\s+to|subtract(?:s|ing)?\s+(?:one|1)\s+from){T}",
    ),
    template(Return, High, r"(?:returning|(?:give|send)s?\s+back){T}"),
    template(Call, High, r"(?:calling|invoking|executing|running){T}"),
    template(Assignment, High, r"(?:setting|assigning|updating|storing|saving|changes?|changing){T}"),
    template(Declaration, High, r"(?:declaring|defining|creating|initializing|initialising){T}"),
    template(Loop, High, r"(?:looping|iterating)(?:\s+(?:over|through))?{T}"),
    template(Loop, High, r"go(?:es|ing)?\s+through{T}"),
    template(Conditional, High, r"checking(?:\s+(?:if|whether))?{T}"),
    template(Throw, High, r"throwing(?:\s+(?:an?|the))?(?:\s+(?:new\s+)?(?:error|exception))?"),
];

struct CompiledTemplate {
    category: StatementCategory,
    level: Sensitivity,
    anchored: Regex,
    unanchored: Regex,
}

static COMPILED: Lazy<Vec<CompiledTemplate>> = Lazy::new(|| {
    TEMPLATES
        .iter()
        .map(|template| {
            let body = template.pattern.replace("{T}", TARGET);
            CompiledTemplate {
                category: template.category,
                level: template.level,
                anchored: Regex::new(&format!("^(?:{body})$")).expect("static template compiles"),
                unanchored: Regex::new(&body).expect("static template compiles"),
            }
        })
        .collect()
});

static EXEMPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:todo|fixme|note|hack|xxx|bug|nb|warning|important)\b|^@|(?:https?|ftp)://|`|^(?:eslint|prettier|istanbul|c8|@ts-|tslint|biome|oxlint|global\s)",
    )
    .expect("static exemption pattern compiles")
});

/// Whether normalized comment text is exempt from obvious-comment detection
pub fn is_exempt(normalized: &str) -> bool {
    EXEMPT.is_match(normalized)
        || words(normalized)
            .iter()
            .any(|word| EXPLANATION_MARKERS.contains(*word))
}

/// Whether `text` only restates a statement of category `statement`
pub fn is_obvious(text: &str, statement: StatementCategory, sensitivity: Sensitivity) -> bool {
    if statement == StatementCategory::Other {
        return false;
    }

    let normalized = normalize(text);
    if normalized.is_empty() || is_exempt(&normalized) {
        return false;
    }

    COMPILED
        .iter()
        .filter(|template| template.category == statement && template.level <= sensitivity)
        .any(|template| matches_template(template, &normalized, sensitivity))
}

fn matches_template(template: &CompiledTemplate, normalized: &str, sensitivity: Sensitivity) -> bool {
    if sensitivity == Sensitivity::Low {
        return template.anchored.is_match(normalized);
    }

    template.unanchored.find_iter(normalized).any(|found| {
        if !on_word_boundary(normalized, found.start(), found.end()) {
            return false;
        }
        let outside = words(&normalized[..found.start()])
            .into_iter()
            .chain(words(&normalized[found.end()..]))
            .collect::<Vec<_>>();
        outside.len() <= sensitivity.filler_budget()
            && outside.iter().all(|word| FILLER_WORDS.contains(*word))
    })
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.map_or(true, char::is_whitespace) && after.map_or(true, |c| c.is_whitespace() || c == ',')
}
