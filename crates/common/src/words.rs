//! Static word sets

use phf::phf_set;

/// Words that signal a comment explains intent rather than restating code
pub static EXPLANATION_MARKERS: phf::Set<&'static str> = phf_set! {
    "because", "since", "workaround", "bug", "performance", "perf", "hack", "why",
    "otherwise", "ensure", "ensures", "prevent", "prevents", "avoid", "avoids",
    "fixes", "fix", "due", "so", "order", "compat", "compatibility", "legacy",
    "temporary", "temporarily", "important", "note", "warning", "caveat", "edge",
    "careful", "intentionally", "deliberately", "required", "requires", "must",
    "unless", "until", "cache", "cached", "optimization", "optimize", "race",
    "however", "although", "instead", "issue", "regression", "browser", "safari",
};

/// Words tolerated around a template phrase without adding meaning
pub static FILLER_WORDS: phf::Set<&'static str> = phf_set! {
    "the", "a", "an", "this", "that", "it", "its", "here", "now", "then", "value",
    "values", "variable", "var", "by", "one", "1", "to", "of", "and", "counter",
    "index", "new", "current", "result", "we", "next", "all", "each", "item",
    "items", "array", "list", "loop", "function", "method", "object", "statement",
    "just", "simply", "again", "up", "down", "out",
};

/// Lowercase words that read like identifiers in backticks but never name a symbol
pub static COMMON_WORDS: phf::Set<&'static str> = phf_set! {
    "true", "false", "null", "undefined", "this", "super", "async", "await",
    "return", "const", "let", "var", "function", "class", "new", "typeof",
    "instanceof", "void", "any", "string", "number", "boolean", "object", "symbol",
    "bigint", "never", "unknown", "todo", "fixme", "note", "and", "or", "not",
    "the", "import", "export", "default", "yield", "throw", "try", "catch",
    "finally", "if", "else", "for", "while", "switch", "case", "break", "continue",
    "nan", "props", "state", "children", "key", "ref", "id", "value",
    "data", "error", "err", "args", "options", "config", "type", "name",
};

/// Runtime globals that are always in scope
pub static JS_GLOBALS: phf::Set<&'static str> = phf_set! {
    "console", "window", "document", "globalThis", "process", "module", "exports",
    "require", "Math", "JSON", "Object", "Array", "String", "Number", "Boolean",
    "Promise", "Map", "Set", "WeakMap", "WeakSet", "WeakRef", "Symbol", "Error",
    "TypeError", "RangeError", "SyntaxError", "ReferenceError", "AggregateError",
    "Date", "RegExp", "fetch", "setTimeout", "setInterval", "clearTimeout",
    "clearInterval", "requestAnimationFrame", "Buffer", "Intl", "Reflect",
    "Proxy", "BigInt", "NaN", "Infinity", "localStorage", "sessionStorage",
    "navigator", "location", "history", "URL", "URLSearchParams",
    "structuredClone", "queueMicrotask", "Event", "EventTarget", "HTMLElement",
    "Node", "Element", "Response", "Request", "Headers", "Iterator", "Generator",
    "Function", "Record", "Partial", "Required", "Readonly", "Pick", "Omit",
    "Exclude", "Extract", "ReturnType", "Parameters", "Awaited", "NonNullable",
    "Uint8Array", "ArrayBuffer", "DataView", "TextEncoder", "TextDecoder",
    "AbortController", "FormData", "Blob", "File", "crypto", "performance",
};

/// Whether `identifier` is a common word or global rather than a local symbol
pub fn is_well_known(identifier: &str) -> bool {
    JS_GLOBALS.contains(identifier) || COMMON_WORDS.contains(identifier.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_well_known() {
        assert!(is_well_known("Promise"));
        assert!(is_well_known("NULL"));
        assert!(!is_well_known("parseConfig"));
    }
}
