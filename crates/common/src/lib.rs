//! Pattern tables and pure classifiers shared by the comment lint rules.
//!
//! Nothing in this crate knows about an AST. Every function takes comment
//! text (and, for obvious-comment detection, the category of the adjacent
//! statement) and returns a verdict, so the rules can stay thin adapters.

pub mod code;
pub mod format;
pub mod obvious;
pub mod patterns;
pub mod text;
pub mod words;

pub use code::{Classification, CodeClassifier, LineVerdict};
pub use format::{CommentGrammar, FormatCheck, PrefixMatch};
pub use obvious::{is_obvious, Sensitivity, StatementCategory};
pub use text::{normalize, strip_decoration, words};
