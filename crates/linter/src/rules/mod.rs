//! Comment lint rules

pub mod a11y_todo_format;
pub mod comment_ratio;
pub mod jsdoc_params;
pub mod no_commented_code;
pub mod no_obvious_comments;
pub mod no_stale_references;
pub mod todo_age;
pub mod todo_format;
pub mod valid_ticket_reference;

// Re-export rule structs
pub use a11y_todo_format::{A11yTodoFormat, A11yTodoFormatConfig};
pub use comment_ratio::{CommentRatio, CommentRatioConfig, LineCounts};
pub use jsdoc_params::{JsdocParams, JsdocParamsConfig};
pub use no_commented_code::{NoCommentedCode, NoCommentedCodeConfig};
pub use no_obvious_comments::{statement_category, AdjacentStatements, NoObviousComments, NoObviousCommentsConfig};
pub use no_stale_references::{NoStaleReferences, NoStaleReferencesConfig};
pub use todo_age::{AgeSource, InlineDateSource, TodoAge, TodoAgeConfig};
pub use todo_format::{TodoFormat, TodoFormatConfig};
pub use valid_ticket_reference::{
    TicketBatch, TicketMention, TicketRefs, ValidTicketReference, ValidTicketReferenceConfig,
};

/// Every rule id, in registration order
pub const RULE_NAMES: &[&str] = &[
    "todo-format",
    "a11y-todo-format",
    "no-commented-code",
    "no-obvious-comments",
    "jsdoc-params",
    "comment-ratio",
    "todo-age",
    "no-stale-references",
    "valid-ticket-reference",
];
