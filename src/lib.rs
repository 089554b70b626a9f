//! Shears - strip the comments your last commit grew

pub mod diff;
pub mod language;
pub mod report;
pub mod repo;
pub mod rewrite;
pub mod scanner;
pub mod string_utils;

pub use language::{CommentSyntax, Language};
pub use repo::{GitValidationError, Workspace};
pub use report::{FileSummary, Reporter, RunSummary, print_json};
pub use rewrite::{ApplyOutcome, apply};
pub use scanner::{CommentOccurrence, scan};
