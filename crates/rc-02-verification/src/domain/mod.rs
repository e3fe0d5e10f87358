//! Domain layer for the Verification State Machine.

pub mod errors;
pub mod notes;
pub mod submission;
pub mod transition;

pub use errors::AuditError;
pub use notes::{validate_review_notes, MAX_REVIEW_NOTES_CHARS};
pub use submission::{build_record, validate_new_record, SubmissionLimits};
pub use transition::{RuleMatch, Transition};
