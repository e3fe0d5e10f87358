//! Review-notes validation.

use shared_types::{CoreError, CoreResult};

/// Upper bound on reviewer notes, counted in characters.
pub const MAX_REVIEW_NOTES_CHARS: usize = 10_000;

/// Notes are required, must not be blank, and must fit within `max_chars`.
///
/// Returns the trimmed notes that will be stored.
pub fn validate_review_notes(notes: &str, max_chars: usize) -> CoreResult<String> {
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("notes", "review notes are required"));
    }
    let len = trimmed.chars().count();
    if len > max_chars {
        return Err(CoreError::validation(
            "notes",
            format!("review notes exceed {} characters (got {})", max_chars, len),
        ));
    }
    Ok(trimmed.to_string())
}
