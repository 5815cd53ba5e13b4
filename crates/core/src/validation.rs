//! Client-side input checks, run before any request is sent.

use crate::error::CoreError;
use crate::types::NoteInput;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const CONTENT_REQUIRED: &str = "Note content is required";

/// Trim `input` and check that title and content are non-empty.
///
/// Tags are trimmed and blank entries dropped; a tag list that ends up
/// empty becomes `None`. Returns the normalized input that should be sent.
pub fn normalize_note_input(input: &NoteInput) -> Result<NoteInput, CoreError> {
    let mut normalized = normalize_fields(input)?;
    normalized.tags = normalized.tags.filter(|tags| !tags.is_empty());
    Ok(normalized)
}

/// Like [`normalize_note_input`], for a full replacement of an existing
/// note.
///
/// The service keeps any field missing from an update body, so `tags` is
/// always present: `Some(vec![])` clears the note's tags.
pub fn normalize_update_input(input: &NoteInput) -> Result<NoteInput, CoreError> {
    let mut normalized = normalize_fields(input)?;
    normalized.tags.get_or_insert_with(Vec::new);
    Ok(normalized)
}

fn normalize_fields(input: &NoteInput) -> Result<NoteInput, CoreError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation(TITLE_REQUIRED.into()));
    }

    let content = input.content.trim();
    if content.is_empty() {
        return Err(CoreError::Validation(CONTENT_REQUIRED.into()));
    }

    let tags = input.tags.as_ref().map(|tags| {
        tags.iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    });

    Ok(NoteInput {
        title: title.to_string(),
        content: content.to_string(),
        tags,
    })
}

/// Parse a comma-separated tag field, e.g. `"work, personal, ideas"`.
///
/// Returns `None` when no non-blank tag remains.
pub fn parse_tags(raw: &str) -> Option<Vec<String>> {
    let tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    (!tags.is_empty()).then_some(tags)
}
