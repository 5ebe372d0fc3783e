//! Input rules shared by the store and both HTTP entry points.

use uuid::Uuid;

use super::error::{NoteError, NoteResult};

pub const MAX_TEXT_CHARS: usize = 10_000;
pub const MAX_COLOR_CHARS: usize = 64;

/// Request body limit for both create entry points. Sized for the longest
/// valid note at worst-case encoding (a 4-byte char percent-encoded in a form,
/// or a surrogate pair escaped in JSON, is 12 bytes), plus field names.
pub const MAX_BODY_BYTES: usize = (MAX_TEXT_CHARS + MAX_COLOR_CHARS) * 12 + 1024;

pub const TEXT_REQUIRED: &str = "Note text is required";
pub const COLOR_REQUIRED: &str = "Note color is required";
pub const ID_MISSING: &str = "Note ID is missing.";

/// A note that passed validation and is ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub text: String,
    pub color: String,
}

/// Trim and check both fields. Text is checked first so an empty form
/// reports the text problem.
pub fn validate_new_note(text: Option<&str>, color: Option<&str>) -> NoteResult<NewNote> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(NoteError::Validation(TEXT_REQUIRED.to_string()));
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(NoteError::Validation(format!(
            "Note text must be at most {} characters",
            MAX_TEXT_CHARS
        )));
    }

    let color = color.map(str::trim).unwrap_or_default();
    if color.is_empty() {
        return Err(NoteError::Validation(COLOR_REQUIRED.to_string()));
    }
    if color.chars().count() > MAX_COLOR_CHARS {
        return Err(NoteError::Validation(format!(
            "Note color must be at most {} characters",
            MAX_COLOR_CHARS
        )));
    }

    Ok(NewNote {
        text: text.to_string(),
        color: color.to_string(),
    })
}

/// Check that an identifier is present and well-formed before any lookup
pub fn parse_note_id(raw: Option<&str>) -> NoteResult<Uuid> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(NoteError::Validation(ID_MISSING.to_string()));
    }
    Uuid::parse_str(raw).map_err(|_| NoteError::InvalidId(raw.to_string()))
}
