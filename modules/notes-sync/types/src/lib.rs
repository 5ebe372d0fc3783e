//! Shared types for the notes backend and its sync clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =====================================================
// Domain Types
// =====================================================

/// Opaque note identifier assigned by the store.
///
/// Clients must not assume anything about its format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A persisted note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: NoteId,
    pub text: String,
    pub color: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /api/notes`.
///
/// Both fields are optional on the wire so that a missing field is reported
/// as a validation error rather than a body parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CreateNoteRequest {
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            color: Some(color.into()),
        }
    }
}

// =====================================================
// Response Types
// =====================================================

/// Body of a successful `POST /api/notes` (201)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteResponse {
    pub message: String,
    pub note: Note,
}

/// Confirmation body, e.g. for `DELETE /api/notes/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body shared by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_uses_document_field_names() {
        let now = Utc::now();
        let note = Note {
            id: NoteId::new("abc"),
            text: "Buy milk".to_string(),
            color: "#ffcc00".to_string(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["text"], "Buy milk");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn create_request_tolerates_missing_fields() {
        let req: CreateNoteRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(req.text.as_deref(), Some("hi"));
        assert!(req.color.is_none());
    }
}
