use thiserror::Error;

/// Failure talking to the notes API
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// Server answered with a non-success status; `message` is its `error` field
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure of a sync agent operation, phrased for the user
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    #[error("Note text cannot be empty!")]
    EmptyText,

    #[error("Please select a color!")]
    NoColorSelected,

    #[error("Error loading notes: {0}")]
    Load(ApiError),

    #[error("Error saving note: {0}")]
    Save(ApiError),

    #[error("Failed to delete note: {0}")]
    Delete(ApiError),
}
