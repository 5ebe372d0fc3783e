//! Note error taxonomy shared by the store, the service and both HTTP surfaces.

use actix_web::http::StatusCode;
use thiserror::Error;

pub type NoteResult<T> = Result<T, NoteError>;

/// Generic message returned to clients for store failures
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const NOT_FOUND_MESSAGE: &str = "Note not found";

#[derive(Debug, Clone, Error)]
pub enum NoteError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Missing or empty required field
    #[error("{0}")]
    Validation(String),

    /// Identifier is not well-formed
    #[error("Invalid note ID: {0}")]
    InvalidId(String),

    /// Well-formed identifier with no matching note
    #[error("Note not found: {0}")]
    NotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Connectivity or unexpected persistence failure
    #[error("Store error: {0}")]
    Store(String),
}

impl NoteError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            NoteError::Validation(_) | NoteError::InvalidId(_) => StatusCode::BAD_REQUEST,
            NoteError::NotFound(_) => StatusCode::NOT_FOUND,
            NoteError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a client. Store details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            NoteError::Store(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            NoteError::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<rusqlite::Error> for NoteError {
    fn from(err: rusqlite::Error) -> Self {
        NoteError::Store(err.to_string())
    }
}

impl From<r2d2::Error> for NoteError {
    fn from(err: r2d2::Error) -> Self {
        NoteError::Store(format!("connection pool: {}", err))
    }
}

impl From<actix_web::error::BlockingError> for NoteError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        NoteError::Store(format!("blocking task failed: {}", err))
    }
}
