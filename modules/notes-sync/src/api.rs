//! Typed HTTP client for the notes API.

use async_trait::async_trait;
use notes_types::{
    CreateNoteRequest, CreateNoteResponse, ErrorResponse, MessageResponse, Note, NoteId,
};

use crate::error::ApiError;

/// The three calls the sync agent makes. Implemented over HTTP by
/// [`HttpNotesApi`]; tests substitute an in-memory fake.
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError>;

    async fn create_note(&self, text: &str, color: &str) -> Result<Note, ApiError>;

    /// Returns the server's confirmation message
    async fn delete_note(&self, id: &NoteId) -> Result<String, ApiError>;
}

pub struct HttpNotesApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpNotesApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}/api/notes", self.base_url)
    }

    /// `/api/notes/{id}` with the id percent-encoded as one path segment
    fn note_url(&self, id: &NoteId) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.notes_url())
            .map_err(|e| ApiError::Transport(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport("base URL cannot hold a path".to_string()))?
            .push(id.as_str());
        Ok(url)
    }
}

/// Turn a non-success response into `ApiError::Rejected`, preferring the
/// server's `{error}` message over the raw body.
async fn rejection(resp: reqwest::Response) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => err.error,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => format!("HTTP {}", status),
    };

    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let resp = self
            .client
            .get(self.notes_url())
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }

        resp.json::<Vec<Note>>()
            .await
            .map_err(|e| ApiError::Decode(format!("list notes: {}", e)))
    }

    async fn create_note(&self, text: &str, color: &str) -> Result<Note, ApiError> {
        let resp = self
            .client
            .post(self.notes_url())
            .json(&CreateNoteRequest::new(text, color))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }

        resp.json::<CreateNoteResponse>()
            .await
            .map(|created| created.note)
            .map_err(|e| ApiError::Decode(format!("create note: {}", e)))
    }

    async fn delete_note(&self, id: &NoteId) -> Result<String, ApiError> {
        let resp = self
            .client
            .delete(self.note_url(id)?)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }

        resp.json::<MessageResponse>()
            .await
            .map(|body| body.message)
            .map_err(|e| ApiError::Decode(format!("delete note: {}", e)))
    }
}
