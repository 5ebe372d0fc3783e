//! SyncAgent - fire-and-confirm operations against the notes API.
//!
//! Nothing is applied optimistically: the board only changes after the
//! server answers. Each operation is split into a network phase that never
//! touches [`SyncState`] (`fetch_notes`, `post_note`, `send_delete`) and an
//! apply phase on the state, so callers that run several requests at once
//! can apply their results in whatever order they resolve.

use notes_types::{Note, NoteId};

use crate::api::NotesApi;
use crate::error::SyncError;
use crate::state::{ElementKey, SyncState};

pub struct SyncAgent<A> {
    api: A,
}

impl<A: NotesApi> SyncAgent<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // ── Network phases ──────────────────────────────

    pub async fn fetch_notes(&self) -> Result<Vec<Note>, SyncError> {
        self.api.list_notes().await.map_err(|e| {
            log::error!("[SYNC] Error loading notes: {}", e);
            SyncError::Load(e)
        })
    }

    pub async fn post_note(&self, text: &str, color: &str) -> Result<Note, SyncError> {
        self.api.create_note(text, color).await.map_err(|e| {
            log::error!("[SYNC] Error saving note: {}", e);
            SyncError::Save(e)
        })
    }

    pub async fn send_delete(&self, id: &NoteId) -> Result<String, SyncError> {
        let message = self.api.delete_note(id).await.map_err(|e| {
            log::error!("[SYNC] Error deleting note {}: {}", id, e);
            SyncError::Delete(e)
        })?;
        log::debug!("[SYNC] Server response: {}", message);
        Ok(message)
    }

    // ── Whole operations ────────────────────────────

    /// Fetch the full list and resync the board from it. Returns how many
    /// notes are now rendered. On failure the board is left as it was.
    pub async fn load_notes(&self, state: &mut SyncState) -> Result<usize, SyncError> {
        let notes = self.fetch_notes().await?;
        log::debug!("[SYNC] Loaded {} notes", notes.len());
        state.apply_loaded(&notes);
        Ok(state.len())
    }

    /// Create a note on the server and render it if no resync beat us to it.
    /// `Ok(None)` means the note exists but was already on the board.
    pub async fn save_note_to_db(
        &self,
        state: &mut SyncState,
        text: &str,
        color: &str,
    ) -> Result<Option<ElementKey>, SyncError> {
        let note = self.post_note(text, color).await?;
        Ok(state.apply_created(&note))
    }

    /// Delete on the server, then drop the element. On failure the element
    /// stays and the error carries the server's message.
    pub async fn delete_note_from_db(
        &self,
        state: &mut SyncState,
        id: &NoteId,
        key: ElementKey,
    ) -> Result<(), SyncError> {
        self.send_delete(id).await?;
        state.apply_deleted(id, key);
        Ok(())
    }

    /// Form submission: check the input locally, then save.
    pub async fn submit_note(
        &self,
        state: &mut SyncState,
        text: &str,
        color: Option<&str>,
    ) -> Result<Option<ElementKey>, SyncError> {
        let color = color
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(SyncError::NoColorSelected)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(SyncError::EmptyText);
        }

        self.save_note_to_db(state, text, color).await
    }
}
