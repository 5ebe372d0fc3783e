//! NoteService - the one create/list/delete path behind both HTTP surfaces.
//!
//! Validation runs on the async worker before anything touches the store;
//! store calls are blocking SQLite work and run on actix's blocking pool.

use actix_web::web;
use notes_types::Note;
use std::sync::Arc;

use super::error::{NoteError, NoteResult};
use super::validation::{parse_note_id, validate_new_note};
use crate::db::Database;

#[derive(Clone)]
pub struct NoteService {
    db: Arc<Database>,
}

impl NoteService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn list_notes(&self) -> NoteResult<Vec<Note>> {
        let db = Arc::clone(&self.db);
        let result = web::block(move || db.list_notes()).await?;
        log_store_failure("list", &result);
        result
    }

    pub async fn create_note(&self, text: Option<&str>, color: Option<&str>) -> NoteResult<Note> {
        let new_note = validate_new_note(text, color)?;

        let db = Arc::clone(&self.db);
        let result = web::block(move || db.create_note(&new_note.text, &new_note.color)).await?;
        log_store_failure("create", &result);

        let note = result?;
        log::info!("[NOTES] Created note {}", note.id);
        Ok(note)
    }

    pub async fn delete_note(&self, raw_id: Option<&str>) -> NoteResult<Note> {
        let id = parse_note_id(raw_id)?.to_string();

        let db = Arc::clone(&self.db);
        let result = web::block(move || db.delete_note(&id)).await?;
        log_store_failure("delete", &result);

        let note = result?;
        log::info!("[NOTES] Deleted note {}", note.id);
        Ok(note)
    }
}

fn log_store_failure<T>(op: &str, result: &NoteResult<T>) {
    if let Err(NoteError::Store(detail)) = result {
        log::error!("[NOTES] {} failed: {}", op, detail);
    }
}
