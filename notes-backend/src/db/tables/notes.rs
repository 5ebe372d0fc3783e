//! Notes table operations

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use notes_types::{Note, NoteId};
use rusqlite::{params, OptionalExtension, Row, TransactionBehavior};
use uuid::Uuid;

use crate::notes::validation::{parse_note_id, validate_new_note, NewNote};
use crate::notes::{NoteError, NoteResult};
use super::super::Database;

const NOTE_COLUMNS: &str = "id, text, color, created_at, updated_at";

impl Database {
    /// Validate and persist a note, returning the stored record
    pub fn create_note(&self, text: &str, color: &str) -> NoteResult<Note> {
        let new_note = validate_new_note(Some(text), Some(color))?;
        self.insert_note(&new_note)
    }

    /// Persist an already-validated note. Assigns the id and both timestamps.
    fn insert_note(&self, new_note: &NewNote) -> NoteResult<Note> {
        let conn = self.conn()?;
        // Stored with millisecond precision, so truncate before returning
        let now = Utc::now().trunc_subsecs(3);
        let now_str = format_timestamp(&now);
        let id = Uuid::new_v4().to_string();

        conn.execute(
            "INSERT INTO notes (id, text, color, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, new_note.text, new_note.color, now_str, now_str],
        )?;

        Ok(Note {
            id: NoteId::new(id),
            text: new_note.text.clone(),
            color: new_note.color.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// All notes in creation order
    pub fn list_notes(&self) -> NoteResult<Vec<Note>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM notes ORDER BY seq ASC",
            NOTE_COLUMNS
        ))?;

        let notes = stmt
            .query_map([], row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    /// Remove a note by id and return what was removed.
    ///
    /// The id is checked for well-formedness before the store is touched.
    pub fn delete_note(&self, id: &str) -> NoteResult<Note> {
        let id = parse_note_id(Some(id))?.to_string();

        let mut conn = self.conn()?;
        // Immediate: take the write lock up front so two deletes of one id serialize
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let note = tx
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
                params![id],
                row_to_note,
            )
            .optional()?;

        let Some(note) = note else {
            return Err(NoteError::NotFound(id));
        };

        tx.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        tx.commit()?;

        Ok(note)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    let id: String = row.get(0)?;
    let created_at_str: String = row.get(3)?;
    let updated_at_str: String = row.get(4)?;

    Ok(Note {
        id: NoteId::new(id),
        text: row.get(1)?,
        color: row.get(2)?,
        created_at: parse_timestamp(3, &created_at_str)?,
        updated_at: parse_timestamp(4, &updated_at_str)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::{tempdir, TempDir};

    fn test_db() -> (TempDir, Database) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("notes.db");
        let db = Database::new(db_path.to_str().unwrap(), 2).expect("Failed to create database");
        (dir, db)
    }

    #[test]
    fn test_create_note_assigns_identity_and_timestamps() {
        let (_dir, db) = test_db();

        let note = db.create_note("  Buy milk  ", "#ffcc00").expect("Failed to create note");

        assert_eq!(note.text, "Buy milk");
        assert_eq!(note.color, "#ffcc00");
        assert!(Uuid::parse_str(note.id.as_str()).is_ok());
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_create_note_ids_are_unique() {
        let (_dir, db) = test_db();

        let ids: HashSet<NoteId> = (0..20)
            .map(|i| db.create_note(&format!("note {}", i), "red").unwrap().id)
            .collect();

        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_create_note_rejects_blank_text_without_persisting() {
        let (_dir, db) = test_db();

        let result = db.create_note("   ", "red");
        assert!(matches!(result, Err(NoteError::Validation(_))));

        let result = db.create_note("hello", "");
        assert!(matches!(result, Err(NoteError::Validation(_))));

        assert!(db.list_notes().unwrap().is_empty());
    }

    #[test]
    fn test_list_notes_returns_creation_order() {
        let (_dir, db) = test_db();
        assert!(db.list_notes().unwrap().is_empty());

        let first = db.create_note("first", "red").unwrap();
        let second = db.create_note("second", "blue").unwrap();
        let third = db.create_note("third", "green").unwrap();

        let listed = db.list_notes().unwrap();
        assert_eq!(listed, vec![first, second, third]);
    }

    #[test]
    fn test_delete_note_removes_exactly_once() {
        let (_dir, db) = test_db();

        let keep = db.create_note("keep", "red").unwrap();
        let gone = db.create_note("gone", "blue").unwrap();

        let deleted = db.delete_note(gone.id.as_str()).expect("Failed to delete note");
        assert_eq!(deleted, gone);

        let again = db.delete_note(gone.id.as_str());
        assert!(matches!(again, Err(NoteError::NotFound(_))));

        assert_eq!(db.list_notes().unwrap(), vec![keep]);
    }

    #[test]
    fn test_delete_note_rejects_malformed_id() {
        let (_dir, db) = test_db();
        db.create_note("keep", "red").unwrap();

        let result = db.delete_note("123; DROP TABLE notes");
        assert!(matches!(result, Err(NoteError::InvalidId(_))));
        assert_eq!(db.list_notes().unwrap().len(), 1);
    }

    #[test]
    fn test_list_count_after_creates_and_deletes() {
        let (_dir, db) = test_db();

        let created: Vec<Note> = (0..6)
            .map(|i| db.create_note(&format!("n{}", i), "red").unwrap())
            .collect();
        for note in created.iter().take(4) {
            db.delete_note(note.id.as_str()).unwrap();
        }

        let listed = db.list_notes().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed, created[4..].to_vec());
    }

    #[test]
    fn test_notes_survive_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("notes.db");
        let path = db_path.to_str().unwrap();

        let note = {
            let db = Database::new(path, 1).unwrap();
            db.create_note("durable", "red").unwrap()
        };

        let db = Database::new(path, 1).unwrap();
        assert_eq!(db.list_notes().unwrap(), vec![note]);
    }
}
