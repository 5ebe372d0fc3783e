//! Explicit client state: the dedup guard and the rendered board.

use notes_types::{Note, NoteId};
use std::collections::HashSet;
use std::fmt;

/// Local handle for one rendered element, unique for the life of a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(u64);

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note as shown to the user, with its delete affordance keyed by `key`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    pub key: ElementKey,
    /// `None` for an element the server never confirmed
    pub id: Option<NoteId>,
    pub text: String,
    pub color: String,
}

/// Everything the sync agent is allowed to mutate.
///
/// Invariant: every `Some(id)` on the board is in `known_ids`, and no id
/// appears on the board twice.
#[derive(Debug, Default)]
pub struct SyncState {
    known_ids: HashSet<NoteId>,
    board: Vec<RenderedNote>,
    next_key: u64,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered notes in display order
    pub fn notes(&self) -> &[RenderedNote] {
        &self.board
    }

    pub fn len(&self) -> usize {
        self.board.len()
    }

    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }

    pub fn knows(&self, id: &NoteId) -> bool {
        self.known_ids.contains(id)
    }

    pub fn key_for(&self, id: &NoteId) -> Option<ElementKey> {
        self.board
            .iter()
            .find(|n| n.id.as_ref() == Some(id))
            .map(|n| n.key)
    }

    /// Render one note. No-op returning `None` if `id` is already known.
    pub fn create_note_element(
        &mut self,
        text: &str,
        color: &str,
        id: Option<NoteId>,
    ) -> Option<ElementKey> {
        if let Some(id) = &id {
            if !self.known_ids.insert(id.clone()) {
                return None;
            }
        }

        let key = ElementKey(self.next_key);
        self.next_key += 1;
        self.board.push(RenderedNote {
            key,
            id,
            text: text.to_string(),
            color: color.to_string(),
        });
        Some(key)
    }

    /// Authoritative resync: replace the board and the dedup set with the
    /// server's list.
    pub fn apply_loaded(&mut self, notes: &[Note]) {
        self.board.clear();
        self.known_ids.clear();
        for note in notes {
            self.create_note_element(&note.text, &note.color, Some(note.id.clone()));
        }
    }

    /// Render a note the server confirmed creating, unless a load already did
    pub fn apply_created(&mut self, note: &Note) -> Option<ElementKey> {
        if self.knows(&note.id) {
            return None;
        }
        self.create_note_element(&note.text, &note.color, Some(note.id.clone()))
    }

    /// Drop a note the server confirmed deleting.
    ///
    /// Matches by id as well as key: a resync during the request may have
    /// re-rendered the note under a new key.
    pub fn apply_deleted(&mut self, id: &NoteId, key: ElementKey) {
        self.board
            .retain(|n| n.key != key && n.id.as_ref() != Some(id));
        self.known_ids.remove(id);
    }

    /// Remove an unsaved element (one without a server id). Returns false if
    /// the key is unknown or the element is backed by the server.
    pub fn remove_local(&mut self, key: ElementKey) -> bool {
        let before = self.board.len();
        self.board.retain(|n| !(n.key == key && n.id.is_none()));
        self.board.len() != before
    }
}
