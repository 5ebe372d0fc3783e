//! Client-side sync agent for the notes API.
//!
//! Keeps a local board of rendered notes consistent with the server without
//! duplicates. All mutable client state lives in an explicit [`SyncState`]
//! that the caller owns and hands to each operation.

pub mod agent;
pub mod api;
pub mod error;
pub mod state;

pub use agent::SyncAgent;
pub use api::{HttpNotesApi, NotesApi};
pub use error::{ApiError, SyncError};
pub use state::{ElementKey, RenderedNote, SyncState};
