//! Note lifecycle: validation, the error taxonomy, and the service shared by
//! the JSON API and the form flow.

pub mod error;
pub mod service;
pub mod validation;

pub use error::{NoteError, NoteResult};
pub use service::NoteService;
