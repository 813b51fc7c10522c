//! Core library for Tintnotes — a local-only note-taking application where each
//! note sits on a chosen background color or photo.
//!
//! [`NoteStore`] owns the SQLite `notes` table and publishes a fresh snapshot of
//! every note after each committed write. [`NotesService`] fronts it for the
//! rest of the app, and [`NotesState`] turns that live view plus user intents
//! into the observable [`UiState`] that screens render.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    color::{self, contrast_color, Contrast, HexColor, BACKGROUND_PALETTE, DEFAULT_BACKGROUND},
    error::{Result, TintnotesError},
    images::ImageCache,
    note::{Background, Note, NEW_NOTE_ID},
    service::{NoteBackend, NotesService},
    settings::{self, load_settings, save_settings, AppSettings},
    state::{self, NotesState, UiState, MSG_NOTE_ADDED, MSG_NOTE_DELETED, MSG_NOTE_UPDATED},
    storage::Storage,
    store::{self, NoteStore, NotesReceiver, NotesSnapshot},
};
