//! Internal domain modules for the Tintnotes core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod color;
pub mod error;
pub mod images;
pub mod note;
pub mod service;
pub mod settings;
pub mod state;
pub mod storage;
pub mod store;

#[doc(inline)]
pub use color::{contrast_color, Contrast, HexColor, BACKGROUND_PALETTE, DEFAULT_BACKGROUND};
#[doc(inline)]
pub use error::{Result, TintnotesError};
#[doc(inline)]
pub use images::ImageCache;
#[doc(inline)]
pub use note::{Background, Note, NEW_NOTE_ID};
#[doc(inline)]
pub use service::{NoteBackend, NotesService};
#[doc(inline)]
pub use settings::AppSettings;
#[doc(inline)]
pub use state::{NotesState, UiState};
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use store::{NoteStore, NotesReceiver, NotesSnapshot};
