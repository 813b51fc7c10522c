//! Observable application state for the note screens.
//!
//! [`NotesState`] is built once by the application root and handed to screens
//! by reference. Screens read [`UiState`] through [`NotesState::subscribe`] and
//! send intents back. Write intents run their store call on Tokio's blocking
//! pool, then report the outcome through `status_message`. The `notes` field
//! is only ever filled by the relay task that follows the service's live view,
//! so a write becomes visible exactly when the store publishes it.

use crate::color::DEFAULT_BACKGROUND;
use crate::store::{NotesReceiver, NotesSnapshot};
use crate::{Note, NotesService, Result, TintnotesError};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const MSG_NOTE_ADDED: &str = "note added";
pub const MSG_NOTE_UPDATED: &str = "note updated";
pub const MSG_NOTE_DELETED: &str = "note deleted";

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Mirror of the store, newest id first.
    pub notes: NotesSnapshot,
    /// Color picked in the note form that is currently open.
    pub selected_background: String,
    /// Outcome of the last write; cleared by whichever screen shows it.
    pub status_message: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            notes: Arc::new(Vec::new()),
            selected_background: DEFAULT_BACKGROUND.to_string(),
            status_message: None,
        }
    }
}

/// Holder of the [`UiState`] every note screen renders from.
pub struct NotesState {
    service: NotesService,
    state_tx: Arc<watch::Sender<UiState>>,
    relay: JoinHandle<()>,
}

impl NotesState {
    /// Subscribes to the service's live view for the lifetime of the returned value.
    ///
    /// # Errors
    ///
    /// Returns [`TintnotesError::Worker`] when called outside a Tokio runtime.
    pub fn new(service: NotesService) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| TintnotesError::Worker(format!("no async runtime for note state: {e}")))?;
        let mut notes_rx = service.watch_all();
        let initial = UiState {
            notes: notes_rx.borrow_and_update().clone(),
            ..UiState::default()
        };
        let (state_tx, _) = watch::channel(initial);
        let state_tx = Arc::new(state_tx);
        let relay = runtime.spawn(relay_notes(notes_rx, state_tx.clone()));

        Ok(Self {
            service,
            state_tx,
            relay,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> UiState {
        self.state_tx.borrow().clone()
    }

    pub fn service(&self) -> &NotesService {
        &self.service
    }

    /// Stores a new note and returns the id the store assigned.
    pub async fn create(&self, note: Note) -> Result<i64> {
        let service = self.service.clone();
        let outcome = run_blocking(move || service.add(&note)).await;
        self.finish(outcome, MSG_NOTE_ADDED)
    }

    /// Persists edits to an existing note.
    pub async fn save(&self, note: Note) -> Result<()> {
        let service = self.service.clone();
        let outcome = run_blocking(move || service.edit(&note)).await;
        self.finish(outcome, MSG_NOTE_UPDATED)
    }

    pub async fn discard(&self, note: Note) -> Result<()> {
        let service = self.service.clone();
        let outcome = run_blocking(move || service.remove(&note)).await;
        self.finish(outcome, MSG_NOTE_DELETED)
    }

    pub fn set_selected_background(&self, color: impl Into<String>) {
        let color = color.into();
        self.state_tx
            .send_modify(|state| state.selected_background = color);
    }

    pub fn set_message(&self, text: impl Into<String>) {
        let text = text.into();
        self.state_tx
            .send_modify(|state| state.status_message = Some(text));
    }

    pub fn clear_message(&self) {
        self.state_tx
            .send_if_modified(|state| state.status_message.take().is_some());
    }

    /// Reads and clears the status message in one step.
    pub fn take_message(&self) -> Option<String> {
        let mut taken = None;
        self.state_tx.send_if_modified(|state| {
            taken = state.status_message.take();
            taken.is_some()
        });
        taken
    }

    /// Shows a recoverable failure (e.g. an image that could not be cached)
    /// without touching anything else.
    pub fn report_error(&self, err: &TintnotesError) {
        log::warn!("{err}");
        self.set_message(err.user_message());
    }

    fn finish<T>(&self, outcome: Result<T>, success: &str) -> Result<T> {
        match &outcome {
            Ok(_) => self.set_message(success),
            Err(e) => {
                log::error!("note write failed: {e}");
                self.set_message(e.user_message());
            }
        }
        outcome
    }
}

impl Drop for NotesState {
    fn drop(&mut self) {
        self.relay.abort();
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TintnotesError::Worker(e.to_string()))?
}

async fn relay_notes(mut notes_rx: NotesReceiver, state_tx: Arc<watch::Sender<UiState>>) {
    while notes_rx.changed().await.is_ok() {
        let notes = notes_rx.borrow_and_update().clone();
        state_tx.send_modify(|state| state.notes = notes);
    }
    log::debug!("note store closed; relay stopped");
}
