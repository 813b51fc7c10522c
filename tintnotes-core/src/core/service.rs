//! Façade between the application state and whichever note backend is in use.

use crate::store::NotesReceiver;
use crate::{Note, NoteStore, Result};
use std::sync::Arc;

/// Persistence operations the rest of the app depends on.
///
/// [`NoteStore`] is the SQLite implementation.
pub trait NoteBackend: Send + Sync {
    fn insert(&self, note: &Note) -> Result<i64>;
    fn update(&self, note: &Note) -> Result<()>;
    fn delete(&self, note: &Note) -> Result<()>;
    fn observe_all(&self) -> NotesReceiver;
}

impl NoteBackend for NoteStore {
    fn insert(&self, note: &Note) -> Result<i64> {
        NoteStore::insert(self, note)
    }

    fn update(&self, note: &Note) -> Result<()> {
        NoteStore::update(self, note)
    }

    fn delete(&self, note: &Note) -> Result<()> {
        NoteStore::delete(self, note)
    }

    fn observe_all(&self) -> NotesReceiver {
        NoteStore::observe_all(self)
    }
}

/// Pure delegation over a [`NoteBackend`]. Cheap to clone.
#[derive(Clone)]
pub struct NotesService {
    backend: Arc<dyn NoteBackend>,
}

impl NotesService {
    pub fn new(backend: Arc<dyn NoteBackend>) -> Self {
        Self { backend }
    }

    pub fn add(&self, note: &Note) -> Result<i64> {
        self.backend.insert(note)
    }

    pub fn edit(&self, note: &Note) -> Result<()> {
        self.backend.update(note)
    }

    pub fn remove(&self, note: &Note) -> Result<()> {
        self.backend.delete(note)
    }

    /// The backend's live view, unchanged.
    pub fn watch_all(&self) -> NotesReceiver {
        self.backend.observe_all()
    }
}

impl From<Arc<NoteStore>> for NotesService {
    fn from(store: Arc<NoteStore>) -> Self {
        Self::new(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Storage, TintnotesError};

    fn service() -> (Arc<NoteStore>, NotesService) {
        let store = Arc::new(NoteStore::new(Storage::in_memory().unwrap()).unwrap());
        let service = NotesService::from(store.clone());
        (store, service)
    }

    #[test]
    fn test_operations_reach_the_store() {
        let (store, service) = service();

        let id = service.add(&Note::new("A", "b")).unwrap();
        let mut note = store.get(id).unwrap();
        note.title = "A2".to_string();
        service.edit(&note).unwrap();
        assert_eq!(store.get(id).unwrap().title, "A2");

        service.remove(&note).unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_watch_all_is_the_store_view() {
        let (store, service) = service();
        let rx = service.watch_all();

        store.insert(&Note::new("direct", "")).unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow()[0].title, "direct");
    }

    #[test]
    fn test_errors_pass_through() {
        let (_store, service) = service();
        let mut ghost = Note::new("ghost", "");
        ghost.id = 3;

        assert!(matches!(service.edit(&ghost), Err(TintnotesError::NoteNotFound(3))));
    }
}
