//! The notes table and its live "all notes" view.
//!
//! [`NoteStore`] owns the SQLite connection behind a mutex and a
//! [`tokio::sync::watch`] channel. Every committed mutation re-reads the table
//! and publishes the full snapshot, newest id first, so subscribers never have
//! to poll or re-query after a write. Receivers only hold the channel, never
//! the store: once the store is dropped their `changed()` returns an error.

use crate::color::HexColor;
use crate::{Note, Result, Storage, TintnotesError};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Every stored note, ordered by id descending.
pub type NotesSnapshot = Arc<Vec<Note>>;

/// Live view returned by [`NoteStore::observe_all`].
pub type NotesReceiver = watch::Receiver<NotesSnapshot>;

const SELECT_ALL: &str = "SELECT id, title, body, background_color, background_image_path
     FROM notes ORDER BY id DESC";

/// The `notes` table plus the channel that broadcasts its contents after each write.
pub struct NoteStore {
    storage: Mutex<Storage>,
    notes_tx: watch::Sender<NotesSnapshot>,
}

impl NoteStore {
    /// Wraps an open [`Storage`], seeding the live view with its current rows.
    pub fn new(storage: Storage) -> Result<Self> {
        let initial = query_all(storage.connection())?;
        log::info!("note store opened with {} notes", initial.len());
        let (notes_tx, _) = watch::channel(Arc::new(initial));
        Ok(Self {
            storage: Mutex::new(storage),
            notes_tx,
        })
    }

    /// Opens (or creates) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(Storage::open_or_create(path)?)
    }

    /// Stores `note` and returns its id.
    ///
    /// A note without an id gets a fresh one, strictly greater than any id
    /// handed out before. A note that already carries an id replaces the row
    /// with that id, or is inserted under it.
    ///
    /// # Errors
    ///
    /// [`TintnotesError::InvalidColor`] for a malformed background color,
    /// [`TintnotesError::Database`] if SQLite fails.
    pub fn insert(&self, note: &Note) -> Result<i64> {
        HexColor::parse(&note.background_color)?;
        let mut storage = self.lock()?;

        let tx = storage.connection_mut().transaction()?;
        let id = if note.is_new() {
            tx.execute(
                "INSERT INTO notes (title, body, background_color, background_image_path)
                 VALUES (?, ?, ?, ?)",
                rusqlite::params![
                    note.title,
                    note.body,
                    note.background_color,
                    note.background_image_path,
                ],
            )?;
            tx.last_insert_rowid()
        } else {
            tx.execute(
                "INSERT OR REPLACE INTO notes (id, title, body, background_color, background_image_path)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    note.id,
                    note.title,
                    note.body,
                    note.background_color,
                    note.background_image_path,
                ],
            )?;
            note.id
        };
        let notes = query_all(&tx)?;
        tx.commit()?;

        log::info!("stored note {id}");
        self.publish(notes);
        Ok(id)
    }

    /// Replaces the row whose id matches `note.id`.
    ///
    /// # Errors
    ///
    /// [`TintnotesError::NoteNotFound`] when no such row exists; the table is
    /// left untouched and nothing is published.
    pub fn update(&self, note: &Note) -> Result<()> {
        HexColor::parse(&note.background_color)?;
        let mut storage = self.lock()?;

        let tx = storage.connection_mut().transaction()?;
        let changed = tx.execute(
            "UPDATE notes SET title = ?, body = ?, background_color = ?, background_image_path = ?
             WHERE id = ?",
            rusqlite::params![
                note.title,
                note.body,
                note.background_color,
                note.background_image_path,
                note.id,
            ],
        )?;
        if changed == 0 {
            return Err(TintnotesError::NoteNotFound(note.id));
        }
        let notes = query_all(&tx)?;
        tx.commit()?;

        log::info!("updated note {}", note.id);
        self.publish(notes);
        Ok(())
    }

    /// Removes the row whose id matches `note.id`. Deleting a missing row is a no-op.
    pub fn delete(&self, note: &Note) -> Result<()> {
        let mut storage = self.lock()?;

        let tx = storage.connection_mut().transaction()?;
        let removed = tx.execute("DELETE FROM notes WHERE id = ?", [note.id])?;
        if removed == 0 {
            log::debug!("delete of note {} skipped: not stored", note.id);
            return Ok(());
        }
        let notes = query_all(&tx)?;
        tx.commit()?;

        log::info!("deleted note {}", note.id);
        self.publish(notes);
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<Note> {
        let storage = self.lock()?;
        storage
            .connection()
            .query_row(
                "SELECT id, title, body, background_color, background_image_path
                 FROM notes WHERE id = ?",
                [id],
                note_from_row,
            )
            .optional()?
            .ok_or(TintnotesError::NoteNotFound(id))
    }

    /// One-shot read of every note, newest id first.
    pub fn list_all(&self) -> Result<Vec<Note>> {
        let storage = self.lock()?;
        query_all(storage.connection())
    }

    /// Subscribes to the live view. The receiver already holds the current
    /// snapshot and sees every snapshot published after each committed write.
    pub fn observe_all(&self) -> NotesReceiver {
        self.notes_tx.subscribe()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Storage>> {
        self.storage
            .lock()
            .map_err(|_| TintnotesError::Worker("note store lock poisoned".to_string()))
    }

    // Snapshot is read inside the transaction, so a failed read rolls the write back.
    // Called with the lock held so snapshots go out in commit order.
    fn publish(&self, notes: Vec<Note>) {
        log::debug!(
            "publishing {} notes to {} subscribers",
            notes.len(),
            self.notes_tx.receiver_count()
        );
        self.notes_tx.send_replace(Arc::new(notes));
    }
}

fn query_all(conn: &Connection) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(SELECT_ALL)?;
    let notes = stmt
        .query_map([], note_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(notes)
}

fn note_from_row(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        background_color: row.get(3)?,
        background_image_path: row.get(4)?,
    })
}
