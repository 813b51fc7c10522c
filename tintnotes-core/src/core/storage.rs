//! SQLite connection ownership and schema setup for a Tintnotes database.

use crate::{Result, TintnotesError};
use rusqlite::Connection;
use std::path::Path;

pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Validate database structure
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='notes'",
            [],
            |row| row.get(0),
        )?;

        if table_count != 1 {
            return Err(TintnotesError::InvalidDatabase(
                "Not a valid Tintnotes database".to_string(),
            ));
        }

        // Migrate: databases from before photo backgrounds lack the image column
        let column_exists: bool = conn.query_row(
            "SELECT COUNT(*) FROM pragma_table_info('notes') WHERE name='background_image_path'",
            [],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;

        if !column_exists {
            log::info!("migrating notes table: adding background_image_path");
            conn.execute("ALTER TABLE notes ADD COLUMN background_image_path TEXT", [])?;
        }

        Ok(Self { conn })
    }

    /// Opens `path` if it holds a database, otherwise creates a fresh one there.
    /// An existing empty file counts as "no database yet".
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let has_content = std::fs::metadata(path.as_ref()).map_or(false, |meta| meta.len() > 0);
        if has_content {
            Self::open(path)
        } else {
            if let Some(parent) = path.as_ref().parent() {
                std::fs::create_dir_all(parent)?;
            }
            Self::create(path)
        }
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    fn columns(storage: &Storage) -> Vec<String> {
        storage
            .connection()
            .prepare("SELECT name FROM pragma_table_info('notes')")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_create_storage() {
        let temp = NamedTempFile::new().unwrap();
        let storage = Storage::create(temp.path()).unwrap();

        assert_eq!(
            columns(&storage),
            vec!["id", "title", "body", "background_color", "background_image_path"]
        );
    }

    #[test]
    fn test_open_existing_storage() {
        let temp = NamedTempFile::new().unwrap();

        {
            let storage = Storage::create(temp.path()).unwrap();
            storage
                .connection()
                .execute("INSERT INTO notes (title, body) VALUES ('a', 'b')", [])
                .unwrap();
        }

        let storage = Storage::open(temp.path()).unwrap();
        let count: i64 = storage
            .connection()
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_invalid_database() {
        let temp = NamedTempFile::new().unwrap();

        std::fs::write(temp.path(), "not a database").unwrap();

        let result = Storage::open(temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_open_database_without_notes_table() {
        let temp = NamedTempFile::new().unwrap();
        {
            let conn = Connection::open(temp.path()).unwrap();
            conn.execute("CREATE TABLE other (id INTEGER PRIMARY KEY)", []).unwrap();
        }

        assert!(matches!(
            Storage::open(temp.path()),
            Err(TintnotesError::InvalidDatabase(_))
        ));
    }

    #[test]
    fn test_migration_adds_image_column() {
        let temp = NamedTempFile::new().unwrap();

        {
            let conn = Connection::open(temp.path()).unwrap();
            conn.execute(
                "CREATE TABLE notes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    body TEXT NOT NULL,
                    background_color TEXT NOT NULL DEFAULT '#FFFFFF'
                )",
                [],
            )
            .unwrap();
        }

        let storage = Storage::open(temp.path()).unwrap();

        assert!(
            columns(&storage).contains(&"background_image_path".to_string()),
            "background_image_path column should exist after migration"
        );
    }

    #[test]
    fn test_open_or_create_initialises_empty_file() {
        let temp = NamedTempFile::new().unwrap();
        assert_eq!(std::fs::metadata(temp.path()).unwrap().len(), 0);

        let storage = Storage::open_or_create(temp.path()).unwrap();

        assert!(columns(&storage).contains(&"background_color".to_string()));
    }

    #[test]
    fn test_open_or_create_rejects_foreign_file() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "not a database").unwrap();

        assert!(Storage::open_or_create(temp.path()).is_err());
    }

    #[test]
    fn test_open_or_create_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("notes.db");

        Storage::open_or_create(&path).unwrap();
        assert!(path.exists());

        // Second call opens rather than recreates.
        Storage::open_or_create(&path).unwrap();
    }
}
