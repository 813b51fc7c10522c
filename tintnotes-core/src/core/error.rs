//! Error types for the Tintnotes core library.

use thiserror::Error;

/// All errors that can occur within the Tintnotes core library.
#[derive(Debug, Error)]
pub enum TintnotesError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The opened file is not a valid Tintnotes database.
    #[error("Invalid database: {0}")]
    InvalidDatabase(String),

    /// A note ID was requested that does not exist in the database.
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    /// A background color was not in `#RRGGBB` form.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A picked or captured image could not be saved to the image cache.
    #[error("Image could not be saved: {0}")]
    ImagePersist(String),

    /// Settings could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The background worker running a store call failed, or the store lock was poisoned.
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Convenience alias that pins the error type to [`TintnotesError`].
pub type Result<T> = std::result::Result<T, TintnotesError>;

impl TintnotesError {
    /// Returns a short, human-readable message suitable for the status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::Io(e) => format!("File error: {e}"),
            Self::InvalidDatabase(_) => "Could not open notes database".to_string(),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::InvalidColor(c) => format!("Unsupported color: {c}"),
            Self::ImagePersist(_) => "Error saving the image".to_string(),
            Self::Json(e) => format!("Settings format error: {e}"),
            Self::Worker(_) => "Operation was interrupted".to_string(),
        }
    }

    /// True for durable-storage failures, which abort the attempted operation.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Io(_) | Self::InvalidDatabase(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let e = TintnotesError::NoteNotFound(7);
        assert_eq!(e.to_string(), "Note not found: 7");
        assert_eq!(e.user_message(), "Note no longer exists");
        assert!(!e.is_storage_error());
    }

    #[test]
    fn test_io_is_storage_error() {
        let e = TintnotesError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(e.is_storage_error());
        assert!(e.user_message().contains("disk full"));
    }

    #[test]
    fn test_image_persist_is_recoverable() {
        let e = TintnotesError::ImagePersist("no space".to_string());
        assert!(!e.is_storage_error());
        assert_eq!(e.user_message(), "Error saving the image");
    }
}
