//! App-private cache for note background images.
//!
//! Picked or captured images are written to `<cache>/images/<unix-millis>.png`
//! and notes store the resulting absolute path. Failures here never abort an
//! edit: callers drop the image and report the error through the status line.

use crate::{Result, TintnotesError};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const IMAGES_DIR: &str = "images";

#[derive(Debug, Clone)]
pub struct ImageCache {
    dir: PathBuf,
}

impl ImageCache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Self {
        Self {
            dir: cache_dir.as_ref().join(IMAGES_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` to a new timestamped file and returns its absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`TintnotesError::ImagePersist`] if the folder or file cannot be written.
    pub fn save_bytes(&self, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| persist_error(&self.dir, e))?;

        let mut stamp = chrono::Utc::now().timestamp_millis();
        let (path, mut file) = loop {
            let path = self.dir.join(format!("{stamp}.png"));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => break (path, file),
                // Two saves within the same millisecond.
                Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp += 1,
                Err(e) => return Err(persist_error(&path, e)),
            }
        };

        file.write_all(bytes)
            .and_then(|()| file.flush())
            .map_err(|e| persist_error(&path, e))?;

        let path = fs::canonicalize(&path).map_err(|e| persist_error(&path, e))?;
        log::info!("saved background image {}", path.display());
        Ok(path)
    }

    /// Copies an image chosen from elsewhere on disk into the cache.
    pub fn copy_from<P: AsRef<Path>>(&self, source: P) -> Result<PathBuf> {
        let bytes = fs::read(source.as_ref()).map_err(|e| persist_error(source.as_ref(), e))?;
        self.save_bytes(&bytes)
    }
}

fn persist_error(path: &Path, e: std::io::Error) -> TintnotesError {
    TintnotesError::ImagePersist(format!("{}: {e}", path.display()))
}
