//! Application settings persistence for Tintnotes.
//!
//! Stores where the notes database and image cache live, plus the background
//! color new notes start with, in a JSON file at an OS-appropriate location.

use crate::color::{HexColor, DEFAULT_BACKGROUND};
use crate::{ImageCache, NoteStore, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// SQLite file holding the notes table.
    pub database_path: String,
    /// App-private cache; background images go in its `images/` folder.
    pub cache_directory: String,
    /// Background color preselected for a new note.
    pub default_background: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: data_directory()
                .join("notes.db")
                .to_string_lossy()
                .to_string(),
            cache_directory: cache_directory().to_string_lossy().to_string(),
            default_background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl AppSettings {
    pub fn open_store(&self) -> Result<NoteStore> {
        NoteStore::open(&self.database_path)
    }

    pub fn image_cache(&self) -> ImageCache {
        ImageCache::new(&self.cache_directory)
    }

    /// The configured default background, or white if it is not `#RRGGBB`.
    pub fn resolved_background(&self) -> String {
        match HexColor::parse(&self.default_background) {
            Ok(color) => color.to_hex(),
            Err(e) => {
                log::warn!("ignoring default background: {e}");
                DEFAULT_BACKGROUND.to_string()
            }
        }
    }
}

/// Returns the path to the settings JSON file.
///
/// - Linux: `~/.config/tintnotes/settings.json`
/// - macOS: `~/Library/Application Support/Tintnotes/settings.json`
/// - Windows: `%APPDATA%/Tintnotes/settings.json`
pub fn settings_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app_dir_name())
        .join("settings.json")
}

fn data_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app_dir_name())
}

fn cache_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app_dir_name())
}

fn app_dir_name() -> &'static str {
    if cfg!(target_os = "linux") {
        "tintnotes"
    } else {
        "Tintnotes"
    }
}

/// Loads settings from disk; returns defaults if the file is missing or corrupt.
pub fn load_settings() -> AppSettings {
    load_settings_from(settings_file_path())
}

pub fn load_settings_from<P: AsRef<Path>>(path: P) -> AppSettings {
    match fs::read_to_string(path.as_ref()) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("settings file {} is corrupt: {e}", path.as_ref().display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to disk, creating parent directories as needed.
pub fn save_settings(settings: &AppSettings) -> Result<()> {
    save_settings_to(settings, settings_file_path())
}

pub fn save_settings_to<P: AsRef<Path>>(settings: &AppSettings, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Note;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_through_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("settings.json");
        let settings = AppSettings {
            database_path: "/data/notes.db".to_string(),
            cache_directory: "/cache".to_string(),
            default_background: "#FFCC80".to_string(),
        };

        save_settings_to(&settings, &path).unwrap();

        assert_eq!(load_settings_from(&path), settings);
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"databasePath\""));
    }

    #[test]
    fn test_missing_or_corrupt_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        assert_eq!(load_settings_from(&path), AppSettings::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, r##"{"defaultBackground": "#aed581"}"##).unwrap();

        let settings = load_settings_from(&path);

        assert_eq!(settings.resolved_background(), "#AED581");
        assert_eq!(settings.database_path, AppSettings::default().database_path);
    }

    #[test]
    fn test_invalid_default_background_falls_back_to_white() {
        let settings = AppSettings {
            default_background: "teal".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.resolved_background(), "#FFFFFF");
    }

    #[test]
    fn test_open_store_and_cache_from_settings() {
        let temp = TempDir::new().unwrap();
        let settings = AppSettings {
            database_path: temp.path().join("db").join("notes.db").to_string_lossy().to_string(),
            cache_directory: temp.path().join("cache").to_string_lossy().to_string(),
            default_background: DEFAULT_BACKGROUND.to_string(),
        };

        let store = settings.open_store().unwrap();
        store.insert(&Note::new("A", "b")).unwrap();
        assert_eq!(settings.open_store().unwrap().list_all().unwrap().len(), 1);

        assert_eq!(settings.image_cache().dir(), temp.path().join("cache").join("images"));
    }
}
