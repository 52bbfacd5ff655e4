//! JSON-file settings backend.
//!
//! Stores the settings record as `{"finSmartSettings": {...}}` in a single
//! file under a configurable directory (default:
//! `$XDG_CONFIG_HOME/finsmart-rs/`).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::{SETTINGS_KEY, SettingsStore, lock_poison_error, storage_io_error};
use crate::error::{FinSmartError, Result};
use crate::models::DisplaySettings;

/// Application name used for the config directory.
const APP_NAME: &str = "finsmart-rs";

/// File holding the settings record.
const SETTINGS_FILE: &str = "finSmartSettings.json";

/// On-disk envelope keyed by [`SETTINGS_KEY`].
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    /// The stored record.
    #[serde(rename = "finSmartSettings")]
    settings: DisplaySettings,
}

/// File-backed settings store.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash never leaves a half-written record behind. An in-process
/// [`Mutex`] serializes concurrent access.
#[derive(Debug)]
pub struct FileSettingsStore {
    /// Directory containing the settings file.
    dir: PathBuf,
    /// Mutex serializing in-process access.
    lock: Mutex<()>,
}

impl FileSettingsStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    /// Returns the platform config directory for this application.
    ///
    /// On Linux: `$XDG_CONFIG_HOME/finsmart-rs/` (typically
    /// `~/.config/finsmart-rs/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be
    /// determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|config_path| config_path.join(APP_NAME))
            .ok_or_else(|| {
                FinSmartError::Storage("could not determine platform config directory".into())
            })
    }

    /// Returns the directory holding the settings file.
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the settings file path.
    fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Acquires the in-process lock.
    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|err| lock_poison_error(&err))
    }
}

impl SettingsStore for FileSettingsStore {
    #[inline]
    fn load(&self) -> Result<Option<DisplaySettings>> {
        let _guard = self.guard()?;
        match fs::read_to_string(self.path()) {
            Ok(contents) => {
                let envelope: Envelope = serde_json::from_str(&contents)?;
                Ok(Some(envelope.settings))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_io_error(err)),
        }
    }

    #[inline]
    fn save(&self, settings: &DisplaySettings) -> Result<()> {
        let _guard = self.guard()?;
        let envelope = Envelope {
            settings: settings.clone(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        let path = self.path();
        let tmp_path = self.dir.join(format!("{SETTINGS_FILE}.tmp"));
        fs::write(&tmp_path, json).map_err(storage_io_error)?;
        fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
        tracing::debug!(path = %path.display(), key = SETTINGS_KEY, "settings saved");
        Ok(())
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        let _guard = self.guard()?;
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_io_error(err)),
        }
    }
}
