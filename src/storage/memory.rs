//! In-memory settings backend.
//!
//! Provides [`InMemorySettingsStore`], a thread-safe store for tests and
//! for front-ends that do not persist anything between runs.

use std::sync::Mutex;

use super::{SettingsStore, lock_poison_error};
use crate::error::Result;
use crate::models::DisplaySettings;

/// Thread-safe in-memory settings store.
///
/// # Example
///
/// ```rust
/// use finsmart_rs::storage::{InMemorySettingsStore, SettingsStore};
///
/// let store = InMemorySettingsStore::new();
/// assert!(store.load().unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    /// Stored record, if any.
    inner: Mutex<Option<DisplaySettings>>,
}

impl InMemorySettingsStore {
    /// Creates an empty store.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `settings`.
    #[inline]
    #[must_use]
    pub const fn with_settings(settings: DisplaySettings) -> Self {
        Self {
            inner: Mutex::new(Some(settings)),
        }
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R>(&self, op: impl FnOnce(&mut Option<DisplaySettings>) -> R) -> Result<R> {
        let mut inner = self.inner.lock().map_err(|err| lock_poison_error(&err))?;
        Ok(op(&mut inner))
    }
}

impl SettingsStore for InMemorySettingsStore {
    #[inline]
    fn load(&self) -> Result<Option<DisplaySettings>> {
        self.with_lock(|stored| stored.clone())
    }

    #[inline]
    fn save(&self, settings: &DisplaySettings) -> Result<()> {
        self.with_lock(|stored| *stored = Some(settings.clone()))
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|stored| *stored = None)
    }
}
