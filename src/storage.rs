//! Device-local persistence for display settings.
//!
//! Settings are the only client-side persisted record: read at startup,
//! written only on explicit save, and erasable as a whole by "clear cache".
//! Server data is never persisted here.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileSettingsStore;
pub use memory::InMemorySettingsStore;

use crate::error::Result;
use crate::models::DisplaySettings;

/// Key under which the settings record is stored.
pub const SETTINGS_KEY: &str = "finSmartSettings";

/// Backend that persists the settings record.
///
/// All methods take `&self`; implementations use interior mutability for
/// thread-safe mutation.
pub trait SettingsStore: core::fmt::Debug + Send + Sync {
    /// Returns the stored settings, or `Ok(None)` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or the record does
    /// not decode.
    fn load(&self) -> Result<Option<DisplaySettings>>;

    /// Replaces the stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&self, settings: &DisplaySettings) -> Result<()>;

    /// Erases the stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn clear(&self) -> Result<()>;
}

/// Wraps an I/O error into a [`crate::error::FinSmartError::Storage`].
#[cfg(feature = "storage-file")]
fn storage_io_error(err: std::io::Error) -> crate::error::FinSmartError {
    crate::error::FinSmartError::Storage(Box::new(err))
}

/// Wraps a mutex poison error into a [`crate::error::FinSmartError::Storage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> crate::error::FinSmartError {
    crate::error::FinSmartError::Storage(err.to_string().into())
}
