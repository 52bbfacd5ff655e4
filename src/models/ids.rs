//! Newtype wrapper for transaction identifiers.
//!
//! The backend assigns row ids sequentially; wrapping them keeps them from
//! being mixed up with amounts or counts at compile time.

use serde::{Deserialize, Serialize};

/// Unique identifier of a stored transaction (backend row id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// Creates a new identifier from the given value.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner value.
    #[inline]
    #[must_use]
    pub const fn as_inner(&self) -> &i64 {
        &self.0
    }

    /// Consumes the wrapper and returns the inner value.
    #[inline]
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for TransactionId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for TransactionId {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}
