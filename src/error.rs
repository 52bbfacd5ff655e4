//! Error types for the FinSmart client library.

/// All errors that can occur when using the FinSmart client.
#[derive(Debug, thiserror::Error)]
pub enum FinSmartError {
    /// The request never produced an HTTP response (network unreachable,
    /// connection refused, body read interrupted).
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("connectivity failure: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status and no parseable
    /// `detail` message.
    #[error("HTTP error, status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The server rejected the request with a `detail` message.
    #[error("{detail}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-supplied reason.
        detail: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export failed.
    #[error("csv export error: {0}")]
    Csv(#[from] csv::Error),

    /// The configured API base URL is not a valid absolute URL.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Settings storage backend failed.
    #[error("settings storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// A builder was finished without a required component.
    #[error("missing required component: {0}")]
    MissingComponent(&'static str),
}

impl FinSmartError {
    /// Returns the HTTP status code carried by the error, if any.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match *self {
            Self::Status { status } | Self::Rejected { status, .. } => Some(status),
            #[cfg(any(feature = "async", feature = "blocking"))]
            Self::Http(_) => None,
            Self::Serialization(_)
            | Self::Csv(_)
            | Self::InvalidBaseUrl(_)
            | Self::Storage(_)
            | Self::MissingComponent(_) => None,
        }
    }

    /// Returns the server-supplied detail message, if the server sent one.
    #[inline]
    #[must_use]
    #[allow(clippy::ref_patterns, reason = "borrowing the detail out of &self")]
    pub fn detail(&self) -> Option<&str> {
        match *self {
            Self::Rejected { ref detail, .. } => Some(detail),
            #[cfg(any(feature = "async", feature = "blocking"))]
            Self::Http(_) => None,
            Self::Status { .. }
            | Self::Serialization(_)
            | Self::Csv(_)
            | Self::InvalidBaseUrl(_)
            | Self::Storage(_)
            | Self::MissingComponent(_) => None,
        }
    }

    /// Returns `true` for failures that mean "the backend could not be
    /// reached or did not explain itself", as opposed to an explicit
    /// server-side rejection.
    #[inline]
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        match *self {
            #[cfg(any(feature = "async", feature = "blocking"))]
            Self::Http(_) => true,
            Self::Status { .. } => true,
            Self::Rejected { .. }
            | Self::Serialization(_)
            | Self::Csv(_)
            | Self::InvalidBaseUrl(_)
            | Self::Storage(_)
            | Self::MissingComponent(_) => false,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FinSmartError>;
