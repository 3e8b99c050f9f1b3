//! Error classification for Proteus.
//!
//! Per-request failures (unknown format, malformed payload, authentication
//! denial) are recovered at the pipeline boundary and reported as a
//! [`ProteusError`] carrying an [`ErrorKind`]; only configuration-time
//! errors are fatal to the embedding application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`ProteusError`].
pub type ProteusResult<T> = Result<T, ProteusError>;

/// Machine-readable classification of a Proteus failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No mapper is registered for the requested content type.
    UnsupportedFormat,
    /// A codec could not parse its input.
    MalformedInput,
    /// Authentication credentials were absent.
    MissingCredentials,
    /// A request signature did not match.
    InvalidSignature,
    /// The request timestamp fell outside the allowed window.
    Expired,
    /// The claimed client identity is not known.
    UnknownClient,
    /// Invalid configuration; fatal at start-up.
    Configuration,
    /// Internal failure (cache I/O, serialization of internal state).
    Internal,
}

impl ErrorKind {
    /// Returns `true` for kinds that indicate a client mistake, as opposed
    /// to a server-side or configuration fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat
                | Self::MalformedInput
                | Self::MissingCredentials
                | Self::InvalidSignature
                | Self::Expired
                | Self::UnknownClient
        )
    }
}

/// Structured error surfaced at the Proteus boundary.
///
/// # Example
///
/// ```
/// use proteus_core::{ErrorKind, ProteusError};
///
/// let err = ProteusError::new(ErrorKind::MalformedInput, "unterminated bracket");
/// assert_eq!(err.kind(), ErrorKind::MalformedInput);
/// assert!(err.kind().is_client_error());
/// ```
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ProteusError {
    kind: ErrorKind,
    message: String,
}

impl ProteusError {
    /// Creates an error with the given kind and message.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
