//! Authentication failure reasons.

use proteus_core::{ErrorKind, ProteusError};
use thiserror::Error;

/// Result type for authentication checks.
pub type AuthResult = Result<(), AuthError>;

/// Why an authentication process rejected a request.
///
/// Every variant is a per-request denial, never a process fault: callers
/// translate these into a denied result at the context boundary instead of
/// propagating them as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// A required credential field or header was absent.
    #[error("missing credentials: {what}")]
    MissingCredentials {
        /// Which credential was expected.
        what: String,
    },

    /// The supplied signature did not match the recomputed one.
    #[error("invalid request signature")]
    InvalidSignature,

    /// The request timestamp fell outside the accepted window.
    #[error("request expired: timestamp off by {off_by_secs}s (allowed {timeout_secs}s)")]
    Expired {
        /// Absolute distance between the request timestamp and now.
        off_by_secs: i64,
        /// The configured window, in seconds.
        timeout_secs: i64,
    },

    /// Credentials were presented but did not identify a known client.
    #[error("unknown client")]
    UnknownClient,
}

impl AuthError {
    /// Constructs a [`AuthError::MissingCredentials`] naming the absent field.
    #[must_use]
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingCredentials { what: what.into() }
    }

    /// The matching [`ErrorKind`] for surfacing through the shared taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials { .. } => ErrorKind::MissingCredentials,
            Self::InvalidSignature => ErrorKind::InvalidSignature,
            Self::Expired { .. } => ErrorKind::Expired,
            Self::UnknownClient => ErrorKind::UnknownClient,
        }
    }
}

impl From<AuthError> for ProteusError {
    fn from(err: AuthError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}
