//! Error types for route building.

use proteus_core::{ErrorKind, ProteusError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for route building operations.
pub type RouteResult<T> = Result<T, RouteError>;

/// Errors that can occur while discovering presenters or building routes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RouteError {
    /// Presenter discovery could not read the source tree.
    #[error("presenter discovery failed under {root}: {source}")]
    Discovery {
        /// The presenter root that was being scanned.
        root: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A cached route table could not be serialized or deserialized.
    #[error("route table serialization failed: {0}")]
    Serialization(String),

    /// The cache collaborator failed.
    #[error("route cache error: {0}")]
    Cache(String),
}

impl RouteError {
    /// Constructs a [`RouteError::Discovery`] for the given root.
    #[must_use]
    pub fn discovery(root: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Discovery {
            root: root.into(),
            source,
        }
    }
}

impl From<RouteError> for ProteusError {
    fn from(err: RouteError) -> Self {
        Self::new(ErrorKind::Internal, err.to_string())
    }
}
