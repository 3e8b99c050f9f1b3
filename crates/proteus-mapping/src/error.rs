//! Mapping error types.

use proteus_core::{ErrorKind, ProteusError};
use thiserror::Error;

/// Errors raised by the mapper registry and the format codecs.
#[derive(Error, Debug)]
pub enum MappingError {
    /// No mapper is registered for the requested content type.
    ///
    /// Surfaced to the caller as a client error; never fatal to the process.
    #[error("no mapper registered for content type '{content_type}'")]
    UnsupportedFormat {
        /// The content type that had no binding.
        content_type: String,
    },

    /// A codec could not parse its input.
    #[error("malformed {format} input: {message}")]
    MalformedInput {
        /// The wire format that rejected the input.
        format: &'static str,
        /// What the codec objected to.
        message: String,
    },

    /// A content type was registered twice.
    ///
    /// Re-registration is a configuration error; use
    /// [`MapperRegistry::register_or_replace`](crate::MapperRegistry::register_or_replace)
    /// when overwriting is intended.
    #[error("content type '{content_type}' is already registered")]
    DuplicateContentType {
        /// The content type registered twice.
        content_type: String,
    },
}

impl MappingError {
    /// Creates an [`MappingError::UnsupportedFormat`] error.
    #[must_use]
    pub fn unsupported(content_type: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            content_type: content_type.into(),
        }
    }

    /// Creates a [`MappingError::MalformedInput`] error.
    #[must_use]
    pub fn malformed(format: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            format,
            message: message.into(),
        }
    }

    /// Creates a [`MappingError::DuplicateContentType`] error.
    #[must_use]
    pub fn duplicate(content_type: impl Into<String>) -> Self {
        Self::DuplicateContentType {
            content_type: content_type.into(),
        }
    }
}

impl From<MappingError> for ProteusError {
    fn from(err: MappingError) -> Self {
        let kind = match &err {
            MappingError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            MappingError::MalformedInput { .. } => ErrorKind::MalformedInput,
            MappingError::DuplicateContentType { .. } => ErrorKind::Configuration,
        };
        Self::new(kind, err.to_string())
    }
}
