//! Configuration loading.

use crate::{ConfigError, ProteusConfig};
use std::path::Path;

impl ProteusConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Missing sections and fields fall back to their defaults; unknown
    /// fields are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing or unreadable, the
    /// TOML fails to parse, or validation fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }
}
