//! Main configuration types.

use crate::ConfigError;
use proteus_convert::{KeyConvention, DEFAULT_TIME_FORMAT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete Proteus configuration.
///
/// Consumed once at start-up during assembly and never re-read per request.
///
/// # Example
///
/// ```
/// use proteus_config::ProteusConfig;
///
/// let config = ProteusConfig::default();
/// assert_eq!(config.jsonp_key, "jsonp");
/// assert_eq!(config.security.request_timeout_secs, 300);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProteusConfig {
    /// Key-casing convention applied to outgoing resources.
    #[serde(default)]
    pub convention: KeyConvention,

    /// `chrono` format string for date/time leaves (default RFC 3339).
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Query parameter enabling JSONP wrapping.
    #[serde(default = "default_jsonp_key")]
    pub jsonp_key: String,

    /// Query parameter enabling pretty-printed output.
    #[serde(default = "default_pretty_print_key")]
    pub pretty_print_key: String,

    /// Route generation settings.
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Authentication settings.
    #[serde(default)]
    pub security: SecurityConfig,
}

/// Route generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutesConfig {
    /// Directory scanned for presenter sources. Route generation is skipped
    /// when unset.
    #[serde(default)]
    pub presenters_root: Option<PathBuf>,

    /// Module namespace inserted into generated patterns.
    #[serde(default)]
    pub module: Option<String>,

    /// URL prefix prepended to generated patterns.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Whether routes are generated from presenter discovery at all.
    #[serde(default = "default_true")]
    pub auto_generated: bool,

    /// Whether the diagnostics snapshot includes the route table.
    #[serde(default = "default_true")]
    pub panel: bool,
}

/// Authentication configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Shared key for request signing. Hash authentication is only
    /// assembled when set.
    #[serde(default)]
    pub private_key: Option<String>,

    /// Request-data field carrying the Unix timestamp.
    #[serde(default = "default_request_time_key")]
    pub request_time_key: String,

    /// Accepted timestamp window in seconds, applied in both directions.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: i64,

    /// Fail assembly when no OAuth2 token validator was supplied.
    #[serde(default)]
    pub require_oauth2: bool,
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_jsonp_key() -> String {
    "jsonp".to_string()
}

fn default_pretty_print_key() -> String {
    "pretty".to_string()
}

fn default_request_time_key() -> String {
    "timestamp".to_string()
}

const fn default_request_timeout() -> i64 {
    300
}

const fn default_true() -> bool {
    true
}

impl Default for ProteusConfig {
    fn default() -> Self {
        Self {
            convention: KeyConvention::default(),
            time_format: default_time_format(),
            jsonp_key: default_jsonp_key(),
            pretty_print_key: default_pretty_print_key(),
            routes: RoutesConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            presenters_root: None,
            module: None,
            prefix: None,
            auto_generated: true,
            panel: true,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            private_key: None,
            request_time_key: default_request_time_key(),
            request_timeout_secs: default_request_timeout(),
            require_oauth2: false,
        }
    }
}

impl ProteusConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if:
    /// - `time_format` is empty
    /// - `jsonp_key` or `pretty_print_key` is empty, or they collide
    /// - `security.request_time_key` is empty
    /// - `security.request_timeout_secs` is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_format.is_empty() {
            return Err(ConfigError::invalid_value("time_format", "must not be empty"));
        }
        if self.jsonp_key.is_empty() {
            return Err(ConfigError::invalid_value("jsonp_key", "must not be empty"));
        }
        if self.pretty_print_key.is_empty() {
            return Err(ConfigError::invalid_value(
                "pretty_print_key",
                "must not be empty",
            ));
        }
        if self.jsonp_key == self.pretty_print_key {
            return Err(ConfigError::invalid_value(
                "pretty_print_key",
                format!("collides with jsonp_key '{}'", self.jsonp_key),
            ));
        }
        if self.security.request_time_key.is_empty() {
            return Err(ConfigError::invalid_value(
                "security.request_time_key",
                "must not be empty",
            ));
        }
        if self.security.request_timeout_secs <= 0 {
            return Err(ConfigError::invalid_value(
                "security.request_timeout_secs",
                "must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let config = ProteusConfig::default();
        assert_eq!(config.convention, KeyConvention::None);
        assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
        assert_eq!(config.jsonp_key, "jsonp");
        assert_eq!(config.pretty_print_key, "pretty");
        assert!(config.routes.auto_generated);
        assert!(config.routes.panel);
        assert_eq!(config.security.request_time_key, "timestamp");
        assert_eq!(config.security.request_timeout_secs, 300);
        assert!(!config.security.require_oauth2);
    }

    #[test]
    fn test_colliding_query_keys_are_invalid() {
        let config = ProteusConfig {
            jsonp_key: "cb".to_string(),
            pretty_print_key: "cb".to_string(),
            ..ProteusConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_non_positive_timeout_is_invalid() {
        let mut config = ProteusConfig::default();
        config.security.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
