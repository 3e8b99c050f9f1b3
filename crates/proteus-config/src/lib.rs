//! Typed configuration for the Proteus representation pipeline.
//!
//! Configuration is consumed once at assembly time and never re-read per
//! request. Values load from TOML with per-field defaults and strict
//! rejection of unknown fields.
//!
//! # Example
//!
//! ```
//! use proteus_config::ProteusConfig;
//! use proteus_convert::KeyConvention;
//!
//! let config = ProteusConfig::from_toml(
//!     r#"
//!     convention = "snake_case"
//!
//!     [security]
//!     private_key = "s3cret"
//!     "#,
//! )?;
//! assert_eq!(config.convention, KeyConvention::SnakeCase);
//! # Ok::<(), proteus_config::ConfigError>(())
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! convention = "camelCase"
//! time_format = "%+"
//! jsonp_key = "jsonp"
//! pretty_print_key = "pretty"
//!
//! [routes]
//! presenters_root = "src/presenters"
//! module = "v1"
//! prefix = "api"
//! auto_generated = true
//! panel = true
//!
//! [security]
//! private_key = "shared-secret"
//! request_time_key = "timestamp"
//! request_timeout_secs = 300
//! require_oauth2 = false
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod loader;

pub use config::{ProteusConfig, RoutesConfig, SecurityConfig};
pub use error::ConfigError;
