//! # Proteus
//!
//! **Pluggable resource representation pipeline for REST services**
//!
//! Proteus takes a framework-agnostic resource tree through three stages:
//!
//! - **Convert** - an ordered converter pipeline normalizes the tree
//!   (object shapes, date/time formatting, key casing)
//! - **Map** - a content-type-keyed registry serializes it to JSON, XML,
//!   query-string or data-URL wire formats (and parses them back)
//! - **Authenticate** - a swappable authentication process chain validates
//!   inbound requests before business logic runs
//!
//! Route tables are generated from presenter discovery, behind a caching
//! decorator keyed on the source's modification signature.
//!
//! ## Quick Start
//!
//! ```
//! use proteus::{OutputFlags, Proteus};
//! use proteus_config::ProteusConfig;
//! use proteus_core::{Resource, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProteusConfig::from_toml("convention = \"camelCase\"")?;
//! let proteus = Proteus::builder(config).build()?;
//!
//! let mut resource = Resource::new();
//! resource.insert("user_name", Value::from("ada"));
//!
//! let body = proteus.render(resource, "json", &OutputFlags::default())?;
//! assert_eq!(body, r#"{"userName":"ada"}"#);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Request ──► AuthenticationContext ──► active AuthenticationProcess
//!                                        (null / secured chain)
//!
//! Resource ──► ConverterPipeline ──► MapperRegistry ──► wire format
//!              (object, datetime,     (json, xml,
//!               key casing)            query, data-url)
//! ```

#![doc(html_root_url = "https://docs.rs/proteus/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export component crates
pub use proteus_config as config;
pub use proteus_convert as convert;
pub use proteus_core as core;
pub use proteus_mapping as mapping;
pub use proteus_routes as routes;
pub use proteus_security as security;

mod builder;
mod diagnostics;
mod filter;

pub use builder::{BuildError, Proteus, ProteusBuilder};
pub use diagnostics::{AuthDiagnostics, DiagnosticsSnapshot};
pub use filter::{OutputFlags, RequestFilter};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::{BuildError, OutputFlags, Proteus, ProteusBuilder};
    pub use proteus_config::ProteusConfig;
    pub use proteus_convert::{Converter, ConverterPipeline, KeyConvention};
    pub use proteus_core::{ApiRequest, ErrorKind, ProteusError, ProteusResult, Resource, Value};
    pub use proteus_mapping::{content_type, Mapper, MapperRegistry};
    pub use proteus_routes::{RouteListFactory, RouteTable};
    pub use proteus_security::{AuthenticationContext, AuthenticationProcess};
}
