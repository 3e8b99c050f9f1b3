//! # Proteus Core
//!
//! Core types for the Proteus representation pipeline.
//!
//! This crate provides the foundational types used throughout Proteus:
//!
//! - [`Resource`] - Canonical, ordered in-memory representation of payload data
//! - [`Value`] - Leaf and container values a resource may hold
//! - [`ApiRequest`] - Framework-agnostic view of an inbound request
//! - [`ProteusError`] - Standard error classification

#![doc(html_root_url = "https://docs.rs/proteus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod request;
mod resource;

pub use error::{ErrorKind, ProteusError, ProteusResult};
pub use request::ApiRequest;
pub use resource::{Resource, Value};
