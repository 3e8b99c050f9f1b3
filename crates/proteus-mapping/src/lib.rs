//! # Proteus Mapping
//!
//! Wire-format codecs and the content-type-keyed mapper registry.
//!
//! A [`Mapper`] converts between the canonical [`Resource`](proteus_core::Resource)
//! tree and exactly one wire format. The [`MapperRegistry`] binds mappers to
//! stable content-type keys (see [`content_type`]) at start-up and resolves
//! them per request.
//!
//! Built-in mappers:
//!
//! - [`JsonMapper`] - full round-trip JSON
//! - [`XmlMapper`] - full round-trip XML with typed scalar attributes
//! - [`QueryMapper`] - lossy query strings with bracket-notation nesting
//! - [`DataUrlMapper`] - RFC 2397 base64 data URLs over JSON

#![doc(html_root_url = "https://docs.rs/proteus-mapping/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod data_url;
mod error;
mod json;
mod mapper;
mod query;
mod registry;
mod xml;

pub use data_url::DataUrlMapper;
pub use error::MappingError;
pub use json::JsonMapper;
pub use mapper::{content_type, Mapper};
pub use query::QueryMapper;
pub use registry::MapperRegistry;
pub use xml::XmlMapper;
