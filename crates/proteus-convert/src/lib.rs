//! # Proteus Convert
//!
//! Ordered, extensible converter pipeline for [`Resource`](proteus_core::Resource)
//! trees.
//!
//! Converters are registered once at configuration time and applied strictly
//! in registration order on every conversion. Conditional inclusion is a
//! configuration-time decision (choosing *which* converters to register),
//! never a runtime one: the pipeline itself applies every registered
//! converter, every time.
//!
//! Built-in converters:
//!
//! - [`ObjectConverter`] - normalizes object-like sequences into lists
//! - [`DateTimeConverter`] - formats date/time leaves with one configured format
//! - [`SnakeCaseConverter`] / [`CamelCaseConverter`] / [`PascalCaseConverter`] -
//!   mutually exclusive key renaming, selected via [`KeyConvention`]

#![doc(html_root_url = "https://docs.rs/proteus-convert/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod casing;
mod converter;
mod datetime;
mod object;

pub use casing::{
    CamelCaseConverter, KeyConvention, PascalCaseConverter, SnakeCaseConverter, to_camel_case,
    to_pascal_case, to_snake_case,
};
pub use converter::{Converter, ConverterKind, ConverterPipeline};
pub use datetime::{DateTimeConverter, DEFAULT_TIME_FORMAT};
pub use object::ObjectConverter;
