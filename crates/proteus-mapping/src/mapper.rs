//! The mapper contract and the stable content-type keys.

use crate::MappingError;
use proteus_core::Resource;

/// Stable content-type keys consumed by callers selecting a mapper.
pub mod content_type {
    /// JSON documents.
    pub const JSON: &str = "json";
    /// XML documents.
    pub const XML: &str = "xml";
    /// URL query strings with bracket-notation nesting.
    pub const QUERY: &str = "query";
    /// RFC 2397 data URLs carrying a base64 JSON payload.
    pub const DATA_URL: &str = "data-url";
}

/// A stateless codec bound to exactly one content-type key.
///
/// Implementations must be format-correct round-trip:
/// `decode(encode(r)) == r` for any resource representable in the format.
/// Lossy formats (the query string) are exempt from the full property but
/// must preserve scalar pairs and one level of nesting under a documented
/// convention.
pub trait Mapper: Send + Sync + 'static {
    /// The content-type key this mapper is bound to.
    fn content_type(&self) -> &'static str;

    /// Serializes a resource to its wire representation.
    fn encode(&self, resource: &Resource) -> Result<String, MappingError>;

    /// Parses a wire representation into a resource.
    ///
    /// Malformed input fails with [`MappingError::MalformedInput`], never
    /// with an unrelated low-level parse failure.
    fn decode(&self, input: &str) -> Result<Resource, MappingError>;
}
