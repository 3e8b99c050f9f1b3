//! Content-type-keyed mapper registry.

use crate::{DataUrlMapper, JsonMapper, Mapper, MappingError, QueryMapper, XmlMapper};
use indexmap::IndexMap;
use proteus_core::Resource;
use std::sync::Arc;

/// Maps a content-type key to exactly one [`Mapper`].
///
/// Populated once at start-up and treated as read-only for the remainder of
/// the process lifetime; resolution is per request. Keys are unique:
/// [`register`](Self::register) fails on a duplicate key, and
/// [`register_or_replace`](Self::register_or_replace) exists for embedders
/// that need the overwrite behavior of the reference system.
///
/// # Example
///
/// ```
/// use proteus_core::{Resource, Value};
/// use proteus_mapping::{content_type, MapperRegistry};
///
/// let registry = MapperRegistry::with_defaults();
/// let mut resource = Resource::new();
/// resource.insert("id", Value::Int(7));
///
/// let json = registry.encode(content_type::JSON, &resource).unwrap();
/// assert_eq!(json, r#"{"id":7}"#);
/// assert!(registry.resolve("yaml").is_err());
/// ```
#[derive(Default)]
pub struct MapperRegistry {
    mappers: IndexMap<String, Arc<dyn Mapper>>,
}

impl MapperRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the four built-in mappers bound to their
    /// canonical keys: [`crate::content_type::JSON`],
    /// [`crate::content_type::XML`], [`crate::content_type::QUERY`],
    /// [`crate::content_type::DATA_URL`].
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        // Fresh registry; the built-in keys cannot collide.
        let _ = registry.register(JsonMapper::new());
        let _ = registry.register(XmlMapper::new());
        let _ = registry.register(QueryMapper::new());
        let _ = registry.register(DataUrlMapper::new());
        registry
    }

    /// Binds a mapper under its own content-type key.
    ///
    /// # Errors
    ///
    /// Fails with [`MappingError::DuplicateContentType`] if the key is
    /// already bound.
    pub fn register<M: Mapper>(&mut self, mapper: M) -> Result<(), MappingError> {
        let key = mapper.content_type();
        self.register_as(key, Arc::new(mapper))
    }

    /// Binds an already-shared mapper under an explicit key.
    ///
    /// # Errors
    ///
    /// Fails with [`MappingError::DuplicateContentType`] if the key is
    /// already bound.
    pub fn register_as(
        &mut self,
        content_type: impl Into<String>,
        mapper: Arc<dyn Mapper>,
    ) -> Result<(), MappingError> {
        let key = content_type.into();
        if self.mappers.contains_key(&key) {
            return Err(MappingError::duplicate(key));
        }
        tracing::debug!(content_type = %key, "registering mapper");
        self.mappers.insert(key, mapper);
        Ok(())
    }

    /// Binds a mapper, silently replacing any existing binding.
    ///
    /// Last write wins; kept for compatibility with the reference system's
    /// overwrite semantics.
    pub fn register_or_replace(
        &mut self,
        content_type: impl Into<String>,
        mapper: Arc<dyn Mapper>,
    ) {
        self.mappers.insert(content_type.into(), mapper);
    }

    /// Resolves the mapper for a content type.
    ///
    /// # Errors
    ///
    /// Fails with [`MappingError::UnsupportedFormat`] when the content type
    /// has no binding.
    pub fn resolve(&self, content_type: &str) -> Result<&Arc<dyn Mapper>, MappingError> {
        self.mappers.get(content_type).ok_or_else(|| {
            tracing::debug!(content_type, "mapper resolution miss");
            MappingError::unsupported(content_type)
        })
    }

    /// Encodes a resource with the mapper bound to `content_type`.
    pub fn encode(&self, content_type: &str, resource: &Resource) -> Result<String, MappingError> {
        self.resolve(content_type)?.encode(resource)
    }

    /// Decodes input with the mapper bound to `content_type`.
    pub fn decode(&self, content_type: &str, input: &str) -> Result<Resource, MappingError> {
        self.resolve(content_type)?.decode(input)
    }

    /// The registered content-type keys, in registration order.
    #[must_use]
    pub fn content_types(&self) -> Vec<&str> {
        self.mappers.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperRegistry")
            .field("content_types", &self.content_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_type;
    use proteus_core::Value;

    #[test]
    fn test_defaults_register_all_four() {
        let registry = MapperRegistry::with_defaults();
        assert_eq!(
            registry.content_types(),
            vec![
                content_type::JSON,
                content_type::XML,
                content_type::QUERY,
                content_type::DATA_URL,
            ]
        );
    }

    #[test]
    fn test_resolve_unknown_is_unsupported_format() {
        let registry = MapperRegistry::with_defaults();
        let err = registry.resolve("unknown").err().unwrap();
        assert!(matches!(err, MappingError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = MapperRegistry::new();
        registry.register(JsonMapper::new()).unwrap();
        let err = registry.register(JsonMapper::new()).unwrap_err();
        assert!(matches!(err, MappingError::DuplicateContentType { .. }));
    }

    #[test]
    fn test_register_or_replace_overwrites() {
        let mut registry = MapperRegistry::new();
        registry.register(JsonMapper::new()).unwrap();
        registry.register_or_replace(content_type::JSON, Arc::new(JsonMapper::pretty()));

        let mut resource = Resource::new();
        resource.insert("a", Value::Int(1));
        let encoded = registry.encode(content_type::JSON, &resource).unwrap();
        assert!(encoded.contains('\n'), "pretty mapper should have won");
    }

    #[test]
    fn test_encode_decode_delegate() {
        let registry = MapperRegistry::with_defaults();
        let mut resource = Resource::new();
        resource.insert("name", Value::from("ada"));

        let encoded = registry.encode(content_type::JSON, &resource).unwrap();
        let decoded = registry.decode(content_type::JSON, &encoded).unwrap();
        assert_eq!(decoded, resource);
    }
}
