//! Converter trait and the ordered pipeline.

use proteus_core::Resource;
use std::sync::Arc;

/// Classification of a converter, used for configuration-time checks.
///
/// The pipeline itself treats all converters identically; the assembly layer
/// uses the kind to reject conflicting key-casing registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterKind {
    /// General value or structure transformation.
    Transform,
    /// Key renaming by naming convention; at most one may be registered.
    KeyCasing,
}

/// A transformation over a resource's data tree.
///
/// Converters are stateless and idempotent. They consume the resource and
/// return the transformed tree; callers must treat the input as consumed
/// once passed in.
///
/// # Invariants
///
/// - Converters run in registration order; a converter must not assume it
///   runs first or last.
/// - A converter must not skip itself conditionally; if it should not apply
///   to a deployment, it should not be registered.
pub trait Converter: Send + Sync + 'static {
    /// Unique name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Converter classification. Defaults to [`ConverterKind::Transform`].
    fn kind(&self) -> ConverterKind {
        ConverterKind::Transform
    }

    /// Transforms the resource tree.
    fn convert(&self, resource: Resource) -> Resource;
}

/// Ordered sequence of converters, applied in registration order.
///
/// Registration is append-only with no de-duplication: registering the same
/// converter twice applies it twice, which permits deliberate repeated
/// passes. The pipeline is populated at start-up and treated as read-only
/// afterwards.
///
/// # Example
///
/// ```
/// use proteus_convert::{ConverterPipeline, DateTimeConverter, SnakeCaseConverter};
/// use proteus_core::{Resource, Value};
///
/// let mut pipeline = ConverterPipeline::new();
/// pipeline.add_converter(DateTimeConverter::default());
/// pipeline.add_converter(SnakeCaseConverter);
///
/// let mut resource = Resource::new();
/// resource.insert("userName", Value::from("ada"));
/// let converted = pipeline.convert(resource);
/// assert!(converted.contains_key("user_name"));
/// ```
#[derive(Default)]
pub struct ConverterPipeline {
    converters: Vec<Arc<dyn Converter>>,
}

impl ConverterPipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a converter to the ordered sequence.
    pub fn add_converter<C: Converter>(&mut self, converter: C) {
        self.add_shared(Arc::new(converter));
    }

    /// Appends an already-shared converter.
    pub fn add_shared(&mut self, converter: Arc<dyn Converter>) {
        tracing::debug!(converter = converter.name(), "registering converter");
        self.converters.push(converter);
    }

    /// Applies every registered converter, strictly in registration order,
    /// each consuming the previous output.
    #[must_use]
    pub fn convert(&self, resource: Resource) -> Resource {
        self.converters
            .iter()
            .fold(resource, |acc, converter| converter.convert(acc))
    }

    /// Number of registered converters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns `true` if no converters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Names of the registered converters, in application order.
    #[must_use]
    pub fn converter_names(&self) -> Vec<&'static str> {
        self.converters.iter().map(|c| c.name()).collect()
    }
}

impl std::fmt::Debug for ConverterPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterPipeline")
            .field("converters", &self.converter_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proteus_core::Value;

    /// Appends its tag to a `trace` field, so application order is observable.
    struct TracingConverter {
        tag: &'static str,
    }

    impl Converter for TracingConverter {
        fn name(&self) -> &'static str {
            "tracing"
        }

        fn convert(&self, mut resource: Resource) -> Resource {
            let trace = match resource.get("trace") {
                Some(Value::String(s)) => format!("{s}{}", self.tag),
                _ => self.tag.to_string(),
            };
            resource.insert("trace", Value::String(trace));
            resource
        }
    }

    #[test]
    fn test_converters_apply_in_registration_order() {
        let mut pipeline = ConverterPipeline::new();
        pipeline.add_converter(TracingConverter { tag: "a" });
        pipeline.add_converter(TracingConverter { tag: "b" });
        pipeline.add_converter(TracingConverter { tag: "c" });

        let converted = pipeline.convert(Resource::new());
        assert_eq!(
            converted.get("trace"),
            Some(&Value::String("abc".to_string()))
        );
    }

    #[test]
    fn test_double_registration_applies_twice() {
        let mut pipeline = ConverterPipeline::new();
        let shared: Arc<dyn Converter> = Arc::new(TracingConverter { tag: "x" });
        pipeline.add_shared(shared.clone());
        pipeline.add_shared(shared);

        let converted = pipeline.convert(Resource::new());
        assert_eq!(
            converted.get("trace"),
            Some(&Value::String("xx".to_string()))
        );
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = ConverterPipeline::new();
        let mut resource = Resource::new();
        resource.insert("k", Value::Int(1));

        let converted = pipeline.convert(resource.clone());
        assert_eq!(converted, resource);
    }
}
