//! Object-normalizing converter.

use crate::{Converter, ConverterKind};
use proteus_core::{Resource, Value};

/// Normalizes object-like sequence values into the canonical resource shape.
///
/// Data decoded from formats without a native list type (query strings,
/// loosely typed upstream payloads) often arrives as a nested resource keyed
/// by a dense decimal sequence: `{"0": ..., "1": ..., "2": ...}`. This
/// converter rewrites every such nested resource into a [`Value::List`],
/// recursively, so downstream converters and mappers see one canonical
/// shape for sequence data.
///
/// The top-level resource is never rewritten; the canonical root is always
/// a mapping.
///
/// # Example
///
/// ```
/// use proteus_convert::{Converter, ObjectConverter};
/// use proteus_core::{Resource, Value};
///
/// let mut tags = Resource::new();
/// tags.insert("0", Value::from("rust"));
/// tags.insert("1", Value::from("rest"));
///
/// let mut resource = Resource::new();
/// resource.insert("tags", tags);
///
/// let converted = ObjectConverter.convert(resource);
/// assert_eq!(
///     converted.get("tags"),
///     Some(&Value::List(vec![Value::from("rust"), Value::from("rest")]))
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectConverter;

impl ObjectConverter {
    fn normalize_value(value: Value) -> Value {
        match value {
            Value::Resource(resource) => {
                let normalized: Resource = resource
                    .into_iter()
                    .map(|(k, v)| (k, Self::normalize_value(v)))
                    .collect();
                if Self::is_dense_sequence(&normalized) {
                    Value::List(normalized.into_iter().map(|(_, v)| v).collect())
                } else {
                    Value::Resource(normalized)
                }
            }
            Value::List(items) => {
                Value::List(items.into_iter().map(Self::normalize_value).collect())
            }
            scalar => scalar,
        }
    }

    /// A resource is a dense sequence when its keys are exactly the decimal
    /// sequence `"0".."n-1"`, in order.
    fn is_dense_sequence(resource: &Resource) -> bool {
        !resource.is_empty()
            && resource
                .keys()
                .enumerate()
                .all(|(index, key)| key == index.to_string())
    }
}

impl Converter for ObjectConverter {
    fn name(&self) -> &'static str {
        "object"
    }

    fn kind(&self) -> ConverterKind {
        ConverterKind::Transform
    }

    fn convert(&self, resource: Resource) -> Resource {
        resource
            .into_iter()
            .map(|(k, v)| (k, Self::normalize_value(v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(values: &[&str]) -> Resource {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_dense_sequence_becomes_list() {
        let mut resource = Resource::new();
        resource.insert("items", dense(&["a", "b", "c"]));

        let converted = ObjectConverter.convert(resource);
        assert_eq!(
            converted.get("items"),
            Some(&Value::List(vec![
                Value::from("a"),
                Value::from("b"),
                Value::from("c"),
            ]))
        );
    }

    #[test]
    fn test_sparse_keys_stay_a_resource() {
        let mut sparse = Resource::new();
        sparse.insert("0", Value::from("a"));
        sparse.insert("2", Value::from("c"));

        let mut resource = Resource::new();
        resource.insert("items", sparse.clone());

        let converted = ObjectConverter.convert(resource);
        assert_eq!(converted.get("items"), Some(&Value::Resource(sparse)));
    }

    #[test]
    fn test_out_of_order_keys_stay_a_resource() {
        let mut shuffled = Resource::new();
        shuffled.insert("1", Value::from("b"));
        shuffled.insert("0", Value::from("a"));

        let mut resource = Resource::new();
        resource.insert("items", shuffled.clone());

        let converted = ObjectConverter.convert(resource);
        assert_eq!(converted.get("items"), Some(&Value::Resource(shuffled)));
    }

    #[test]
    fn test_normalizes_recursively() {
        let mut inner = Resource::new();
        inner.insert("tags", dense(&["x", "y"]));

        let mut outer = Resource::new();
        outer.insert("user", inner);

        let converted = ObjectConverter.convert(outer);
        let user = converted.get("user").and_then(Value::as_resource).unwrap();
        assert_eq!(
            user.get("tags"),
            Some(&Value::List(vec![Value::from("x"), Value::from("y")]))
        );
    }

    #[test]
    fn test_top_level_is_never_rewritten() {
        let resource = dense(&["a", "b"]);
        let converted = ObjectConverter.convert(resource.clone());
        assert_eq!(converted, resource);
    }

    #[test]
    fn test_empty_nested_resource_stays() {
        let mut resource = Resource::new();
        resource.insert("empty", Resource::new());

        let converted = ObjectConverter.convert(resource);
        assert_eq!(converted.get("empty"), Some(&Value::Resource(Resource::new())));
    }
}
