//! JSON mapper.

use crate::{content_type, Mapper, MappingError};
use proteus_core::{Resource, Value};

/// JSON codec.
///
/// Full round-trip: `decode(encode(r)) == r` for any resource without
/// [`Value::DateTime`] leaves (the converter stage formats those to strings
/// before mapping; a `DateTime` leaf that does reach the mapper is encoded
/// as RFC 3339 text).
///
/// # Example
///
/// ```
/// use proteus_core::{Resource, Value};
/// use proteus_mapping::{JsonMapper, Mapper};
///
/// let mut resource = Resource::new();
/// resource.insert("id", Value::Int(7));
/// resource.insert("name", Value::from("Ada"));
///
/// let mapper = JsonMapper::new();
/// let json = mapper.encode(&resource).unwrap();
/// assert_eq!(json, r#"{"id":7,"name":"Ada"}"#);
/// assert_eq!(mapper.decode(&json).unwrap(), resource);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMapper {
    pretty: bool,
}

impl JsonMapper {
    /// Creates a compact-output JSON mapper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pretty-printing JSON mapper.
    ///
    /// Selected per deployment (or swapped in per request by the embedding
    /// application when the pretty-print query flag is set).
    #[must_use]
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub(crate) fn value_to_json(value: &Value) -> serde_json::Value {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Self::value_to_json).collect())
            }
            Value::Resource(resource) => Self::resource_to_json(resource),
        }
    }

    pub(crate) fn resource_to_json(resource: &Resource) -> serde_json::Value {
        serde_json::Value::Object(
            resource
                .iter()
                .map(|(k, v)| (k.to_string(), Self::value_to_json(v)))
                .collect(),
        )
    }

    pub(crate) fn json_to_value(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Value::Float(n.as_f64().unwrap_or(f64::NAN)), Value::Int),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Self::json_to_value).collect())
            }
            serde_json::Value::Object(map) => Value::Resource(
                map.into_iter()
                    .map(|(k, v)| (k, Self::json_to_value(v)))
                    .collect(),
            ),
        }
    }
}

impl Mapper for JsonMapper {
    fn content_type(&self) -> &'static str {
        content_type::JSON
    }

    fn encode(&self, resource: &Resource) -> Result<String, MappingError> {
        let json = Self::resource_to_json(resource);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        rendered.map_err(|e| MappingError::malformed(content_type::JSON, e.to_string()))
    }

    fn decode(&self, input: &str) -> Result<Resource, MappingError> {
        let json: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| MappingError::malformed(content_type::JSON, e.to_string()))?;
        match Self::json_to_value(json) {
            Value::Resource(resource) => Ok(resource),
            _ => Err(MappingError::malformed(
                content_type::JSON,
                "top-level value must be an object",
            )),
        }
    }
}
