//! Query-string mapper.
//!
//! Nested resources flatten into bracket notation (`address[city]=Prague`,
//! `tags[0]=rust`), the convention PHP-style form decoding established and
//! most HTTP clients speak. The format is lossy: every value travels as
//! text, so decoding yields string leaves. Pair order follows resource
//! insertion order, which makes the output a stable canonical form suitable
//! as signing input.

use crate::{content_type, Mapper, MappingError};
use proteus_core::{Resource, Value};

/// Bracket-notation query-string codec.
///
/// Encoding percent-escapes via `serde_urlencoded`; decoding reverses it
/// and rebuilds nesting from bracket segments. Scalars render as their
/// display text (`Null` as the empty string, `DateTime` as RFC 3339), so
/// the round-trip property holds only up to stringification.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryMapper;

impl QueryMapper {
    /// Creates a query-string mapper.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Flattens a resource into ordered `(key, value)` pairs with bracket
    /// notation for nesting. This is the canonical pair sequence callers
    /// sign over, before percent-escaping.
    #[must_use]
    pub fn flatten(resource: &Resource) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in resource.iter() {
            flatten_value(key.to_string(), value, &mut pairs);
        }
        pairs
    }
}

fn flatten_value(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => pairs.push((key, String::new())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Int(i) => pairs.push((key, i.to_string())),
        Value::Float(f) => pairs.push((key, f.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::DateTime(dt) => pairs.push((key, dt.to_rfc3339())),
        Value::List(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(format!("{key}[{index}]"), item, pairs);
            }
        }
        Value::Resource(resource) => {
            for (child_key, child) in resource.iter() {
                flatten_value(format!("{key}[{child_key}]"), child, pairs);
            }
        }
    }
}

/// Splits `address[city][zip]` into `["address", "city", "zip"]`.
fn split_segments(key: &str) -> Result<Vec<&str>, MappingError> {
    let Some(open) = key.find('[') else {
        return Ok(vec![key]);
    };
    let mut segments = vec![&key[..open]];
    let mut rest = &key[open..];
    while !rest.is_empty() {
        let Some(stripped) = rest.strip_prefix('[') else {
            return Err(malformed(format!("unexpected content after ']' in '{key}'")));
        };
        let Some(close) = stripped.find(']') else {
            return Err(malformed(format!("unterminated bracket in '{key}'")));
        };
        segments.push(&stripped[..close]);
        rest = &stripped[close + 1..];
    }
    Ok(segments)
}

fn insert_path(root: &mut Resource, segments: &[&str], value: String) {
    let (head, tail) = match segments {
        [] => return,
        [head, tail @ ..] => (*head, tail),
    };
    if tail.is_empty() {
        // Later write wins on a conflicting key.
        root.insert(head, Value::String(value));
        return;
    }
    match root.get_mut(head) {
        Some(Value::Resource(child)) => insert_path(child, tail, value),
        _ => {
            let mut child = Resource::new();
            insert_path(&mut child, tail, value);
            root.insert(head, child);
        }
    }
}

fn malformed(message: impl Into<String>) -> MappingError {
    MappingError::malformed(content_type::QUERY, message)
}

impl Mapper for QueryMapper {
    fn content_type(&self) -> &'static str {
        content_type::QUERY
    }

    fn encode(&self, resource: &Resource) -> Result<String, MappingError> {
        serde_urlencoded::to_string(Self::flatten(resource))
            .map_err(|e| malformed(e.to_string()))
    }

    fn decode(&self, input: &str) -> Result<Resource, MappingError> {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(input).map_err(|e| malformed(e.to_string()))?;
        let mut root = Resource::new();
        for (key, value) in pairs {
            let segments = split_segments(&key)?;
            insert_path(&mut root, &segments, value);
        }
        Ok(root)
    }
}
