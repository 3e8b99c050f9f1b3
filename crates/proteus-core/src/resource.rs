//! The canonical resource value tree.
//!
//! A [`Resource`] is an ordered mapping from string keys to [`Value`]s. It is
//! the wire-format-independent shape every mapper encodes from and decodes
//! into, and the shape converters transform. Insertion order is observable:
//! mappers serialize keys in the order they were inserted, and the query
//! mapper relies on this to produce a canonical signing representation.
//!
//! Resources are trees by construction. Values own their children outright
//! (no shared or weak references), so cyclic containment cannot be expressed.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

/// A single value inside a [`Resource`].
///
/// Scalars, date/time leaves, sequences, and nested resources. `DateTime`
/// leaves are expected to be formatted into strings by the converter stage
/// before a resource reaches a mapper; mappers that encounter one fall back
/// to RFC 3339 text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / null value.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Floating point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Date/time leaf, carrying its original offset.
    DateTime(DateTime<FixedOffset>),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Nested resource.
    Resource(Resource),
}

impl Value {
    /// Returns `true` if this value is a scalar (not a list or resource).
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Resource(_))
    }

    /// Returns the string slice if this is a `String` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int` value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the nested resource if this is a `Resource` value.
    #[must_use]
    pub const fn as_resource(&self) -> Option<&Resource> {
        match self {
            Self::Resource(r) => Some(r),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::DateTime(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<Resource> for Value {
    fn from(v: Resource) -> Self {
        Self::Resource(v)
    }
}

/// Canonical in-memory representation of request/response payload data.
///
/// An ordered `key -> value` mapping. Created per request or response, owned
/// exclusively by the handling request cycle, and discarded after
/// serialization.
///
/// # Example
///
/// ```
/// use proteus_core::{Resource, Value};
///
/// let mut user = Resource::new();
/// user.insert("id", Value::Int(42));
/// user.insert("name", Value::from("Ada"));
///
/// assert_eq!(user.get("id"), Some(&Value::Int(42)));
/// assert_eq!(user.keys().collect::<Vec<_>>(), vec!["id", "name"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resource {
    entries: IndexMap<String, Value>,
}

impl Resource {
    /// Creates an empty resource.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty resource with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts a value, preserving the position of an existing key.
    ///
    /// Returns the previous value if the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns a mutable reference to the value for a key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the resource has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}

impl FromIterator<(String, Value)> for Resource {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Resource {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
