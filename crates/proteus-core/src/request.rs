//! Framework-agnostic inbound request view.
//!
//! Authentication processes and the request filter operate on [`ApiRequest`]
//! rather than any concrete HTTP framework type. The embedding application
//! builds one per request from whatever server stack it uses.

use crate::{Resource, Value};
use indexmap::IndexMap;

/// The slice of an inbound request that Proteus consumes.
///
/// Holds the negotiated request representation (`data`: query-string or body
/// fields, already decoded into a [`Resource`]) and the request headers.
/// Header names are stored lower-cased, so lookups are case-insensitive.
///
/// # Example
///
/// ```
/// use proteus_core::{ApiRequest, Value};
///
/// let mut request = ApiRequest::new("GET", "/users");
/// request.data_mut().insert("timestamp", Value::Int(1_700_000_000));
/// request.set_header("X-Http-Auth-Token", "abc123");
///
/// assert_eq!(request.header("x-http-auth-token"), Some("abc123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    method: String,
    path: String,
    data: Resource,
    headers: IndexMap<String, String>,
}

impl ApiRequest {
    /// Creates a request with the given method and path.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            data: Resource::new(),
            headers: IndexMap::new(),
        }
    }

    /// Replaces the request data, consuming and returning the request.
    #[must_use]
    pub fn with_data(mut self, data: Resource) -> Self {
        self.data = data;
        self
    }

    /// Adds a header, consuming and returning the request.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// The request method (e.g. `GET`).
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The negotiated request representation (query/body fields).
    #[must_use]
    pub fn data(&self) -> &Resource {
        &self.data
    }

    /// Mutable access to the request representation.
    pub fn data_mut(&mut self) -> &mut Resource {
        &mut self.data
    }

    /// Sets a header; the name is lower-cased on insertion.
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Looks up a header, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Convenience accessor for a scalar field of the request data.
    ///
    /// Returns the field rendered as a string for `String`, `Int`, `Float`
    /// and `Bool` values; `None` for anything else.
    #[must_use]
    pub fn data_field(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}
