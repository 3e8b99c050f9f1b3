//! Date/time formatting converter.

use crate::{Converter, ConverterKind};
use proteus_core::{Resource, Value};

/// Default time format: ISO 8601 / RFC 3339 (`chrono`'s `%+`).
pub const DEFAULT_TIME_FORMAT: &str = "%+";

/// Formats every date/time leaf to a string using one configured format.
///
/// Applied before any key-casing converter so the formatting is independent
/// of the selected naming convention. After this converter runs, the tree
/// contains no [`Value::DateTime`] leaves.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use proteus_convert::{Converter, DateTimeConverter};
/// use proteus_core::{Resource, Value};
///
/// let created = DateTime::parse_from_rfc3339("2024-05-01T10:30:00+02:00").unwrap();
/// let mut resource = Resource::new();
/// resource.insert("created", Value::DateTime(created));
///
/// let converted = DateTimeConverter::new("%Y-%m-%d").convert(resource);
/// assert_eq!(converted.get("created"), Some(&Value::from("2024-05-01")));
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeConverter {
    format: String,
}

impl DateTimeConverter {
    /// Creates a converter with the given `chrono` format string.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// The configured format string.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    fn format_value(&self, value: Value) -> Value {
        match value {
            Value::DateTime(dt) => Value::String(dt.format(&self.format).to_string()),
            Value::List(items) => {
                Value::List(items.into_iter().map(|v| self.format_value(v)).collect())
            }
            Value::Resource(resource) => Value::Resource(self.format_resource(resource)),
            scalar => scalar,
        }
    }

    fn format_resource(&self, resource: Resource) -> Resource {
        resource
            .into_iter()
            .map(|(k, v)| (k, self.format_value(v)))
            .collect()
    }
}

impl Default for DateTimeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_FORMAT)
    }
}

impl Converter for DateTimeConverter {
    fn name(&self) -> &'static str {
        "datetime"
    }

    fn kind(&self) -> ConverterKind {
        ConverterKind::Transform
    }

    fn convert(&self, resource: Resource) -> Resource {
        self.format_resource(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn sample() -> DateTime<chrono::FixedOffset> {
        DateTime::parse_from_rfc3339("2024-05-01T10:30:00+02:00").unwrap()
    }

    #[test]
    fn test_default_format_is_rfc3339() {
        let mut resource = Resource::new();
        resource.insert("at", Value::DateTime(sample()));

        let converted = DateTimeConverter::default().convert(resource);
        assert_eq!(
            converted.get("at"),
            Some(&Value::from("2024-05-01T10:30:00+02:00"))
        );
    }

    #[test]
    fn test_formats_nested_and_listed_leaves() {
        let mut inner = Resource::new();
        inner.insert("updated", Value::DateTime(sample()));

        let mut resource = Resource::new();
        resource.insert("audit", inner);
        resource.insert(
            "stamps",
            Value::List(vec![Value::DateTime(sample()), Value::Int(1)]),
        );

        let converted = DateTimeConverter::new("%Y").convert(resource);
        let audit = converted.get("audit").and_then(Value::as_resource).unwrap();
        assert_eq!(audit.get("updated"), Some(&Value::from("2024")));
        assert_eq!(
            converted.get("stamps"),
            Some(&Value::List(vec![Value::from("2024"), Value::Int(1)]))
        );
    }

    #[test]
    fn test_non_datetime_leaves_untouched() {
        let mut resource = Resource::new();
        resource.insert("name", Value::from("ada"));
        resource.insert("age", Value::Int(36));

        let converted = DateTimeConverter::default().convert(resource.clone());
        assert_eq!(converted, resource);
    }
}
