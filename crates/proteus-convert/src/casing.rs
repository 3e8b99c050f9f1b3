//! Key-casing converters and the naming-convention selector.
//!
//! At most one casing converter may be active for a given configuration.
//! The pipeline does not enforce this (it is order-only and permits repeated
//! registration by design); the assembly layer rejects a second
//! [`ConverterKind::KeyCasing`] registration as a configuration error.

use crate::{Converter, ConverterKind};
use proteus_core::{Resource, Value};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Key naming convention selected at configuration time.
///
/// The serialized names match the configuration surface: `none`,
/// `snake_case`, `camelCase`, `PascalCase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyConvention {
    /// Keys pass through unchanged.
    #[default]
    #[serde(rename = "none")]
    None,
    /// `snake_case` keys.
    #[serde(rename = "snake_case")]
    SnakeCase,
    /// `camelCase` keys.
    #[serde(rename = "camelCase")]
    CamelCase,
    /// `PascalCase` keys.
    #[serde(rename = "PascalCase")]
    PascalCase,
}

impl KeyConvention {
    /// Returns the matching casing converter, or `None` for
    /// [`KeyConvention::None`].
    #[must_use]
    pub fn converter(self) -> Option<Arc<dyn Converter>> {
        match self {
            Self::None => None,
            Self::SnakeCase => Some(Arc::new(SnakeCaseConverter)),
            Self::CamelCase => Some(Arc::new(CamelCaseConverter)),
            Self::PascalCase => Some(Arc::new(PascalCaseConverter)),
        }
    }
}

/// Splits an identifier into lower-cased words.
///
/// Handles `snake_case`, `kebab-case`, `camelCase`, `PascalCase` and
/// acronym runs (`HTTPServer` splits as `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let after_lower = prev.is_lowercase() || prev.is_ascii_digit();
            let acronym_end =
                prev.is_uppercase() && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if after_lower || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Converts an identifier to `snake_case`.
#[must_use]
pub fn to_snake_case(input: &str) -> String {
    split_words(input).join("_")
}

/// Converts an identifier to `camelCase`.
#[must_use]
pub fn to_camel_case(input: &str) -> String {
    let words = split_words(input);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Converts an identifier to `PascalCase`.
#[must_use]
pub fn to_pascal_case(input: &str) -> String {
    split_words(input).iter().map(|w| capitalize(w)).collect()
}

/// Renames every key in the tree with the given function.
fn rename_keys(resource: Resource, rename: &dyn Fn(&str) -> String) -> Resource {
    resource
        .into_iter()
        .map(|(key, value)| (rename(&key), rename_value(value, rename)))
        .collect()
}

fn rename_value(value: Value, rename: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Resource(resource) => Value::Resource(rename_keys(resource, rename)),
        Value::List(items) => Value::List(
            items
                .into_iter()
                .map(|item| rename_value(item, rename))
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Renames all keys to `snake_case`, recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseConverter;

impl Converter for SnakeCaseConverter {
    fn name(&self) -> &'static str {
        "snake_case"
    }

    fn kind(&self) -> ConverterKind {
        ConverterKind::KeyCasing
    }

    fn convert(&self, resource: Resource) -> Resource {
        rename_keys(resource, &to_snake_case)
    }
}

/// Renames all keys to `camelCase`, recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseConverter;

impl Converter for CamelCaseConverter {
    fn name(&self) -> &'static str {
        "camelCase"
    }

    fn kind(&self) -> ConverterKind {
        ConverterKind::KeyCasing
    }

    fn convert(&self, resource: Resource) -> Resource {
        rename_keys(resource, &to_camel_case)
    }
}

/// Renames all keys to `PascalCase`, recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct PascalCaseConverter;

impl Converter for PascalCaseConverter {
    fn name(&self) -> &'static str {
        "PascalCase"
    }

    fn kind(&self) -> ConverterKind {
        ConverterKind::KeyCasing
    }

    fn convert(&self, resource: Resource) -> Resource {
        rename_keys(resource, &to_pascal_case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConverterPipeline, DateTimeConverter};
    use chrono::DateTime;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("userName"), "user_name");
        assert_eq!(to_snake_case("UserName"), "user_name");
        assert_eq!(to_snake_case("user_name"), "user_name");
        assert_eq!(to_snake_case("user-name"), "user_name");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("user_name"), "userName");
        assert_eq!(to_camel_case("UserName"), "userName");
        assert_eq!(to_camel_case("userName"), "userName");
        assert_eq!(to_camel_case("created_at_time"), "createdAtTime");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("user_name"), "UserName");
        assert_eq!(to_pascal_case("userName"), "UserName");
        assert_eq!(to_pascal_case("id"), "Id");
    }

    #[test]
    fn test_snake_case_converter_recurses() {
        let mut inner = Resource::new();
        inner.insert("zipCode", Value::from("110 00"));

        let mut resource = Resource::new();
        resource.insert("homeAddress", inner);

        let converted = SnakeCaseConverter.convert(resource);
        let address = converted
            .get("home_address")
            .and_then(Value::as_resource)
            .unwrap();
        assert!(address.contains_key("zip_code"));
    }

    #[test]
    fn test_casing_converters_are_marked() {
        assert_eq!(SnakeCaseConverter.kind(), ConverterKind::KeyCasing);
        assert_eq!(CamelCaseConverter.kind(), ConverterKind::KeyCasing);
        assert_eq!(PascalCaseConverter.kind(), ConverterKind::KeyCasing);
    }

    #[test]
    fn test_convention_selects_converter() {
        assert!(KeyConvention::None.converter().is_none());
        assert_eq!(
            KeyConvention::SnakeCase.converter().unwrap().name(),
            "snake_case"
        );
        assert_eq!(
            KeyConvention::CamelCase.converter().unwrap().name(),
            "camelCase"
        );
        assert_eq!(
            KeyConvention::PascalCase.converter().unwrap().name(),
            "PascalCase"
        );
    }

    /// Registration order determines the final shape: two casing converters
    /// are non-commutative, so `[A, B]` and `[B, A]` diverge. The date field
    /// is formatted the same either way, confirming formatting is
    /// style-independent when registered ahead of the casing pass.
    #[test]
    fn test_pipeline_order_sensitivity() {
        let dt = DateTime::parse_from_rfc3339("2024-05-01T10:30:00+02:00").unwrap();
        let make = || {
            let mut r = Resource::new();
            r.insert("createdAt", Value::DateTime(dt));
            r.insert("UserName", Value::from("ada"));
            r
        };

        let mut camel_then_pascal = ConverterPipeline::new();
        camel_then_pascal.add_converter(DateTimeConverter::new("%Y"));
        camel_then_pascal.add_converter(CamelCaseConverter);
        camel_then_pascal.add_converter(PascalCaseConverter);

        let mut pascal_then_camel = ConverterPipeline::new();
        pascal_then_camel.add_converter(DateTimeConverter::new("%Y"));
        pascal_then_camel.add_converter(PascalCaseConverter);
        pascal_then_camel.add_converter(CamelCaseConverter);

        let a = camel_then_pascal.convert(make());
        let b = pascal_then_camel.convert(make());

        assert_ne!(a, b);
        assert_eq!(a.get("CreatedAt"), Some(&Value::from("2024")));
        assert_eq!(b.get("createdAt"), Some(&Value::from("2024")));
        assert!(a.contains_key("UserName"));
        assert!(b.contains_key("userName"));
    }
}
