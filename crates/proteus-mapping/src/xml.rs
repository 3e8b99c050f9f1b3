//! XML mapper.
//!
//! Hand-rolled writer and parser over the closed document shape this mapper
//! emits. Scalar typing is preserved through a `type` attribute so the full
//! round-trip property holds:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <root type="map">
//!   <id type="int">42</id>
//!   <name>Ada</name>
//!   <active type="bool">true</active>
//!   <note type="null"/>
//!   <tags type="list"><item>rust</item><item>rest</item></tags>
//!   <address type="map"><city>Prague</city></address>
//! </root>
//! ```
//!
//! Untyped elements are strings. Keys are used as element names directly and
//! must be valid XML names.

use crate::{content_type, Mapper, MappingError};
use proteus_core::{Resource, Value};
use std::fmt::Write as _;

const ROOT_ELEMENT: &str = "root";
const ITEM_ELEMENT: &str = "item";

/// XML codec with typed scalar attributes.
///
/// Full round-trip: `decode(encode(r)) == r` for any resource without
/// [`Value::DateTime`] leaves. Malformed documents (unbalanced tags, bad
/// entities, stray content) fail with
/// [`MappingError::MalformedInput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlMapper;

impl XmlMapper {
    /// Creates an XML mapper.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn write_value(out: &mut String, name: &str, value: &Value) {
        match value {
            Value::Null => {
                let _ = write!(out, "<{name} type=\"null\"/>");
            }
            Value::Bool(b) => {
                let _ = write!(out, "<{name} type=\"bool\">{b}</{name}>");
            }
            Value::Int(i) => {
                let _ = write!(out, "<{name} type=\"int\">{i}</{name}>");
            }
            Value::Float(f) => {
                let _ = write!(out, "<{name} type=\"float\">{f}</{name}>");
            }
            Value::String(s) => {
                let _ = write!(out, "<{name}>{}</{name}>", escape(s));
            }
            Value::DateTime(dt) => {
                let _ = write!(out, "<{name}>{}</{name}>", escape(&dt.to_rfc3339()));
            }
            Value::List(items) => {
                let _ = write!(out, "<{name} type=\"list\">");
                for item in items {
                    Self::write_value(out, ITEM_ELEMENT, item);
                }
                let _ = write!(out, "</{name}>");
            }
            Value::Resource(resource) => {
                let _ = write!(out, "<{name} type=\"map\">");
                for (key, child) in resource.iter() {
                    Self::write_value(out, key, child);
                }
                let _ = write!(out, "</{name}>");
            }
        }
    }
}

impl Mapper for XmlMapper {
    fn content_type(&self) -> &'static str {
        content_type::XML
    }

    fn encode(&self, resource: &Resource) -> Result<String, MappingError> {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        let _ = write!(out, "<{ROOT_ELEMENT} type=\"map\">");
        for (key, value) in resource.iter() {
            Self::write_value(&mut out, key, value);
        }
        let _ = write!(out, "</{ROOT_ELEMENT}>");
        Ok(out)
    }

    fn decode(&self, input: &str) -> Result<Resource, MappingError> {
        let mut parser = Parser::new(input);
        parser.skip_whitespace();
        parser.skip_prolog()?;
        parser.skip_whitespace();
        let (_, value) = parser.parse_element()?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(malformed("trailing content after document element"));
        }
        match value {
            Value::Resource(resource) => Ok(resource),
            // A childless untyped document element is an empty mapping.
            Value::String(text) if text.trim().is_empty() => Ok(Resource::new()),
            _ => Err(malformed("document element must contain a mapping")),
        }
    }
}

fn malformed(message: impl Into<String>) -> MappingError {
    MappingError::malformed(content_type::XML, message)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Recursive-descent parser over the document shape [`XmlMapper`] emits.
struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn expect(&mut self, expected: char) -> Result<(), MappingError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(malformed(format!("expected '{expected}', found '{c}'"))),
            None => Err(malformed(format!("expected '{expected}', found end of input"))),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn skip_prolog(&mut self) -> Result<(), MappingError> {
        if self.peek() == Some('<') && self.peek_at(1) == Some('?') {
            while !self.at_end() {
                if self.peek() == Some('?') && self.peek_at(1) == Some('>') {
                    self.pos += 2;
                    return Ok(());
                }
                self.pos += 1;
            }
            return Err(malformed("unterminated XML declaration"));
        }
        Ok(())
    }

    fn parse_name(&mut self) -> Result<String, MappingError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(malformed("expected element name"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// Parses one element, returning its name and decoded value.
    fn parse_element(&mut self) -> Result<(String, Value), MappingError> {
        self.expect('<')?;
        let name = self.parse_name()?;
        let type_attr = self.parse_attributes()?;

        // Self-closing element.
        if self.peek() == Some('/') {
            self.pos += 1;
            self.expect('>')?;
            return Ok((name, typed_value(type_attr.as_deref(), String::new(), vec![])?));
        }
        self.expect('>')?;

        let mut children = Vec::new();
        let mut text = String::new();

        loop {
            if self.peek() == Some('<') {
                if self.peek_at(1) == Some('/') {
                    break;
                }
                children.push(self.parse_element()?);
            } else {
                match self.bump() {
                    Some('&') => text.push(self.parse_entity()?),
                    Some(c) => text.push(c),
                    None => return Err(malformed(format!("unterminated element '{name}'"))),
                }
            }
        }

        // Closing tag.
        self.expect('<')?;
        self.expect('/')?;
        let closing = self.parse_name()?;
        if closing != name {
            return Err(malformed(format!(
                "mismatched closing tag: expected '</{name}>', found '</{closing}>'"
            )));
        }
        self.skip_whitespace_in_tag();
        self.expect('>')?;

        if !children.is_empty() && !text.trim().is_empty() {
            return Err(malformed(format!("mixed content in element '{name}'")));
        }
        typed_value(type_attr.as_deref(), text, children).map(|v| (name, v))
    }

    fn skip_whitespace_in_tag(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    /// Parses attributes up to (not including) `>` or `/>`, returning the
    /// `type` attribute value if present. Other attributes are tolerated
    /// and ignored.
    fn parse_attributes(&mut self) -> Result<Option<String>, MappingError> {
        let mut type_attr = None;
        loop {
            self.skip_whitespace_in_tag();
            match self.peek() {
                Some('>' | '/') => return Ok(type_attr),
                Some(_) => {
                    let attr_name = self.parse_name()?;
                    self.skip_whitespace_in_tag();
                    self.expect('=')?;
                    self.skip_whitespace_in_tag();
                    let quote = match self.bump() {
                        Some(q @ ('"' | '\'')) => q,
                        _ => return Err(malformed("attribute value must be quoted")),
                    };
                    let mut value = String::new();
                    loop {
                        match self.bump() {
                            Some(c) if c == quote => break,
                            Some('&') => value.push(self.parse_entity()?),
                            Some(c) => value.push(c),
                            None => return Err(malformed("unterminated attribute value")),
                        }
                    }
                    if attr_name == "type" {
                        type_attr = Some(value);
                    }
                }
                None => return Err(malformed("unterminated start tag")),
            }
        }
    }

    /// Parses an entity reference after the leading `&` was consumed.
    fn parse_entity(&mut self) -> Result<char, MappingError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != ';') {
            self.pos += 1;
        }
        if self.at_end() {
            return Err(malformed("unterminated entity reference"));
        }
        let entity: String = self.chars[start..self.pos].iter().collect();
        self.pos += 1; // consume ';'

        match entity.as_str() {
            "amp" => Ok('&'),
            "lt" => Ok('<'),
            "gt" => Ok('>'),
            "quot" => Ok('"'),
            "apos" => Ok('\''),
            _ => {
                let code = entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(str::parse))
                    .transpose()
                    .map_err(|_| malformed(format!("invalid character reference '&{entity};'")))?;
                code.and_then(char::from_u32)
                    .ok_or_else(|| malformed(format!("unknown entity '&{entity};'")))
            }
        }
    }
}

/// Builds a [`Value`] from the `type` attribute, text content, and children.
fn typed_value(
    type_attr: Option<&str>,
    text: String,
    children: Vec<(String, Value)>,
) -> Result<Value, MappingError> {
    match type_attr {
        Some("null") => Ok(Value::Null),
        Some("bool") => match text.trim() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            other => Err(malformed(format!("invalid bool value '{other}'"))),
        },
        Some("int") => text
            .trim()
            .parse()
            .map(Value::Int)
            .map_err(|_| malformed(format!("invalid int value '{}'", text.trim()))),
        Some("float") => text
            .trim()
            .parse()
            .map(Value::Float)
            .map_err(|_| malformed(format!("invalid float value '{}'", text.trim()))),
        Some("list") => children
            .into_iter()
            .map(|(name, value)| {
                if name == ITEM_ELEMENT {
                    Ok(value)
                } else {
                    Err(malformed(format!(
                        "list children must be '<{ITEM_ELEMENT}>', found '<{name}>'"
                    )))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Some("map") => Ok(Value::Resource(children.into_iter().collect())),
        Some(other) => Err(malformed(format!("unknown type attribute '{other}'"))),
        None if children.is_empty() => Ok(Value::String(text)),
        // Untyped element with children: treat as a mapping, so documents
        // produced by other writers still decode.
        None => Ok(Value::Resource(children.into_iter().collect())),
    }
}
