//! Data-URL mapper.

use crate::{content_type, JsonMapper, Mapper, MappingError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use proteus_core::Resource;

const SCHEME: &str = "data:";
const MEDIA_TYPE: &str = "application/json";
const BASE64_MARKER: &str = ";base64";

/// RFC 2397 data-URL codec carrying a base64-encoded JSON payload.
///
/// Encodes to `data:application/json;base64,<payload>`. Decoding accepts an
/// empty media type (the RFC default) or `application/json`; anything else,
/// a missing `;base64` marker, or an undecodable payload fails with
/// [`MappingError::MalformedInput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlMapper {
    inner: JsonMapper,
}

impl DataUrlMapper {
    /// Creates a data-URL mapper with a compact JSON payload codec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Mapper for DataUrlMapper {
    fn content_type(&self) -> &'static str {
        content_type::DATA_URL
    }

    fn encode(&self, resource: &Resource) -> Result<String, MappingError> {
        let json = self.inner.encode(resource)?;
        Ok(format!(
            "{SCHEME}{MEDIA_TYPE}{BASE64_MARKER},{}",
            STANDARD.encode(json)
        ))
    }

    fn decode(&self, input: &str) -> Result<Resource, MappingError> {
        let rest = input
            .strip_prefix(SCHEME)
            .ok_or_else(|| malformed("missing 'data:' scheme"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| malformed("missing ',' separating header and payload"))?;
        let media_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or_else(|| malformed("payload must be base64-encoded"))?;
        if !media_type.is_empty() && media_type != MEDIA_TYPE {
            return Err(malformed(format!("unsupported media type '{media_type}'")));
        }

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| malformed(format!("invalid base64 payload: {e}")))?;
        let json = String::from_utf8(bytes)
            .map_err(|_| malformed("payload is not valid UTF-8"))?;
        self.inner.decode(&json).map_err(|e| match e {
            MappingError::MalformedInput { message, .. } => {
                MappingError::malformed(content_type::DATA_URL, message)
            }
            other => other,
        })
    }
}

fn malformed(message: impl Into<String>) -> MappingError {
    MappingError::malformed(content_type::DATA_URL, message)
}
