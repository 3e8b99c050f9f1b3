//! Per-request output flags.

use proteus_core::ApiRequest;

/// Output options a client selects through reserved query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputFlags {
    /// JSONP callback name, when the client asked for JSONP wrapping.
    pub jsonp_callback: Option<String>,
    /// Whether the client asked for pretty-printed output.
    pub pretty: bool,
}

/// Reads the reserved output parameters from a request.
///
/// The parameter names come from configuration (`jsonp_key`,
/// `pretty_print_key`); both live in the request data alongside ordinary
/// fields and are simply ignored by everything else.
#[derive(Debug, Clone)]
pub struct RequestFilter {
    jsonp_key: String,
    pretty_print_key: String,
}

impl RequestFilter {
    /// Creates a filter with the configured parameter names.
    #[must_use]
    pub fn new(jsonp_key: impl Into<String>, pretty_print_key: impl Into<String>) -> Self {
        Self {
            jsonp_key: jsonp_key.into(),
            pretty_print_key: pretty_print_key.into(),
        }
    }

    /// Extracts the output flags from a request.
    ///
    /// A present pretty-print parameter counts as enabled unless its value
    /// is `false` or `0`. A JSONP parameter must carry a non-empty callback
    /// name to take effect.
    #[must_use]
    pub fn flags(&self, request: &ApiRequest) -> OutputFlags {
        let jsonp_callback = request
            .data_field(&self.jsonp_key)
            .filter(|name| !name.is_empty());
        let pretty = request
            .data_field(&self.pretty_print_key)
            .is_some_and(|v| v != "false" && v != "0");
        OutputFlags {
            jsonp_callback,
            pretty,
        }
    }
}
