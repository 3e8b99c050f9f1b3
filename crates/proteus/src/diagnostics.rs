//! Diagnostics snapshot.

use proteus_routes::RouteTable;
use proteus_security::AuthOutcome;
use serde::Serialize;

/// Point-in-time view of the assembled pipeline for a diagnostics panel.
///
/// Produced by [`Proteus::diagnostics`](crate::Proteus::diagnostics) only
/// when `routes.panel` is enabled.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsSnapshot {
    /// Name of the active authentication process.
    pub active_process: String,
    /// Outcome of the most recent authentication call, if any.
    pub last_auth: Option<AuthDiagnostics>,
    /// Registered converter names, in execution order.
    pub converters: Vec<String>,
    /// Registered content-type keys.
    pub content_types: Vec<String>,
    /// The generated route table, when route generation is configured.
    pub routes: Option<RouteTable>,
}

/// Serializable rendering of an authentication outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AuthDiagnostics {
    /// Process that ran.
    pub process: String,
    /// Whether the request was allowed.
    pub allowed: bool,
    /// Denial reason, when denied.
    pub reason: Option<String>,
}

impl From<AuthOutcome> for AuthDiagnostics {
    fn from(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Allowed { process } => Self {
                process: process.to_string(),
                allowed: true,
                reason: None,
            },
            AuthOutcome::Denied { process, reason } => Self {
                process: process.to_string(),
                allowed: false,
                reason: Some(reason.to_string()),
            },
        }
    }
}
