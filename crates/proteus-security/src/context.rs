//! Authentication context.

use crate::{AuthError, AuthResult, AuthenticationProcess, NullAuthentication};
use proteus_core::ApiRequest;
use std::sync::{Arc, RwLock};

/// Result of the most recent authentication call, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The active process accepted the request.
    Allowed {
        /// Name of the process that ran.
        process: &'static str,
    },
    /// The active process denied the request.
    Denied {
        /// Name of the process that ran.
        process: &'static str,
        /// Why it was denied.
        reason: AuthError,
    },
}

/// Holds the one active [`AuthenticationProcess`] and delegates to it.
///
/// The binding is swappable at configuration time only; once requests are
/// flowing it is treated as read-only. The default binding is
/// [`NullAuthentication`], which accepts everything.
///
/// # Example
///
/// ```
/// use proteus_core::ApiRequest;
/// use proteus_security::{AuthenticationContext, HashAuthenticator};
///
/// let mut context = AuthenticationContext::new();
/// assert!(context.authenticate(&ApiRequest::new("GET", "/")).is_ok());
///
/// context.set_process(HashAuthenticator::new("private-key"));
/// assert!(context.authenticate(&ApiRequest::new("GET", "/")).is_err());
/// ```
pub struct AuthenticationContext {
    process: Arc<dyn AuthenticationProcess>,
    last_outcome: RwLock<Option<AuthOutcome>>,
}

impl Default for AuthenticationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthenticationContext {
    /// Creates a context bound to [`NullAuthentication`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            process: Arc::new(NullAuthentication),
            last_outcome: RwLock::new(None),
        }
    }

    /// Replaces the active process. Configuration time only.
    pub fn set_process(&mut self, process: impl AuthenticationProcess) {
        self.process = Arc::new(process);
    }

    /// Replaces the active process with an already-shared one.
    pub fn set_shared_process(&mut self, process: Arc<dyn AuthenticationProcess>) {
        self.process = process;
    }

    /// Name of the active process.
    #[must_use]
    pub fn process_name(&self) -> &'static str {
        self.process.name()
    }

    /// Authenticates a request with the active process, recording the
    /// outcome for diagnostics.
    pub fn authenticate(&self, request: &ApiRequest) -> AuthResult {
        let result = self.process.authenticate(request);
        let outcome = match &result {
            Ok(()) => AuthOutcome::Allowed {
                process: self.process.name(),
            },
            Err(reason) => AuthOutcome::Denied {
                process: self.process.name(),
                reason: reason.clone(),
            },
        };
        if let Ok(mut slot) = self.last_outcome.write() {
            *slot = Some(outcome);
        }
        result
    }

    /// The outcome of the most recent [`authenticate`](Self::authenticate)
    /// call, if any.
    #[must_use]
    pub fn last_outcome(&self) -> Option<AuthOutcome> {
        self.last_outcome.read().ok().and_then(|slot| slot.clone())
    }
}

impl std::fmt::Debug for AuthenticationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationContext")
            .field("process", &self.process.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HashAuthenticator, SecuredAuthentication, TimeoutAuthenticator};
    use proteus_core::Value;

    #[test]
    fn test_default_process_is_null() {
        let context = AuthenticationContext::new();
        assert_eq!(context.process_name(), "null");
        assert!(context.authenticate(&ApiRequest::new("GET", "/")).is_ok());
        assert_eq!(
            context.last_outcome(),
            Some(AuthOutcome::Allowed { process: "null" })
        );
    }

    #[test]
    fn test_set_process_swaps_binding() {
        let mut context = AuthenticationContext::new();
        context.set_process(HashAuthenticator::new("key"));
        assert_eq!(context.process_name(), "hash");

        let denied = context.authenticate(&ApiRequest::new("GET", "/"));
        assert!(denied.is_err());
        assert!(matches!(
            context.last_outcome(),
            Some(AuthOutcome::Denied { process: "hash", .. })
        ));
    }

    #[test]
    fn test_secured_chain_reports_first_failure_reason() {
        let mut context = AuthenticationContext::new();
        context.set_process(
            SecuredAuthentication::new()
                .with_process(TimeoutAuthenticator::new("timestamp", 300))
                .with_process(HashAuthenticator::new("key")),
        );

        // Timestamp missing entirely: the timeout process fails first.
        let mut request = ApiRequest::new("POST", "/things");
        request.data_mut().insert("name", Value::from("x"));
        let outcome = context.authenticate(&request);
        assert!(matches!(outcome, Err(AuthError::MissingCredentials { .. })));
    }
}
