//! Authentication processes.
//!
//! Each process validates one aspect of an inbound request. The closed set
//! mirrors what the wire protocol defines: a no-op default, hash-signature
//! verification, timestamp windowing, basic credentials, OAuth2 bearer
//! tokens, and a composite that chains several of these with AND semantics.

use crate::{AuthError, AuthResult, HashCalculator};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use proteus_core::ApiRequest;
use std::sync::Arc;

/// Header carrying the client-computed request signature.
pub const AUTH_TOKEN_HEADER: &str = "x-http-auth-token";

/// A strategy validating one aspect of an inbound request.
///
/// Processes are configured once at start-up and shared across requests, so
/// implementations hold no per-request state.
pub trait AuthenticationProcess: Send + Sync + 'static {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Validates the request, returning the denial reason on failure.
    fn authenticate(&self, request: &ApiRequest) -> AuthResult;
}

/// The default process: every request passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAuthentication;

impl AuthenticationProcess for NullAuthentication {
    fn name(&self) -> &'static str {
        "null"
    }

    fn authenticate(&self, _request: &ApiRequest) -> AuthResult {
        Ok(())
    }
}

/// Verifies the request signature header against a recomputed HMAC.
///
/// The client signs the canonical query representation of the request data
/// with the shared private key and sends the hex digest in
/// [`AUTH_TOKEN_HEADER`]. A missing header is [`AuthError::MissingCredentials`];
/// a mismatch is [`AuthError::InvalidSignature`].
#[derive(Debug, Clone)]
pub struct HashAuthenticator {
    calculator: HashCalculator,
}

impl HashAuthenticator {
    /// Creates a hash authenticator keyed with the shared private key.
    #[must_use]
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            calculator: HashCalculator::new(private_key),
        }
    }
}

impl AuthenticationProcess for HashAuthenticator {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn authenticate(&self, request: &ApiRequest) -> AuthResult {
        let supplied = request
            .header(AUTH_TOKEN_HEADER)
            .ok_or_else(|| AuthError::missing(format!("{AUTH_TOKEN_HEADER} header")))?;
        if self.calculator.verify(request.data(), supplied) {
            Ok(())
        } else {
            tracing::debug!(path = request.path(), "request signature mismatch");
            Err(AuthError::InvalidSignature)
        }
    }
}

/// Rejects requests whose timestamp falls outside the accepted window.
///
/// The timestamp arrives as Unix seconds in a configured request-data field.
/// The window applies in both directions, so future timestamps beyond it
/// are rejected as well.
#[derive(Debug, Clone)]
pub struct TimeoutAuthenticator {
    request_time_key: String,
    timeout_secs: i64,
}

impl TimeoutAuthenticator {
    /// Creates a timeout authenticator reading `request_time_key` from the
    /// request data, with the window given in seconds.
    #[must_use]
    pub fn new(request_time_key: impl Into<String>, timeout_secs: i64) -> Self {
        Self {
            request_time_key: request_time_key.into(),
            timeout_secs,
        }
    }

    /// Validates against an explicit `now` (Unix seconds).
    pub fn authenticate_at(&self, request: &ApiRequest, now: i64) -> AuthResult {
        let raw = request
            .data_field(&self.request_time_key)
            .ok_or_else(|| AuthError::missing(format!("{} field", self.request_time_key)))?;
        let request_time: i64 = raw
            .parse()
            .map_err(|_| AuthError::missing(format!("numeric {} field", self.request_time_key)))?;

        let off_by_secs = (now - request_time).abs();
        if off_by_secs > self.timeout_secs {
            return Err(AuthError::Expired {
                off_by_secs,
                timeout_secs: self.timeout_secs,
            });
        }
        Ok(())
    }
}

impl AuthenticationProcess for TimeoutAuthenticator {
    fn name(&self) -> &'static str {
        "timeout"
    }

    fn authenticate(&self, request: &ApiRequest) -> AuthResult {
        self.authenticate_at(request, chrono::Utc::now().timestamp())
    }
}

/// Pluggable credential verification backing [`BasicAuthentication`].
pub trait CredentialStore: Send + Sync + 'static {
    /// Returns `true` when the pair identifies a known client.
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Validates an HTTP Basic credential pair against a [`CredentialStore`].
pub struct BasicAuthentication {
    store: Arc<dyn CredentialStore>,
}

impl BasicAuthentication {
    /// Creates a basic authenticator backed by the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    fn parse_credentials(request: &ApiRequest) -> Result<(String, String), AuthError> {
        let header = request
            .header("authorization")
            .ok_or_else(|| AuthError::missing("authorization header"))?;
        let encoded = header
            .strip_prefix("Basic ")
            .ok_or_else(|| AuthError::missing("Basic authorization scheme"))?;
        let decoded = STANDARD
            .decode(encoded.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| AuthError::missing("decodable Basic credentials"))?;
        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| AuthError::missing("credential pair"))?;
        Ok((username.to_string(), password.to_string()))
    }
}

impl AuthenticationProcess for BasicAuthentication {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn authenticate(&self, request: &ApiRequest) -> AuthResult {
        let (username, password) = Self::parse_credentials(request)?;
        if self.store.verify(&username, &password) {
            Ok(())
        } else {
            tracing::debug!(%username, "basic credentials rejected");
            Err(AuthError::UnknownClient)
        }
    }
}

/// Pluggable bearer-token verification backing [`OAuth2Authentication`].
pub trait TokenValidator: Send + Sync + 'static {
    /// Returns `true` when the token is valid and unexpired.
    fn validate(&self, token: &str) -> bool;
}

/// Validates an OAuth2 bearer token via a [`TokenValidator`].
///
/// Only assembled when the embedding application supplies a validator; its
/// absence simply omits this process from the chain.
pub struct OAuth2Authentication {
    validator: Arc<dyn TokenValidator>,
}

impl OAuth2Authentication {
    /// Creates an OAuth2 authenticator backed by the given validator.
    #[must_use]
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }
}

impl AuthenticationProcess for OAuth2Authentication {
    fn name(&self) -> &'static str {
        "oauth2"
    }

    fn authenticate(&self, request: &ApiRequest) -> AuthResult {
        let header = request
            .header("authorization")
            .ok_or_else(|| AuthError::missing("authorization header"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::missing("Bearer authorization scheme"))?;
        if self.validator.validate(token.trim()) {
            Ok(())
        } else {
            Err(AuthError::UnknownClient)
        }
    }
}

/// Composite process running sub-processes in sequence with AND semantics.
///
/// The first failing sub-process short-circuits the chain and its reason is
/// reported unchanged.
#[derive(Default)]
pub struct SecuredAuthentication {
    processes: Vec<Arc<dyn AuthenticationProcess>>,
}

impl SecuredAuthentication {
    /// Creates an empty composite.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sub-process, consuming and returning the composite.
    #[must_use]
    pub fn with_process(mut self, process: impl AuthenticationProcess) -> Self {
        self.processes.push(Arc::new(process));
        self
    }

    /// Appends an already-shared sub-process.
    #[must_use]
    pub fn with_shared(mut self, process: Arc<dyn AuthenticationProcess>) -> Self {
        self.processes.push(process);
        self
    }

    /// The names of the configured sub-processes, in execution order.
    #[must_use]
    pub fn process_names(&self) -> Vec<&'static str> {
        self.processes.iter().map(|p| p.name()).collect()
    }
}

impl AuthenticationProcess for SecuredAuthentication {
    fn name(&self) -> &'static str {
        "secured"
    }

    fn authenticate(&self, request: &ApiRequest) -> AuthResult {
        for process in &self.processes {
            if let Err(reason) = process.authenticate(request) {
                tracing::debug!(
                    process = process.name(),
                    %reason,
                    "authentication chain denied request"
                );
                return Err(reason);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proteus_core::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SingleUser;

    impl CredentialStore for SingleUser {
        fn verify(&self, username: &str, password: &str) -> bool {
            username == "ada" && password == "s3cret"
        }
    }

    fn signed_request(key: &str) -> ApiRequest {
        let mut request = ApiRequest::new("POST", "/payments");
        request.data_mut().insert("amount", Value::Int(100));
        let signature = HashCalculator::new(key).compute(request.data());
        request.with_header(AUTH_TOKEN_HEADER, signature)
    }

    #[test]
    fn test_null_always_passes() {
        let request = ApiRequest::new("GET", "/");
        assert!(NullAuthentication.authenticate(&request).is_ok());
    }

    #[test]
    fn test_hash_accepts_valid_signature() {
        let auth = HashAuthenticator::new("key");
        assert!(auth.authenticate(&signed_request("key")).is_ok());
    }

    #[test]
    fn test_hash_rejects_wrong_key() {
        let auth = HashAuthenticator::new("key");
        assert_eq!(
            auth.authenticate(&signed_request("other")),
            Err(AuthError::InvalidSignature)
        );
    }

    #[test]
    fn test_hash_rejects_tampered_data() {
        let auth = HashAuthenticator::new("key");
        let mut request = signed_request("key");
        request.data_mut().insert("amount", Value::Int(1_000_000));
        assert_eq!(auth.authenticate(&request), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_hash_missing_header_is_missing_credentials() {
        let auth = HashAuthenticator::new("key");
        let request = ApiRequest::new("GET", "/");
        assert!(matches!(
            auth.authenticate(&request),
            Err(AuthError::MissingCredentials { .. })
        ));
    }

    #[test]
    fn test_timeout_accepts_within_window() {
        let auth = TimeoutAuthenticator::new("timestamp", 300);
        let mut request = ApiRequest::new("GET", "/");
        request.data_mut().insert("timestamp", Value::Int(1_000_000));
        assert!(auth.authenticate_at(&request, 1_000_299).is_ok());
        assert!(auth.authenticate_at(&request, 1_000_300).is_ok());
    }

    #[test]
    fn test_timeout_rejects_past_and_future() {
        let auth = TimeoutAuthenticator::new("timestamp", 300);
        let mut request = ApiRequest::new("GET", "/");
        request.data_mut().insert("timestamp", Value::Int(1_000_000));

        assert!(matches!(
            auth.authenticate_at(&request, 1_000_301),
            Err(AuthError::Expired { off_by_secs: 301, .. })
        ));
        assert!(matches!(
            auth.authenticate_at(&request, 999_699),
            Err(AuthError::Expired { .. })
        ));
    }

    #[test]
    fn test_timeout_missing_field_is_missing_credentials() {
        let auth = TimeoutAuthenticator::new("timestamp", 300);
        let request = ApiRequest::new("GET", "/");
        assert!(matches!(
            auth.authenticate_at(&request, 0),
            Err(AuthError::MissingCredentials { .. })
        ));
    }

    #[test]
    fn test_basic_accepts_known_pair() {
        let auth = BasicAuthentication::new(Arc::new(SingleUser));
        let request = ApiRequest::new("GET", "/")
            .with_header("Authorization", format!("Basic {}", STANDARD.encode("ada:s3cret")));
        assert!(auth.authenticate(&request).is_ok());
    }

    #[test]
    fn test_basic_rejects_unknown_pair() {
        let auth = BasicAuthentication::new(Arc::new(SingleUser));
        let request = ApiRequest::new("GET", "/")
            .with_header("Authorization", format!("Basic {}", STANDARD.encode("eve:wrong")));
        assert_eq!(auth.authenticate(&request), Err(AuthError::UnknownClient));
    }

    #[test]
    fn test_basic_missing_header_is_missing_credentials() {
        let auth = BasicAuthentication::new(Arc::new(SingleUser));
        assert!(matches!(
            auth.authenticate(&ApiRequest::new("GET", "/")),
            Err(AuthError::MissingCredentials { .. })
        ));
    }

    struct FixedToken;

    impl TokenValidator for FixedToken {
        fn validate(&self, token: &str) -> bool {
            token == "tok-1"
        }
    }

    #[test]
    fn test_oauth2_validates_bearer_token() {
        let auth = OAuth2Authentication::new(Arc::new(FixedToken));
        let ok = ApiRequest::new("GET", "/").with_header("Authorization", "Bearer tok-1");
        let bad = ApiRequest::new("GET", "/").with_header("Authorization", "Bearer tok-2");
        assert!(auth.authenticate(&ok).is_ok());
        assert_eq!(auth.authenticate(&bad), Err(AuthError::UnknownClient));
    }

    /// Counts invocations so short-circuiting is observable.
    struct Counting {
        calls: Arc<AtomicUsize>,
        result: AuthResult,
    }

    impl AuthenticationProcess for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn authenticate(&self, _request: &ApiRequest) -> AuthResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[test]
    fn test_secured_short_circuits_on_first_failure() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));
        let chain = SecuredAuthentication::new()
            .with_process(Counting {
                calls: Arc::clone(&first_calls),
                result: Err(AuthError::Expired { off_by_secs: 400, timeout_secs: 300 }),
            })
            .with_process(Counting {
                calls: Arc::clone(&second_calls),
                result: Ok(()),
            });

        let outcome = chain.authenticate(&ApiRequest::new("GET", "/"));
        assert!(matches!(outcome, Err(AuthError::Expired { .. })));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_secured_requires_every_process() {
        let chain = SecuredAuthentication::new()
            .with_process(NullAuthentication)
            .with_process(HashAuthenticator::new("key"));

        assert!(chain.authenticate(&signed_request("key")).is_ok());
        assert!(chain.authenticate(&signed_request("other")).is_err());
    }

    #[test]
    fn test_empty_secured_chain_passes() {
        let chain = SecuredAuthentication::new();
        assert!(chain.authenticate(&ApiRequest::new("GET", "/")).is_ok());
        assert!(chain.process_names().is_empty());
    }
}
