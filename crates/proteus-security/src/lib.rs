//! Proteus Security - Authentication Process Chain
//!
//! This crate provides request authentication for Proteus through a small
//! closed set of swappable processes:
//!
//! - [`NullAuthentication`] accepts everything (the default binding)
//! - [`HashAuthenticator`] verifies an HMAC-SHA256 request signature
//! - [`TimeoutAuthenticator`] enforces a timestamp window against replay
//! - [`BasicAuthentication`] checks a credential pair against a store
//! - [`OAuth2Authentication`] validates a bearer token
//! - [`SecuredAuthentication`] chains sub-processes with AND semantics
//!
//! [`AuthenticationContext`] holds exactly one active process, swappable at
//! configuration time, and delegates every `authenticate` call to it.
//!
//! # Example
//!
//! ```
//! use proteus_core::{ApiRequest, Value};
//! use proteus_security::{
//!     AuthenticationContext, HashAuthenticator, HashCalculator, SecuredAuthentication,
//!     AUTH_TOKEN_HEADER,
//! };
//!
//! let mut context = AuthenticationContext::new();
//! context.set_process(
//!     SecuredAuthentication::new().with_process(HashAuthenticator::new("private-key")),
//! );
//!
//! let mut request = ApiRequest::new("POST", "/payments");
//! request.data_mut().insert("amount", Value::Int(100));
//! let signature = HashCalculator::new("private-key").compute(request.data());
//! let request = request.with_header(AUTH_TOKEN_HEADER, signature);
//!
//! assert!(context.authenticate(&request).is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod error;
mod hash;
mod process;

pub use context::{AuthOutcome, AuthenticationContext};
pub use error::{AuthError, AuthResult};
pub use hash::HashCalculator;
pub use process::{
    AuthenticationProcess, BasicAuthentication, CredentialStore, HashAuthenticator,
    NullAuthentication, OAuth2Authentication, SecuredAuthentication, TimeoutAuthenticator,
    TokenValidator, AUTH_TOKEN_HEADER,
};
