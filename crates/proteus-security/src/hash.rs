//! Keyed-hash request signing.

use hmac::{Hmac, Mac};
use proteus_core::Resource;
use proteus_mapping::QueryMapper;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes and verifies HMAC-SHA256 signatures over a request's canonical
/// query representation.
///
/// The signing input is the ordered `key=value` pair sequence the query
/// mapper produces from the request data, joined with `&` before
/// percent-escaping. Both ends must therefore serialize fields in the same
/// order for signatures to agree. Signatures travel as lowercase hex.
///
/// # Example
///
/// ```
/// use proteus_core::{Resource, Value};
/// use proteus_security::HashCalculator;
///
/// let calculator = HashCalculator::new("secret-key");
/// let mut data = Resource::new();
/// data.insert("amount", Value::Int(100));
///
/// let signature = calculator.compute(&data);
/// assert!(calculator.verify(&data, &signature));
/// assert!(!calculator.verify(&data, "deadbeef"));
/// ```
#[derive(Debug, Clone)]
pub struct HashCalculator {
    private_key: String,
}

impl HashCalculator {
    /// Creates a calculator keyed with the shared private key.
    #[must_use]
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
        }
    }

    /// The canonical signing input for a request representation.
    #[must_use]
    pub fn canonical_input(data: &Resource) -> String {
        QueryMapper::flatten(data)
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Computes the lowercase hex signature for a request representation.
    #[must_use]
    pub fn compute(&self, data: &Resource) -> String {
        let mut mac = HmacSha256::new_from_slice(self.private_key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(Self::canonical_input(data).as_bytes());
        hex_encode(&mac.finalize().into_bytes())
    }

    /// Verifies a client-supplied signature in constant time.
    #[must_use]
    pub fn verify(&self, data: &Resource, supplied: &str) -> bool {
        let expected = self.compute(data);
        expected.as_bytes().ct_eq(supplied.as_bytes()).into()
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
