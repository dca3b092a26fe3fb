//! Stored credential digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::foundation::Email;

/// Plain SHA-256 digest of an account secret, salted only with the email.
///
/// This is a single fast hash, not a password hashing function; it only
/// keeps the plain secret off the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialDigest(String);

impl CredentialDigest {
    /// Digests `secret` for `email`.
    pub fn derive(email: &Email, secret: &str) -> Self {
        Self(hex_digest(email, secret))
    }

    /// Constant-time check of a candidate secret.
    pub fn matches(&self, email: &Email, candidate: &str) -> bool {
        let candidate = hex_digest(email, candidate);
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One SHA-256 pass over `email:secret`, hex encoded.
fn hex_digest(email: &Email, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}
