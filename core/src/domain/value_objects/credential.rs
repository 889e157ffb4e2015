//! Hashed secret value object.
//!
//! OTPs and password-reset tokens are stored only as SHA-256 digests paired
//! with an expiry; the plaintext exists just long enough to be delivered to
//! the user. The same digest helper backs refresh-token storage.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of an arbitrary string
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// A single-use secret stored as digest + expiry.
///
/// Never holds plaintext. Matching requires both the digest to compare
/// equal (constant time) and the expiry to be strictly in the future.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedSecret {
    /// Hex-encoded SHA-256 digest of the secret
    pub digest_hex: String,

    /// Instant after which the secret is dead even with a matching digest
    pub expires_at: DateTime<Utc>,
}

impl HashedSecret {
    /// Hash a plaintext secret with a time-to-live from now
    pub fn from_plain(plain: &str, ttl: Duration) -> Self {
        Self {
            digest_hex: sha256_hex(plain),
            expires_at: Utc::now() + ttl,
        }
    }

    /// Whether the expiry is still strictly in the future
    pub fn is_live(&self) -> bool {
        Utc::now() < self.expires_at
    }

    /// Constant-time digest comparison AND liveness check
    pub fn matches(&self, plain: &str) -> bool {
        let candidate = sha256_hex(plain);
        constant_time_eq(candidate.as_bytes(), self.digest_hex.as_bytes()) && self.is_live()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_secret_within_ttl() {
        let secret = HashedSecret::from_plain("123456", Duration::minutes(10));
        assert!(secret.is_live());
        assert!(secret.matches("123456"));
        assert!(!secret.matches("654321"));
    }

    #[test]
    fn test_expired_secret_never_matches() {
        let mut secret = HashedSecret::from_plain("123456", Duration::minutes(10));
        // One tick past expiry fails even with the correct code
        secret.expires_at = Utc::now() - Duration::seconds(1);
        assert!(!secret.is_live());
        assert!(!secret.matches("123456"));
    }

    #[test]
    fn test_digest_is_not_plaintext() {
        let secret = HashedSecret::from_plain("123456", Duration::minutes(10));
        assert_ne!(secret.digest_hex, "123456");
        assert_eq!(secret.digest_hex.len(), 64);
    }

    #[test]
    fn test_sha256_hex_stable() {
        assert_eq!(sha256_hex("abc"), sha256_hex("abc"));
        assert_ne!(sha256_hex("abc"), sha256_hex("abd"));
    }
}
