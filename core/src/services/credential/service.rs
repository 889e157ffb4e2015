//! Credential service implementation

use chrono::Duration;
use rand::Rng;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::HashedSecret;
use crate::errors::{DomainError, DomainResult, ValidationError};

/// Configuration for the credential service
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    pub min_password_length: usize,

    /// OTP validity window in seconds
    pub otp_ttl_seconds: i64,

    /// Reset token validity window in seconds
    pub reset_token_ttl_seconds: i64,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 10,
            min_password_length: 8,
            otp_ttl_seconds: 600,         // 10 minutes
            reset_token_ttl_seconds: 900, // 15 minutes
        }
    }
}

/// Service owning password, OTP and reset-token handling
#[derive(Debug, Clone, Default)]
pub struct CredentialService {
    config: CredentialConfig,
}

impl CredentialService {
    pub fn new(config: CredentialConfig) -> Self {
        Self { config }
    }

    /// Hash a plaintext password and store it on the account.
    ///
    /// Rejects passwords shorter than the configured minimum before any
    /// hashing happens.
    pub fn set_password(&self, account: &mut Account, plain: &str) -> DomainResult<()> {
        if plain.len() < self.config.min_password_length {
            return Err(ValidationError::WeakPassword {
                min_length: self.config.min_password_length,
            }
            .into());
        }
        let hash = bcrypt::hash(plain, self.config.bcrypt_cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))?;
        account.set_password_hash(hash);
        Ok(())
    }

    /// Verify a plaintext password against the stored hash.
    ///
    /// Returns `false` (not an error) when no hash is set.
    pub fn verify_password(&self, account: &Account, plain: &str) -> bool {
        match &account.password_hash {
            Some(hash) => bcrypt::verify(plain, hash).unwrap_or(false),
            None => false,
        }
    }

    /// Issue a 6-digit OTP, storing only its digest with a 10-minute
    /// expiry. Returns the plaintext code for delivery; the caller must
    /// not persist it.
    pub fn issue_otp(&self, account: &mut Account) -> String {
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32));
        let secret =
            HashedSecret::from_plain(&code, Duration::seconds(self.config.otp_ttl_seconds));
        account.set_otp(secret);
        code
    }

    /// Verify an OTP: digest must match and expiry must be strictly in
    /// the future. On success the OTP slot is cleared and the account is
    /// marked verified.
    pub fn verify_otp(&self, account: &mut Account, code: &str) -> bool {
        let valid = account
            .otp
            .as_ref()
            .map(|secret| secret.matches(code))
            .unwrap_or(false);
        if valid {
            account.clear_otp();
            account.verify();
        }
        valid
    }

    /// Issue a password-reset token from 32 random bytes, stored as a
    /// digest with a 15-minute expiry. Returns the raw hex token.
    pub fn issue_reset_token(&self, account: &mut Account) -> String {
        let bytes: [u8; 32] = rand::thread_rng().gen();
        let token = hex::encode(bytes);
        let secret = HashedSecret::from_plain(
            &token,
            Duration::seconds(self.config.reset_token_ttl_seconds),
        );
        account.set_reset_token(secret);
        token
    }

    /// Verify a reset token with the same hash-and-expire rule as the OTP
    pub fn verify_reset_token(&self, account: &Account, token: &str) -> bool {
        account
            .reset_token
            .as_ref()
            .map(|secret| secret.matches(token))
            .unwrap_or(false)
    }
}
