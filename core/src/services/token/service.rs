//! Token service implementation.
//!
//! Access tokens are stateless; refresh tokens are stateful only through
//! the SHA-256 digest stored on the account. Presenting a refresh token
//! whose digest no longer matches the stored one signals replay of a
//! rotated (or stolen) token: the stored digest is cleared so every
//! outstanding token dies and the user must log in again.

use constant_time_eq::constant_time_eq;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use tracing::warn;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::{AccessClaims, RefreshClaims, TokenPair};
use crate::domain::value_objects::sha256_hex;
use crate::errors::{DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Service for minting, verifying and rotating session tokens
#[derive(Debug, Clone)]
pub struct TokenService {
    config: TokenServiceConfig,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        Self { config }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation
    }

    fn map_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
        match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }

    /// Mint a short-lived access token embedding subject id and role
    pub fn issue_access_token(&self, account: &Account) -> DomainResult<String> {
        let claims = AccessClaims::new(
            account.id,
            account.role,
            self.config.access_ttl_seconds,
            &self.config.issuer,
            &self.config.audience,
        );
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.access_secret.as_bytes()),
        )
        .map_err(|_| TokenError::GenerationFailed.into())
    }

    /// Verify an access token's signature, expiry, issuer and audience
    pub fn verify_access_token(&self, raw: &str) -> DomainResult<AccessClaims> {
        let data = decode::<AccessClaims>(
            raw,
            &DecodingKey::from_secret(self.config.access_secret.as_bytes()),
            &self.validation(),
        )
        .map_err(Self::map_decode_error)?;
        Ok(data.claims)
    }

    /// Mint a refresh token, storing only its digest on the account.
    ///
    /// The caller persists the account and transports the raw token in an
    /// HTTP-only cookie.
    pub fn issue_refresh_token(&self, account: &mut Account) -> DomainResult<String> {
        let claims = RefreshClaims::new(
            account.id,
            self.config.refresh_ttl_seconds,
            &self.config.issuer,
            &self.config.audience,
        );
        let raw = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.refresh_secret.as_bytes()),
        )
        .map_err(|_| TokenError::GenerationFailed)?;

        account.set_refresh_token_hash(sha256_hex(&raw));
        Ok(raw)
    }

    /// Mint a fresh access + refresh pair for the account
    pub fn issue_pair(&self, account: &mut Account) -> DomainResult<TokenPair> {
        let access_token = self.issue_access_token(account)?;
        let refresh_token = self.issue_refresh_token(account)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_ttl_seconds,
            refresh_expires_in: self.config.refresh_ttl_seconds,
        })
    }

    /// Decode a refresh token's claims (signature + expiry + iss/aud).
    ///
    /// The caller uses the subject to load the account, then finishes
    /// with [`rotate`](Self::rotate).
    pub fn decode_refresh_token(&self, raw: &str) -> DomainResult<RefreshClaims> {
        let data = decode::<RefreshClaims>(
            raw,
            &DecodingKey::from_secret(self.config.refresh_secret.as_bytes()),
            &self.validation(),
        )
        .map_err(Self::map_decode_error)?;
        Ok(data.claims)
    }

    /// Rotate the session: verify the presented token's digest against
    /// the stored one, then mint a fresh pair.
    ///
    /// A digest mismatch means the presented token was already rotated or
    /// never ours; the stored digest is cleared (forcing re-login) and
    /// the call fails. The caller must persist the account in both the
    /// success and the mismatch case.
    pub fn rotate(&self, raw: &str, account: &mut Account) -> DomainResult<TokenPair> {
        let stored = match &account.refresh_token_hash {
            Some(digest) => digest.clone(),
            None => return Err(TokenError::RefreshMismatch.into()),
        };

        let presented = sha256_hex(raw);
        if !constant_time_eq(presented.as_bytes(), stored.as_bytes()) {
            warn!(account_id = %account.id, "refresh token reuse detected, revoking session");
            account.clear_refresh_token();
            return Err(TokenError::RefreshMismatch.into());
        }

        self.issue_pair(account)
    }

    /// Revoke the stored refresh-token digest (logout)
    pub fn revoke(&self, account: &mut Account) {
        account.clear_refresh_token();
    }
}
