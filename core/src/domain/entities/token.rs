//! Token entities for JWT-based sessions.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::Role;
use crate::errors::TokenError;

/// Claims structure for the access-token JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (account id)
    pub sub: String,

    /// Role carried by the token
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Unique token identifier
    pub jti: String,
}

impl AccessClaims {
    /// Creates claims for an access token with the given TTL
    pub fn new(account_id: Uuid, role: Role, ttl_seconds: i64, issuer: &str, audience: &str) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);
        Self {
            sub: account_id.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Account id parsed from the subject claim
    pub fn account_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Invalid)
    }

    /// Role parsed from the role claim
    pub fn parsed_role(&self) -> Result<Role, TokenError> {
        Role::parse(&self.role).ok_or(TokenError::Invalid)
    }
}

/// Claims structure for the refresh-token JWT payload.
///
/// Deliberately minimal: the subject plus standard temporal claims. All
/// authorization data is re-read from the account on refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

impl RefreshClaims {
    /// Creates claims for a refresh token with the given TTL
    pub fn new(account_id: Uuid, ttl_seconds: i64, issuer: &str, audience: &str) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);
        Self {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Account id parsed from the subject claim
    pub fn account_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Invalid)
    }
}

/// Token pair returned to the client after login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token, returned in the response body
    pub access_token: String,

    /// Raw refresh token, transported only in an HTTP-only cookie
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims_round_trip() {
        let id = Uuid::new_v4();
        let claims = AccessClaims::new(id, Role::Agent, 900, "nestbook", "nestbook-api");
        assert_eq!(claims.account_id().unwrap(), id);
        assert_eq!(claims.parsed_role().unwrap(), Role::Agent);
        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(claims.iss, "nestbook");
    }

    #[test]
    fn test_refresh_claims_subject() {
        let id = Uuid::new_v4();
        let claims = RefreshClaims::new(id, 604_800, "nestbook", "nestbook-api");
        assert_eq!(claims.account_id().unwrap(), id);
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn test_bad_subject_is_invalid() {
        let mut claims = AccessClaims::new(Uuid::new_v4(), Role::User, 900, "i", "a");
        claims.sub = "not-a-uuid".to_string();
        assert_eq!(claims.account_id(), Err(TokenError::Invalid));
    }
}
