//! Authentication and credential configuration

use serde::{Deserialize, Serialize};

use super::{env_parse, env_var};

/// JWT signing configuration
///
/// Access and refresh tokens are signed with separate secrets so that a
/// leaked access secret does not compromise long-lived sessions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret for signing access tokens
    pub access_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from("change-me-in-production"),
            refresh_secret: String::from("change-me-too-in-production"),
            access_token_expiry: 900,      // 15 minutes
            refresh_token_expiry: 604_800, // 7 days
            issuer: String::from("nestbook"),
            audience: String::from("nestbook-api"),
        }
    }
}

impl JwtConfig {
    /// Populate from `JWT_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_secret: env_var("JWT_SECRET").unwrap_or(defaults.access_secret),
            refresh_secret: env_var("JWT_REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
            access_token_expiry: env_parse("JWT_ACCESS_EXPIRY_SECONDS", defaults.access_token_expiry),
            refresh_token_expiry: env_parse("JWT_REFRESH_EXPIRY_SECONDS", defaults.refresh_token_expiry),
            issuer: env_var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: env_var("JWT_AUDIENCE").unwrap_or(defaults.audience),
        }
    }

    /// Check if using a default secret (security warning at startup)
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == "change-me-in-production"
            || self.refresh_secret == "change-me-too-in-production"
    }
}

/// Credential and lockout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    pub min_password_length: usize,

    /// OTP validity window in seconds
    pub otp_ttl_seconds: i64,

    /// Password reset token validity window in seconds
    pub reset_token_ttl_seconds: i64,

    /// Failed login attempts before the account is locked
    pub lockout_threshold: u32,

    /// Duration of a lockout in seconds
    pub lockout_duration_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 10,
            min_password_length: 8,
            otp_ttl_seconds: 600,         // 10 minutes
            reset_token_ttl_seconds: 900, // 15 minutes
            lockout_threshold: 5,
            lockout_duration_seconds: 600, // 10 minutes
        }
    }
}

impl AuthConfig {
    /// Populate from `AUTH_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bcrypt_cost: env_parse("AUTH_BCRYPT_COST", defaults.bcrypt_cost),
            min_password_length: env_parse("AUTH_MIN_PASSWORD_LENGTH", defaults.min_password_length),
            otp_ttl_seconds: env_parse("AUTH_OTP_TTL_SECONDS", defaults.otp_ttl_seconds),
            reset_token_ttl_seconds: env_parse(
                "AUTH_RESET_TOKEN_TTL_SECONDS",
                defaults.reset_token_ttl_seconds,
            ),
            lockout_threshold: env_parse("AUTH_LOCKOUT_THRESHOLD", defaults.lockout_threshold),
            lockout_duration_seconds: env_parse(
                "AUTH_LOCKOUT_DURATION_SECONDS",
                defaults.lockout_duration_seconds,
            ),
        }
    }
}
