//! Token service configuration

/// Configuration for JWT issuance and validation
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for signing access tokens (HS256)
    pub access_secret: String,

    /// Secret for signing refresh tokens (HS256)
    pub refresh_secret: String,

    /// Access token time-to-live in seconds
    pub access_ttl_seconds: i64,

    /// Refresh token time-to-live in seconds
    pub refresh_ttl_seconds: i64,

    /// Issuer claim stamped on and required from every token
    pub issuer: String,

    /// Audience claim stamped on and required from every token
    pub audience: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from("change-me-in-production"),
            refresh_secret: String::from("change-me-too-in-production"),
            access_ttl_seconds: 900,       // 15 minutes
            refresh_ttl_seconds: 604_800,  // 7 days
            issuer: String::from("nestbook"),
            audience: String::from("nestbook-api"),
        }
    }
}
