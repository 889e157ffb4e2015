//! SMTP mail delivery configuration

use serde::{Deserialize, Serialize};

use super::{env_parse, env_var};

/// Outbound SMTP configuration for the notification dispatcher
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,

    /// SMTP submission port
    pub port: u16,

    /// Relay username
    pub username: String,

    /// Relay password
    pub password: String,

    /// From address used on every outbound mail
    pub from_address: String,

    /// Per-send timeout in seconds; a hung relay must not hang a request
    pub timeout_seconds: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_address: String::from("NestBook <no-reply@nestbook.example>"),
            timeout_seconds: 10,
        }
    }
}

impl SmtpConfig {
    /// Populate from `SMTP_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_var("SMTP_HOST").unwrap_or(defaults.host),
            port: env_parse("SMTP_PORT", defaults.port),
            username: env_var("SMTP_USERNAME").unwrap_or(defaults.username),
            password: env_var("SMTP_PASSWORD").unwrap_or(defaults.password),
            from_address: env_var("SMTP_FROM").unwrap_or(defaults.from_address),
            timeout_seconds: env_parse("SMTP_TIMEOUT_SECONDS", defaults.timeout_seconds),
        }
    }
}
