//! Deployment environment detection

use serde::{Deserialize, Serialize};

/// Deployment environment
///
/// Drives cookie policy: production serves the frontend cross-site, so the
/// refresh cookie uses `SameSite=None; Secure` there and `Strict` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Read `APP_ENV` (falls back to `Development`)
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}
