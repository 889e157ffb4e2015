//! HTTP server configuration

use serde::{Deserialize, Serialize};

use super::{env_parse, env_var};

/// Bind address configuration for the API server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Origin allowed by CORS (the frontend URL)
    pub frontend_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            frontend_url: String::from("http://localhost:3000"),
        }
    }
}

impl ServerConfig {
    /// Populate from `SERVER_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_parse("SERVER_PORT", defaults.port),
            frontend_url: env_var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
        }
    }

    /// Socket address string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
