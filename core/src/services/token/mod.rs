//! Session issuance: JWT access tokens and rotating refresh tokens.

mod config;
mod service;

pub use config::TokenServiceConfig;
pub use service::TokenService;
