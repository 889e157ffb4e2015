//! Authentication orchestrator: registration, OTP verification, login
//! with lockout, session refresh, and the password flows.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthService, RegisterRequest};
