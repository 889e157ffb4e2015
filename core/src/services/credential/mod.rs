//! Credential store: password hashing, OTP and reset-token lifecycles.
//!
//! Plaintext secrets exist only in the return value of the issue methods;
//! the account stores bcrypt hashes (passwords) or SHA-256 digests with
//! expiry (OTP, reset token).

mod service;

pub use service::{CredentialConfig, CredentialService};
