//! Account entity representing a registered user in the NestBook system.
//!
//! The account exclusively owns its credential fields: the password hash,
//! the OTP and reset-token secrets, the refresh-token digest, and the
//! login-attempt counters. None of these ever appear in API responses;
//! the DTO layer only maps the public fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::HashedSecret;

/// Number of login history entries retained per account
pub const LOGIN_HISTORY_CAP: usize = 10;

/// Role of an account in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Lists properties and manages bookings against them
    Agent,
    /// Regular customer
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Agent => "Agent",
            Role::User => "User",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "Admin" => Some(Role::Admin),
            "Agent" => Some(Role::Agent),
            "User" => Some(Role::User),
            _ => None,
        }
    }
}

/// One entry in the bounded login history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginEvent {
    pub ip: String,
    pub user_agent: String,
    pub time: DateTime<Utc>,
}

impl LoginEvent {
    pub fn new(ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            user_agent: user_agent.into(),
            time: Utc::now(),
        }
    }
}

/// Account entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email, stored trimmed and lowercased; unique case-insensitively
    pub email: String,

    /// bcrypt hash of the password; never the plaintext
    pub password_hash: Option<String>,

    /// Role of the account
    pub role: Role,

    /// Whether the email has been verified via OTP
    pub verified: bool,

    /// Live OTP secret, if one has been issued
    pub otp: Option<HashedSecret>,

    /// Live password-reset secret, if one has been issued
    pub reset_token: Option<HashedSecret>,

    /// SHA-256 digest of the current refresh token; None when logged out
    pub refresh_token_hash: Option<String>,

    /// Consecutive failed login attempts
    pub login_attempts: u32,

    /// Lockout expiry; the account is locked while this is in the future
    pub lock_until: Option<DateTime<Utc>>,

    /// Timestamp of the last successful login
    pub last_login_at: Option<DateTime<Utc>>,

    /// Bounded login log, newest last
    pub login_history: Vec<LoginEvent>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new unverified account.
    ///
    /// The caller is responsible for normalizing the email and hashing the
    /// password before setting it.
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: None,
            role: Role::User,
            verified: false,
            otp: None,
            reset_token: None,
            refresh_token_hash: None,
            login_attempts: 0,
            lock_until: None,
            last_login_at: None,
            login_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Stores a new password hash
    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = Some(hash);
        self.touch();
    }

    /// Marks the account as verified
    pub fn verify(&mut self) {
        self.verified = true;
        self.touch();
    }

    /// Stores a freshly issued OTP secret.
    ///
    /// At most one OTP or reset-token secret is live at a time, so any
    /// pending reset token is invalidated here.
    pub fn set_otp(&mut self, secret: HashedSecret) {
        self.otp = Some(secret);
        self.reset_token = None;
        self.touch();
    }

    /// Clears the OTP slot after successful verification
    pub fn clear_otp(&mut self) {
        self.otp = None;
        self.touch();
    }

    /// Stores a freshly issued reset-token secret, invalidating any OTP
    pub fn set_reset_token(&mut self, secret: HashedSecret) {
        self.reset_token = Some(secret);
        self.otp = None;
        self.touch();
    }

    /// Clears the reset-token slot after a completed reset
    pub fn clear_reset_token(&mut self) {
        self.reset_token = None;
        self.touch();
    }

    /// Stores the digest of the current refresh token
    pub fn set_refresh_token_hash(&mut self, digest_hex: String) {
        self.refresh_token_hash = Some(digest_hex);
        self.touch();
    }

    /// Clears the refresh-token digest (logout / revocation)
    pub fn clear_refresh_token(&mut self) {
        self.refresh_token_hash = None;
        self.touch();
    }

    /// Records a successful login: timestamp plus a bounded history entry
    pub fn record_login(&mut self, event: LoginEvent) {
        self.last_login_at = Some(event.time);
        self.login_history.push(event);
        if self.login_history.len() > LOGIN_HISTORY_CAP {
            let excess = self.login_history.len() - LOGIN_HISTORY_CAP;
            self.login_history.drain(..excess);
        }
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_account_defaults() {
        let account = Account::new("Ada".to_string(), "ada@example.com".to_string());
        assert_eq!(account.role, Role::User);
        assert!(!account.verified);
        assert!(account.password_hash.is_none());
        assert!(account.otp.is_none());
        assert!(account.refresh_token_hash.is_none());
        assert_eq!(account.login_attempts, 0);
        assert!(account.lock_until.is_none());
        assert!(account.login_history.is_empty());
    }

    #[test]
    fn test_issuing_otp_invalidates_reset_token() {
        let mut account = Account::new("Ada".to_string(), "ada@example.com".to_string());
        account.set_reset_token(HashedSecret::from_plain("token", Duration::minutes(15)));
        assert!(account.reset_token.is_some());

        account.set_otp(HashedSecret::from_plain("123456", Duration::minutes(10)));
        assert!(account.otp.is_some());
        assert!(account.reset_token.is_none());
    }

    #[test]
    fn test_issuing_reset_token_invalidates_otp() {
        let mut account = Account::new("Ada".to_string(), "ada@example.com".to_string());
        account.set_otp(HashedSecret::from_plain("123456", Duration::minutes(10)));

        account.set_reset_token(HashedSecret::from_plain("token", Duration::minutes(15)));
        assert!(account.reset_token.is_some());
        assert!(account.otp.is_none());
    }

    #[test]
    fn test_login_history_is_capped() {
        let mut account = Account::new("Ada".to_string(), "ada@example.com".to_string());
        for i in 0..15 {
            account.record_login(LoginEvent::new(format!("10.0.0.{i}"), "test-agent"));
        }
        assert_eq!(account.login_history.len(), LOGIN_HISTORY_CAP);
        // Newest entries are kept, oldest dropped
        assert_eq!(account.login_history.first().unwrap().ip, "10.0.0.5");
        assert_eq!(account.login_history.last().unwrap().ip, "10.0.0.14");
        assert!(account.last_login_at.is_some());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Agent, Role::User] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("SuperAdmin"), None);
    }
}
