//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;
use crate::services::lockout::LockoutPolicy;

/// Repository trait for Account entity persistence operations.
///
/// Emails are unique case-insensitively; implementations receive
/// already-normalized (trimmed, lowercased) emails from the services.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its normalized email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find the account holding a live reset token with this digest.
    ///
    /// Expiry is checked by the caller; this only matches on the digest.
    async fn find_by_reset_digest(&self, digest_hex: &str)
        -> Result<Option<Account>, DomainError>;

    /// Create a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The created account
    /// * `Err(DomainError::Conflict)` - An account with this email exists
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist updated account state
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Apply the lockout policy's failure transition atomically.
    ///
    /// The read-modify-write must be consistent per account: two
    /// concurrent failed logins may never collapse into a single
    /// increment. Implementations run the policy under their own
    /// concurrency guard (a row lock in MySQL, the map lock in the mock)
    /// and return the post-transition account state.
    async fn record_login_failure(
        &self,
        id: Uuid,
        policy: &LockoutPolicy,
    ) -> Result<Account, DomainError>;
}
