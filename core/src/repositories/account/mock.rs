//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{ConflictError, DomainError, NotFoundError};
use crate::services::lockout::LockoutPolicy;

use super::trait_::AccountRepository;

/// Mock account repository for testing
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_reset_digest(
        &self,
        digest_hex: &str,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| {
                a.reset_token
                    .as_ref()
                    .map(|secret| secret.digest_hex == digest_hex)
                    .unwrap_or(false)
            })
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(ConflictError::DuplicateEmail.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(NotFoundError::Account.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn record_login_failure(
        &self,
        id: Uuid,
        policy: &LockoutPolicy,
    ) -> Result<Account, DomainError> {
        // The write lock is held across the whole read-modify-write, so
        // concurrent failures serialize exactly like the row lock in MySQL.
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or(NotFoundError::Account)?;
        policy.record_failure(account);
        Ok(account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str) -> Account {
        Account::new("Test".to_string(), email.to_string())
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = MockAccountRepository::new();
        let created = repo.create(account("a@example.com")).await.unwrap();

        let by_id = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(by_id, Some(created.clone()));

        let by_email = repo.find_by_email("a@example.com").await.unwrap();
        assert_eq!(by_email, Some(created));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MockAccountRepository::new();
        repo.create(account("a@example.com")).await.unwrap();

        let result = repo.create(account("a@example.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::Conflict(ConflictError::DuplicateEmail))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let repo = MockAccountRepository::new();
        let result = repo.update(account("ghost@example.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::NotFound(NotFoundError::Account))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_failures_all_counted() {
        let repo = Arc::new(MockAccountRepository::new());
        let created = repo.create(account("a@example.com")).await.unwrap();
        let policy = LockoutPolicy::default();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let repo = Arc::clone(&repo);
            let id = created.id;
            handles.push(tokio::spawn(async move {
                repo.record_login_failure(id, &LockoutPolicy::default())
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.login_attempts, 4);
        assert!(!policy.is_locked(&stored));
    }
}
