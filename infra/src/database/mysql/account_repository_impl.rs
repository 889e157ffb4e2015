//! MySQL implementation of the AccountRepository trait.
//!
//! Credential secrets are persisted as digest + expiry column pairs; the
//! login history is a JSON column bounded by the entity itself. The
//! failure transition runs inside a transaction holding the account row
//! lock, so concurrent failed logins serialize instead of losing counts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use nb_core::domain::entities::account::{Account, LoginEvent, Role};
use nb_core::domain::value_objects::HashedSecret;
use nb_core::errors::{ConflictError, DomainError, NotFoundError};
use nb_core::repositories::AccountRepository;
use nb_core::services::LockoutPolicy;

use crate::database::datastore_error;

const ACCOUNT_COLUMNS: &str = r#"
    id, name, email, password_hash, role, verified,
    otp_digest, otp_expires_at,
    reset_token_digest, reset_token_expires_at,
    refresh_token_hash, login_attempts, lock_until,
    last_login_at, login_history, created_at, updated_at
"#;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Pair up a digest column with its expiry column
    fn secret_from_columns(
        digest: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Option<HashedSecret> {
        match (digest, expires_at) {
            (Some(digest_hex), Some(expires_at)) => Some(HashedSecret {
                digest_hex,
                expires_at,
            }),
            _ => None,
        }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row.try_get("id").map_err(datastore_error)?;
        let role: String = row.try_get("role").map_err(datastore_error)?;
        let history_json: Option<String> =
            row.try_get("login_history").map_err(datastore_error)?;

        let login_history: Vec<LoginEvent> = match history_json {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                DomainError::internal(format!("corrupt login_history column: {e}"))
            })?,
            None => Vec::new(),
        };

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("invalid account id: {e}")))?,
            name: row.try_get("name").map_err(datastore_error)?,
            email: row.try_get("email").map_err(datastore_error)?,
            password_hash: row.try_get("password_hash").map_err(datastore_error)?,
            role: Role::parse(&role)
                .ok_or_else(|| DomainError::internal(format!("unknown role: {role}")))?,
            verified: row.try_get("verified").map_err(datastore_error)?,
            otp: Self::secret_from_columns(
                row.try_get("otp_digest").map_err(datastore_error)?,
                row.try_get("otp_expires_at").map_err(datastore_error)?,
            ),
            reset_token: Self::secret_from_columns(
                row.try_get("reset_token_digest").map_err(datastore_error)?,
                row.try_get("reset_token_expires_at")
                    .map_err(datastore_error)?,
            ),
            refresh_token_hash: row.try_get("refresh_token_hash").map_err(datastore_error)?,
            login_attempts: row
                .try_get::<u32, _>("login_attempts")
                .map_err(datastore_error)?,
            lock_until: row.try_get("lock_until").map_err(datastore_error)?,
            last_login_at: row.try_get("last_login_at").map_err(datastore_error)?,
            login_history,
            created_at: row.try_get("created_at").map_err(datastore_error)?,
            updated_at: row.try_get("updated_at").map_err(datastore_error)?,
        })
    }

    fn history_json(account: &Account) -> Result<String, DomainError> {
        serde_json::to_string(&account.login_history)
            .map_err(|e| DomainError::internal(format!("login_history serialization: {e}")))
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(datastore_error)?;
        row.map(|r| Self::row_to_account(&r)).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(datastore_error)?;
        row.map(|r| Self::row_to_account(&r)).transpose()
    }

    async fn find_by_reset_digest(
        &self,
        digest_hex: &str,
    ) -> Result<Option<Account>, DomainError> {
        let query =
            format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE reset_token_digest = ? LIMIT 1");
        let row = sqlx::query(&query)
            .bind(digest_hex)
            .fetch_optional(&self.pool)
            .await
            .map_err(datastore_error)?;
        row.map(|r| Self::row_to_account(&r)).transpose()
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, name, email, password_hash, role, verified,
                otp_digest, otp_expires_at,
                reset_token_digest, reset_token_expires_at,
                refresh_token_hash, login_attempts, lock_until,
                last_login_at, login_history, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .bind(account.verified)
            .bind(account.otp.as_ref().map(|s| s.digest_hex.clone()))
            .bind(account.otp.as_ref().map(|s| s.expires_at))
            .bind(account.reset_token.as_ref().map(|s| s.digest_hex.clone()))
            .bind(account.reset_token.as_ref().map(|s| s.expires_at))
            .bind(&account.refresh_token_hash)
            .bind(account.login_attempts)
            .bind(account.lock_until)
            .bind(account.last_login_at)
            .bind(Self::history_json(&account)?)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // The unique index on email turns a duplicate into a conflict
                if e.as_database_error()
                    .map(|d| d.is_unique_violation())
                    .unwrap_or(false)
                {
                    ConflictError::DuplicateEmail.into()
                } else {
                    datastore_error(e)
                }
            })?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                name = ?,
                password_hash = ?,
                role = ?,
                verified = ?,
                otp_digest = ?,
                otp_expires_at = ?,
                reset_token_digest = ?,
                reset_token_expires_at = ?,
                refresh_token_hash = ?,
                login_attempts = ?,
                lock_until = ?,
                last_login_at = ?,
                login_history = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.name)
            .bind(&account.password_hash)
            .bind(account.role.as_str())
            .bind(account.verified)
            .bind(account.otp.as_ref().map(|s| s.digest_hex.clone()))
            .bind(account.otp.as_ref().map(|s| s.expires_at))
            .bind(account.reset_token.as_ref().map(|s| s.digest_hex.clone()))
            .bind(account.reset_token.as_ref().map(|s| s.expires_at))
            .bind(&account.refresh_token_hash)
            .bind(account.login_attempts)
            .bind(account.lock_until)
            .bind(account.last_login_at)
            .bind(Self::history_json(&account)?)
            .bind(account.updated_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(datastore_error)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::Account.into());
        }
        Ok(account)
    }

    async fn record_login_failure(
        &self,
        id: Uuid,
        policy: &LockoutPolicy,
    ) -> Result<Account, DomainError> {
        let mut tx = self.pool.begin().await.map_err(datastore_error)?;

        // The row lock serializes concurrent failures for this account
        let select =
            format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ? LIMIT 1 FOR UPDATE");
        let row = sqlx::query(&select)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(datastore_error)?
            .ok_or(NotFoundError::Account)?;
        let mut account = Self::row_to_account(&row)?;

        policy.record_failure(&mut account);

        sqlx::query(
            "UPDATE accounts SET login_attempts = ?, lock_until = ?, updated_at = ? WHERE id = ?",
        )
        .bind(account.login_attempts)
        .bind(account.lock_until)
        .bind(account.updated_at)
        .bind(account.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(datastore_error)?;

        tx.commit().await.map_err(datastore_error)?;
        Ok(account)
    }
}
