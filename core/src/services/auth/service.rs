//! Auth service implementation.
//!
//! Orchestrates the credential, token and lockout services over the
//! account repository and the notification dispatcher. The lockout check
//! always runs before the password verifier so a locked account leaks
//! nothing about whether the password was right.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use nb_shared::utils::validation::{is_valid_email, normalize_email};

use crate::domain::entities::account::{Account, LoginEvent};
use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::sha256_hex;
use crate::errors::{
    AuthenticationError, ConflictError, DomainResult, NotFoundError, ValidationError,
};
use crate::repositories::AccountRepository;
use crate::services::credential::CredentialService;
use crate::services::lockout::LockoutPolicy;
use crate::services::notification::{
    login_alert_email, otp_email, password_change_email, password_reset_email,
    NotificationDispatcher,
};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Request to register a new account
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Service orchestrating the whole authentication lifecycle
pub struct AuthService<A, N>
where
    A: AccountRepository,
    N: NotificationDispatcher,
{
    accounts: Arc<A>,
    notifier: Arc<N>,
    credentials: CredentialService,
    tokens: TokenService,
    lockout: LockoutPolicy,
    config: AuthServiceConfig,
}

impl<A, N> AuthService<A, N>
where
    A: AccountRepository,
    N: NotificationDispatcher,
{
    pub fn new(
        accounts: Arc<A>,
        notifier: Arc<N>,
        credentials: CredentialService,
        tokens: TokenService,
        lockout: LockoutPolicy,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            accounts,
            notifier,
            credentials,
            tokens,
            lockout,
            config,
        }
    }

    /// Register a new, unverified account and deliver its OTP.
    ///
    /// New accounts always start as regular users; roles are only ever
    /// escalated by an administrator out of band. OTP delivery failure
    /// surfaces to the caller but leaves the account in place, so a
    /// resend can recover the flow.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<Account> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }
        let email = normalize_email(&request.email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let mut account = Account::new(name.to_string(), email);
        self.credentials.set_password(&mut account, &request.password)?;
        let code = self.credentials.issue_otp(&mut account);

        let account = self.accounts.create(account).await?;
        info!(account_id = %account.id, "account registered");

        self.notifier
            .send(otp_email(&account.email, &account.name, &code))
            .await?;
        Ok(account)
    }

    /// Verify an account with its OTP
    pub async fn verify_otp(&self, email: &str, code: &str) -> DomainResult<Account> {
        let email = normalize_email(email);
        let mut account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthenticationError::InvalidOtp)?;

        if account.verified {
            return Err(ConflictError::AlreadyVerified.into());
        }
        if !self.credentials.verify_otp(&mut account, code) {
            return Err(AuthenticationError::InvalidOtp.into());
        }

        let account = self.accounts.update(account).await?;
        info!(account_id = %account.id, "account verified");
        Ok(account)
    }

    /// Issue and deliver a fresh OTP to an unverified account
    pub async fn resend_otp(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let mut account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(NotFoundError::Account)?;

        if account.verified {
            return Err(ConflictError::AlreadyVerified.into());
        }

        let code = self.credentials.issue_otp(&mut account);
        let account = self.accounts.update(account).await?;
        self.notifier
            .send(otp_email(&account.email, &account.name, &code))
            .await?;
        Ok(())
    }

    /// Authenticate and open a session.
    ///
    /// Check order: account lookup, lockout, password, verified flag. A
    /// failed password goes through the repository's atomic failure
    /// transition; the resulting state decides between "locked" and
    /// "N attempts remaining". The login-alert email is best-effort.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: LoginEvent,
    ) -> DomainResult<(Account, TokenPair)> {
        let email = normalize_email(email);
        let mut account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthenticationError::InvalidCredentials {
                attempts_remaining: self.lockout.threshold,
            })?;

        if self.lockout.is_locked(&account) {
            return Err(AuthenticationError::AccountLocked {
                minutes: self.lockout.remaining_lock_minutes(&account).unwrap_or(1),
            }
            .into());
        }

        if !self.credentials.verify_password(&account, password) {
            let updated = self
                .accounts
                .record_login_failure(account.id, &self.lockout)
                .await?;
            if self.lockout.is_locked(&updated) {
                return Err(AuthenticationError::AccountLocked {
                    minutes: self.lockout.remaining_lock_minutes(&updated).unwrap_or(1),
                }
                .into());
            }
            return Err(AuthenticationError::InvalidCredentials {
                attempts_remaining: self.lockout.attempts_remaining(&updated),
            }
            .into());
        }

        if !account.verified {
            return Err(AuthenticationError::AccountNotVerified.into());
        }

        self.lockout.record_success(&mut account);
        account.record_login(client.clone());
        let pair = self.tokens.issue_pair(&mut account)?;
        let account = self.accounts.update(account).await?;
        info!(account_id = %account.id, ip = %client.ip, "login succeeded");

        if let Err(error) = self
            .notifier
            .send(login_alert_email(
                &account.email,
                &account.name,
                &client.ip,
                &client.user_agent,
            ))
            .await
        {
            warn!(account_id = %account.id, %error, "login alert email failed");
        }

        Ok((account, pair))
    }

    /// Rotate a refresh token into a fresh session.
    ///
    /// The account state is persisted in both outcomes: on success the
    /// new digest, on replay the cleared one.
    pub async fn refresh(&self, raw_token: &str) -> DomainResult<(Account, TokenPair)> {
        let claims = self.tokens.decode_refresh_token(raw_token)?;
        let account_id = claims.account_id()?;
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(NotFoundError::Account)?;

        match self.tokens.rotate(raw_token, &mut account) {
            Ok(pair) => {
                let account = self.accounts.update(account).await?;
                Ok((account, pair))
            }
            Err(error) => {
                self.accounts.update(account).await?;
                Err(error)
            }
        }
    }

    /// Load the account behind a session (current-user lookups)
    pub async fn get_account(&self, account_id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| NotFoundError::Account.into())
    }

    /// Close the session by revoking the stored refresh-token digest
    pub async fn logout(&self, account_id: Uuid) -> DomainResult<()> {
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(NotFoundError::Account)?;
        self.tokens.revoke(&mut account);
        self.accounts.update(account).await?;
        info!(%account_id, "logged out");
        Ok(())
    }

    /// Start the password-reset flow: issue a token and mail the link.
    ///
    /// When delivery fails the freshly issued token is cleared again, so
    /// no live secret exists that the user never received.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let mut account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(NotFoundError::Account)?;

        let token = self.credentials.issue_reset_token(&mut account);
        let mut account = self.accounts.update(account).await?;

        let mail = password_reset_email(
            &account.email,
            &account.name,
            &self.config.reset_url(&token),
        );
        if let Err(error) = self.notifier.send(mail).await {
            account.clear_reset_token();
            self.accounts.update(account).await?;
            return Err(error.into());
        }
        Ok(())
    }

    /// Complete the password-reset flow.
    ///
    /// Verifies the token, re-hashes the new password, clears the reset
    /// slot and revokes the refresh token so every open session dies.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> DomainResult<Account> {
        let digest = sha256_hex(token);
        let mut account = self
            .accounts
            .find_by_reset_digest(&digest)
            .await?
            .ok_or(AuthenticationError::InvalidResetToken)?;

        if !self.credentials.verify_reset_token(&account, token) {
            return Err(AuthenticationError::InvalidResetToken.into());
        }

        self.credentials.set_password(&mut account, new_password)?;
        account.clear_reset_token();
        self.tokens.revoke(&mut account);
        let account = self.accounts.update(account).await?;
        info!(account_id = %account.id, "password reset completed");

        if let Err(error) = self
            .notifier
            .send(password_change_email(&account.email, &account.name))
            .await
        {
            warn!(account_id = %account.id, %error, "password change alert failed");
        }
        Ok(account)
    }

    /// Change the password of a logged-in account.
    ///
    /// The old password must verify. The session is re-minted, which
    /// rotates the refresh digest and kills any other open session.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<(Account, TokenPair)> {
        let mut account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(NotFoundError::Account)?;

        if !self.credentials.verify_password(&account, old_password) {
            return Err(AuthenticationError::WrongOldPassword.into());
        }

        self.credentials.set_password(&mut account, new_password)?;
        let pair = self.tokens.issue_pair(&mut account)?;
        let account = self.accounts.update(account).await?;
        info!(account_id = %account.id, "password changed");

        if let Err(error) = self
            .notifier
            .send(password_change_email(&account.email, &account.name))
            .await
        {
            warn!(account_id = %account.id, %error, "password change alert failed");
        }
        Ok((account, pair))
    }
}
