//! Auth endpoint DTOs.

use serde::{Deserialize, Serialize};

use nb_core::domain::entities::account::Account;
use nb_core::domain::entities::token::TokenPair;

use super::AccountDto;

/// Body for POST /auth/register
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body for POST /auth/verify-otp
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Body for endpoints addressed only by email (resend-otp, forgot)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub email: String,
}

/// Body for POST /auth/login
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body for POST /auth/refresh when the cookie is unavailable
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Body for POST /auth/password/reset
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Body for POST /auth/password/change
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Session payload returned by login, refresh and password change.
///
/// The refresh token is NOT here; it travels only in the HTTP-only
/// cookie set alongside this body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub account: AccountDto,
}

impl SessionResponse {
    pub fn new(account: &Account, pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access_token.clone(),
            expires_in: pair.access_expires_in,
            account: AccountDto::from(account),
        }
    }
}
