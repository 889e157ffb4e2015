//! Public account representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nb_core::domain::entities::account::Account;

/// Account fields safe for API responses.
///
/// Password hash, OTP/reset secrets, refresh digest and the lockout
/// counters never leave the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role.as_str().to_string(),
            verified: account.verified,
            last_login_at: account.last_login_at,
            created_at: account.created_at,
        }
    }
}
