//! Request actor value object.
//!
//! Identity is resolved once at the API boundary (from the access token)
//! and passed by value through every service call. The core never reads
//! a global "current user".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::Role;

/// The authenticated identity behind a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Account id of the caller
    pub account_id: Uuid,

    /// Role carried by the access token
    pub role: Role,
}

impl Actor {
    pub fn new(account_id: Uuid, role: Role) -> Self {
        Self { account_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
