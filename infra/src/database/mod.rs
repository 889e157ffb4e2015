//! Database infrastructure: connection pooling and MySQL repositories.

pub mod connection;
pub mod mysql;

use nb_core::errors::{DependencyError, DomainError};

/// Map a SQLx error into the domain's dependency-failure kind
pub(crate) fn datastore_error(error: sqlx::Error) -> DomainError {
    DependencyError::Datastore {
        reason: error.to_string(),
    }
    .into()
}
