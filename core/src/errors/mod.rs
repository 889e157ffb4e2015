//! Domain-specific error types and error handling.

mod types;

pub use types::{
    AuthenticationError, AuthorizationError, ConflictError, DependencyError, NotFoundError,
    TokenError, ValidationError,
};

use thiserror::Error;

/// Core domain errors.
///
/// Every failure produced by the core carries a stable kind; the API
/// boundary maps kinds to HTTP status codes. Errors in the 4xx families
/// never mutate state, with the single exception of authentication
/// failures updating the login-attempt counters.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Internal error from any displayable cause
    pub fn internal(message: impl std::fmt::Display) -> Self {
        DomainError::Internal {
            message: message.to_string(),
        }
    }
}
