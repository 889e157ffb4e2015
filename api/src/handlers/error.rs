//! Mapping from domain errors to HTTP responses.
//!
//! Every `DomainError` kind maps to exactly one status code and a stable
//! machine-readable error code; timing details for the lockout errors go
//! into the structured `details` field so clients never parse messages.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;

use nb_core::errors::{
    AuthenticationError, ConflictError, DependencyError, DomainError, TokenError, ValidationError,
};
use nb_shared::types::response::ErrorBody;

/// Handler result type; `?` on any `DomainError` produces the mapped response
pub type ApiResult = Result<HttpResponse, ApiError>;

/// Newtype carrying a domain error across the actix boundary
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

/// Stable error code for each domain error
fn error_code(error: &DomainError) -> &'static str {
    match error {
        DomainError::Validation(e) => match e {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidFormat { .. } => "INVALID_FORMAT",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::WeakPassword { .. } => "WEAK_PASSWORD",
            ValidationError::InvalidTimeSlot => "INVALID_TIME_SLOT",
            ValidationError::InvalidDate => "INVALID_DATE",
        },
        DomainError::Authentication(e) => match e {
            AuthenticationError::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            AuthenticationError::AccountLocked { .. } => "ACCOUNT_LOCKED",
            AuthenticationError::InvalidOtp => "INVALID_OTP",
            AuthenticationError::AccountNotVerified => "ACCOUNT_NOT_VERIFIED",
            AuthenticationError::InvalidResetToken => "INVALID_RESET_TOKEN",
            AuthenticationError::WrongOldPassword => "WRONG_OLD_PASSWORD",
            AuthenticationError::MissingCredentials => "AUTHENTICATION_REQUIRED",
        },
        DomainError::Authorization(_) => "FORBIDDEN",
        DomainError::Conflict(e) => match e {
            ConflictError::SlotUnavailable => "SLOT_UNAVAILABLE",
            ConflictError::DuplicateEmail => "DUPLICATE_EMAIL",
            ConflictError::AlreadyVerified => "ALREADY_VERIFIED",
            ConflictError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            ConflictError::InvalidPaymentTransition { .. } => "INVALID_PAYMENT_TRANSITION",
        },
        DomainError::NotFound(_) => "NOT_FOUND",
        DomainError::Dependency(e) => match e {
            DependencyError::EmailDelivery { .. } => "EMAIL_DELIVERY_FAILED",
            DependencyError::Datastore { .. } => "SERVICE_UNAVAILABLE",
        },
        DomainError::Token(e) => match e {
            TokenError::Expired => "TOKEN_EXPIRED",
            _ => "INVALID_TOKEN",
        },
        DomainError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Structured payload accompanying some errors
fn error_details(error: &DomainError) -> Option<serde_json::Value> {
    match error {
        DomainError::Authentication(AuthenticationError::InvalidCredentials {
            attempts_remaining,
        }) => Some(json!({ "attemptsRemaining": attempts_remaining })),
        DomainError::Authentication(AuthenticationError::AccountLocked { minutes }) => {
            Some(json!({ "minutes": minutes }))
        }
        DomainError::Validation(ValidationError::WeakPassword { min_length }) => {
            Some(json!({ "minLength": min_length }))
        }
        DomainError::Conflict(ConflictError::InvalidStatusTransition { from, to })
        | DomainError::Conflict(ConflictError::InvalidPaymentTransition { from, to }) => {
            Some(json!({ "from": from, "to": to }))
        }
        _ => None,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Authentication(AuthenticationError::AccountLocked { .. }) => {
                StatusCode::LOCKED
            }
            DomainError::Authentication(_) | DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            DomainError::Authorization(_) => StatusCode::FORBIDDEN,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Dependency(_) => StatusCode::SERVICE_UNAVAILABLE,
            DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal details stay in the logs, not in the response body
        let message = match &self.0 {
            DomainError::Internal { .. } => {
                tracing::error!(error = %self.0, "internal error");
                "An internal error occurred".to_string()
            }
            DomainError::Dependency(_) => {
                tracing::error!(error = %self.0, "dependency failure");
                self.0.to_string()
            }
            other => other.to_string(),
        };

        let mut body = ErrorBody::new(error_code(&self.0), message);
        if let Some(details) = error_details(&self.0) {
            body = body.with_details(details);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::errors::{AuthorizationError, NotFoundError};

    fn status_of(error: DomainError) -> StatusCode {
        ApiError(error).status_code()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ValidationError::InvalidEmail.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                AuthenticationError::InvalidCredentials {
                    attempts_remaining: 3
                }
                .into()
            ),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthenticationError::AccountLocked { minutes: 10 }.into()),
            StatusCode::LOCKED
        );
        assert_eq!(
            status_of(AuthorizationError::AdminOnly.into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ConflictError::SlotUnavailable.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(NotFoundError::Booking.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(TokenError::Expired.into()),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_lockout_details_are_structured() {
        let error = ApiError(AuthenticationError::AccountLocked { minutes: 7 }.into());
        let details = error_details(&error.0).unwrap();
        assert_eq!(details["minutes"], 7);
    }

    #[test]
    fn test_internal_message_is_not_leaked() {
        let error = ApiError(DomainError::internal("secret connection string"));
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
