//! Error type definitions for the NestBook core.
//!
//! One enum per error kind in the taxonomy; the presentation layer owns
//! the mapping from variants to HTTP status codes and stable error codes.

use thiserror::Error;

/// Malformed or missing input. Reported before any state is touched.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    #[error("Invalid time slot: end time must be after start time")]
    InvalidTimeSlot,

    #[error("Invalid date")]
    InvalidDate,
}

/// Bad credentials or an expired/invalid token.
///
/// The lockout variants carry the timing information the caller must
/// surface; handlers never compute these numbers themselves.
#[derive(Error, Debug, PartialEq)]
pub enum AuthenticationError {
    #[error("Invalid email or password. {attempts_remaining} attempt(s) remaining before lockout")]
    InvalidCredentials { attempts_remaining: u32 },

    #[error("Account locked due to too many failed attempts. Try again in {minutes} minute(s)")]
    AccountLocked { minutes: i64 },

    #[error("Invalid or expired OTP")]
    InvalidOtp,

    #[error("Account not verified. Please verify your email with the OTP")]
    AccountNotVerified,

    #[error("Password reset token is invalid or expired")]
    InvalidResetToken,

    #[error("Old password is incorrect")]
    WrongOldPassword,

    #[error("Authentication required")]
    MissingCredentials,
}

/// Role or ownership mismatch. Never mutates state.
#[derive(Error, Debug, PartialEq)]
pub enum AuthorizationError {
    #[error("You are not allowed to modify this booking")]
    NotBookingManager,

    #[error("Admin access required")]
    AdminOnly,
}

/// A uniqueness or state-machine conflict. Nothing is persisted.
#[derive(Error, Debug, PartialEq)]
pub enum ConflictError {
    #[error("Time slot already booked. Please choose a different slot")]
    SlotUnavailable,

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Account already verified")]
    AlreadyVerified,

    #[error("Booking cannot move from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Payment status cannot move from {from} to {to}")]
    InvalidPaymentTransition { from: String, to: String },
}

/// Referenced resource does not exist.
#[derive(Error, Debug, PartialEq)]
pub enum NotFoundError {
    #[error("Account not found")]
    Account,

    #[error("Property not found")]
    Property,

    #[error("Booking not found")]
    Booking,
}

/// An external collaborator failed.
///
/// Best-effort effects (alert mail) are logged and swallowed by the
/// caller; required effects (OTP delivery) surface as this error.
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("Failed to send email: {reason}")]
    EmailDelivery { reason: String },

    #[error("Datastore unavailable: {reason}")]
    Datastore { reason: String },
}

/// Token verification and generation failures.
#[derive(Error, Debug, PartialEq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Refresh token mismatch or revoked")]
    RefreshMismatch,

    #[error("Token generation failed")]
    GenerationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lockout_message_carries_minutes() {
        let err = AuthenticationError::AccountLocked { minutes: 7 };
        assert!(err.to_string().contains("7 minute(s)"));
    }

    #[test]
    fn test_invalid_credentials_reports_attempts() {
        let err = AuthenticationError::InvalidCredentials {
            attempts_remaining: 2,
        };
        assert!(err.to_string().contains("2 attempt(s) remaining"));
    }

    #[test]
    fn test_transition_conflict_names_states() {
        let err = ConflictError::InvalidStatusTransition {
            from: "Completed".to_string(),
            to: "Pending".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Completed"));
        assert!(message.contains("Pending"));
    }
}
