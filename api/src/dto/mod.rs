//! Request and response DTOs.
//!
//! Wire names are camelCase. The account DTO is the only path an account
//! takes into a response body; it carries none of the credential fields.

pub mod account;
pub mod auth;
pub mod booking;

pub use account::AccountDto;
pub use auth::{
    ChangePasswordRequest, EmailRequest, LoginRequest, RefreshRequest, RegisterRequestDto,
    ResetPasswordRequest, SessionResponse, VerifyOtpRequest,
};
pub use booking::{
    BookingDto, CreateBookingRequestDto, UpdatePaymentRequest, UpdateStatusRequest,
};
