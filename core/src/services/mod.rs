//! Business services containing domain logic and use cases.

pub mod auth;
pub mod booking;
pub mod credential;
pub mod lockout;
pub mod notification;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, RegisterRequest};
pub use booking::{BookingService, CreateBookingRequest};
pub use credential::{CredentialConfig, CredentialService};
pub use lockout::LockoutPolicy;
pub use notification::{EmailMessage, MockNotificationDispatcher, NotificationDispatcher};
pub use token::{TokenService, TokenServiceConfig};
