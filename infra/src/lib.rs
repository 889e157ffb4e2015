//! Infrastructure layer for NestBook.
//!
//! Concrete implementations of the core's repository and notification
//! traits: MySQL persistence via SQLx and SMTP delivery via lettre.

pub mod database;
pub mod email;

pub use database::connection::DatabasePool;
pub use database::mysql::{
    MySqlAccountRepository, MySqlBookingRepository, MySqlPropertyRepository,
};
pub use email::SmtpNotificationDispatcher;
