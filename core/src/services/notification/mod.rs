//! Notification dispatcher boundary.
//!
//! The core only knows this trait; SMTP lives in `nb_infra`. Alert mails
//! (login, password change) are best-effort: the auth service logs a
//! failed send and carries on. OTP and reset-token delivery failures
//! surface to the caller, because without the code the flow is stuck.

mod messages;

pub use messages::{login_alert_email, otp_email, password_change_email, password_reset_email};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::DependencyError;

/// An outbound transactional email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Dispatcher for transactional email
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Send one message. Implementations must bound the send with a
    /// timeout; a hung relay fails the send rather than the request
    /// hanging forever.
    async fn send(&self, message: EmailMessage) -> Result<(), DependencyError>;
}

/// Mock dispatcher recording every sent message for assertions
pub struct MockNotificationDispatcher {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    fail: bool,
}

impl MockNotificationDispatcher {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A dispatcher whose every send fails, for delivery-failure tests
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Messages sent so far
    pub async fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }
}

impl Default for MockNotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationDispatcher for MockNotificationDispatcher {
    async fn send(&self, message: EmailMessage) -> Result<(), DependencyError> {
        if self.fail {
            return Err(DependencyError::EmailDelivery {
                reason: "mock dispatcher configured to fail".to_string(),
            });
        }
        self.sent.lock().await.push(message);
        Ok(())
    }
}
