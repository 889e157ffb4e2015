//! SMTP implementation of the notification dispatcher.
//!
//! Sends through lettre's async transport. Every send is bounded by the
//! configured timeout: a hung relay fails the send, it never hangs the
//! request that triggered it.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use nb_core::errors::DependencyError;
use nb_core::services::{EmailMessage, NotificationDispatcher};
use nb_shared::config::SmtpConfig;

/// SMTP-backed notification dispatcher
pub struct SmtpNotificationDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    timeout: Duration,
}

impl SmtpNotificationDispatcher {
    /// Build the transport from the SMTP configuration
    pub fn new(config: &SmtpConfig) -> Result<Self, DependencyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| DependencyError::EmailDelivery {
                reason: format!("SMTP transport setup failed: {e}"),
            })?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_seconds)))
            .build();

        let from = config
            .from_address
            .parse()
            .map_err(|e| DependencyError::EmailDelivery {
                reason: format!("invalid from address: {e}"),
            })?;

        Ok(Self {
            transport,
            from,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }
}

#[async_trait]
impl NotificationDispatcher for SmtpNotificationDispatcher {
    async fn send(&self, message: EmailMessage) -> Result<(), DependencyError> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| DependencyError::EmailDelivery {
                reason: format!("invalid recipient address: {e}"),
            })?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&message.subject)
            .multipart(MultiPart::alternative_plain_html(
                message.text_body,
                message.html_body,
            ))
            .map_err(|e| DependencyError::EmailDelivery {
                reason: format!("failed to build message: {e}"),
            })?;

        let send = self.transport.send(email);
        match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(_)) => {
                debug!(to = %message.to, subject = %message.subject, "email sent");
                Ok(())
            }
            Ok(Err(e)) => Err(DependencyError::EmailDelivery {
                reason: e.to_string(),
            }),
            Err(_) => Err(DependencyError::EmailDelivery {
                reason: format!("SMTP send timed out after {}s", self.timeout.as_secs()),
            }),
        }
    }
}
