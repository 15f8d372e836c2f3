//! Outbound email: the transport seam, the SMTP implementation, and message composition

pub mod compose;
pub mod smtp;

pub use compose::{auto_reply_email, notification_email};
pub use smtp::SmtpMailer;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    #[error("authentication rejected: {0}")]
    Authentication(String),

    #[error("invalid envelope: {0}")]
    Envelope(String),

    #[error("send timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),
}

impl MailError {
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, MailError::Authentication(_) | MailError::Envelope(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    pub name: Option<String>,
    pub address: String,
}

impl EmailAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            name: None,
            address: address.into(),
        }
    }

    pub fn named(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            address: address.into(),
        }
    }
}

/// A message ready for delivery. The sender is chosen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: EmailAddress,
    pub reply_to: Option<EmailAddress>,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;

    /// Readiness probe; transports without a connection to check are always ready.
    async fn verify(&self) -> Result<(), MailError> {
        Ok(())
    }
}
