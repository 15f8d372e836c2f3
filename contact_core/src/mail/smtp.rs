//! SMTP delivery through `lettre`

use super::{EmailAddress, MailError, MailTransport, OutgoingEmail};
use crate::config::MailConfig;
use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::{self, authentication::Credentials},
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

type Transport = AsyncSmtpTransport<Tokio1Executor>;

/// Process-wide SMTP client. The underlying transport is built on first use
/// and its connection pool reused afterwards. Callers bound each send with
/// their own deadline; `timeout` here only limits socket operations and the
/// readiness probe.
pub struct SmtpMailer {
    config: MailConfig,
    timeout: Duration,
    transport: OnceCell<Transport>,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        let timeout = Duration::from_secs(config.send_timeout_seconds);
        Self {
            config,
            timeout,
            transport: OnceCell::new(),
        }
    }

    async fn transport(&self) -> Result<&Transport, MailError> {
        self.transport
            .get_or_try_init(|| async { self.build_transport() })
            .await
    }

    fn build_transport(&self) -> Result<Transport, MailError> {
        let username = self
            .config
            .username
            .clone()
            .ok_or_else(|| MailError::Authentication("no SMTP username configured".to_string()))?;
        let password = self
            .config
            .password
            .clone()
            .ok_or_else(|| MailError::Authentication("no SMTP password configured".to_string()))?;

        let builder = if self.config.secure {
            Transport::relay(&self.config.host)
        } else {
            Transport::starttls_relay(&self.config.host)
        }
        .map_err(|e| MailError::Transport(e.to_string()))?;

        info!(
            host = %self.config.host,
            port = self.config.port,
            secure = self.config.secure,
            "SMTP transport initialized"
        );

        Ok(builder
            .port(self.config.port)
            .credentials(Credentials::new(username, password))
            .timeout(Some(self.timeout))
            .build())
    }

    fn sender(&self) -> Result<Mailbox, MailError> {
        let address = self
            .config
            .sender_address()
            .ok_or_else(|| MailError::Envelope("no sender address configured".to_string()))?;
        Ok(Mailbox::new(
            Some(self.config.from_name.clone()),
            parse_address(address)?,
        ))
    }

    fn build_message(&self, email: OutgoingEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.sender()?)
            .to(mailbox(&email.to)?)
            .subject(email.subject);

        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(mailbox(reply_to)?);
        }

        builder
            .multipart(MultiPart::alternative_plain_html(email.text_body, email.html_body))
            .map_err(|e| MailError::Envelope(e.to_string()))
    }
}

fn parse_address(address: &str) -> Result<Address, MailError> {
    address
        .parse::<Address>()
        .map_err(|e| MailError::Envelope(format!("invalid address: {}", e)))
}

fn mailbox(address: &EmailAddress) -> Result<Mailbox, MailError> {
    Ok(Mailbox::new(address.name.clone(), parse_address(&address.address)?))
}

/// Maps an SMTP reply code onto the mail error taxonomy.
fn classify_status(code: Option<&str>, detail: String) -> MailError {
    match code {
        Some("530") | Some("534") | Some("535") => MailError::Authentication(detail),
        Some("501") | Some("550") | Some("553") => MailError::Envelope(detail),
        _ => MailError::Transport(detail),
    }
}

fn classify(err: smtp::Error) -> MailError {
    let code = err.status().map(|code| code.to_string());
    classify_status(code.as_deref(), err.to_string())
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        let transport = self.transport().await?;

        let response = transport.send(message).await.map_err(classify)?;
        debug!(code = %response.code(), "SMTP server accepted message");
        Ok(())
    }

    async fn verify(&self) -> Result<(), MailError> {
        let transport = self.transport().await?;

        match tokio::time::timeout(self.timeout, transport.test_connection()).await {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(MailError::Transport(
                "SMTP server did not accept the connection".to_string(),
            )),
            Ok(Err(err)) => Err(classify(err)),
            Err(_) => Err(MailError::Timeout(self.timeout)),
        }
    }
}
