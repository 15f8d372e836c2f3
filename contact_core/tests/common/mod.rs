#![allow(dead_code)]

use async_trait::async_trait;
use contact_core::{AppState, MailConfig, MailError, MailTransport, OutgoingEmail};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records every delivery attempt and answers from a script; unscripted sends succeed.
#[derive(Default)]
pub struct FakeMailer {
    attempts: Mutex<Vec<OutgoingEmail>>,
    script: Mutex<VecDeque<Result<(), MailError>>>,
    delay: Option<Duration>,
}

impl FakeMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn scripted(results: Vec<Result<(), MailError>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(results.into()),
            ..Self::default()
        })
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    pub fn attempts(&self) -> Vec<OutgoingEmail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for FakeMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        self.attempts.lock().unwrap().push(email);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

pub fn mail_config() -> MailConfig {
    MailConfig {
        username: Some("site@example.com".to_string()),
        password: Some("app-password".to_string()),
        recipient: Some("owner@example.com".to_string()),
        ..MailConfig::default()
    }
}

pub fn state_with(mail: MailConfig, mailer: Arc<FakeMailer>) -> AppState {
    AppState::new(mail, mailer)
}
