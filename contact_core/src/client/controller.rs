//! Submission state machine: idle -> submitting -> success | error

use super::api::{interpret_reply, ApiReply, ClientError, ContactApi};
use super::form::{ContactForm, FieldErrors};
use crate::models::{ContactPayload, Field};
use tracing::{debug, warn};

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your internet connection and try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    /// A submission is already in flight.
    Busy,
    Completed(SubmissionStatus),
}

pub struct SubmissionController<A> {
    api: A,
    form: ContactForm,
    errors: FieldErrors,
    status: SubmissionStatus,
    is_submitting: bool,
    submit_message: String,
}

impl<A: ContactApi> SubmissionController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: ContactForm::default(),
            errors: FieldErrors::default(),
            status: SubmissionStatus::Idle,
            is_submitting: false,
            submit_message: String::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn submit_message(&self) -> &str {
        &self.submit_message
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting
    }

    /// Edits clear that field's error immediately.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    pub fn blur(&mut self, field: Field) -> &str {
        let message = self.form.validate().get(field).to_string();
        self.errors.set(field, message);
        self.errors.get(field)
    }

    pub fn validate_all(&mut self) -> bool {
        self.errors = self.form.validate();
        self.errors.is_empty()
    }

    /// Validates and locks the form. The returned payload is what should be sent;
    /// `None` means nothing may be sent.
    pub fn begin_submit(&mut self) -> Option<ContactPayload> {
        if self.is_submitting {
            debug!("Submit ignored while a submission is in flight");
            return None;
        }

        if !self.validate_all() {
            debug!(fields = ?self.errors.failing(), "Contact form failed local validation");
            return None;
        }

        self.is_submitting = true;
        self.status = SubmissionStatus::Idle;
        self.submit_message.clear();

        Some(self.form.payload())
    }

    pub fn finish_submit(&mut self, result: Result<ApiReply, ClientError>) -> SubmissionStatus {
        self.is_submitting = false;

        let outcome = match result {
            Ok(reply) => interpret_reply(&reply),
            Err(ClientError::Network(detail)) => {
                warn!("Contact request did not complete: {}", detail);
                Err(NETWORK_ERROR_MESSAGE.to_string())
            }
            Err(err) => {
                warn!("Contact request failed: {}", err);
                Err(UNEXPECTED_ERROR_MESSAGE.to_string())
            }
        };

        match outcome {
            Ok(message) => {
                self.status = SubmissionStatus::Success;
                self.submit_message = message;
                self.form.clear();
            }
            Err(message) => {
                self.status = SubmissionStatus::Error;
                self.submit_message = message;
            }
        }

        self.status
    }

    /// Runs one full submission. Dropping the returned future discards the result
    /// and unlocks the form; status and message stay as `begin_submit` left them.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.is_submitting {
            return SubmitOutcome::Busy;
        }

        let Some(payload) = self.begin_submit() else {
            return SubmitOutcome::Invalid;
        };

        let result = {
            let _unlock = InFlight(&mut self.is_submitting);
            self.api.send(&payload).await
        };
        SubmitOutcome::Completed(self.finish_submit(result))
    }
}

/// Clears the in-flight flag when the request future completes or is dropped.
struct InFlight<'a>(&'a mut bool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
