//! Client side of the contact pipeline: form state, local validation, and submission

pub mod api;
pub mod controller;
pub mod form;

pub use api::{interpret_reply, ApiReply, ClientError, ContactApi, HttpContactApi};
pub use controller::{SubmissionController, SubmissionStatus, SubmitOutcome};
pub use form::{ContactForm, FieldErrors};
