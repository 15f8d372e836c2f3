pub mod contact;

pub use contact::{ContactPayload, Field, FieldError, ServerResponse};
