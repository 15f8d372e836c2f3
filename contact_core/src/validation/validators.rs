//! Validatable views of a contact submission

use super::{collect_field_errors, rules::*};
use crate::models::{ContactPayload, FieldError};
use validator::Validate;

/// Server-side view of a submission, validated against the strict rules.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ContactSubmission {
    #[validate(custom(function = "validate_contact_name"))]
    pub name: String,

    #[validate(custom(function = "validate_contact_email"))]
    pub email: String,

    #[validate(custom(function = "validate_contact_message"))]
    pub message: String,
}

impl ContactSubmission {
    pub fn from_payload(payload: &ContactPayload) -> Self {
        let trimmed = payload.trimmed();
        Self {
            name: trimmed.name,
            email: trimmed.email,
            message: trimmed.message,
        }
    }

    /// Every failing field, in form order.
    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate().map_err(|errors| collect_field_errors(&errors))
    }
}

/// Client-side view of the form, validated against the looser client rules.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ContactDraft {
    #[validate(custom(function = "validate_draft_name"))]
    pub name: String,

    #[validate(custom(function = "validate_draft_email"))]
    pub email: String,

    #[validate(custom(function = "validate_draft_message"))]
    pub message: String,
}

impl ContactDraft {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate().map_err(|errors| collect_field_errors(&errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_submission() {
        let submission = ContactSubmission::from_payload(&ContactPayload::new(
            "John Doe",
            "john@example.com",
            "Hello there, I liked your portfolio.",
        ));
        assert!(submission.check().is_ok());
    }

    #[test]
    fn test_all_failing_fields_reported_together() {
        let submission =
            ContactSubmission::from_payload(&ContactPayload::new("Jo", "bad-email", "short"));
        let errors = submission.check().unwrap_err();

        assert_eq!(fields(&errors), vec!["email", "message"]);
        assert_eq!(errors[0].message, "Please provide a valid email address");
        assert_eq!(errors[1].message, "Message must be between 10 and 1000 characters");
    }

    #[test]
    fn test_one_entry_per_field_in_form_order() {
        let submission = ContactSubmission::from_payload(&ContactPayload::default());
        let errors = submission.check().unwrap_err();
        assert_eq!(fields(&errors), vec!["name", "email", "message"]);
    }

    #[test]
    fn test_submission_is_trimmed() {
        let submission = ContactSubmission::from_payload(&ContactPayload::new(
            "  Ada  ",
            " ada@example.com\n",
            "\n  Hello from the other side  \n",
        ));
        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.message, "Hello from the other side");
    }

    #[test]
    fn test_draft_only_requires_presence() {
        assert!(ContactDraft::new("J", "j@x.io", "hi").check().is_ok());

        let errors = ContactDraft::new(" ", "nope", "").check().unwrap_err();
        assert_eq!(fields(&errors), vec!["name", "email", "message"]);
        assert_eq!(errors[1].message, "Please enter a valid email");
    }
}
