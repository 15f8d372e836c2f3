//! Field rules for the contact form and the custom validators built on them

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

lazy_static! {
    static ref RFC_EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$"
    ).unwrap();

    static ref BASIC_EMAIL_REGEX: Regex = Regex::new(
        r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
    ).unwrap();
}

pub const EMAIL_MAX_LENGTH: usize = 254;

fn rule_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Length-bounded free text. Bounds apply to the trimmed value, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRule {
    pub label: &'static str,
    pub min: usize,
    pub max: Option<usize>,
}

impl TextRule {
    pub const fn required(label: &'static str) -> Self {
        Self { label, min: 1, max: None }
    }

    pub const fn bounded(label: &'static str, min: usize, max: usize) -> Self {
        Self { label, min, max: Some(max) }
    }

    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(rule_error("required", format!("{} is required", self.label)));
        }

        let len = value.chars().count();
        let too_long = self.max.map_or(false, |max| len > max);
        if len < self.min || too_long {
            let message = match self.max {
                Some(max) => format!(
                    "{} must be between {} and {} characters",
                    self.label, self.min, max
                ),
                None => format!("{} must be at least {} characters", self.label, self.min),
            };
            return Err(rule_error("length", message));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailPattern {
    /// RFC 5322 shaped address with a dotted domain.
    Rfc,
    /// Anything shaped like `local@domain.tld`.
    Basic,
}

impl EmailPattern {
    fn regex(&self) -> &'static Regex {
        match self {
            EmailPattern::Rfc => &*RFC_EMAIL_REGEX,
            EmailPattern::Basic => &*BASIC_EMAIL_REGEX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailRule {
    pub pattern: EmailPattern,
    pub max: Option<usize>,
    pub invalid_message: &'static str,
}

impl EmailRule {
    pub fn check(&self, value: &str) -> Result<(), ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(rule_error("required", "Email is required"));
        }

        if let Some(max) = self.max {
            if value.chars().count() > max {
                return Err(rule_error(
                    "length",
                    format!("Email must not exceed {} characters", max),
                ));
            }
        }

        if !self.pattern.regex().is_match(value) {
            return Err(rule_error("email", self.invalid_message));
        }

        Ok(())
    }
}

pub const STRICT_NAME: TextRule = TextRule::bounded("Name", 2, 100);
pub const STRICT_EMAIL: EmailRule = EmailRule {
    pattern: EmailPattern::Rfc,
    max: Some(EMAIL_MAX_LENGTH),
    invalid_message: "Please provide a valid email address",
};
pub const STRICT_MESSAGE: TextRule = TextRule::bounded("Message", 10, 1000);

pub const CLIENT_NAME: TextRule = TextRule::required("Name");
pub const CLIENT_EMAIL: EmailRule = EmailRule {
    pattern: EmailPattern::Basic,
    max: None,
    invalid_message: "Please enter a valid email",
};
pub const CLIENT_MESSAGE: TextRule = TextRule::required("Message");

pub fn validate_contact_name(name: &str) -> Result<(), ValidationError> {
    STRICT_NAME.check(name)
}

pub fn validate_contact_email(email: &str) -> Result<(), ValidationError> {
    STRICT_EMAIL.check(email)
}

pub fn validate_contact_message(message: &str) -> Result<(), ValidationError> {
    STRICT_MESSAGE.check(message)
}

pub fn validate_draft_name(name: &str) -> Result<(), ValidationError> {
    CLIENT_NAME.check(name)
}

pub fn validate_draft_email(email: &str) -> Result<(), ValidationError> {
    CLIENT_EMAIL.check(email)
}

pub fn validate_draft_message(message: &str) -> Result<(), ValidationError> {
    CLIENT_MESSAGE.check(message)
}
