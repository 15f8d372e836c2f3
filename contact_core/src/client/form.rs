use crate::models::{ContactPayload, Field};
use crate::validation::ContactDraft;

/// Editable form contents. Fields are never absent, only empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn payload(&self) -> ContactPayload {
        ContactPayload::new(self.name.clone(), self.email.clone(), self.message.clone())
    }

    /// Client-rule errors for every field; fields that pass map to an empty string.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if let Err(failures) = ContactDraft::new(&self.name, &self.email, &self.message).check() {
            for failure in failures {
                if let Some(field) = Field::ALL.iter().find(|f| f.as_str() == failure.field) {
                    errors.set(*field, failure.message);
                }
            }
        }
        errors
    }
}

/// Inline error text per field; an empty string means no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    name: String,
    email: String,
    message: String,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        };
        *slot = message.into();
    }

    pub fn clear(&mut self, field: Field) {
        self.set(field, String::new());
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Fields currently carrying an error, in form order.
    pub fn failing(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|field| !self.get(*field).is_empty())
            .collect()
    }
}
