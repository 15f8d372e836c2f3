//! Contact form validation built on the `validator` crate

pub mod rules;
pub mod validators;

pub use rules::*;
pub use validators::*;

use crate::models::{Field, FieldError};
use validator::ValidationErrors;

/// Flattens `ValidationErrors` into one entry per failing field, in form order.
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let field_errors = errors.field_errors();

    Field::ALL
        .iter()
        .filter_map(|field| {
            let first = field_errors.get(field.as_str())?.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Validation failed for field '{}'", field));
            Some(FieldError::new(*field, message))
        })
        .collect()
}
