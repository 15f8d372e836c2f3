//! Mapping of JSON body rejections onto the contact API error shape

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const MISSING_CONTENT_TYPE_MESSAGE: &str = "Content-Type must be application/json";

/// Turns a rejected JSON body into a 400 with a short, user-safe message.
pub fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let detail = rejection.body_text();
    tracing::debug!("Rejected contact request body: {}", detail);

    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => MISSING_CONTENT_TYPE_MESSAGE,
        _ => INVALID_BODY_MESSAGE,
    };

    AppError::BadRequest(message.to_string())
}
