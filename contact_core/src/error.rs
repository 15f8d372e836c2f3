//! Application error types and handling

use crate::mail::MailError;
use crate::models::{FieldError, ServerResponse};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

pub const CONFIGURATION_ERROR_MESSAGE: &str =
    "Server configuration error. Please contact the site administrator.";
pub const MAIL_UNAVAILABLE_MESSAGE: &str =
    "Email service is temporarily unavailable. Please try again later.";
pub const MAIL_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("Mail transport is not configured")]
    Configuration,

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Mail service unavailable: {0}")]
    MailUnavailable(MailError),

    #[error("Mail delivery failed: {0}")]
    MailFailed(MailError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration
            | AppError::MailUnavailable(_)
            | AppError::MailFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Auth and envelope failures read as an outage; everything else, timeouts
/// included, is a plain delivery failure.
impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        if err.is_service_unavailable() {
            AppError::MailUnavailable(err)
        } else {
            AppError::MailFailed(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::MethodNotAllowed(method) => {
                let mut response = (
                    status,
                    Json(ServerResponse::failure(format!("Method {} not allowed", method))),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static("POST"));
                return response;
            }
            AppError::Configuration => {
                tracing::error!("Mail transport credentials or recipient missing");
                ServerResponse::failure(CONFIGURATION_ERROR_MESSAGE)
            }
            AppError::Validation(errors) => ServerResponse::validation(errors),
            AppError::BadRequest(msg) => ServerResponse::failure(msg),
            AppError::MailUnavailable(err) => {
                tracing::error!("Mail service unavailable: {:?}", err);
                ServerResponse::failure(MAIL_UNAVAILABLE_MESSAGE)
            }
            AppError::MailFailed(err) => {
                tracing::error!("Mail delivery failed: {:?}", err);
                ServerResponse::failure(MAIL_FAILED_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}
