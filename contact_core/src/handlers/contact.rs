//! `POST /api/contact`: validate a submission, notify the site owner, confirm to the sender

use crate::{
    error::{AppError, Result},
    extractors::rejection_to_error,
    mail::{auto_reply_email, notification_email, MailError, MailTransport, OutgoingEmail},
    models::{ContactPayload, ServerResponse},
    validation::ContactSubmission,
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::time::Duration;
use tracing::{field, info, warn, Span};
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";

async fn send_with_timeout(
    mailer: &dyn MailTransport,
    email: OutgoingEmail,
    timeout: Duration,
) -> std::result::Result<(), MailError> {
    match tokio::time::timeout(timeout, mailer.send(email)).await {
        Ok(result) => result,
        Err(_) => Err(MailError::Timeout(timeout)),
    }
}

pub async fn handle_contact(
    State(state): State<AppState>,
    method: Method,
    payload: std::result::Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Response> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    if method != Method::POST {
        warn!("{} /api/contact rejected", method);
        return Err(AppError::MethodNotAllowed(method));
    }

    let recipient = match state.mail.recipient_address() {
        Some(recipient) if state.mail.is_configured() => recipient.to_string(),
        _ => return Err(AppError::Configuration),
    };

    let Json(payload) = payload.map_err(rejection_to_error)?;

    let submission = ContactSubmission::from_payload(&payload);
    if let Err(errors) = submission.check() {
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        info!(?fields, "Contact submission failed validation");
        return Err(AppError::Validation(errors));
    }

    let submission_id = Uuid::new_v4();
    Span::current().record("submission_id", field::display(submission_id));
    let email_domain = submission.email.rsplit('@').next().unwrap_or_default();
    info!(
        %submission_id,
        name_len = submission.name.chars().count(),
        message_len = submission.message.chars().count(),
        email_domain,
        "Contact submission received"
    );

    let timeout = state.send_timeout();
    let notification = notification_email(&submission, &recipient, Utc::now());
    send_with_timeout(state.mailer.as_ref(), notification, timeout)
        .await
        .map_err(|err| {
            warn!(%submission_id, error = %err, "Notification email was not sent");
            AppError::from(err)
        })?;
    info!(%submission_id, "Notification email sent");

    // The owner already has the message; a failed confirmation is not the caller's problem.
    match send_with_timeout(state.mailer.as_ref(), auto_reply_email(&submission), timeout).await {
        Ok(()) => info!(%submission_id, "Auto-reply sent"),
        Err(err) => warn!(%submission_id, error = %err, "Auto-reply failed"),
    }

    Ok((StatusCode::OK, Json(ServerResponse::success(SUCCESS_MESSAGE))).into_response())
}
