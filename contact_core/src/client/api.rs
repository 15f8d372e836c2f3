//! Transport used by the submission controller and interpretation of its replies

use crate::models::ContactPayload;
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const UNEXPECTED_REPLY_MESSAGE: &str = "Unexpected response from server. Please try again later.";

/// Raw HTTP outcome: status line and body text, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never completed or its response never arrived.
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn send(&self, payload: &ContactPayload) -> Result<ApiReply, ClientError>;
}

pub struct HttpContactApi {
    client: Client,
    endpoint: Url,
}

impl HttpContactApi {
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ClientError::Endpoint(e.to_string()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ClientError::Endpoint(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    /// Client for `<base_url>/api/contact`.
    pub fn from_base_url(base_url: &str) -> Result<Self, ClientError> {
        Self::new(&format!("{}/api/contact", base_url.trim_end_matches('/')))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn send(&self, payload: &ContactPayload) -> Result<ApiReply, ClientError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(ApiReply {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct ReplyBody {
    success: Option<bool>,
    message: Option<String>,
    error: Option<String>,
    #[serde(default)]
    errors: Vec<ReplyFieldError>,
}

/// Accepts both `{field, message}` and the older `{param, msg}` entries.
#[derive(Debug, Default, Deserialize)]
struct ReplyFieldError {
    #[serde(alias = "msg")]
    message: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn status_text_message(reply: &ApiReply) -> String {
    format!("Request failed: {} {}", reply.status, reply.status_text)
        .trim_end()
        .to_string()
}

fn failure_message(body: &ReplyBody, reply: &ApiReply) -> String {
    let validation: Vec<&str> = body
        .errors
        .iter()
        .filter_map(|entry| non_empty(&entry.message))
        .collect();

    if !validation.is_empty() {
        return format!("Validation error: {}", validation.join(", "));
    }

    non_empty(&body.message)
        .or_else(|| non_empty(&body.error))
        .map(str::to_string)
        .unwrap_or_else(|| status_text_message(reply))
}

/// `Ok` with the message to show on success, `Err` with the message to show otherwise.
pub fn interpret_reply(reply: &ApiReply) -> Result<String, String> {
    let body = serde_json::from_str::<ReplyBody>(&reply.body);

    if !reply.is_success() {
        return Err(match body {
            Ok(body) => failure_message(&body, reply),
            Err(_) => status_text_message(reply),
        });
    }

    match body {
        Ok(body) if body.success == Some(true) => Ok(non_empty(&body.message)
            .unwrap_or(DEFAULT_SUCCESS_MESSAGE)
            .to_string()),
        Ok(body) => Err(failure_message(&body, reply)),
        Err(_) => Err(UNEXPECTED_REPLY_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, status_text: &str, body: &str) -> ApiReply {
        ApiReply {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success_uses_server_message() {
        let r = reply(200, "OK", r#"{"success":true,"message":"Thanks!"}"#);
        assert_eq!(interpret_reply(&r), Ok("Thanks!".to_string()));

        let r = reply(200, "OK", r#"{"success":true}"#);
        assert_eq!(interpret_reply(&r), Ok(DEFAULT_SUCCESS_MESSAGE.to_string()));
    }

    #[test]
    fn test_success_status_without_success_flag_is_error() {
        let r = reply(200, "OK", r#"{"success":false,"message":"Mail disabled"}"#);
        assert_eq!(interpret_reply(&r), Err("Mail disabled".to_string()));

        let r = reply(200, "OK", "<html>proxy page</html>");
        assert_eq!(interpret_reply(&r), Err(UNEXPECTED_REPLY_MESSAGE.to_string()));
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let r = reply(
            400,
            "Bad Request",
            r#"{"success":false,"errors":[{"field":"email","message":"Please provide a valid email address"},{"field":"message","message":"Message must be between 10 and 1000 characters"}]}"#,
        );
        assert_eq!(
            interpret_reply(&r),
            Err("Validation error: Please provide a valid email address, Message must be between 10 and 1000 characters".to_string())
        );
    }

    #[test]
    fn test_legacy_error_entries() {
        let r = reply(400, "Bad Request", r#"{"errors":[{"param":"name","msg":"Name is required"}]}"#);
        assert_eq!(interpret_reply(&r), Err("Validation error: Name is required".to_string()));
    }

    #[test]
    fn test_message_then_error_then_status_text() {
        let r = reply(500, "Internal Server Error", r#"{"success":false,"message":"Try later"}"#);
        assert_eq!(interpret_reply(&r), Err("Try later".to_string()));

        let r = reply(500, "Internal Server Error", r#"{"error":"Boom"}"#);
        assert_eq!(interpret_reply(&r), Err("Boom".to_string()));

        let r = reply(502, "Bad Gateway", "upstream unavailable");
        assert_eq!(interpret_reply(&r), Err("Request failed: 502 Bad Gateway".to_string()));
    }

    #[test]
    fn test_endpoint_from_base_url() {
        let api = HttpContactApi::from_base_url("https://example.com/").unwrap();
        assert_eq!(api.endpoint().as_str(), "https://example.com/api/contact");
        assert!(HttpContactApi::new("not a url").is_err());
    }
}
