//! Contact form wire types shared by the handler and the client

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// Form order; also the order validation errors are reported in.
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body of `POST /api/contact`. Missing and `null` fields decode as
/// empty strings so they are reported by validation instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPayload {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContactPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// One failing field. Older deployments emitted `{param, msg}`; those names
/// are still accepted when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(alias = "param")]
    pub field: String,
    #[serde(alias = "msg")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ServerResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: None,
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_missing_fields_default_to_empty() {
        let payload: ContactPayload = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(payload.name, "Ada");
        assert_eq!(payload.email, "");
        assert_eq!(payload.message, "");
    }

    #[test]
    fn test_payload_null_fields_decode_as_empty() {
        let payload: ContactPayload =
            serde_json::from_str(r#"{"name":null,"email":"ada@example.com","message":null}"#)
                .unwrap();
        assert_eq!(payload, ContactPayload::new("", "ada@example.com", ""));

        assert!(serde_json::from_str::<ContactPayload>(r#"{"name":42}"#).is_err());
    }

    #[test]
    fn test_legacy_error_shape_decodes() {
        let error: FieldError =
            serde_json::from_str(r#"{"param":"email","msg":"Invalid email"}"#).unwrap();
        assert_eq!(error, FieldError::new(Field::Email, "Invalid email"));
    }

    #[test]
    fn test_response_omits_absent_members() {
        let body = serde_json::to_value(ServerResponse::failure("nope")).unwrap();
        assert_eq!(body, serde_json::json!({"success": false, "message": "nope"}));

        let body = serde_json::to_value(ServerResponse::validation(vec![FieldError::new(
            Field::Name,
            "Name is required",
        )]))
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "success": false,
                "errors": [{"field": "name", "message": "Name is required"}]
            })
        );
    }
}
