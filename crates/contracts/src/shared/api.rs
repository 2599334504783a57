//! Envelopes used by the remote API and the client-side view of its failures.

use super::validation::FieldErrors;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// `{"message": "...", "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Error body as sent by the server on non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

/// A failed remote call as presented to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub message: String,
    /// Per-field errors when the server rejected specific form fields
    pub field_errors: FieldErrors,
}

impl ApiFailure {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: FieldErrors::new(),
        }
    }

    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }

    /// Decode a non-2xx response body.
    ///
    /// Falls back to `HTTP <status>` when the body carries no usable message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let field_errors = parsed.errors.unwrap_or_default();
        let message = parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .or_else(|| field_errors.iter().next().map(|(_, m)| m.to_string()))
            .unwrap_or_else(|| format!("HTTP {}", status));
        Self {
            message,
            field_errors,
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiFailure {}

impl From<String> for ApiFailure {
    fn from(message: String) -> Self {
        Self::message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_body() {
        let failure = ApiFailure::from_response(409, r#"{"message":"Load item already shipped"}"#);
        assert_eq!(failure.message, "Load item already shipped");
        assert!(!failure.has_field_errors());
    }

    #[test]
    fn test_field_errors_body() {
        let failure =
            ApiFailure::from_response(422, r#"{"errors":{"email":"Email already registered"}}"#);
        assert!(failure.has_field_errors());
        assert_eq!(failure.field_errors.get("email"), Some("Email already registered"));
        assert_eq!(failure.message, "Email already registered");
    }

    #[test]
    fn test_unparseable_body_falls_back_to_status() {
        assert_eq!(ApiFailure::from_response(502, "<html>bad gateway</html>").message, "HTTP 502");
        assert_eq!(ApiFailure::from_response(500, r#"{"message":"  "}"#).message, "HTTP 500");
    }

    #[test]
    fn test_data_response_defaults_missing_message() {
        let resp: DataResponse<Vec<i64>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();
        assert_eq!(resp.message, "");
        assert_eq!(resp.data, vec![1, 2]);
    }
}
