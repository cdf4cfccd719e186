//! # Centralized Error Handling
//!
//! This module defines [`ApiError`], the single error type returned by every
//! backend operation. It follows the `thiserror` pattern for ergonomic error
//! handling.
//!
//! ## Error Categories
//!
//! 1. **Transport** - [`Network`](ApiError::Network): the request never got
//!    an HTTP response (DNS, refused connection, timeout).
//! 2. **Server** - [`Server`](ApiError::Server): the backend answered with a
//!    non-2xx status. Carries the server-supplied status, message and error
//!    list when the body had them, otherwise the generic message.
//! 3. **Unclassified** - [`Unknown`](ApiError::Unknown): anything else, such
//!    as a 2xx body that does not decode.
//! 4. **Local** - [`Config`](ApiError::Config) and
//!    [`Session`](ApiError::Session): failures that never reach the network.
//!
//! Every endpoint returns `Result<_, ApiError>`; none of them panic or
//! swallow errors. Callers that prefer the backend's envelope shape convert
//! with [`crate::envelope::Envelope::from`].
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{ApiError, GENERIC_ERROR_MESSAGE};
//!
//! let err = ApiError::from_response(502, b"<html>Bad Gateway</html>");
//! assert_eq!(err.status(), Some(502));
//! assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
//! ```
//!
//! ## Clone
//!
//! `ApiError` is `Clone` because a single in-flight request may be awaited by
//! several callers, and each of them receives its own copy of the outcome.

use serde::Deserialize;
use thiserror::Error;

/// Message used when the backend gives nothing better.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong, please try again later";

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error returned by every client operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No HTTP response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server {
        status: u16,
        message: String,
        errors: Option<Vec<String>>,
    },

    /// Unclassified failure (undecodable body, empty payload, ...).
    #[error("Unknown error: {0}")]
    Unknown(String),

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session persistence or authentication state error.
    #[error("Session error: {0}")]
    Session(String),
}

impl ApiError {
    /// Wrap any transport error.
    pub fn network(err: impl std::fmt::Display) -> Self {
        ApiError::Network(err.to_string())
    }

    /// Build a server error from a non-2xx response body.
    ///
    /// A structured body re-emits its own `statusCode`, `message` and
    /// `errors`; anything else yields the generic message with the HTTP
    /// status.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => {
                let message = parsed
                    .message
                    .map(MessageField::into_message)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
                ApiError::Server {
                    status: parsed.status_code.unwrap_or(status),
                    message,
                    errors: parsed.errors.map(|errors| {
                        errors.into_iter().map(stringify_error).collect()
                    }),
                }
            }
            Err(e) => {
                tracing::debug!(status, error = %e, "Error body is not structured");
                ApiError::Server {
                    status,
                    message: GENERIC_ERROR_MESSAGE.to_string(),
                    errors: None,
                }
            }
        }
    }

    /// HTTP status, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Get a user-friendly error message.
    ///
    /// Server messages are shown as-is; local and transport details are
    /// replaced by the generic message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(_) | ApiError::Unknown(_) => GENERIC_ERROR_MESSAGE.to_string(),
            ApiError::Config(msg) | ApiError::Session(msg) => msg.clone(),
        }
    }
}

/// Convert `anyhow::Error` to `ApiError`.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Unknown(err.to_string())
    }
}

/// Convert `serde_json::Error` to `ApiError`.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Unknown(format!("JSON error: {}", err))
    }
}

/// Structured error body sent by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: Option<u16>,
    message: Option<MessageField>,
    errors: Option<Vec<serde_json::Value>>,
}

/// Validation failures arrive as a list of messages instead of one string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageField {
    One(String),
    Many(Vec<String>),
}

impl MessageField {
    fn into_message(self) -> String {
        match self {
            MessageField::One(message) => message,
            MessageField::Many(messages) => messages.join(", "),
        }
    }
}

fn stringify_error(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_body_is_re_emitted() {
        let err = ApiError::from_response(404, br#"{"message":"Not found","errors":["x"]}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 404,
                message: "Not found".to_string(),
                errors: Some(vec!["x".to_string()]),
            }
        );
    }

    #[test]
    fn test_body_status_code_wins() {
        let err = ApiError::from_response(400, br#"{"statusCode":422,"message":"Bad quantity"}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.user_message(), "Bad quantity");
    }

    #[test]
    fn test_message_list_is_joined() {
        let err = ApiError::from_response(
            400,
            br#"{"message":["email must be an email","password is too short"]}"#,
        );
        assert_eq!(err.user_message(), "email must be an email, password is too short");
    }

    #[test]
    fn test_non_string_errors_are_stringified() {
        let err = ApiError::from_response(400, br#"{"message":"Invalid","errors":[{"field":"qty"}]}"#);
        match err {
            ApiError::Server { errors, .. } => {
                assert_eq!(errors, Some(vec![r#"{"field":"qty"}"#.to_string()]));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unstructured_body_uses_generic_message() {
        let err = ApiError::from_response(500, b"Internal Server Error");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);

        let empty = ApiError::from_response(503, br#"{}"#);
        assert_eq!(empty.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_network_error_hides_details() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }
}
