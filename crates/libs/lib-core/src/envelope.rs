//! # Result Envelope
//!
//! The backend wraps every payload in `{statusCode, data, message, errors}`.
//! [`Envelope`] is that shape on the client side. It is produced both from
//! successful responses and from any [`ApiError`], so a caller that wants a
//! single uniform value per request can always get one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result, GENERIC_ERROR_MESSAGE};

/// Uniform response shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl<T> Envelope<T> {
    pub fn ok(status_code: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data: Some(data),
            message: message.into(),
            errors: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Unwrap the payload, turning failure envelopes back into [`ApiError`].
    pub fn into_data(self) -> Result<T> {
        if !self.is_success() {
            return Err(ApiError::Server {
                status: self.status_code,
                message: self.message,
                errors: self.errors,
            });
        }
        self.data.ok_or_else(|| {
            ApiError::Unknown(format!(
                "Response {} carried no data: {}",
                self.status_code, self.message
            ))
        })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            status_code: self.status_code,
            data: self.data.map(f),
            message: self.message,
            errors: self.errors,
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a 2xx body.
    ///
    /// An object with a `data` key next to `statusCode` or `message` is read
    /// as the backend's envelope (its own `statusCode` wins when present); any
    /// other JSON value, including a bare page object, is the payload itself.
    pub fn from_success_body(status: u16, body: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        let is_envelope = value
            .as_object()
            .map(|obj| {
                obj.contains_key("data")
                    && (obj.contains_key("statusCode") || obj.contains_key("message"))
            })
            .unwrap_or(false);

        if is_envelope {
            let mut envelope: Envelope<T> = serde_json::from_value(value)?;
            if envelope.status_code == 0 {
                envelope.status_code = status;
            }
            Ok(envelope)
        } else {
            let data: T = serde_json::from_value(value)?;
            Ok(Envelope::ok(status, data, ""))
        }
    }
}

impl<T> From<ApiError> for Envelope<T> {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Server {
                status,
                message,
                errors,
            } => Envelope {
                status_code: status,
                data: None,
                message,
                errors,
            },
            _ => Envelope {
                status_code: 0,
                data: None,
                message: GENERIC_ERROR_MESSAGE.to_string(),
                errors: None,
            },
        }
    }
}
