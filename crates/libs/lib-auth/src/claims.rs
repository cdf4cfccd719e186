//! # Access Token Claims
//!
//! Reads the `exp` claim out of a compact JWT. The client never holds the
//! signing secret, so nothing is verified here; the backend remains the
//! authority on whether a token is valid.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use lib_core::{ApiError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject (account ID)
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Decode the claims segment of `token`.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let payload = lib_utils::jwt_payload(token)
        .map_err(|e| ApiError::Session(format!("Unreadable access token: {}", e)))?;
    serde_json::from_str(&payload)
        .map_err(|e| ApiError::Session(format!("Unreadable token claims: {}", e)))
}

/// Expiry of `token`, `None` when it carries no `exp` claim.
pub fn expires_at(token: &str) -> Result<Option<DateTime<Utc>>> {
    match decode_claims(token)?.exp {
        Some(exp) => lib_utils::from_unix(exp)
            .map(Some)
            .map_err(|e| ApiError::Session(format!("Invalid exp claim: {}", e))),
        None => Ok(None),
    }
}

#[cfg(test)]
pub(crate) fn test_token(exp: i64) -> String {
    format!(
        "{}.{}.signature",
        lib_utils::b64u_encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        lib_utils::b64u_encode(format!(r#"{{"sub":"acc-1","exp":{}}}"#, exp))
    )
}
