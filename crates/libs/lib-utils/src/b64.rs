//! # Base64 Encoding/Decoding
//!
//! Base64url helpers used to read the claims segment of access tokens.

use base64::{engine::general_purpose, Engine as _};

/// Encode bytes to base64 URL-safe string (no padding).
pub fn b64u_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(content)
}

/// Decode base64 URL-safe string to bytes.
///
/// Some issuers pad their segments; trailing `=` is stripped first.
pub fn b64u_decode(b64u: &str) -> Result<Vec<u8>, Error> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(b64u.trim_end_matches('='))
        .map_err(|_| Error::FailToB64uDecode)
}

/// Decode base64 URL-safe string to UTF-8 string.
pub fn b64u_decode_to_string(b64u: &str) -> Result<String, Error> {
    b64u_decode(b64u)
        .and_then(|bytes| String::from_utf8(bytes).map_err(|_| Error::FailToB64uDecode))
}

/// Decode the payload (second) segment of a compact JWT into a UTF-8 string.
///
/// The signature is not checked; the client only reads claims such as `exp`.
pub fn jwt_payload(token: &str) -> Result<String, Error> {
    let mut segments = token.split('.');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) => b64u_decode_to_string(payload),
        _ => Err(Error::MalformedToken),
    }
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToB64uDecode,
    MalformedToken,
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
