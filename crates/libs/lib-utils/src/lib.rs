//! # Utilities Library
//!
//! Small helpers shared by the client crates: base64url decoding of token
//! segments, environment variable parsing and time conversions.

pub mod b64;
pub mod envs;
pub mod time;

// Re-export commonly used functions
pub use b64::{b64u_decode, b64u_decode_to_string, b64u_encode, jwt_payload};
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
pub use time::{from_unix, now_utc, seconds_until};
