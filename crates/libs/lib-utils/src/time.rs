//! # Time Utilities
//!
//! Conversions between token timestamps and chrono values.

use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Convert Unix seconds (as found in a JWT `exp` claim) to UTC.
pub fn from_unix(secs: i64) -> Result<DateTime<Utc>, Error> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or(Error::OutOfRange(secs))
}

/// Time remaining from `now` until `moment`, zero if already past.
pub fn seconds_until(moment: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (moment - now).to_std().unwrap_or(Duration::ZERO)
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    OutOfRange(i64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
