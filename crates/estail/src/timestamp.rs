//! Nanosecond-precision RFC 3339 timestamps used for the cursor.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Result, TailError};

/// Formats an instant as RFC 3339 with nine fractional digits and a `Z` suffix.
#[must_use]
pub fn format_cursor(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parses an RFC 3339 timestamp with any offset and fraction width.
///
/// # Errors
///
/// Returns [`TailError::InvalidTimestamp`] if the value is not RFC 3339.
pub fn parse_cursor(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| TailError::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
}
