//! Timestamp handling for the two forms the operator emits: ISO-8601 with a
//! zone designator (`2021-09-12T17:00:00.0000000Z`) and the .NET JSON form
//! (`/Date(1631466000000)/`).

use crate::error::{DkError, DkResult};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Parse either supported timestamp form into an absolute instant.
pub fn parse_timestamp(s: &str) -> DkResult<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Some(inner) = trimmed
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    {
        return parse_dotnet_millis(inner).ok_or_else(|| DkError::InvalidTimestamp(s.to_owned()));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DkError::InvalidTimestamp(s.to_owned()))
}

/// Parse a timestamp and express it in `tz`.
pub fn parse_local(s: &str, tz: Tz) -> DkResult<DateTime<Tz>> {
    parse_timestamp(s).map(|dt| dt.with_timezone(&tz))
}

/// Resolve an IANA zone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> DkResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DkError::InvalidTimezone(name.to_owned()))
}

// The millisecond count is UTC; a trailing `+hhmm`/`-hhmm` only records the
// server's offset and does not shift the instant.
fn parse_dotnet_millis(inner: &str) -> Option<DateTime<Utc>> {
    let digits_end = inner
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '+' || *c == '-')
        .map(|(i, _)| i)
        .unwrap_or(inner.len());
    let (millis, offset) = inner.split_at(digits_end);
    if !offset.is_empty() {
        let suffix = &offset[1..];
        if suffix.len() != 4 || !suffix.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    let millis: i64 = millis.parse().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}
