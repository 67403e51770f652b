//! Schedule-time parsing for the publish flow.
//!
//! The platform rejects publish times less than ten minutes out, so the
//! proxy clamps forward before forwarding the epoch.

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};

/// Minimum lead time the platform accepts for a scheduled publish.
pub const MIN_SCHEDULE_LEAD: Duration = Duration::minutes(10);

/// Parse a schedule time string.
///
/// Accepts RFC 3339, or a bare `YYYY-MM-DDTHH:MM[:SS]` which is read as UTC.
/// Returns `None` when the string cannot be parsed.
pub fn parse_schedule_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Resolve a raw schedule string to the epoch seconds sent upstream.
///
/// The result is clamped to at least [`MIN_SCHEDULE_LEAD`] past `now` and
/// floored to whole seconds. Unparseable input yields `None`, which the
/// publish flow treats as "post immediately".
pub fn schedule_epoch(raw: &str, now: DateTime<Utc>) -> Option<i64> {
    let requested = parse_schedule_time(raw)?;
    let min_lead = now + MIN_SCHEDULE_LEAD;
    Some(requested.max(min_lead).timestamp())
}

/// Suggested default publish slot: six hours from now, on the hour.
pub fn next_publish_slot(now: DateTime<Utc>) -> DateTime<Utc> {
    (now + Duration::hours(6))
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("zeroing sub-hour fields cannot overflow")
}
