//! Local wall-clock helpers.
//!
//! Attendance rows store the calendar date and time as seen in a single,
//! configurable UTC offset rather than the server's own zone.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// Builds a `FixedOffset` from minutes east of UTC, falling back to UTC when out of range.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Current instant expressed in the given offset.
pub fn local_now(offset_minutes: i32) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset_from_minutes(offset_minutes))
}

/// `YYYY-MM-DD` for the instant.
pub fn date_string<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y-%m-%d").to_string()
}

/// `HH:MM:SS` for the instant.
pub fn time_string<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}
