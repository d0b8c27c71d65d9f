//! Display formatting helpers.
//!
//! Pure functions used by the CLI report and by any host presentation layer.
//! None of these are consulted during parsing or statistics; records keep
//! their raw values.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::models::{CallType, MessageType};

/// Label shown for records whose timestamp could not be decoded.
pub const UNKNOWN_TIME: &str = "unknown time";

/// Label shown for calls with a zero duration.
pub const NOT_CONNECTED: &str = "not connected";

// ── Type codes ────────────────────────────────────────────────────────────────

/// Human-readable label for a raw message `type` code.
pub fn format_message_type(code: i64) -> &'static str {
    MessageType::from_code(code).label()
}

/// Human-readable label for a raw call `type` code.
pub fn format_call_type(code: i64) -> &'static str {
    CallType::from_code(code).label()
}

// ── Durations ─────────────────────────────────────────────────────────────────

/// Compact call-duration string: `"1h 1m 1s"`.
///
/// A zero duration means the call never connected and renders as
/// [`NOT_CONNECTED`]. Zero components are omitted, so the output never
/// contains a `"0h"` / `"0m"` / `"0s"` part.
///
/// # Examples
///
/// ```
/// use insight_core::formatting::format_duration;
///
/// assert_eq!(format_duration(0), "not connected");
/// assert_eq!(format_duration(45), "45s");
/// assert_eq!(format_duration(3600), "1h");
/// assert_eq!(format_duration(3661), "1h 1m 1s");
/// ```
pub fn format_duration(seconds: u64) -> String {
    format_duration_with(seconds, |value, unit| format!("{}{}", value, unit.short))
}

/// Spelled-out call-duration string: `"1 hour 1 minute 1 second"`.
///
/// Same omission rules as [`format_duration`]; units pluralise.
///
/// # Examples
///
/// ```
/// use insight_core::formatting::format_duration_long;
///
/// assert_eq!(format_duration_long(0), "not connected");
/// assert_eq!(format_duration_long(3661), "1 hour 1 minute 1 second");
/// assert_eq!(format_duration_long(7320), "2 hours 2 minutes");
/// ```
pub fn format_duration_long(seconds: u64) -> String {
    format_duration_with(seconds, |value, unit| {
        let name = if value == 1 { unit.singular } else { unit.plural };
        format!("{} {}", value, name)
    })
}

struct DurationUnit {
    short: &'static str,
    singular: &'static str,
    plural: &'static str,
}

const HOURS: DurationUnit = DurationUnit {
    short: "h",
    singular: "hour",
    plural: "hours",
};
const MINUTES: DurationUnit = DurationUnit {
    short: "m",
    singular: "minute",
    plural: "minutes",
};
const SECONDS: DurationUnit = DurationUnit {
    short: "s",
    singular: "second",
    plural: "seconds",
};

fn format_duration_with(seconds: u64, render: impl Fn(u64, &DurationUnit) -> String) -> String {
    if seconds == 0 {
        return NOT_CONNECTED.to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(render(hours, &HOURS));
    }
    if minutes > 0 {
        parts.push(render(minutes, &MINUTES));
    }
    if secs > 0 {
        parts.push(render(secs, &SECONDS));
    }
    parts.join(" ")
}

// ── Dates ─────────────────────────────────────────────────────────────────────

/// Format an optional UTC instant in the given timezone.
///
/// `None` (a record whose `date` attribute could not be decoded) renders as
/// [`UNKNOWN_TIME`] rather than any sentinel date.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use chrono_tz::Tz;
/// use insight_core::formatting::format_date_time;
///
/// let ts = chrono::Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
/// assert_eq!(format_date_time(Some(ts), true, Tz::UTC), "2024-01-15 10:30");
/// assert_eq!(format_date_time(Some(ts), false, Tz::UTC), "2024-01-15");
/// assert_eq!(format_date_time(None, true, Tz::UTC), "unknown time");
/// ```
pub fn format_date_time(timestamp: Option<DateTime<Utc>>, include_time: bool, tz: Tz) -> String {
    let Some(ts) = timestamp else {
        return UNKNOWN_TIME.to_string();
    };

    let local = ts.with_timezone(&tz);
    if include_time {
        local.format("%Y-%m-%d %H:%M").to_string()
    } else {
        local.format("%Y-%m-%d").to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
