use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly. Falls back to `"UTC"` if
/// detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve a user-supplied timezone name to a [`Tz`].
///
/// `"auto"` (the CLI default) resolves to the system timezone. An
/// unrecognised name falls back to UTC with a logged warning rather than
/// failing the run.
pub fn resolve_timezone(name: &str) -> Tz {
    let effective = if name.eq_ignore_ascii_case("auto") {
        get_system_timezone()
    } else {
        name.to_string()
    };

    effective.parse::<Tz>().unwrap_or_else(|_| {
        warn!(timezone = %effective, "unrecognised timezone; falling back to UTC");
        Tz::UTC
    })
}

// ── Epoch-millisecond decoding ────────────────────────────────────────────────

/// Decode an epoch-millisecond attribute value into a UTC instant.
///
/// Returns `None` when the string is empty, not an integer, or outside the
/// range `chrono` can represent. This is the single timestamp-decoding path
/// for both record kinds, so "absent" and "unparseable" behave identically
/// everywhere.
pub fn parse_epoch_millis(raw: &str) -> Option<DateTime<Utc>> {
    let millis: i64 = raw.trim().parse().ok()?;
    Utc.timestamp_millis_opt(millis).single()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
