//! Timestamp helpers shared by every store backend
//!
//! Profiles carry millisecond-precision timestamps so that every backend
//! (SQLite integers, BSON, JSON text) round-trips them exactly.

use chrono::{DateTime, Duration, Utc};

/// Current time truncated to whole milliseconds.
pub fn now_millis() -> DateTime<Utc> {
    truncate_to_millis(Utc::now())
}

/// Drop sub-millisecond precision from `ts`.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

/// Next `updated_at` value for a record last touched at `previous`.
///
/// Always strictly after `previous`, even when the wall clock has not moved
/// (or moved backwards) since the last write.
pub fn advance_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let now = truncate_to_millis(now);
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
pub fn duration_millis(elapsed: std::time::Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
