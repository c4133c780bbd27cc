//! Wall-clock helpers for entity timestamps.

use chrono::{DateTime, Duration, Utc};

/// Returns the current UTC time.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Returns a timestamp strictly later than `previous`.
///
/// Uses the current time unless the clock has not advanced past `previous`
/// (coarse clocks, back-to-back writes), in which case `previous` is bumped
/// by one microsecond.
pub fn tick_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous + Duration::microseconds(1)
    }
}
