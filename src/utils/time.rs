//! Wall-clock helpers for epoch-second claims

use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix timestamp in whole seconds
///
/// A system clock set before the epoch yields a negative value instead of
/// failing.
pub fn now_seconds() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs())
            .map(|secs| -secs)
            .unwrap_or(i64::MIN),
    }
}

/// Saturating conversion of a duration in seconds to a signed offset
pub(crate) fn offset_seconds(seconds: u64) -> i64 {
    i64::try_from(seconds).unwrap_or(i64::MAX)
}
