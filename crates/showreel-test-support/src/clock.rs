//! Test clock — the shared epoch of every virtual timeline.

use chrono::{DateTime, TimeZone, Utc};

/// The instant every virtual timeline in the test suite starts from.
///
/// # Panics
///
/// Never; the literal date is valid.
#[must_use]
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}
