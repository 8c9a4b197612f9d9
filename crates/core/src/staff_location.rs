//! Live staff location freshness.

use chrono::Duration;

use crate::types::Timestamp;

/// Locations older than this are hidden from residents.
pub const FRESHNESS_WINDOW_MINS: i64 = 5;

/// Oldest `updated_at` still considered live at `now`.
pub fn freshness_cutoff(now: Timestamp) -> Timestamp {
    now - Duration::minutes(FRESHNESS_WINDOW_MINS)
}

/// Whether a location reported at `updated_at` is still live at `now`.
pub fn is_fresh(updated_at: Timestamp, now: Timestamp) -> bool {
    updated_at >= freshness_cutoff(now)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn recent_location_is_fresh() {
        let now = Utc::now();
        assert!(is_fresh(now - Duration::minutes(4), now));
        assert!(is_fresh(freshness_cutoff(now), now));
    }

    #[test]
    fn stale_location_is_hidden() {
        let now = Utc::now();
        assert!(!is_fresh(now - Duration::minutes(6), now));
    }
}
