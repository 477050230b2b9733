// src/window.rs
use chrono::{DateTime, Utc};

/// True iff `published_at` is no older than `window_hours` and not in the
/// future relative to `now`. A future-dated timestamp (clock skew on the
/// platform side) is excluded, not clamped to zero.
///
/// Age is compared in whole seconds so a video 24h01m old fails a 24h window.
pub fn within_window(published_at: DateTime<Utc>, now: DateTime<Utc>, window_hours: i64) -> bool {
    let age_secs = now.signed_duration_since(published_at).num_seconds();
    age_secs >= 0 && age_secs <= window_hours.saturating_mul(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn inside_window_passes() {
        let now = utc("2024-01-02T00:00:00+00:00");
        assert!(within_window(utc("2024-01-01T01:00:00+00:00"), now, 24)); // 23h old
    }

    #[test]
    fn outside_window_fails() {
        let now = utc("2024-01-02T00:00:00+00:00");
        assert!(!within_window(utc("2023-12-31T23:00:00+00:00"), now, 24)); // 25h old
    }

    #[test]
    fn future_publish_time_is_excluded() {
        let now = utc("2024-01-02T00:00:00+00:00");
        assert!(!within_window(utc("2024-01-02T00:00:01+00:00"), now, 24));
    }

    #[test]
    fn boundary_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let exactly_24h = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(within_window(exactly_24h, now, 24));
        assert!(within_window(now, now, 24)); // zero age
    }

    #[test]
    fn extreme_window_saturates_instead_of_overflowing() {
        let now = utc("2024-01-02T00:00:00+00:00");
        let old = utc("1970-01-01T00:00:00+00:00");
        assert!(within_window(old, now, i64::MAX));
        assert!(!within_window(utc("2024-01-03T00:00:00+00:00"), now, i64::MAX));
    }

    #[test]
    fn one_second_past_window_fails() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let stale = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert!(!within_window(stale, now, 24));
    }
}
