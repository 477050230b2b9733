// src/normalize.rs
use chrono::{DateTime, Utc};

use crate::types::{VideoDetail, VideoRecord};
use crate::window::within_window;

/// Per-batch counters, logged after normalization.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeStats {
    pub out_of_window: usize,
    pub malformed: usize,
}

/// Rewrite a trailing literal `Z` to an explicit `+00:00` offset. The
/// rewritten string is what gets stored, so persisted timestamps always carry
/// the offset spelled out.
fn explicit_utc_offset(ts: &str) -> String {
    match ts.strip_suffix('Z') {
        Some(head) => format!("{head}+00:00"),
        None => ts.to_string(),
    }
}

/// Turn raw detail payloads into validated [`VideoRecord`]s.
///
/// `now` is captured once by the caller so every record in the batch is
/// window-tested against the same instant. A record with an unparseable
/// timestamp or a missing/non-numeric view count is skipped with a logged
/// data error; the rest of the batch continues. Output order equals input
/// order (the platform's view-count ranking).
pub fn normalize(
    details: Vec<VideoDetail>,
    now: DateTime<Utc>,
    window_hours: i64,
) -> (Vec<VideoRecord>, NormalizeStats) {
    let mut records = Vec::with_capacity(details.len());
    let mut stats = NormalizeStats::default();

    for detail in details {
        let published_at = explicit_utc_offset(&detail.published_at);
        let published = match DateTime::parse_from_rfc3339(&published_at) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => {
                tracing::warn!(
                    video_id = %detail.id,
                    raw = %detail.published_at,
                    error = %e,
                    "skipping record with unparseable publish time"
                );
                stats.malformed += 1;
                continue;
            }
        };

        let view_count = match detail.view_count.as_deref().map(str::parse::<u64>) {
            Some(Ok(n)) => n,
            missing_or_bad => {
                tracing::warn!(
                    video_id = %detail.id,
                    raw = ?detail.view_count,
                    error = ?missing_or_bad.and_then(|r| r.err()),
                    "skipping record with non-numeric view count"
                );
                stats.malformed += 1;
                continue;
            }
        };

        if !within_window(published, now, window_hours) {
            stats.out_of_window += 1;
            continue;
        }

        records.push(VideoRecord {
            title: detail.title,
            url: format!("https://www.youtube.com/watch?v={}", detail.id),
            published_at,
            view_count,
        });
    }

    (records, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn detail(id: &str, published_at: &str, view_count: &str) -> VideoDetail {
        VideoDetail {
            id: id.to_string(),
            title: format!("video {id}"),
            published_at: published_at.to_string(),
            view_count: Some(view_count.to_string()),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
    }

    #[test]
    fn trailing_z_becomes_explicit_offset() {
        let (records, stats) = normalize(vec![detail("a", "2024-01-01T12:00:00Z", "100")], now(), 24);
        assert_eq!(stats, NormalizeStats::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].published_at, "2024-01-01T12:00:00+00:00");
        assert_eq!(records[0].url, "https://www.youtube.com/watch?v=a");
        assert_eq!(records[0].view_count, 100);
    }

    #[test]
    fn non_numeric_view_count_skips_only_that_record() {
        let (records, stats) = normalize(
            vec![
                detail("a", "2024-01-01T12:00:00Z", "100"),
                detail("b", "2024-01-01T13:00:00Z", "not_a_number"),
                detail("c", "2024-01-01T14:00:00Z", "200"),
            ],
            now(),
            24,
        );
        assert_eq!(stats.malformed, 1);
        let ids: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(ids, vec!["video a", "video c"]);
    }

    #[test]
    fn missing_view_count_is_malformed() {
        let mut d = detail("a", "2024-01-01T12:00:00Z", "1");
        d.view_count = None;
        let (records, stats) = normalize(vec![d], now(), 24);
        assert!(records.is_empty());
        assert_eq!(stats.malformed, 1);
    }

    #[test]
    fn unparseable_timestamp_is_malformed() {
        let (records, stats) = normalize(vec![detail("a", "yesterday-ish", "1")], now(), 24);
        assert!(records.is_empty());
        assert_eq!(stats.malformed, 1);
    }

    #[test]
    fn twenty_four_hour_window_keeps_23h_drops_25h() {
        let (records, stats) = normalize(
            vec![
                detail("fresh", "2024-01-01T01:00:00Z", "10"), // 23h old
                detail("stale", "2023-12-31T23:00:00Z", "20"), // 25h old
            ],
            now(),
            24,
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "video fresh");
        assert_eq!(stats.out_of_window, 1);
    }

    #[test]
    fn future_dated_record_is_dropped() {
        let (records, stats) = normalize(vec![detail("f", "2024-01-02T01:00:00Z", "5")], now(), 24);
        assert!(records.is_empty());
        assert_eq!(stats.out_of_window, 1);
    }

    #[test]
    fn output_preserves_input_order() {
        let (records, _) = normalize(
            vec![
                detail("x", "2024-01-01T10:00:00Z", "300"),
                detail("y", "2024-01-01T11:00:00Z", "100"),
                detail("z", "2024-01-01T12:00:00Z", "200"),
            ],
            now(),
            24,
        );
        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.youtube.com/watch?v=x",
                "https://www.youtube.com/watch?v=y",
                "https://www.youtube.com/watch?v=z",
            ]
        );
    }

    #[test]
    fn explicit_offset_passes_through_unchanged() {
        let (records, _) = normalize(
            vec![detail("a", "2024-01-01T12:00:00+00:00", "1")],
            now(),
            24,
        );
        assert_eq!(records[0].published_at, "2024-01-01T12:00:00+00:00");
    }
}
