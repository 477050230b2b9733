// src/types.rs

/// One normalized video, exactly as it lands in the output file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    pub title: String,
    /// Canonical watch-page URL, derived from the platform id.
    pub url: String,
    /// ISO-8601 with an explicit UTC offset (never a bare trailing `Z`).
    pub published_at: String,
    pub view_count: u64,
}

/// Per-run search parameters. The API credential is not carried here; it is
/// consumed once when the client is constructed.
#[derive(Debug, Clone)]
pub struct SearchSpec {
    pub query: String,
    pub max_results: u32,
    pub window_hours: i64,
}

/// Raw per-video payload from the detail endpoint, before normalization.
/// The platform reports `viewCount` as a string and may omit it entirely.
#[derive(Debug, Clone)]
pub struct VideoDetail {
    pub id: String,
    pub title: String,
    pub published_at: String,
    pub view_count: Option<String>,
}
