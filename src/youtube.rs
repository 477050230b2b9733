// src/youtube.rs
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::VideoDetail;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Hard cap the platform puts on one `videos.list` call. Callers holding more
/// ids than this must chunk; this adapter refuses oversized batches outright.
pub const MAX_IDS_PER_DETAIL_CALL: usize = 50;

/// Seam between the pipeline and the video platform. Production uses
/// [`YoutubeClient`]; tests plug in mock implementations.
#[async_trait]
pub trait VideoApi: Send + Sync {
    /// One search call: videos only, ranked by view count descending,
    /// published no earlier than `published_after`. Returns the platform's
    /// own ranking order; ids are never re-sorted locally.
    async fn search_recent(
        &self,
        query: &str,
        published_after: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<String>>;

    /// One batched detail call for up to [`MAX_IDS_PER_DETAIL_CALL`] ids.
    /// Ids absent from the response (video deleted between search and fetch)
    /// are silently dropped; that race is normal, not a fault.
    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoDetail>>;
}

// ---- Wire types ------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideosItem>,
}

#[derive(Debug, Deserialize)]
struct VideosItem {
    id: String,
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "publishedAt")]
    published_at: String,
}

#[derive(Debug, Default, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

/// Google's standard error envelope, used to tell a rejected credential apart
/// from any other API failure.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: u16,
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorItem {
    #[serde(default)]
    reason: String,
}

// ---- HTTP client -----------------------------------------------------------

/// reqwest-backed [`VideoApi`] against the YouTube Data API v3.
pub struct YoutubeClient {
    http: reqwest::Client,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{API_BASE}/{path}");
        let resp = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_api_error(status.as_u16(), &body));
        }
        Ok(resp.json::<T>().await?)
    }
}

/// Map a failed API response onto the error taxonomy using the reason the
/// platform reports, not the HTTP status alone. The platform's message is
/// propagated verbatim either way.
fn classify_api_error(http_status: u16, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(env) => {
            let credential_rejected = env.error.errors.iter().any(|e| {
                matches!(
                    e.reason.as_str(),
                    "keyInvalid" | "keyExpired" | "authError" | "unauthorized" | "forbidden"
                )
            });
            if credential_rejected {
                Error::Auth(env.error.message)
            } else {
                Error::Transport(format!("API error {}: {}", env.error.code, env.error.message))
            }
        }
        // No parseable envelope; all we have is the raw status.
        Err(_) => Error::Transport(format!("HTTP {http_status}: {body}")),
    }
}

#[async_trait]
impl VideoApi for YoutubeClient {
    async fn search_recent(
        &self,
        query: &str,
        published_after: DateTime<Utc>,
        max_results: u32,
    ) -> Result<Vec<String>> {
        let floor = published_after.to_rfc3339_opts(SecondsFormat::Secs, true);
        let max = max_results.to_string();
        let resp: SearchResponse = self
            .get_json(
                "search",
                &[
                    ("part", "id,snippet"),
                    ("q", query),
                    ("maxResults", &max),
                    ("order", "viewCount"),
                    ("type", "video"),
                    ("publishedAfter", &floor),
                ],
            )
            .await?;

        let ids: Vec<String> = resp
            .items
            .into_iter()
            .filter_map(|it| it.id.video_id)
            .collect();
        tracing::debug!(count = ids.len(), query, "search returned video ids");
        Ok(ids)
    }

    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoDetail>> {
        if ids.len() > MAX_IDS_PER_DETAIL_CALL {
            return Err(Error::Data(format!(
                "detail batch of {} exceeds platform limit of {MAX_IDS_PER_DETAIL_CALL}",
                ids.len()
            )));
        }
        let joined = ids.join(",");
        let resp: VideosResponse = self
            .get_json(
                "videos",
                &[("part", "snippet,statistics"), ("id", &joined)],
            )
            .await?;

        let details: Vec<VideoDetail> = resp
            .items
            .into_iter()
            .map(|it| VideoDetail {
                id: it.id,
                title: it.snippet.title,
                published_at: it.snippet.published_at,
                view_count: it.statistics.view_count,
            })
            .collect();
        if details.len() < ids.len() {
            // Normal race: some videos vanished between search and fetch.
            tracing::debug!(
                requested = ids.len(),
                returned = details.len(),
                "detail response dropped ids"
            );
        }
        Ok(details)
    }
}
