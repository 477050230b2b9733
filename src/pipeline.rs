// src/pipeline.rs
//! The run itself: search → detail fetch → normalize → persist → render.
//! Stages are sequential and blocking; the whole chain runs once per trigger.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::error::Result;
use crate::normalize::normalize;
use crate::types::SearchSpec;
use crate::youtube::VideoApi;
use crate::{report, store};

/// Progress-sink capability: zero or more human-readable messages, each
/// replacing the previous one. A host can back this with a queue, a channel,
/// or a direct callback; closures work out of the box.
pub trait StatusSink: Send + Sync {
    fn status(&self, message: &str);
}

impl<F> StatusSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn status(&self, message: &str) {
        self(message)
    }
}

/// Sink that discards every message.
pub struct NullSink;

impl StatusSink for NullSink {
    fn status(&self, _message: &str) {}
}

/// Terminal outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub json_path: PathBuf,
    pub html_path: PathBuf,
    pub record_count: usize,
}

/// Execute the full pipeline once.
///
/// Zero search hits skip the detail fetch entirely; an empty array is still
/// written and the report renders its no-data state. Any fatal error returns
/// before the persistence write, so a run that fails after partial network
/// success leaves no output file.
pub async fn run_once(
    api: &dyn VideoApi,
    spec: &SearchSpec,
    json_path: &Path,
    html_path: &Path,
    sink: &dyn StatusSink,
) -> Result<RunSummary> {
    sink.status("Searching for trending videos...");
    let published_after = Utc::now() - Duration::hours(spec.window_hours);
    let ids = api
        .search_recent(&spec.query, published_after, spec.max_results)
        .await?;

    let details = if ids.is_empty() {
        Vec::new()
    } else {
        sink.status("Fetching video details...");
        api.video_details(&ids).await?
    };

    sink.status("Processing video data...");
    let now = Utc::now();
    let (records, stats) = normalize(details, now, spec.window_hours);
    tracing::info!(
        kept = records.len(),
        out_of_window = stats.out_of_window,
        malformed = stats.malformed,
        "normalized video batch"
    );

    store::write_records(json_path, &records)?;
    let record_count = report::render_report(json_path, html_path)?;

    sink.status(&format!(
        "Saved {} videos to '{}'; report at '{}'.",
        record_count,
        json_path.display(),
        html_path.display()
    ));

    Ok(RunSummary {
        json_path: json_path.to_path_buf(),
        html_path: html_path.to_path_buf(),
        record_count,
    })
}

/// Offload a whole run onto a background task so an interactive surface
/// stays responsive while the network calls block. Exactly one terminal
/// outcome arrives on the returned channel; progress flows through `sink`
/// as the run advances. There is no cancellation: a started run proceeds to
/// completion or failure. Serializing concurrent runs is the trigger's job.
pub fn spawn_run(
    api: Arc<dyn VideoApi>,
    spec: SearchSpec,
    json_path: PathBuf,
    html_path: PathBuf,
    sink: Arc<dyn StatusSink>,
) -> tokio::sync::oneshot::Receiver<Result<RunSummary>> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let outcome = run_once(api.as_ref(), &spec, &json_path, &html_path, sink.as_ref()).await;
        // Receiver dropped means nobody is listening anymore; nothing to do.
        let _ = tx.send(outcome);
    });
    rx
}
