// src/lib.rs
// Public library surface for integration tests (and embedding hosts).

pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod types;
pub mod window;
pub mod youtube;

// ---- Re-exports for stable public API ----
pub use crate::error::Error;
pub use crate::pipeline::{run_once, spawn_run, RunSummary, StatusSink};
pub use crate::types::{SearchSpec, VideoRecord};
pub use crate::youtube::{VideoApi, YoutubeClient};
