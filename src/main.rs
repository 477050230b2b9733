//! Trending-Video Report — Binary Entrypoint
//! Runs the search → fetch → normalize → persist → render pipeline once and
//! prints the output locations, for non-interactive use. Interactive hosts
//! embed the library and use `pipeline::spawn_run` instead.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hot_video_report::pipeline::{run_once, StatusSink};
use hot_video_report::types::SearchSpec;
use hot_video_report::youtube::{YoutubeClient, MAX_IDS_PER_DETAIL_CALL};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch trending videos for a keyword and render an HTML report")]
struct Args {
    /// Search keyword
    query: String,

    /// Maximum number of search results (platform cap: 50)
    #[arg(short = 'n', long, default_value_t = 25)]
    max_results: u32,

    /// Recency window in hours; older videos are excluded
    #[arg(short = 'w', long, default_value_t = 24)]
    window_hours: i64,

    /// API credential; falls back to the environment
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Output path for the JSON data file
    #[arg(short, long, default_value = "hot_videos.json")]
    output: PathBuf,

    /// Output path for the HTML report (default: JSON path with .html)
    #[arg(short, long)]
    report: Option<PathBuf>,
}

/// Sink for terminal use: each progress message becomes one stderr line.
struct StderrSink;

impl StatusSink for StderrSink {
    fn status(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent. Lets YOUTUBE_API_KEY come
    // from a file instead of the shell.
    let _ = dotenvy::dotenv();
    init_tracing();

    let args = Args::parse();
    anyhow::ensure!(
        args.max_results > 0 && args.window_hours > 0,
        "--max-results and --window-hours must be positive"
    );

    // The detail endpoint takes one batch per call, so cap the search here
    // rather than chunking downstream.
    let spec = SearchSpec {
        query: args.query,
        max_results: args.max_results.min(MAX_IDS_PER_DETAIL_CALL as u32),
        window_hours: args.window_hours,
    };
    let html_path = args
        .report
        .unwrap_or_else(|| args.output.with_extension("html"));

    let api = YoutubeClient::new(args.api_key);
    let summary = run_once(&api, &spec, &args.output, &html_path, &StderrSink).await?;
    println!(
        "Saved {} videos to '{}'; report at '{}'.",
        summary.record_count,
        summary.json_path.display(),
        summary.html_path.display()
    );
    Ok(())
}
