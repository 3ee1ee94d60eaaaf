//! # yt-batch-dl
//!
//! Batch video download orchestration on top of the `yt-dlp` command-line tool.
//!
//! ## Design Philosophy
//!
//! yt-batch-dl is designed to be:
//! - **Library-first** - No UI; front-ends subscribe to events and render them
//! - **Sequential** - One `yt-dlp` process at a time, links in list order
//! - **Event-driven** - Output lines, progress and completion arrive as [`Event`]s
//! - **Stoppable** - A running download job can be stopped between or during links
//!
//! Two kinds of job exist: a download job runs `yt-dlp` once per link, and an
//! extraction job resolves a playlist or channel into plain video links and
//! saves them as numbered batch files that can later be downloaded.
//!
//! ## Quick Start
//!
//! ```no_run
//! use yt_batch_dl::{BatchDownloader, Config, DownloadJob, Event, Quality};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = BatchDownloader::new(Config::default())?;
//!
//!     // Subscribe before starting so no event is missed
//!     let mut events = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             if let Event::Progress { item, percent, .. } = event {
//!                 println!("link {}: {}%", item + 1, percent);
//!             }
//!         }
//!     });
//!
//!     let job = DownloadJob::new(
//!         vec!["https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()],
//!         "downloads",
//!     )
//!     .with_quality(Quality::P720);
//!
//!     let handle = downloader.start_download(job)?;
//!     let summary = handle.join().await?;
//!     println!("{} of {} succeeded", summary.succeeded, summary.total);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Batch files: chunking extracted links and reading URL lists
pub mod batch;
/// Configuration types
pub mod config;
/// Job facade and job execution (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Progress percentage parsing
pub mod progress;
/// yt-dlp invocation and process handling
pub mod tool;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use batch::{load_url_list, resolve_input};
pub use config::{Config, DownloadConfig, ExtractConfig, ToolsConfig};
pub use downloader::{BatchDownloader, DownloadHandle, ExtractHandle};
pub use error::{Error, Result};
pub use tool::{Invocation, ToolRunner, YtDlp};
pub use types::{
    BatchFile, DownloadJob, DownloadOptions, DownloadSummary, Event, ExtractJob, JobId,
    JobOutcome, LogLevel, Quality,
};

/// Wait for a download job, stopping it when a termination signal arrives
///
/// Returns once the job has emitted its final event. If a signal arrived
/// first, the job is asked to stop and this still waits for it to wind down;
/// the return value tells whether that happened.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use yt_batch_dl::{BatchDownloader, Config, DownloadJob, run_until_signal};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let downloader = BatchDownloader::new(Config::default())?;
///     let job = DownloadJob::new(vec!["https://youtu.be/dQw4w9WgXcQ".to_string()], ".");
///     let handle = downloader.start_download(job)?;
///
///     if run_until_signal(&handle).await {
///         eprintln!("interrupted");
///     }
///     let summary = handle.join().await?;
///     println!("{:?}", summary.outcome);
///
///     Ok(())
/// }
/// ```
pub async fn run_until_signal(handle: &DownloadHandle) -> bool {
    tokio::select! {
        _ = handle.finished() => false,
        _ = wait_for_signal() => {
            handle.request_stop();
            handle.finished().await;
            true
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), Ok(mut sigint)) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            sigint.recv().await;
            tracing::info!("Received SIGINT signal (Ctrl+C)");
        }
        (Ok(mut sigterm), Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            sigterm.recv().await;
            tracing::info!("Received SIGTERM signal");
        }
        (Err(e), Err(_)) => {
            tracing::error!(error = %e, "Could not register any signal handlers, using ctrl_c fallback");
            wait_for_ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    wait_for_ctrl_c().await;
}

/// Resolves on Ctrl+C; never resolves if Ctrl+C cannot be observed
async fn wait_for_ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
            std::future::pending::<()>().await;
        }
    }
}
