//! Core downloader implementation split into focused submodules.
//!
//! The [`BatchDownloader`] facade starts jobs; each job runs on its own task:
//! - [`download_task`] - Sequential per-URL downloads with progress and stop
//! - [`extract_task`] - Playlist link extraction into batch files
//! - [`context`] - Shared state and event helpers for a running job
//! - [`handle`] - Caller-side handles for running jobs

mod context;
mod download_task;
mod extract_task;
mod handle;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(all(test, unix))]
mod tests;

pub use handle::{DownloadHandle, ExtractHandle};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::tool::{ToolRunner, YtDlp};
use crate::types::{DownloadJob, Event, ExtractJob, JobId};
use crate::utils::ensure_dir;

use context::JobContext;

/// Starts download and extraction jobs and fans their events out to subscribers
///
/// Cheap to clone; clones share the event channel and job ID sequence. Jobs
/// started from the same downloader may run at the same time; their events
/// are told apart by [`Event::job`].
#[derive(Clone)]
pub struct BatchDownloader {
    /// Validated configuration
    pub(crate) config: Arc<Config>,
    /// Launches yt-dlp (or a test double)
    pub(crate) runner: Arc<dyn ToolRunner>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: broadcast::Sender<Event>,
    /// Source of job IDs
    next_job_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for BatchDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchDownloader")
            .field("config", &self.config)
            .field("runner", &self.runner.name())
            .field("subscribers", &self.event_tx.receiver_count())
            .finish()
    }
}

impl BatchDownloader {
    /// Create a downloader that runs the yt-dlp executable found per [`YtDlp::discover`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let runner = YtDlp::discover(&config.tools);
        Self::with_runner(config, Arc::new(runner))
    }

    /// Create a downloader that launches processes through `runner`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn with_runner(config: Config, runner: Arc<dyn ToolRunner>) -> Result<Self> {
        config.validate()?;
        let (event_tx, _rx) = broadcast::channel(config.event_channel_capacity);

        tracing::debug!(runner = runner.name(), "batch downloader created");

        Ok(Self {
            config: Arc::new(config),
            runner,
            event_tx,
            next_job_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Subscribe to events of every job started after this call
    ///
    /// Each subscriber gets its own copy of every event. A subscriber that
    /// falls more than `event_channel_capacity` events behind receives
    /// [`RecvError::Lagged`](broadcast::error::RecvError::Lagged) and loses
    /// the oldest events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start downloading `job.urls` one after another
    ///
    /// Returns as soon as the job task is spawned. Must be called from within
    /// a Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the URL list is empty, contains a blank
    ///   entry, or `concurrent_fragments` is `Some(0)`
    /// - [`Error::File`] if the destination directory cannot be created
    pub fn start_download(&self, job: DownloadJob) -> Result<DownloadHandle> {
        if job.urls.is_empty() {
            return Err(Error::InvalidInput("no links to download".to_string()));
        }
        if let Some(position) = job.urls.iter().position(|u| u.trim().is_empty()) {
            return Err(Error::InvalidInput(format!(
                "link {} of {} is blank",
                position + 1,
                job.urls.len()
            )));
        }
        if job.options.concurrent_fragments == Some(0) {
            return Err(Error::InvalidInput(
                "concurrent fragments must be at least 1".to_string(),
            ));
        }
        ensure_dir(&job.dest_dir)?;

        let ctx = self.job_context();
        let id = ctx.id;
        let stop = CancellationToken::new();
        let done = CancellationToken::new();

        tracing::info!(job = id.0, urls = job.urls.len(), "starting download job");

        let task = tokio::spawn(download_task::run_download_job(
            ctx,
            job,
            stop.clone(),
            done.clone(),
        ));

        Ok(DownloadHandle {
            id,
            stop,
            done,
            task,
        })
    }

    /// Start resolving `job.url` into video links and writing batch files
    ///
    /// Returns as soon as the job task is spawned. Must be called from within
    /// a Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the URL is blank or `batch_size` is `Some(0)`
    /// - [`Error::Config`] if the configured watch URL base does not parse
    /// - [`Error::File`] if the destination directory cannot be created
    pub fn start_extract(&self, job: ExtractJob) -> Result<ExtractHandle> {
        if job.url.trim().is_empty() {
            return Err(Error::InvalidInput("no link to extract from".to_string()));
        }
        let batch_size = job.batch_size.unwrap_or(self.config.extract.batch_size);
        if batch_size == 0 {
            return Err(Error::InvalidInput(
                "batch size must be at least 1".to_string(),
            ));
        }
        let watch_base = Url::parse(&self.config.extract.watch_url_base).map_err(|e| {
            Error::config(
                "extract.watch_url_base",
                format!("invalid watch URL base: {}", e),
            )
        })?;
        ensure_dir(&job.dest_dir)?;

        let ctx = self.job_context();
        let id = ctx.id;

        tracing::info!(job = id.0, url = %job.url, batch_size, "starting extraction job");

        let task = tokio::spawn(extract_task::run_extract_job(
            ctx, job, batch_size, watch_base,
        ));

        Ok(ExtractHandle { id, task })
    }

    fn job_context(&self) -> JobContext {
        JobContext {
            id: JobId(self.next_job_id.fetch_add(1, Ordering::Relaxed)),
            event_tx: self.event_tx.clone(),
            runner: Arc::clone(&self.runner),
            config: Arc::clone(&self.config),
        }
    }
}
