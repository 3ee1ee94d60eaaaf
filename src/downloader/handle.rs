//! Handles returned to the caller for running jobs.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::types::{BatchFile, DownloadSummary, JobId};

/// Handle to a running download job
///
/// Dropping the handle does not stop the job; call [`request_stop`](Self::request_stop).
#[derive(Debug)]
pub struct DownloadHandle {
    pub(crate) id: JobId,
    pub(crate) stop: CancellationToken,
    pub(crate) done: CancellationToken,
    pub(crate) task: JoinHandle<DownloadSummary>,
}

impl DownloadHandle {
    /// ID carried by this job's events
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Ask the job to stop
    ///
    /// Best effort and asynchronous: no further URL is started, and the
    /// running yt-dlp process (if any) is terminated. The job then emits its
    /// [`Event::Finished`](crate::Event::Finished) as usual. Calling this more
    /// than once, or after the job ended, has no effect.
    pub fn request_stop(&self) {
        if !self.stop.is_cancelled() {
            tracing::info!(job = self.id.0, "stop requested");
        }
        self.stop.cancel();
    }

    /// Whether a stop has been requested
    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_cancelled()
    }

    /// A token that cancels this job when cancelled, for wiring into other shutdown logic
    pub fn stop_token(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Whether the job has emitted its final event
    pub fn is_finished(&self) -> bool {
        self.done.is_cancelled()
    }

    /// Wait until the job has emitted its final event, without consuming the handle
    pub async fn finished(&self) {
        self.done.cancelled().await;
    }

    /// Wait for the job and return its summary
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskFailed`](crate::Error::TaskFailed) if the job task panicked.
    pub async fn join(self) -> Result<DownloadSummary> {
        Ok(self.task.await?)
    }
}

/// Handle to a running extraction job
///
/// Extraction cannot be stopped once started.
#[derive(Debug)]
pub struct ExtractHandle {
    pub(crate) id: JobId,
    pub(crate) task: JoinHandle<Vec<BatchFile>>,
}

impl ExtractHandle {
    /// ID carried by this job's events
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Wait for the job and return the batch files it wrote, in list order
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskFailed`](crate::Error::TaskFailed) if the job task panicked.
    pub async fn join(self) -> Result<Vec<BatchFile>> {
        Ok(self.task.await?)
    }
}
