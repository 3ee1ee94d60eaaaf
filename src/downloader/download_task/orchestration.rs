//! Download job orchestration: URLs strictly one after another, one final event.

use tokio_util::sync::CancellationToken;

use crate::tool::download_invocation;
use crate::types::{DownloadJob, DownloadSummary, Event, JobOutcome};

use super::super::context::JobContext;
use super::item::{ItemOutcome, download_item};

/// Run a whole download job and emit its [`Event::Finished`]
///
/// `done` is cancelled once the final event has been sent, also when the task
/// unwinds, so [`DownloadHandle::finished`](crate::DownloadHandle::finished)
/// never hangs.
pub(crate) async fn run_download_job(
    ctx: JobContext,
    job: DownloadJob,
    stop: CancellationToken,
    done: CancellationToken,
) -> DownloadSummary {
    let _done_guard = done.drop_guard();

    let summary = download_all(&ctx, &job, &stop).await;

    match &summary.outcome {
        JobOutcome::Completed => ctx.info(format!(
            "All downloads finished: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        )),
        JobOutcome::Stopped => ctx.warn(format!(
            "Download stopped after {} of {} link(s)",
            summary.attempted, summary.total
        )),
        JobOutcome::Aborted { reason } => {
            ctx.error(format!("Download aborted: {}", reason));
        }
    }

    tracing::info!(
        job = ctx.id.0,
        total = summary.total,
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        failed = summary.failed,
        outcome = ?summary.outcome,
        "download job finished"
    );

    ctx.emit(Event::Finished {
        job: ctx.id,
        summary: summary.clone(),
    });
    summary
}

async fn download_all(
    ctx: &JobContext,
    job: &DownloadJob,
    stop: &CancellationToken,
) -> DownloadSummary {
    let total = job.urls.len();
    let mut summary = DownloadSummary {
        total,
        attempted: 0,
        succeeded: 0,
        failed: 0,
        outcome: JobOutcome::Completed,
    };

    tracing::info!(
        job = ctx.id.0,
        total,
        quality = %job.quality,
        dest = %job.dest_dir.display(),
        "download job started"
    );

    for (index, url) in job.urls.iter().enumerate() {
        if stop.is_cancelled() {
            ctx.warn("Download stopped by user");
            summary.outcome = JobOutcome::Stopped;
            break;
        }

        ctx.info(format!("Downloading {}/{}: {}", index + 1, total, url));
        ctx.progress(index, 0);

        let invocation = download_invocation(
            url,
            job.quality,
            &job.options,
            &job.dest_dir,
            &ctx.config.download,
        );
        summary.attempted += 1;

        match download_item(ctx, index, total, &invocation, stop).await {
            ItemOutcome::Succeeded => summary.succeeded += 1,
            ItemOutcome::Failed => summary.failed += 1,
            ItemOutcome::Stopped => {
                summary.outcome = JobOutcome::Stopped;
                break;
            }
            ItemOutcome::LaunchFailed(reason) => {
                summary.outcome = JobOutcome::Aborted { reason };
                break;
            }
        }
    }

    summary
}
