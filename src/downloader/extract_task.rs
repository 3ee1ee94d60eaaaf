//! Playlist/channel link extraction into batch files.

use url::Url;

use crate::batch::{parse_url_list, plan_batches, watch_url, write_batch_file};
use crate::tool::list_ids_invocation;
use crate::types::{BatchFile, Event, ExtractJob};
use crate::utils::{display_name, stderr_excerpt};

use super::context::JobContext;

/// Run an extraction job and emit its [`Event::ExtractFinished`]
///
/// Every failure is reported as a log event; the job then finishes with the
/// batch files written so far (possibly none).
pub(super) async fn run_extract_job(
    ctx: JobContext,
    job: ExtractJob,
    batch_size: usize,
    watch_base: Url,
) -> Vec<BatchFile> {
    let written = extract(&ctx, &job, batch_size, &watch_base).await;

    tracing::info!(
        job = ctx.id.0,
        url = %job.url,
        files = written.len(),
        "extraction job finished"
    );

    ctx.emit(Event::ExtractFinished {
        job: ctx.id,
        files: written.iter().map(|b| b.path.clone()).collect(),
    });
    written
}

async fn extract(
    ctx: &JobContext,
    job: &ExtractJob,
    batch_size: usize,
    watch_base: &Url,
) -> Vec<BatchFile> {
    ctx.info(format!("Extracting video list from {}", job.url));

    let Some(ids) = list_video_ids(ctx, &job.url).await else {
        return Vec::new();
    };
    if ids.is_empty() {
        ctx.warn("No videos found");
        return Vec::new();
    }

    let urls: Vec<String> = ids.iter().map(|id| watch_url(watch_base, id)).collect();
    let planned = plan_batches(
        &urls,
        batch_size,
        &job.dest_dir,
        &ctx.config.extract.batch_file_prefix,
    );

    let mut written = Vec::with_capacity(planned.len());
    for batch in planned {
        if let Err(e) = write_batch_file(&batch).await {
            tracing::error!(job = ctx.id.0, path = %batch.path.display(), error = %e, "failed to write batch file");
            ctx.error(format!("Could not save batch file: {}", e));
            break;
        }
        ctx.info(format!(
            "Saved {} links -> {}",
            batch.len(),
            display_name(&batch.path)
        ));
        written.push(batch);
    }

    ctx.info(format!(
        "Extracted {} links into {} file(s)",
        urls.len(),
        written.len()
    ));
    written
}

/// Identifiers printed by the flat listing, or `None` after logging the failure
async fn list_video_ids(ctx: &JobContext, url: &str) -> Option<Vec<String>> {
    let output = match ctx.runner.output(&list_ids_invocation(url)).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(job = ctx.id.0, url, error = %e, "failed to launch link listing");
            ctx.error(format!(
                "Extraction failed: could not run {}: {}",
                ctx.runner.name(),
                e
            ));
            return None;
        }
    };

    if !output.status.success() {
        let status = match output.status.code() {
            Some(code) => format!("exit code {}", code),
            None => "a signal".to_string(),
        };
        let message = match stderr_excerpt(&output.stderr) {
            Some(excerpt) => format!("Extraction failed ({}): {}", status, excerpt),
            None => format!("Extraction failed ({})", status),
        };
        tracing::warn!(job = ctx.id.0, url, status = %output.status, "link listing failed");
        ctx.error(message);
        return None;
    }

    Some(parse_url_list(&String::from_utf8_lossy(&output.stdout)))
}
