//! One yt-dlp process for one URL.

use std::pin::Pin;
use std::process::ExitStatus;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Child;
use tokio_stream::wrappers::SplitStream;
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::progress::ProgressTracker;
use crate::tool::Invocation;
use crate::tool::process::terminate_child;
use crate::types::LogLevel;

use super::super::context::JobContext;

/// stdout and stderr of the child, line by line, in arrival order
type OutputLines = Pin<Box<dyn Stream<Item = std::io::Result<String>> + Send>>;

/// How a single URL ended
#[derive(Debug, PartialEq, Eq)]
pub(super) enum ItemOutcome {
    /// Exit code 0
    Succeeded,
    /// Non-zero exit, killed by a signal, or waiting failed
    Failed,
    /// Stop requested while the process ran; the process was terminated
    Stopped,
    /// The process could not be started
    LaunchFailed(String),
}

/// Download one URL, forwarding every output line and progress increase
pub(super) async fn download_item(
    ctx: &JobContext,
    index: usize,
    total: usize,
    invocation: &Invocation,
    stop: &CancellationToken,
) -> ItemOutcome {
    let url = invocation.target();

    let mut child = match ctx.runner.spawn(invocation) {
        Ok(child) => child,
        Err(e) => {
            tracing::error!(
                job = ctx.id.0,
                url,
                runner = ctx.runner.name(),
                error = %e,
                "failed to launch downloader"
            );
            ctx.error(format!("Could not run {}: {}", ctx.runner.name(), e));
            return ItemOutcome::LaunchFailed(e.to_string());
        }
    };

    let Some(mut lines) = merged_lines(&mut child) else {
        terminate_child(&mut child).await;
        let reason = format!("{} was started without output pipes", ctx.runner.name());
        ctx.error(reason.clone());
        return ItemOutcome::LaunchFailed(reason);
    };

    let mut tracker = ProgressTracker::new();

    loop {
        tokio::select! {
            biased;

            _ = stop.cancelled() => {
                drop(lines);
                return stop_child(ctx, &mut child, url).await;
            }

            next = lines.next() => match next {
                Some(Ok(line)) => {
                    let increase = tracker.observe(&line);
                    ctx.log(LogLevel::Output, line);
                    if let Some(percent) = increase {
                        ctx.progress(index, percent);
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!(job = ctx.id.0, url, error = %e, "failed to read downloader output");
                    ctx.warn(format!("Stopped reading output: {}", e));
                    break;
                }
                None => break,
            }
        }
    }

    // Closing our pipe ends lets a child blocked on a full pipe exit
    drop(lines);

    // The child may keep running without output (merging, post-processing)
    let status = tokio::select! {
        biased;

        _ = stop.cancelled() => return stop_child(ctx, &mut child, url).await,
        status = child.wait() => status,
    };

    match status {
        Ok(status) if status.success() => {
            ctx.progress(index, tracker.complete());
            ctx.info(format!("Finished {}/{}: {}", index + 1, total, url));
            ItemOutcome::Succeeded
        }
        Ok(status) => {
            tracing::warn!(job = ctx.id.0, url, status = %status, "download process failed");
            ctx.warn(describe_failure(status, url));
            ItemOutcome::Failed
        }
        Err(e) => {
            tracing::warn!(job = ctx.id.0, url, error = %e, "failed to wait for download process");
            ctx.warn(format!("Could not get exit status for {}: {}", url, e));
            ItemOutcome::Failed
        }
    }
}

async fn stop_child(ctx: &JobContext, child: &mut Child, url: &str) -> ItemOutcome {
    terminate_child(child).await;
    tracing::info!(job = ctx.id.0, url, "download process terminated on stop");
    ctx.warn("Download stopped by user");
    ItemOutcome::Stopped
}

fn merged_lines(child: &mut Child) -> Option<OutputLines> {
    let stdout = child.stdout.take()?;
    let stderr = child.stderr.take()?;

    let stdout = SplitStream::new(BufReader::new(stdout).split(b'\n'));
    let stderr = SplitStream::new(BufReader::new(stderr).split(b'\n'));
    Some(Box::pin(
        stdout
            .merge(stderr)
            .map(|line| line.map(|bytes| decode_line(&bytes))),
    ))
}

/// One raw output line as text; invalid UTF-8 is replaced, a trailing `\r` dropped
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

fn describe_failure(status: ExitStatus, url: &str) -> String {
    match status.code() {
        Some(code) => format!("Exited with code {} for {}", code, url),
        None => format!("Terminated by a signal while downloading {}", url),
    }
}
