//! Event collection helpers for integration tests

use std::time::Duration;
use tokio::sync::broadcast;
use yt_batch_dl::{Event, JobId, LogLevel};

/// Collect events until `predicate` returns true (inclusive) or `timeout` elapses
///
/// Returns everything received so far either way.
pub async fn collect_events_until<F>(
    events: &mut broadcast::Receiver<Event>,
    timeout: Duration,
    mut predicate: F,
) -> Vec<Event>
where
    F: FnMut(&Event) -> bool,
{
    let mut collected = Vec::new();
    let _ = tokio::time::timeout(timeout, async {
        while let Ok(event) = events.recv().await {
            let done = predicate(&event);
            collected.push(event);
            if done {
                break;
            }
        }
    })
    .await;
    collected
}

/// Collect all events of `job` up to and including its terminal event
pub async fn collect_job(events: &mut broadcast::Receiver<Event>, job: JobId) -> Vec<Event> {
    let collected = collect_events_until(events, Duration::from_secs(30), |e| {
        e.job() == job && e.is_terminal()
    })
    .await;
    collected.into_iter().filter(|e| e.job() == job).collect()
}

/// Messages of log events at `level`
pub fn messages_at(events: &[Event], level: LogLevel) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Log {
                level: l, message, ..
            } if *l == level => Some(message.clone()),
            _ => None,
        })
        .collect()
}

/// Percentages reported for `item`
pub fn progress_for(events: &[Event], item: usize) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Progress {
                item: i, percent, ..
            } if *i == item => Some(*percent),
            _ => None,
        })
        .collect()
}
