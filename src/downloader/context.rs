//! Shared state handed to a running job task.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::tool::ToolRunner;
use crate::types::{Event, JobId, LogLevel};

/// Everything a job task needs, cloned out of the [`BatchDownloader`](super::BatchDownloader)
pub(crate) struct JobContext {
    pub(crate) id: JobId,
    pub(crate) event_tx: broadcast::Sender<Event>,
    pub(crate) runner: Arc<dyn ToolRunner>,
    pub(crate) config: Arc<Config>,
}

impl JobContext {
    /// Emit a log event (no subscribers is not an error)
    pub(crate) fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.event_tx
            .send(Event::Log {
                job: self.id,
                level,
                message: message.into(),
            })
            .ok();
    }

    pub(crate) fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub(crate) fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub(crate) fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub(crate) fn progress(&self, item: usize, percent: u8) {
        self.event_tx
            .send(Event::Progress {
                job: self.id,
                item,
                percent,
            })
            .ok();
    }

    pub(crate) fn emit(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}
