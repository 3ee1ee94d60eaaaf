//! Shared test helpers: a scripted process runner and event collection.

use crate::config::Config;
use crate::downloader::BatchDownloader;
use crate::tool::{Invocation, ToolRunner};
use crate::types::{Event, JobId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::process::{Output, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::sync::broadcast;

/// What the scripted runner does for one target URL
#[derive(Clone, Debug)]
pub(crate) enum Step {
    /// Run this `sh -c` script in place of yt-dlp
    Script(String),
    /// Fail to launch, as if the executable were missing
    LaunchError,
}

/// [`ToolRunner`] that maps each target URL to a shell script
///
/// Unknown targets run `exit 0`. Every spawn (and launch attempt) is recorded.
pub(crate) struct ScriptedRunner {
    steps: HashMap<String, Step>,
    launched: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self {
            steps: HashMap::new(),
            launched: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn script(mut self, target: &str, script: &str) -> Self {
        self.steps
            .insert(target.to_string(), Step::Script(script.to_string()));
        self
    }

    pub(crate) fn launch_error(mut self, target: &str) -> Self {
        self.steps.insert(target.to_string(), Step::LaunchError);
        self
    }

    /// Targets launched so far, in order
    pub(crate) fn launched_targets(&self) -> Vec<String> {
        self.launched
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.target().to_string())
            .collect()
    }

    /// Invocations launched so far, in order
    pub(crate) fn launched(&self) -> Vec<Invocation> {
        self.launched.lock().unwrap().clone()
    }

    fn command(&self, invocation: &Invocation) -> std::io::Result<Command> {
        self.launched.lock().unwrap().push(invocation.clone());

        let script = match self.steps.get(invocation.target()) {
            Some(Step::Script(script)) => script.as_str(),
            Some(Step::LaunchError) => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "scripted launch failure",
                ));
            }
            None => "exit 0",
        };

        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        Ok(cmd)
    }
}

#[async_trait]
impl ToolRunner for ScriptedRunner {
    fn spawn(&self, invocation: &Invocation) -> std::io::Result<Child> {
        self.command(invocation)?.spawn()
    }

    async fn output(&self, invocation: &Invocation) -> std::io::Result<Output> {
        self.command(invocation)?.output().await
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Helper to create a downloader around a scripted runner.
/// Returns the downloader, the runner for inspection, and the tempdir
/// (which must be kept alive) to use as destination.
pub(crate) fn create_test_downloader(
    runner: ScriptedRunner,
) -> (BatchDownloader, Arc<ScriptedRunner>, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(runner);
    let downloader = BatchDownloader::with_runner(Config::default(), runner.clone()).unwrap();
    (downloader, runner, temp_dir)
}

/// Receive events of `job` until its terminal event (inclusive)
///
/// Panics if the terminal event does not arrive within 10 seconds.
pub(crate) async fn collect_job_events(
    rx: &mut broadcast::Receiver<Event>,
    job: JobId,
) -> Vec<Event> {
    let mut events = Vec::new();
    tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            let event = rx.recv().await.unwrap();
            if event.job() != job {
                continue;
            }
            let terminal = event.is_terminal();
            events.push(event);
            if terminal {
                break;
            }
        }
    })
    .await
    .expect("job did not finish in time");
    events
}

/// Messages of all log events, in order
pub(crate) fn log_messages(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Log { message, .. } => Some(message.clone()),
            _ => None,
        })
        .collect()
}

/// Percentages of progress events for `item`, in order
pub(crate) fn progress_of(events: &[Event], item: usize) -> Vec<u8> {
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
