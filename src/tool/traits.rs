//! Traits and types for running yt-dlp

use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::process::Output;
use tokio::process::Child;

/// One planned yt-dlp invocation: the argument list plus the URL it targets
///
/// The executable itself is supplied by the [`ToolRunner`] that launches it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<OsString>,
    target: String,
}

impl Invocation {
    /// Start an invocation aimed at `target`; the URL is appended by [`Invocation::finish`]
    pub(crate) fn builder(target: impl Into<String>) -> Self {
        Self {
            args: Vec::new(),
            target: target.into(),
        }
    }

    pub(crate) fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub(crate) fn arg_if(self, condition: bool, args: &[&str]) -> Self {
        if condition {
            args.iter().fold(self, |inv, a| inv.arg(a))
        } else {
            self
        }
    }

    /// Append `--` and the target, so a target starting with `-` is never read as an option
    pub(crate) fn finish(self) -> Self {
        let target = self.target.clone();
        self.arg("--").arg(target)
    }

    /// Arguments passed to the executable, in order
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// URL this invocation downloads or resolves
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Arguments as lossy UTF-8 strings (for logging and assertions)
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Whether `flag` appears in the argument list
    pub fn has_arg(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    /// Value following `flag`, if the flag is present and has one
    pub fn value_of(&self, flag: &str) -> Option<String> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(|v| v.to_string_lossy().into_owned())
    }
}

/// Trait for launching yt-dlp
///
/// The production implementation is [`YtDlp`](super::YtDlp), which runs the
/// real executable. Tests substitute runners that launch scripted processes.
///
/// # Examples
///
/// ```no_run
/// use yt_batch_dl::config::ToolsConfig;
/// use yt_batch_dl::tool::{ToolRunner, YtDlp, list_ids_invocation};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runner = YtDlp::discover(&ToolsConfig::default());
/// let output = runner
///     .output(&list_ids_invocation("https://www.youtube.com/playlist?list=PL123"))
///     .await?;
/// println!("{}", String::from_utf8_lossy(&output.stdout));
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Launch an invocation for streaming
    ///
    /// The returned child must have both stdout and stderr piped; the caller
    /// reads them as one merged line stream.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the process cannot be started.
    fn spawn(&self, invocation: &Invocation) -> std::io::Result<Child>;

    /// Run an invocation to completion, capturing stdout and stderr
    ///
    /// # Errors
    ///
    /// Returns the OS error when the process cannot be started or awaited.
    async fn output(&self, invocation: &Invocation) -> std::io::Result<Output>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
