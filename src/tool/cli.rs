//! Runner backed by the real yt-dlp executable

use super::traits::{Invocation, ToolRunner};
use crate::config::ToolsConfig;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::{Child, Command};

/// Executable name looked up on PATH and next to the working directory
#[cfg(windows)]
pub const YTDLP_BINARY: &str = "yt-dlp.exe";
/// Executable name looked up on PATH and next to the working directory
#[cfg(not(windows))]
pub const YTDLP_BINARY: &str = "yt-dlp";

/// Runner that executes the external `yt-dlp` binary
///
/// # Examples
///
/// ```no_run
/// use yt_batch_dl::config::ToolsConfig;
/// use yt_batch_dl::tool::YtDlp;
/// use std::path::PathBuf;
///
/// // Explicit path
/// let runner = YtDlp::new(PathBuf::from("/usr/local/bin/yt-dlp"));
///
/// // Or local copy / PATH lookup
/// let runner = YtDlp::discover(&ToolsConfig::default());
/// println!("using {}", runner.binary_path().display());
/// ```
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary_path: PathBuf,
}

impl YtDlp {
    /// Create a runner with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Locate yt-dlp
    ///
    /// Lookup order:
    /// 1. `tools.ytdlp_path` when configured
    /// 2. a copy in the current working directory
    /// 3. the system PATH (when `tools.search_path` is set)
    ///
    /// Falls back to the bare executable name, so a missing binary surfaces
    /// as a spawn failure when a job runs rather than here.
    pub fn discover(tools: &ToolsConfig) -> Self {
        if let Some(path) = &tools.ytdlp_path {
            tracing::debug!(path = %path.display(), "using configured yt-dlp");
            return Self::new(path.clone());
        }

        let local = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::local_copy(&cwd));
        if let Some(path) = local {
            tracing::debug!(path = %path.display(), "using local yt-dlp copy");
            return Self::new(path);
        }

        if tools.search_path {
            if let Some(runner) = Self::from_path() {
                tracing::debug!(path = %runner.binary_path.display(), "found yt-dlp on PATH");
                return runner;
            }
        }

        tracing::warn!("yt-dlp not found, falling back to bare executable name");
        Self::new(PathBuf::from(YTDLP_BINARY))
    }

    /// Attempt to find yt-dlp in PATH
    ///
    /// Returns `None` if the binary is not on PATH.
    pub fn from_path() -> Option<Self> {
        which::which(YTDLP_BINARY).ok().map(Self::new)
    }

    /// Path of a yt-dlp copy inside `dir`, if one exists
    fn local_copy(dir: &Path) -> Option<PathBuf> {
        let candidate = dir.join(YTDLP_BINARY);
        candidate.is_file().then_some(candidate)
    }

    /// Path of the executable this runner launches
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl ToolRunner for YtDlp {
    fn spawn(&self, invocation: &Invocation) -> std::io::Result<Child> {
        self.command(invocation).spawn()
    }

    async fn output(&self, invocation: &Invocation) -> std::io::Result<Output> {
        self.command(invocation).output().await
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}
