//! Core types for yt-batch-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unique identifier for a started job
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl JobId {
    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Video quality selector
///
/// Each variant maps to one yt-dlp format expression, see
/// [`format_selector`](crate::tool::format_selector).
///
/// Serialized as its [`label`](Quality::label); deserialization accepts the
/// same inputs as [`FromStr`](std::str::FromStr).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Quality {
    /// Best available H.264 video with m4a audio
    #[default]
    Best,
    /// Video capped at 720 pixels high
    P720,
    /// Video capped at 480 pixels high
    P480,
    /// Audio only
    Audio,
}

impl Quality {
    /// All selectors in menu order
    pub const ALL: [Quality; 4] = [Quality::Best, Quality::P720, Quality::P480, Quality::Audio];

    /// Label used in menus and logs
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Best => "Best",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::Audio => "Audio",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Quality {
    type Err = std::convert::Infallible;

    /// Parse a quality label. Unknown labels select audio-only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(Quality::ALL
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(s))
            .unwrap_or(Quality::Audio))
    }
}

impl From<String> for Quality {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(quality) => quality,
            Err(never) => match never {},
        }
    }
}

impl From<Quality> for String {
    fn from(quality: Quality) -> Self {
        quality.label().to_string()
    }
}

/// Number of fragments yt-dlp downloads in parallel unless told otherwise
pub const DEFAULT_CONCURRENT_FRAGMENTS: u32 = 5;

/// Per-job download options
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// Prefix file names with the zero-padded playlist index
    #[serde(default)]
    pub numbering: bool,

    /// Fetch automatic subtitles and convert them
    #[serde(default)]
    pub subtitle: bool,

    /// Fetch the thumbnail and convert it
    #[serde(default)]
    pub thumbnail: bool,

    /// Write a JSON metadata sidecar
    #[serde(default)]
    pub metadata: bool,

    /// Concurrent fragment downloads (None = leave to yt-dlp)
    #[serde(default = "default_concurrent_fragments")]
    pub concurrent_fragments: Option<u32>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            numbering: false,
            subtitle: false,
            thumbnail: false,
            metadata: false,
            concurrent_fragments: default_concurrent_fragments(),
        }
    }
}

fn default_concurrent_fragments() -> Option<u32> {
    Some(DEFAULT_CONCURRENT_FRAGMENTS)
}

/// A download run over an ordered list of URLs
///
/// URLs are downloaded in insertion order; duplicates are kept.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadJob {
    /// URLs in download order
    pub urls: Vec<String>,
    /// Quality selector applied to every URL
    #[serde(default)]
    pub quality: Quality,
    /// Flags applied to every URL
    #[serde(default)]
    pub options: DownloadOptions,
    /// Directory downloads are written to
    pub dest_dir: PathBuf,
}

impl DownloadJob {
    /// Create a job with default quality and options
    pub fn new(urls: Vec<String>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            urls,
            quality: Quality::default(),
            options: DownloadOptions::default(),
            dest_dir: dest_dir.into(),
        }
    }

    /// Set the quality selector
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the download options
    pub fn with_options(mut self, options: DownloadOptions) -> Self {
        self.options = options;
        self
    }
}

/// A playlist/channel extraction run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractJob {
    /// Playlist or channel URL to resolve
    pub url: String,
    /// Directory batch files are written to
    pub dest_dir: PathBuf,
    /// Links per batch file (None = configured default)
    #[serde(default)]
    pub batch_size: Option<usize>,
}

impl ExtractJob {
    /// Create an extraction job using the configured batch size
    pub fn new(url: impl Into<String>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            dest_dir: dest_dir.into(),
            batch_size: None,
        }
    }

    /// Override the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }
}

/// One persisted chunk of extracted links
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFile {
    /// Where the chunk is (or will be) written
    pub path: PathBuf,
    /// 1-based position of the first URL in the overall list
    pub start: usize,
    /// 1-based position of the last URL in the overall list (inclusive)
    pub end: usize,
    /// URLs in list order
    pub urls: Vec<String>,
}

impl BatchFile {
    /// File contents: URLs joined by newlines
    pub fn contents(&self) -> String {
        self.urls.join("\n")
    }

    /// Number of URLs in this chunk
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the chunk holds no URLs
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Severity of a log event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbatim line of yt-dlp output
    Output,
    /// Job progress notice
    Info,
    /// Non-fatal problem (e.g. a URL failed, job stopped)
    Warn,
    /// Fatal problem for the job or a filesystem failure
    Error,
}

/// How a download job ended
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobOutcome {
    /// Every URL was attempted
    Completed,
    /// A stop was requested before all URLs were attempted
    Stopped,
    /// yt-dlp could not be launched; remaining URLs were skipped
    Aborted {
        /// Why the process could not be started
        reason: String,
    },
}

/// Final tally of a download job
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadSummary {
    /// Number of URLs in the job
    pub total: usize,
    /// URLs for which yt-dlp was launched (or launch was attempted)
    pub attempted: usize,
    /// URLs whose process exited with code 0
    pub succeeded: usize,
    /// URLs whose process exited abnormally
    pub failed: usize,
    /// How the job ended
    pub outcome: JobOutcome,
}

/// Event emitted while jobs run
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Free-text log line
    Log {
        /// Job the line belongs to
        job: JobId,
        /// Severity
        level: LogLevel,
        /// The line itself
        message: String,
    },

    /// Completion percentage of the URL currently downloading
    Progress {
        /// Job ID
        job: JobId,
        /// 0-based position of the URL within the job
        item: usize,
        /// Percentage 0..=100, non-decreasing within one URL
        percent: u8,
    },

    /// Download job ended (emitted exactly once per download job)
    Finished {
        /// Job ID
        job: JobId,
        /// Final tally
        summary: DownloadSummary,
    },

    /// Extraction job ended with the batch files it produced (possibly none)
    ExtractFinished {
        /// Job ID
        job: JobId,
        /// Paths of written batch files, in list order
        files: Vec<PathBuf>,
    },
}

impl Event {
    /// Job this event belongs to
    pub fn job(&self) -> JobId {
        match self {
            Event::Log { job, .. }
            | Event::Progress { job, .. }
            | Event::Finished { job, .. }
            | Event::ExtractFinished { job, .. } => *job,
        }
    }

    /// Whether this is the terminal event of its job
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Finished { .. } | Event::ExtractFinished { .. })
    }
}
