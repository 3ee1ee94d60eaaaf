//! Configuration types for yt-batch-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// External tool configuration
///
/// Controls how the `yt-dlp` executable is located. Resolution happens once
/// when a [`BatchDownloader`](crate::BatchDownloader) is built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Whether to search PATH for yt-dlp when no local copy exists (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            search_path: true,
        }
    }
}

/// Output formats passed to yt-dlp for every download
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Container used when merging video and audio (default: "mp4")
    #[serde(default = "default_merge_output_format")]
    pub merge_output_format: String,

    /// Format automatic subtitles are converted to (default: "srt")
    #[serde(default = "default_subtitle_format")]
    pub subtitle_format: String,

    /// Format thumbnails are converted to (default: "jpg")
    #[serde(default = "default_thumbnail_format")]
    pub thumbnail_format: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            merge_output_format: default_merge_output_format(),
            subtitle_format: default_subtitle_format(),
            thumbnail_format: default_thumbnail_format(),
        }
    }
}

/// Playlist extraction and batch file settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Default number of links per batch file (default: 50)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Watch page the extracted identifiers are appended to as `?v=<id>`
    /// (default: "https://www.youtube.com/watch")
    #[serde(default = "default_watch_url_base")]
    pub watch_url_base: String,

    /// File name prefix for batch files, `<prefix>_<start>-<end>.txt` (default: "playlist")
    #[serde(default = "default_batch_file_prefix")]
    pub batch_file_prefix: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            watch_url_base: default_watch_url_base(),
            batch_file_prefix: default_batch_file_prefix(),
        }
    }
}

/// Main configuration for [`BatchDownloader`](crate::BatchDownloader)
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// External tool discovery
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Download output formats
    #[serde(default)]
    pub download: DownloadConfig,

    /// Extraction and batching
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Capacity of the broadcast event channel (default: 1000)
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: ToolsConfig::default(),
            download: DownloadConfig::default(),
            extract: ExtractConfig::default(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults. The loaded configuration is
    /// validated before it is returned.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values no job could run with
    pub fn validate(&self) -> Result<()> {
        if self.extract.batch_size == 0 {
            return Err(Error::config(
                "extract.batch_size",
                "batch size must be at least 1",
            ));
        }
        if self.extract.batch_file_prefix.trim().is_empty() {
            return Err(Error::config(
                "extract.batch_file_prefix",
                "batch file prefix must not be empty",
            ));
        }
        if let Err(e) = url::Url::parse(&self.extract.watch_url_base) {
            return Err(Error::config(
                "extract.watch_url_base",
                format!("invalid watch URL {:?}: {}", self.extract.watch_url_base, e),
            ));
        }
        for (key, value) in [
            ("download.merge_output_format", &self.download.merge_output_format),
            ("download.subtitle_format", &self.download.subtitle_format),
            ("download.thumbnail_format", &self.download.thumbnail_format),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config(key, "format must not be empty"));
            }
        }
        if self.event_channel_capacity == 0 {
            return Err(Error::config(
                "event_channel_capacity",
                "event channel capacity must be at least 1",
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_merge_output_format() -> String {
    "mp4".to_string()
}

fn default_subtitle_format() -> String {
    "srt".to_string()
}

fn default_thumbnail_format() -> String {
    "jpg".to_string()
}

fn default_batch_size() -> usize {
    50
}

fn default_watch_url_base() -> String {
    "https://www.youtube.com/watch".to_string()
}

fn default_batch_file_prefix() -> String {
    "playlist".to_string()
}

fn default_event_channel_capacity() -> usize {
    1000
}
