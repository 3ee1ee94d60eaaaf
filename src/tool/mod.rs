//! yt-dlp integration
//!
//! Everything that knows about the external downloader lives here:
//!
//! - [`ToolRunner`]: how an [`Invocation`] is launched (trait, so tests can
//!   substitute scripted processes)
//! - [`YtDlp`]: the runner for the real executable, with binary discovery
//! - [`download_invocation`] / [`list_ids_invocation`]: argument construction
//!
//! ## Usage
//!
//! ```no_run
//! use yt_batch_dl::config::{DownloadConfig, ToolsConfig};
//! use yt_batch_dl::tool::{ToolRunner, YtDlp, download_invocation};
//! use yt_batch_dl::{DownloadOptions, Quality};
//! use std::path::Path;
//!
//! # fn main() -> std::io::Result<()> {
//! let runner = YtDlp::discover(&ToolsConfig::default());
//! let invocation = download_invocation(
//!     "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
//!     Quality::P720,
//!     &DownloadOptions::default(),
//!     Path::new("downloads"),
//!     &DownloadConfig::default(),
//! );
//! let child = runner.spawn(&invocation)?;
//! # drop(child);
//! # Ok(())
//! # }
//! ```

mod args;
mod cli;
pub(crate) mod process;
mod traits;

pub use args::{
    NUMBERED_TEMPLATE, PLAIN_TEMPLATE, download_invocation, format_selector, list_ids_invocation,
    output_template,
};
pub use cli::{YTDLP_BINARY, YtDlp};
pub use traits::{Invocation, ToolRunner};
