//! Utility functions for directories, file names and process output

use crate::error::{Error, Result};
use std::path::Path;

/// Longest stderr excerpt quoted in a log line
const MAX_EXCERPT_CHARS: usize = 300;

/// Create `dir` (and its parents) if it does not exist yet
///
/// # Errors
///
/// Returns [`Error::File`] if the directory cannot be created, or if `dir`
/// exists but is not a directory.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| Error::file(dir, e))?;
    tracing::debug!(path = %dir.display(), "created destination directory");
    Ok(())
}

/// Final path component for log lines, falling back to the whole path
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Last non-empty line of captured stderr, shortened for a log line
///
/// yt-dlp prints its `ERROR:` summary last, so that line carries the reason.
#[must_use]
pub fn stderr_excerpt(stderr: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stderr);
    let line = text.lines().map(str::trim).rfind(|l| !l.is_empty())?;
    if line.chars().count() > MAX_EXCERPT_CHARS {
        let cut: String = line.chars().take(MAX_EXCERPT_CHARS).collect();
        Some(format!("{}...", cut))
    } else {
        Some(line.to_string())
    }
}
