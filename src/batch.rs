//! Batch files: splitting extracted links into fixed-size chunks and reading them back
//!
//! A batch file is plain UTF-8 text with one URL per line. Its name encodes the
//! 1-based inclusive range it covers in the overall list, e.g.
//! `playlist_51-100.txt`.

use crate::error::{Error, Result};
use crate::types::BatchFile;
use std::path::{Path, PathBuf};
use url::Url;

/// Rebuild a watch page URL from a video identifier
///
/// The identifier becomes the `v` query parameter of `base`, replacing any
/// query `base` already had.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use yt_batch_dl::batch::watch_url;
///
/// let base = Url::parse("https://www.youtube.com/watch").unwrap();
/// assert_eq!(
///     watch_url(&base, "dQw4w9WgXcQ"),
///     "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
/// );
/// ```
#[must_use]
pub fn watch_url(base: &Url, id: &str) -> String {
    let mut url = base.clone();
    url.query_pairs_mut().clear().append_pair("v", id);
    url.into()
}

/// File name for the chunk covering `start..=end`
#[must_use]
pub fn batch_file_name(prefix: &str, start: usize, end: usize) -> String {
    format!("{}_{}-{}.txt", prefix, start, end)
}

/// Split `urls` into consecutive chunks of at most `batch_size` entries
///
/// Order is preserved and the last chunk may be shorter. Nothing is written;
/// each returned [`BatchFile`] carries the path it should be saved to.
/// A `batch_size` of zero is treated as one.
#[must_use]
pub fn plan_batches(
    urls: &[String],
    batch_size: usize,
    dest_dir: &Path,
    prefix: &str,
) -> Vec<BatchFile> {
    let size = batch_size.max(1);
    urls.chunks(size)
        .enumerate()
        .map(|(i, chunk)| {
            let start = i * size + 1;
            let end = start + chunk.len() - 1;
            BatchFile {
                path: dest_dir.join(batch_file_name(prefix, start, end)),
                start,
                end,
                urls: chunk.to_vec(),
            }
        })
        .collect()
}

/// Write one planned chunk to disk, replacing any existing file
pub async fn write_batch_file(batch: &BatchFile) -> Result<()> {
    tokio::fs::write(&batch.path, batch.contents())
        .await
        .map_err(|e| Error::file(&batch.path, e))
}

/// Read a URL list (batch file or any text file, one URL per line)
///
/// Lines are trimmed; blank lines are skipped.
pub fn load_url_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
    Ok(parse_url_list(&raw))
}

/// Trimmed, non-empty lines of `raw`
#[must_use]
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn free-form user input into a URL list
///
/// An existing file whose name ends in `.txt` is loaded with
/// [`load_url_list`]; anything else is a single URL.
///
/// # Errors
///
/// - [`Error::InvalidInput`] for blank input or a URL file with no URLs
/// - [`Error::File`] when the URL file cannot be read
pub fn resolve_input(input: &str) -> Result<Vec<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::InvalidInput(
            "enter a link or choose a .txt file".to_string(),
        ));
    }

    let path = PathBuf::from(input);
    let is_txt = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));

    if is_txt && path.is_file() {
        let urls = load_url_list(&path)?;
        if urls.is_empty() {
            return Err(Error::InvalidInput(format!(
                "{} contains no links",
                path.display()
            )));
        }
        return Ok(urls);
    }

    Ok(vec![input.to_string()])
}
