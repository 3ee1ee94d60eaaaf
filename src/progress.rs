//! Percentage extraction from yt-dlp output
//!
//! yt-dlp has no machine-readable progress channel in its default output, so
//! progress is scraped from text lines such as
//! `[download]  37.5% of 10.00MiB at 1.20MiB/s ETA 00:07`. The pattern lives
//! in [`parse_percent`] alone so it can be swapped if the output changes.

use regex::Regex;
use std::sync::LazyLock;

/// One to three digits, optional fraction, directly followed by `%`
#[allow(clippy::expect_used)]
static PERCENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3}(?:\.\d+)?)%").expect("percent pattern is valid"));

/// Extract a completion percentage from one line of output
///
/// Takes the first `NN%` / `NN.N%` occurrence whose digits are not preceded
/// by a minus sign, clamps it to `0..=100` and truncates the fraction.
/// Lines without such an occurrence yield `None`.
///
/// # Examples
///
/// ```
/// use yt_batch_dl::progress::parse_percent;
///
/// assert_eq!(parse_percent("[download]  37.5% of 10.00MiB"), Some(37));
/// assert_eq!(parse_percent("[download] 100% of 10.00MiB"), Some(100));
/// assert_eq!(parse_percent("150%"), Some(100));
/// assert_eq!(parse_percent("-5%"), None);
/// assert_eq!(parse_percent("abc"), None);
/// ```
#[must_use]
pub fn parse_percent(line: &str) -> Option<u8> {
    PERCENT_PATTERN
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .find(|m| !line[..m.start()].ends_with('-'))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|value| value.clamp(0.0, 100.0) as u8)
}

/// Tracks the percentage of a single URL's download
///
/// yt-dlp restarts its counter for every stream it fetches (video, then
/// audio), so raw values go backwards. The tracker only lets increases
/// through, which keeps the reported value non-decreasing per URL.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last: u8,
}

impl ProgressTracker {
    /// Tracker for a fresh URL, starting at 0%
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one output line; returns the percentage to report, if any
    pub fn observe(&mut self, line: &str) -> Option<u8> {
        let percent = parse_percent(line)?;
        if percent > self.last {
            self.last = percent;
            Some(percent)
        } else {
            None
        }
    }

    /// Mark the URL as done and return 100
    pub fn complete(&mut self) -> u8 {
        self.last = 100;
        self.last
    }

    /// Last reported percentage
    pub fn current(&self) -> u8 {
        self.last
    }
}
