//! Error types for yt-batch-dl
//!
//! Errors only cross the library boundary from the synchronous entry points
//! (configuration, job validation, batch file loading) and from joining a job
//! whose task died. Failures that happen while a job runs are reported as
//! [`Event::Log`](crate::types::Event::Log) lines instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for yt-batch-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for yt-batch-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "extract.batch_size")
        key: Option<String>,
    },

    /// A job was started with unusable input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading or writing a specific file failed
    #[error("failed to access {}: {source}", path.display())]
    File {
        /// The file that could not be read or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A background job task panicked or was aborted
    #[error("job task failed: {0}")]
    TaskFailed(String),
}

impl Error {
    /// Build a [`Error::Config`] for a specific configuration key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Wrap an I/O error with the path it concerns
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::File {
            path: path.into(),
            source,
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::TaskFailed(e.to_string())
    }
}
