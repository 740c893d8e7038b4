//! Match-log parsing errors.

use std::path::PathBuf;

/// Errors raised while reading or writing a match log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Failed to open log file: {path}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Log file is empty")]
    Empty,

    #[error("Failed to parse log header")]
    Header { source: serde_json::Error },

    #[error("Unsupported log format version {0}")]
    UnsupportedVersion(u8),

    #[error("Invalid frame on line {line}: {message}")]
    Frame { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
