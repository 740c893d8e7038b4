//! Shared helpers for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A small finished match log: 5 frames, 100 ms step, time over at
/// cycle 4.
pub const SAMPLE_LOG: &str = r#"{"version":1,"step_ms":100,"title":"test match","time_over_cycle":4}
[0,"kickoff"]
[1,"play on"]
[2,"goal left"]
[3,"kickoff"]
[4,"time over"]
"#;

/// Write a log file into a fresh temp dir; the dir must be kept alive
/// for the path to stay valid.
pub fn temp_log(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("sample.matchlog");
    fs::write(&path, content).expect("Failed to write log fixture");
    (dir, path)
}
