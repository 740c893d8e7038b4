//! Match-log file format.
//!
//! Logs are JSON Lines: the first line is a header object, every
//! following line is one frame as a `[cycle, "body"]` array.
//!
//! ```text
//! {"version":1,"step_ms":100,"title":"final"}
//! [0,"kickoff"]
//! [1,"..."]
//! ```
//!
//! The header's `time_over_cycle`, when present, marks the cycle at
//! which the match is logically over; a loaded log whose last frame
//! has reached it is terminal.

mod error;

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::{Frame, MemoryBuffer};

pub use error::LogError;

/// Only supported format version.
pub const FORMAT_VERSION: u8 = 1;

/// Match-log header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub version: u8,
    /// Intrinsic per-frame duration, in ms.
    #[serde(default = "default_step_ms")]
    pub step_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Unix timestamp of the recording start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Cycle at which the match is logically over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_over_cycle: Option<u32>,
}

fn default_step_ms() -> u64 {
    100
}

impl Header {
    pub fn new(step_ms: u64) -> Self {
        Self {
            version: FORMAT_VERSION,
            step_ms,
            title: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
            time_over_cycle: None,
        }
    }
}

/// A fully parsed match log.
#[derive(Debug, Clone)]
pub struct MatchLog {
    pub header: Header,
    pub frames: Vec<Frame>,
}

impl MatchLog {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            frames: Vec::new(),
        }
    }

    /// Parse a log file from a path.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| LogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_reader(BufReader::new(file))
    }

    /// Parse a log from a buffered reader.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self, LogError> {
        let mut lines = reader.lines();

        let header_line = match lines.next() {
            Some(line) => line?,
            None => return Err(LogError::Empty),
        };
        let header: Header = serde_json::from_str(&header_line)
            .map_err(|source| LogError::Header { source })?;
        if header.version != FORMAT_VERSION {
            return Err(LogError::UnsupportedVersion(header.version));
        }

        let mut frames = Vec::new();
        for (line_num, line_result) in lines.enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            let frame = parse_frame(&line).map_err(|message| LogError::Frame {
                // +2: 1-based, after the header line
                line: line_num + 2,
                message,
            })?;
            frames.push(frame);
        }

        Ok(MatchLog { header, frames })
    }

    /// Parse a log from a string.
    pub fn parse_str(content: &str) -> Result<Self, LogError> {
        Self::parse_reader(BufReader::new(content.as_bytes()))
    }

    /// Write the log to a writer, header line first.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), LogError> {
        let header = serde_json::to_string(&self.header)
            .map_err(|source| LogError::Header { source })?;
        writeln!(writer, "{}", header)?;
        for frame in &self.frames {
            writeln!(
                writer,
                "{}",
                serde_json::json!([frame.cycle, frame.body])
            )?;
        }
        Ok(())
    }

    /// Write the log to a path.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), LogError> {
        let path = path.as_ref();
        let mut file = fs::File::create(path).map_err(|source| LogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_to(&mut file)
    }

    /// Whether the last frame has reached the header's time-over
    /// cycle.
    pub fn is_over(&self) -> bool {
        match (self.header.time_over_cycle, self.frames.last()) {
            (Some(over), Some(last)) => last.cycle >= over,
            _ => false,
        }
    }

    /// Load the frames into a fresh in-memory buffer positioned at
    /// the first frame.
    pub fn into_buffer(self) -> MemoryBuffer {
        let over = self.is_over();
        let mut buffer = MemoryBuffer::new();
        buffer.set_step_ms(self.header.step_ms);
        for frame in self.frames {
            buffer.push(frame);
        }
        if over {
            buffer.mark_terminal();
        }
        buffer
    }
}

/// Parse one `[cycle, "body"]` frame line.
fn parse_frame(line: &str) -> Result<Frame, String> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| e.to_string())?;
    let arr = value
        .as_array()
        .ok_or_else(|| "frame must be a JSON array".to_string())?;
    if arr.len() < 2 {
        return Err("frame array must have at least 2 elements".to_string());
    }
    let cycle = arr[0]
        .as_u64()
        .ok_or_else(|| "frame cycle must be a non-negative number".to_string())?;
    let cycle = u32::try_from(cycle).map_err(|_| "frame cycle out of range".to_string())?;
    let body = arr[1]
        .as_str()
        .ok_or_else(|| "frame body must be a string".to_string())?;
    Ok(Frame::new(cycle, body))
}
