//! `info` subcommand handler.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::DateTime;

use logplay::MatchLog;

/// Print a summary of a log file.
pub fn handle_info(path: &Path) -> Result<()> {
    let log = MatchLog::parse(path)
        .with_context(|| format!("Failed to load log: {}", path.display()))?;

    println!("file:      {}", path.display());
    if let Some(title) = &log.header.title {
        println!("title:     {}", title);
    }
    if let Some(ts) = log.header.timestamp {
        if let Some(when) = DateTime::from_timestamp(ts, 0) {
            println!("recorded:  {}", when.format("%Y-%m-%d %H:%M:%S UTC"));
        }
    }
    println!("frames:    {}", log.frames.len());
    println!("step:      {} ms", log.header.step_ms);

    let duration_ms = log.frames.len() as u64 * log.header.step_ms;
    println!("duration:  {:.1} s", duration_ms as f64 / 1000.0);

    if let (Some(first), Some(last)) = (log.frames.first(), log.frames.last()) {
        println!("cycles:    {}..{}", first.cycle, last.cycle);
    }
    println!("time over: {}", if log.is_over() { "yes" } else { "no" });

    Ok(())
}
