//! `play` subcommand handler.

use std::path::Path;

use anyhow::{Context, Result};

use logplay::player::host;
use logplay::{MatchLog, PlayerConfig};

/// Command-line overrides for the playback configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayOverrides {
    pub interval_ms: Option<u64>,
    pub cache_size: Option<usize>,
    pub buffering: bool,
    pub auto_quit: bool,
    pub auto_quit_wait_secs: Option<u64>,
}

/// Apply CLI overrides on top of the loaded configuration.
pub fn apply_overrides(mut config: PlayerConfig, overrides: &PlayOverrides) -> PlayerConfig {
    if let Some(interval) = overrides.interval_ms {
        config.timer_interval_ms = interval.max(1);
    }
    if let Some(cache) = overrides.cache_size {
        config.cache_size = cache;
    }
    if overrides.buffering {
        config.buffering_mode = true;
    }
    if overrides.auto_quit {
        config.auto_quit = true;
    }
    if let Some(wait) = overrides.auto_quit_wait_secs {
        config.auto_quit_wait_secs = wait;
    }
    config
}

/// Load a log file and run the interactive player on it.
pub fn handle_play(path: &Path, overrides: &PlayOverrides) -> Result<()> {
    let config = apply_overrides(PlayerConfig::load()?, overrides);

    let log = MatchLog::parse(path)
        .with_context(|| format!("Failed to load log: {}", path.display()))?;
    tracing::info!(
        frames = log.frames.len(),
        step_ms = log.header.step_ms,
        "log loaded"
    );
    let mut buffer = log.into_buffer();

    host::run(&mut buffer, &config)
}
