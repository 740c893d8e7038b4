//! Player configuration.
//!
//! Knobs are read fresh on every controller call, so edits between
//! ticks (e.g. from a settings dialog) take effect immediately.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Playback tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Base delay between playback steps, in ms.
    pub timer_interval_ms: u64,
    /// Desired lookahead (buffered frames ahead of the current one)
    /// before playing at full rate. A floor of 1 is applied at use.
    pub cache_size: usize,
    /// Whether the frame buffer runs size-bounded (live buffering).
    pub buffering_mode: bool,
    /// Quit automatically once the log's end-of-data state is reached
    /// during forward playback.
    pub auto_quit: bool,
    /// Delay before the automatic quit, in seconds. 0 means a short
    /// default wait of 100 ms.
    pub auto_quit_wait_secs: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            timer_interval_ms: 100,
            cache_size: 10,
            buffering_mode: false,
            auto_quit: false,
            auto_quit_wait_secs: 0,
        }
    }
}

impl PlayerConfig {
    /// Path of the on-disk config file.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("logplay").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does
    /// not exist. Unknown keys are ignored; missing keys take their
    /// default value.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Write the config file, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
