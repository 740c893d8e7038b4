//! `config` subcommand handlers.

use anyhow::Result;

use logplay::PlayerConfig;

/// Show the effective configuration as TOML.
pub fn handle_show() -> Result<()> {
    let config = PlayerConfig::load()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

/// Print the config file path.
pub fn handle_path() -> Result<()> {
    println!("{}", PlayerConfig::config_path()?.display());
    Ok(())
}

/// Write the current configuration (defaults plus an existing file)
/// back to disk, creating the file when missing.
pub fn handle_init() -> Result<()> {
    let config = PlayerConfig::load()?;
    config.save()?;
    println!("Wrote {}", PlayerConfig::config_path()?.display());
    Ok(())
}
