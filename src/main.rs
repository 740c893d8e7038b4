//! logplay CLI entry point.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::play::PlayOverrides;

#[derive(Parser)]
#[command(name = "logplay", version, about = "Adaptive-rate player for recorded match logs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a log file interactively
    Play {
        /// Log file to play
        file: PathBuf,
        /// Base step interval in ms
        #[arg(long)]
        interval: Option<u64>,
        /// Desired lookahead before full-speed playback
        #[arg(long)]
        cache: Option<usize>,
        /// Treat the buffer as size-bounded (live buffering)
        #[arg(long)]
        buffering: bool,
        /// Quit automatically at the end of the match
        #[arg(long)]
        auto_quit: bool,
        /// Delay before the automatic quit, in seconds
        #[arg(long)]
        auto_quit_wait: Option<u64>,
    },
    /// Show a summary of a log file
    Info {
        /// Log file to inspect
        file: PathBuf,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create or refresh the config file
    Init,
}

fn main() -> Result<()> {
    // Logs go to stderr so they stay out of the player screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            file,
            interval,
            cache,
            buffering,
            auto_quit,
            auto_quit_wait,
        } => {
            let overrides = PlayOverrides {
                interval_ms: interval,
                cache_size: cache,
                buffering,
                auto_quit,
                auto_quit_wait_secs: auto_quit_wait,
            };
            commands::play::handle_play(&file, &overrides)
        }
        Command::Info { file } => commands::info::handle_info(&file),
        Command::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Path => commands::config::handle_path(),
            ConfigAction::Init => commands::config::handle_init(),
        },
    }
}
