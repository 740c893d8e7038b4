//! logplay — adaptive-rate player for recorded match logs.
//!
//! A match log is an ordered sequence of time-stamped frames, either
//! loaded whole from disk or still filling while a live match is
//! captured. The crate's core is [`PlaybackController`]: it owns a
//! repeating step timer and decides, cycle by cycle, whether to step
//! forward or backward through the buffer and how long to wait before
//! the next step, slowing down whenever playback threatens to
//! overtake the producer.
//!
//! ```no_run
//! use logplay::{MatchLog, PlaybackController, PlayerConfig};
//!
//! let config = PlayerConfig::default();
//! let mut buffer = MatchLog::parse("final.matchlog")?.into_buffer();
//! let mut player = PlaybackController::new(&config);
//! player.play_forward(&config);
//! # Ok::<(), logplay::LogError>(())
//! ```

pub mod buffer;
pub mod config;
pub mod logfile;
pub mod player;

pub use buffer::{Frame, FrameBuffer, MemoryBuffer, INVALID_INDEX};
pub use config::PlayerConfig;
pub use logfile::{LogError, MatchLog};
pub use player::{CommandOutcome, Direction, PlaybackController};
