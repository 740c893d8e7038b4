//! Adaptive playback.
//!
//! The player is organized into submodules:
//! - `controller`: the playback state machine and command surface
//! - `interval`: adaptive step-interval computation
//! - `timer`: the repeating step timer primitive
//! - `host`: interactive terminal front end
//!
//! The controller is the core: it decides, tick by tick, whether to
//! step forward or backward through the frame buffer and how long to
//! wait before the next step, so replay stays smooth even when the
//! buffer is still being filled by a live capture.

pub mod controller;
pub mod host;
pub(crate) mod interval;
pub mod timer;

pub use controller::{CommandOutcome, Direction, PlaybackController};
pub use timer::StepTimer;
