//! Playback controller.
//!
//! Owns the repeating step timer and the playback state machine
//! (direction, live mode, cushion flags) and turns timer expiries
//! into frame-buffer steps. Collaborators are passed per call: the
//! controller never owns the frame buffer, and the configuration is
//! read fresh so changes between ticks take effect immediately.

use std::time::{Duration, Instant};

use crate::buffer::{FrameBuffer, INVALID_INDEX};
use crate::config::PlayerConfig;
use crate::player::interval;
use crate::player::timer::StepTimer;

/// Which way stepping moves the playback index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What a command did to the playback position.
///
/// `Updated` means the current index changed and the display should
/// re-read the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Updated,
    Unchanged,
}

/// Hard bounds for manual speed changes, in ms.
const MIN_INTERVAL_MS: u64 = 5;
const MAX_INTERVAL_MS: u64 = 5000;

/// Floor for repeated accelerate-in-direction halving, in ms.
const ACCEL_FLOOR_MS: u64 = 10;

/// Fallback auto-quit delay when no explicit wait is configured.
const DEFAULT_QUIT_WAIT: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct PlaybackController {
    direction: Direction,
    live_mode: bool,
    /// Latched once the buffer has held a full cushion; reset only by
    /// [`clear`](Self::clear).
    cache_primed: bool,
    /// Mild throttle engaged while the cushion refills.
    catching_up: bool,
    timer: StepTimer,
    /// Pending one-shot application exit. Never revoked once set.
    quit_deadline: Option<Instant>,
}

impl PlaybackController {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            direction: Direction::Forward,
            live_mode: false,
            cache_primed: false,
            catching_up: false,
            timer: StepTimer::new(Duration::from_millis(config.timer_interval_ms)),
            quit_deadline: None,
        }
    }

    // === State accessors ===

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_live_mode(&self) -> bool {
        self.live_mode
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_active()
    }

    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    pub fn is_cache_primed(&self) -> bool {
        self.cache_primed
    }

    pub fn is_catching_up(&self) -> bool {
        self.catching_up
    }

    /// Whether an auto-quit has been scheduled.
    pub fn quit_scheduled(&self) -> bool {
        self.quit_deadline.is_some()
    }

    /// Whether the scheduled auto-quit is due.
    pub fn quit_due(&self) -> bool {
        matches!(self.quit_deadline, Some(d) if Instant::now() >= d)
    }

    /// Time until the host has to act again: the nearer of the next
    /// timer expiry and the pending quit. `None` when fully idle.
    pub fn next_deadline_in(&self) -> Option<Duration> {
        let quit = self
            .quit_deadline
            .map(|d| d.saturating_duration_since(Instant::now()));
        match (self.timer.remaining(), quit) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // === Commands ===

    /// Stop playback and step one frame back.
    pub fn step_back(&mut self, buffer: &mut impl FrameBuffer) -> CommandOutcome {
        self.live_mode = false;
        self.direction = Direction::Backward;
        self.timer.stop();
        self.step_back_impl(buffer)
    }

    /// Stop playback and step one frame forward.
    pub fn step_forward(
        &mut self,
        buffer: &mut impl FrameBuffer,
        config: &PlayerConfig,
    ) -> CommandOutcome {
        self.live_mode = false;
        self.direction = Direction::Forward;
        self.timer.stop();
        self.step_forward_impl(buffer, config)
    }

    /// Start (or keep) playing backward at the configured base rate.
    pub fn play_back(&mut self, config: &PlayerConfig) {
        self.live_mode = false;
        self.direction = Direction::Backward;
        self.restart_at_base(config);
    }

    /// Start (or keep) playing forward at the configured base rate.
    pub fn play_forward(&mut self, config: &PlayerConfig) {
        self.live_mode = false;
        self.direction = Direction::Forward;
        self.restart_at_base(config);
    }

    /// Stop when playing, otherwise resume in the current direction.
    pub fn play_or_stop(&mut self, config: &PlayerConfig) {
        self.live_mode = false;
        if self.timer.is_active() {
            self.timer.stop();
        } else {
            match self.direction {
                Direction::Forward => self.play_forward(config),
                Direction::Backward => self.play_back(config),
            }
        }
    }

    /// Stop playback.
    pub fn stop(&mut self) {
        self.live_mode = false;
        self.timer.stop();
    }

    /// Halve the current interval. Only effective while playing.
    pub fn accelerate(&mut self) {
        if self.timer.is_active() {
            let interval = (self.timer.interval() / 2).max(Duration::from_millis(MIN_INTERVAL_MS));
            self.timer.start(interval);
        }
    }

    /// Double the current interval. Only effective while playing.
    pub fn decelerate(&mut self) {
        if self.timer.is_active() {
            let interval = (self.timer.interval() * 2).min(Duration::from_millis(MAX_INTERVAL_MS));
            self.timer.start(interval);
        }
    }

    /// Play backward faster: halve the interval when already moving
    /// backward, otherwise restart at half the base rate.
    pub fn accelerate_back(&mut self, config: &PlayerConfig) {
        let interval = self.accelerated_interval(Direction::Backward, config);
        self.live_mode = false;
        self.direction = Direction::Backward;
        self.timer.start(interval);
    }

    /// Play forward faster: halve the interval when already moving
    /// forward, otherwise restart at half the base rate.
    pub fn accelerate_forward(&mut self, config: &PlayerConfig) {
        let interval = self.accelerated_interval(Direction::Forward, config);
        self.live_mode = false;
        self.direction = Direction::Forward;
        self.timer.start(interval);
    }

    fn accelerated_interval(&self, direction: Direction, config: &PlayerConfig) -> Duration {
        if self.direction != direction || !self.timer.is_active() {
            Duration::from_millis(config.timer_interval_ms / 2)
        } else {
            (self.timer.interval() / 2).max(Duration::from_millis(ACCEL_FLOOR_MS))
        }
    }

    /// Jump to the first frame and stop.
    pub fn go_to_first(&mut self, buffer: &mut impl FrameBuffer) -> CommandOutcome {
        if buffer.set_first() {
            self.live_mode = false;
            self.timer.stop();
            CommandOutcome::Updated
        } else {
            CommandOutcome::Unchanged
        }
    }

    /// Jump to the last frame and stop.
    pub fn go_to_last(&mut self, buffer: &mut impl FrameBuffer) -> CommandOutcome {
        if buffer.set_last() {
            self.live_mode = false;
            self.timer.stop();
            CommandOutcome::Updated
        } else {
            CommandOutcome::Unchanged
        }
    }

    /// Jump to an absolute index. The timer keeps running so the
    /// position can be scrubbed during playback.
    pub fn go_to_index(&mut self, buffer: &mut impl FrameBuffer, index: usize) -> CommandOutcome {
        if buffer.set_index(index) {
            self.live_mode = false;
            CommandOutcome::Updated
        } else {
            CommandOutcome::Unchanged
        }
    }

    /// Jump to a simulation cycle. The timer keeps running, as for
    /// [`go_to_index`](Self::go_to_index).
    pub fn go_to_cycle(&mut self, buffer: &mut impl FrameBuffer, cycle: u32) -> CommandOutcome {
        if buffer.set_cycle(cycle) {
            self.live_mode = false;
            CommandOutcome::Updated
        } else {
            CommandOutcome::Unchanged
        }
    }

    /// Show the newest data. In buffering mode this jumps to the last
    /// buffered frame and stops; otherwise it is a plain display
    /// refresh that leaves the position alone.
    pub fn show_live(
        &mut self,
        buffer: &mut impl FrameBuffer,
        config: &PlayerConfig,
    ) -> CommandOutcome {
        if config.buffering_mode {
            if buffer.set_last() {
                self.timer.stop();
                CommandOutcome::Updated
            } else {
                CommandOutcome::Unchanged
            }
        } else {
            CommandOutcome::Updated
        }
    }

    /// Track the newest frame as it arrives. No update is emitted;
    /// the data-arrival path drives the display while live.
    pub fn set_live_mode(&mut self, buffer: &mut impl FrameBuffer) {
        buffer.set_last();
        self.live_mode = true;
        self.timer.stop();
    }

    /// Activate the timer at the base rate when frames exist and it
    /// is not already running. Called from the data-arrival path.
    pub fn start_timer(&mut self, buffer: &impl FrameBuffer, config: &PlayerConfig) {
        if !buffer.is_empty() && !self.timer.is_active() {
            self.timer
                .start(Duration::from_millis(config.timer_interval_ms));
        }
    }

    /// Reset for a new log: stop, face forward, drop the live mode
    /// and cushion flags, restore the base interval. The pending
    /// auto-quit, if any, stays.
    pub fn clear(&mut self, config: &PlayerConfig) {
        self.timer.stop();
        self.direction = Direction::Forward;
        self.live_mode = false;
        self.cache_primed = false;
        self.catching_up = false;
        self.timer
            .set_interval(Duration::from_millis(config.timer_interval_ms));
    }

    // === Timer plumbing ===

    /// Run one playback tick if the timer has expired.
    pub fn poll_tick(
        &mut self,
        buffer: &mut impl FrameBuffer,
        config: &PlayerConfig,
    ) -> CommandOutcome {
        if self.timer.poll() {
            self.handle_timer(buffer, config)
        } else {
            CommandOutcome::Unchanged
        }
    }

    /// One playback tick: step in the current direction, then adapt
    /// the interval. A failed step leaves the timer stopped until new
    /// data (or a command) reactivates it.
    pub fn handle_timer(
        &mut self,
        buffer: &mut impl FrameBuffer,
        config: &PlayerConfig,
    ) -> CommandOutcome {
        let outcome = match self.direction {
            Direction::Forward => self.step_forward_impl(buffer, config),
            Direction::Backward => self.step_back_impl(buffer),
        };

        if outcome == CommandOutcome::Updated {
            self.adjust_timer(buffer, config);
        }

        outcome
    }

    fn step_forward_impl(
        &mut self,
        buffer: &mut impl FrameBuffer,
        config: &PlayerConfig,
    ) -> CommandOutcome {
        if buffer.step_forward() {
            return CommandOutcome::Updated;
        }

        self.timer.stop();

        if buffer.terminal_reached() && config.auto_quit && self.quit_deadline.is_none() {
            let wait = if config.auto_quit_wait_secs > 0 {
                Duration::from_secs(config.auto_quit_wait_secs)
            } else {
                DEFAULT_QUIT_WAIT
            };
            tracing::debug!(wait_ms = wait.as_millis() as u64, "scheduling auto quit");
            self.quit_deadline = Some(Instant::now() + wait);
        }

        CommandOutcome::Unchanged
    }

    fn step_back_impl(&mut self, buffer: &mut impl FrameBuffer) -> CommandOutcome {
        if buffer.step_back() {
            CommandOutcome::Updated
        } else {
            self.timer.stop();
            CommandOutcome::Unchanged
        }
    }

    fn restart_at_base(&mut self, config: &PlayerConfig) {
        let base = Duration::from_millis(config.timer_interval_ms);
        if !self.timer.is_active() || self.timer.interval() != base {
            self.timer.start(base);
        }
    }

    /// Recompute the step interval from the buffer fill level and
    /// restart the timer when the rate changed.
    fn adjust_timer(&mut self, buffer: &impl FrameBuffer, config: &PlayerConfig) {
        self.live_mode = false;

        let len = buffer.len();
        if len == 0 {
            return;
        }

        let mut current = buffer.current_index();
        if current == INVALID_INDEX {
            current = 0;
        }
        let lookahead = len.saturating_sub(current + 1);

        let plan = interval::plan(
            lookahead,
            config.cache_size.max(1),
            config.timer_interval_ms,
            buffer.step_ms(),
            buffer.terminal_reached(),
            self.cache_primed,
            self.catching_up,
        );
        self.cache_primed = plan.cache_primed;
        self.catching_up = plan.catching_up;

        let interval = Duration::from_millis(plan.interval_ms);
        if self.timer.interval() != interval || !self.timer.is_active() {
            tracing::debug!(
                lookahead,
                interval_ms = plan.interval_ms,
                catching_up = plan.catching_up,
                "adjusting step interval"
            );
            self.timer.start(interval);
        }
    }
}
