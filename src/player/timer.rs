//! Repeating step timer.
//!
//! Playback runs on a single thread, so the timer is plain deadline
//! state: the host loop uses [`remaining`](StepTimer::remaining) as
//! its poll timeout and calls [`poll`](StepTimer::poll) once the wait
//! returns. Re-arming replaces the pending deadline, so at most one
//! expiry is ever outstanding.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct StepTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl StepTimer {
    /// Create a stopped timer with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// (Re)start the timer: set the interval and schedule the next
    /// expiry one interval from now. Cancels any pending expiry.
    pub fn start(&mut self, interval: Duration) {
        self.interval = interval;
        self.deadline = Some(Instant::now() + interval);
    }

    /// Cancel the pending expiry.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval without scheduling an expiry.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Time until the pending expiry; `None` when stopped, zero when
    /// already due.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Report whether the timer has expired, re-arming one interval
    /// ahead when it has.
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = Some(Instant::now() + self.interval);
                true
            }
            _ => false,
        }
    }
}
