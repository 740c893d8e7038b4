//! In-memory frame buffer.

use std::collections::VecDeque;

use super::{Frame, FrameBuffer, INVALID_INDEX};

/// Default per-frame duration when the log carries no metadata, in ms.
const DEFAULT_STEP_MS: u64 = 100;

/// Growable in-memory frame store.
///
/// Frames arrive through [`push`](MemoryBuffer::push), either all at
/// once when loading a finished log or incrementally while a live log
/// is still being captured. An optional capacity bound turns the
/// buffer into a sliding window: once full, pushing drops the oldest
/// frame and shifts the current index accordingly.
#[derive(Debug)]
pub struct MemoryBuffer {
    frames: VecDeque<Frame>,
    current: usize,
    step_ms: u64,
    terminal: bool,
    capacity: Option<usize>,
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
            current: INVALID_INDEX,
            step_ms: DEFAULT_STEP_MS,
            terminal: false,
            capacity: None,
        }
    }

    /// Bounded buffer holding at most `capacity` frames (floor 1).
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            ..Self::new()
        }
    }

    /// Set the per-frame duration reported to the rate controller.
    pub fn set_step_ms(&mut self, step_ms: u64) {
        self.step_ms = step_ms.max(1);
    }

    /// Mark the log's end-of-data condition as reached.
    pub fn mark_terminal(&mut self) {
        self.terminal = true;
    }

    /// Append a frame.
    ///
    /// The first frame ever pushed becomes the current one. On a
    /// bounded buffer, pushing past capacity drops the oldest frame;
    /// the current index follows the survivors (it sticks at 0 when
    /// the current frame itself is dropped).
    pub fn push(&mut self, frame: Frame) {
        self.frames.push_back(frame);

        if let Some(cap) = self.capacity {
            while self.frames.len() > cap {
                self.frames.pop_front();
                if self.current != INVALID_INDEX {
                    self.current = self.current.saturating_sub(1);
                }
            }
        }

        if self.current == INVALID_INDEX {
            self.current = 0;
        }
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

impl FrameBuffer for MemoryBuffer {
    fn step_forward(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        if self.current == INVALID_INDEX {
            self.current = 0;
            return true;
        }
        if self.current + 1 < self.frames.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn step_back(&mut self) -> bool {
        if self.current == INVALID_INDEX || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    fn set_first(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        self.current = 0;
        true
    }

    fn set_last(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        self.current = self.frames.len() - 1;
        true
    }

    fn set_index(&mut self, index: usize) -> bool {
        if index >= self.frames.len() {
            return false;
        }
        self.current = index;
        true
    }

    fn set_cycle(&mut self, cycle: u32) -> bool {
        // Cycles are non-decreasing, so the first frame at or after
        // the requested cycle is found by partition point.
        let idx = self.frames.partition_point(|f| f.cycle < cycle);
        if idx >= self.frames.len() {
            return false;
        }
        self.current = idx;
        true
    }

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn current_index(&self) -> usize {
        self.current
    }

    fn terminal_reached(&self) -> bool {
        self.terminal
    }

    fn step_ms(&self) -> u64 {
        self.step_ms
    }

    fn current_frame(&self) -> Option<&Frame> {
        if self.current == INVALID_INDEX {
            return None;
        }
        self.frames.get(self.current)
    }
}
