//! Frame storage and positioning.
//!
//! The playback controller never touches frame storage directly; it
//! drives any store through the [`FrameBuffer`] trait, which covers
//! relative stepping, absolute positioning, and the per-log metadata
//! the adaptive rate logic needs. [`MemoryBuffer`] is the in-memory
//! implementation used by the CLI and the test suites.

mod memory;

pub use memory::MemoryBuffer;

/// Sentinel index meaning "no frame selected".
pub const INVALID_INDEX: usize = usize::MAX;

/// One recorded snapshot of the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Logical simulation cycle this frame belongs to.
    pub cycle: u32,
    /// Rendered frame content.
    pub body: String,
}

impl Frame {
    pub fn new(cycle: u32, body: impl Into<String>) -> Self {
        Self {
            cycle,
            body: body.into(),
        }
    }
}

/// Ordered frame sequence with a movable current index.
///
/// All positioning operations report success as `bool`; stepping or
/// seeking out of range is a normal condition, not an error. Frames
/// are ordered by non-decreasing cycle number.
pub trait FrameBuffer {
    /// Advance the current index by one. `false` at the last frame.
    fn step_forward(&mut self) -> bool;

    /// Retreat the current index by one. `false` at the first frame.
    fn step_back(&mut self) -> bool;

    /// Jump to the first frame. `false` when empty.
    fn set_first(&mut self) -> bool;

    /// Jump to the last frame. `false` when empty.
    fn set_last(&mut self) -> bool;

    /// Jump to an absolute index. `false` when out of range.
    fn set_index(&mut self, index: usize) -> bool;

    /// Jump to the first frame at or after the given cycle.
    /// `false` when no such frame exists.
    fn set_cycle(&mut self, cycle: u32) -> bool;

    /// Number of frames currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current index, or [`INVALID_INDEX`] when no frame is selected.
    fn current_index(&self) -> usize;

    /// Whether the log's end-of-data marker has been reached.
    ///
    /// Distinct from running out of buffered frames: a live log may be
    /// exhausted without being over.
    fn terminal_reached(&self) -> bool;

    /// Intrinsic per-frame duration from the log metadata, in ms.
    fn step_ms(&self) -> u64;

    /// Frame at the current index, if any.
    fn current_frame(&self) -> Option<&Frame>;
}
