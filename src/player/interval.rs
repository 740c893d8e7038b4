//! Adaptive step-interval computation.
//!
//! When frames are still being produced (a live-captured log), naive
//! playback at the configured rate overtakes the producer and stalls
//! at the buffer head. The rate logic keeps a cushion of buffered
//! frames ahead of the playback position: it slows down hard until an
//! initial cushion exists, throttles mildly while the cushion is
//! refilling, and plays at the natural rate otherwise.
//!
//! The throttle has hysteresis: it engages when the cushion falls to
//! half the target and disengages only once the cushion has fully
//! recovered, so a cushion hovering near the half-target threshold
//! does not make the rate oscillate.

/// Slowdown factor applied until the initial cushion has filled once.
const PRIMING_FACTOR: u64 = 5;

/// Snapshot of the rate decision for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RatePlan {
    /// Delay until the next step, in ms.
    pub interval_ms: u64,
    /// Whether the initial cushion has filled at least once.
    pub cache_primed: bool,
    /// Whether the mild throttle is engaged.
    pub catching_up: bool,
}

/// Compute the next step interval.
///
/// `lookahead` is the number of buffered frames ahead of the current
/// position, `cache_size` the desired cushion (already floored at 1),
/// `base_ms` the configured interval, `step_ms` the log's intrinsic
/// per-frame duration, and `terminal` whether the log's end-of-data
/// state has been reached. `cache_primed` latches: once true it stays
/// true for every later plan until externally reset.
pub(crate) fn plan(
    lookahead: usize,
    cache_size: usize,
    base_ms: u64,
    step_ms: u64,
    terminal: bool,
    cache_primed: bool,
    catching_up: bool,
) -> RatePlan {
    let cache_primed = cache_primed || lookahead >= cache_size;

    let mut interval_ms = base_ms.min(step_ms);
    let mut catching_up = catching_up;

    let throttled = (base_ms * 11 / 10).max(step_ms * 11 / 10);

    if !cache_primed {
        interval_ms = base_ms * PRIMING_FACTOR;
    } else if lookahead >= cache_size {
        catching_up = false;
    } else if catching_up {
        interval_ms = throttled;
    } else if lookahead <= cache_size / 2 && !terminal {
        catching_up = true;
        interval_ms = throttled;
    } else if lookahead > cache_size / 2 {
        interval_ms = base_ms.max(step_ms);
    }

    RatePlan {
        interval_ms,
        cache_primed,
        catching_up,
    }
}
