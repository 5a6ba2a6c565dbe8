//! Audio clock and playback output seams
//!
//! The scheduler never talks to an audio device directly. It reads time from
//! an [`AudioClock`] and issues fire-and-forget commands to a
//! [`ScheduledPlayback`] output.

use crate::clip::Clip;
use std::cell::Cell;

/// Monotonic audio-hardware clock, in seconds
///
/// This is the device's timeline (samples played / sample rate), not wall
/// clock or frame time.
pub trait AudioClock {
    /// Current audio time in seconds
    fn now(&self) -> f64;
}

impl<F> AudioClock for F
where
    F: Fn() -> f64,
{
    fn now(&self) -> f64 {
        self()
    }
}

/// Clock advanced by hand, for drivers and tests that simulate time
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Create a clock at `now`
    pub fn new(now: f64) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Move the clock forward by `seconds` (negative values are ignored)
    pub fn advance(&self, seconds: f64) {
        if seconds > 0.0 {
            self.now.set(self.now.get() + seconds);
        }
    }

    /// Jump to `now` if it is later than the current time
    pub fn set(&self, now: f64) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }
}

impl AudioClock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Output side of the scheduler: two playback slots
///
/// Both calls are fire-and-forget; failures are the implementor's concern.
pub trait ScheduledPlayback {
    /// Start `clip` on `slot` exactly at audio time `start_time`
    fn play_scheduled(&mut self, slot: usize, clip: &Clip, start_time: f64);

    /// Stop whatever is on `slot`
    fn stop(&mut self, slot: usize);
}
