//! Playback slots
//!
//! The scheduler alternates between two slots so one can be armed while the
//! other is still playing.

/// Lifecycle of a single slot
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SlotState {
    /// Nothing committed
    #[default]
    Idle,

    /// Clip committed to start at `start`, not yet audible
    Armed {
        /// Playlist position of the clip
        clip_index: usize,
        /// Committed start time (audio clock seconds)
        start: f64,
        /// End of the clip (`start + duration`)
        end: f64,
    },

    /// Clip is audible until `end`
    Playing {
        /// Playlist position of the clip
        clip_index: usize,
        /// Committed start time (audio clock seconds)
        start: f64,
        /// End of the clip (`start + duration`)
        end: f64,
    },
}

/// One of the scheduler's two playback slots
#[derive(Debug, Clone, Default)]
pub struct PlaybackSlot {
    state: SlotState,
}

impl PlaybackSlot {
    /// Create an idle slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> SlotState {
        self.state
    }

    /// Check if the slot is free for a new clip
    pub fn is_idle(&self) -> bool {
        self.state == SlotState::Idle
    }

    /// Check if the slot holds a clip that has not started yet
    pub fn is_armed(&self) -> bool {
        matches!(self.state, SlotState::Armed { .. })
    }

    /// Occupied time range, if any
    pub fn range(&self) -> Option<(f64, f64)> {
        match self.state {
            SlotState::Idle => None,
            SlotState::Armed { start, end, .. } | SlotState::Playing { start, end, .. } => {
                Some((start, end))
            }
        }
    }

    /// Move the slot forward to audio time `now`
    ///
    /// An armed slot starts playing once `now >= start`; a playing slot is
    /// released once `now >= end`. Both can happen in one call.
    pub fn advance(&mut self, now: f64) {
        if let SlotState::Armed {
            clip_index,
            start,
            end,
        } = self.state
        {
            if now >= start {
                self.state = SlotState::Playing {
                    clip_index,
                    start,
                    end,
                };
            }
        }

        if let SlotState::Playing { end, .. } = self.state {
            if now >= end {
                self.state = SlotState::Idle;
            }
        }
    }

    pub(crate) fn arm(&mut self, clip_index: usize, start: f64, end: f64) {
        self.state = SlotState::Armed {
            clip_index,
            start,
            end,
        };
    }

    pub(crate) fn clear(&mut self) {
        self.state = SlotState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut slot = PlaybackSlot::new();
        assert!(slot.is_idle());
        assert_eq!(slot.range(), None);

        slot.arm(0, 1.0, 4.0);
        assert!(slot.is_armed());
        assert_eq!(slot.range(), Some((1.0, 4.0)));

        slot.advance(0.5);
        assert!(slot.is_armed());

        slot.advance(1.0);
        assert_eq!(
            slot.state(),
            SlotState::Playing {
                clip_index: 0,
                start: 1.0,
                end: 4.0
            }
        );

        slot.advance(3.99);
        assert!(!slot.is_idle());

        slot.advance(4.0);
        assert!(slot.is_idle());
    }

    #[test]
    fn late_advance_skips_straight_to_idle() {
        let mut slot = PlaybackSlot::new();
        slot.arm(1, 1.0, 2.0);
        slot.advance(10.0);
        assert!(slot.is_idle());
    }

    #[test]
    fn clear_releases_slot() {
        let mut slot = PlaybackSlot::new();
        slot.arm(1, 1.0, 2.0);
        slot.clear();
        assert!(slot.is_idle());
    }
}
