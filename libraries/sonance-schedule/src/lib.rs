//! Sonance - Clip Scheduling
//!
//! Gapless, sample-accurate playback of a cyclic playlist.
//!
//! This crate provides:
//! - Clips described by sample count and sample rate
//! - A read-only, shareable playlist
//! - Two alternating playback slots
//! - A lookahead scheduler driven by the audio clock
//!
//! # Architecture
//!
//! The scheduler is polled once per driver tick. It reads time from an
//! [`AudioClock`] (the audio device's timeline, not wall clock) and commits
//! each clip to a slot of a [`ScheduledPlayback`] output one lookahead window
//! before the clip must be heard. Start times are accumulated from exact
//! clip lengths, so consecutive clips join without gaps or overlaps no
//! matter how irregular the ticks are.
//!
//! # Example
//!
//! ```rust
//! use sonance_schedule::{Clip, LookaheadScheduler, Playlist, ScheduleConfig, ScheduledPlayback};
//!
//! struct Device;
//!
//! impl ScheduledPlayback for Device {
//!     fn play_scheduled(&mut self, slot: usize, clip: &Clip, start_time: f64) {
//!         println!("slot {slot}: {} at {start_time}", clip.id);
//!     }
//!     fn stop(&mut self, _slot: usize) {}
//! }
//!
//! let playlist = Playlist::new(vec![
//!     Clip::new("intro", 132_300, 44_100),
//!     Clip::new("loop", 88_200, 44_100),
//! ]);
//! let mut scheduler = LookaheadScheduler::start(playlist, ScheduleConfig::default(), 0.0).unwrap();
//!
//! let armed = scheduler.tick(0.1, &mut Device).unwrap().unwrap();
//! assert_eq!(armed.start, 1.0);
//! assert_eq!(scheduler.next_start_time(), 4.0);
//! ```

mod clip;
mod clock;
mod config;
mod error;
mod scheduler;
mod slot;

// Public exports
pub use clip::{Clip, Playlist};
pub use clock::{AudioClock, ManualClock, ScheduledPlayback};
pub use config::ScheduleConfig;
pub use error::{ConfigurationError, Result, ScheduleError};
pub use scheduler::{ArmedClip, LookaheadScheduler, SLOT_COUNT};
pub use slot::{PlaybackSlot, SlotState};
