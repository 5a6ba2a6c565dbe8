//! Lookahead scheduler
//!
//! Keeps a rolling schedule of clip start times against the audio clock.
//! Each clip is committed to a playback slot at least one lookahead window
//! before it must be heard, and the two slots alternate so the handoff
//! between consecutive clips is sample-accurate.

use crate::clip::{Clip, Playlist};
use crate::clock::{AudioClock, ScheduledPlayback};
use crate::config::ScheduleConfig;
use crate::error::{ConfigurationError, Result};
use crate::slot::PlaybackSlot;
use tracing::{debug, warn};

/// Number of playback slots the scheduler alternates between
pub const SLOT_COUNT: usize = 2;

/// A scheduling decision made by [`LookaheadScheduler::tick`]
#[derive(Debug, Clone, PartialEq)]
pub struct ArmedClip {
    /// Slot the clip was committed to
    pub slot: usize,

    /// Playlist position of the clip
    pub clip_index: usize,

    /// Clip identifier
    pub clip_id: String,

    /// Committed start time (audio clock seconds)
    pub start: f64,

    /// End of the clip (`start + duration`)
    pub end: f64,
}

/// Gapless clip scheduler with two alternating slots
///
/// Construct with [`start`](Self::start) or [`start_at`](Self::start_at);
/// both commit the first start time to at least `now + lookahead`, so no
/// clip can ever be armed in the past.
#[derive(Debug)]
pub struct LookaheadScheduler {
    playlist: Playlist,
    lookahead: f64,
    slots: [PlaybackSlot; SLOT_COUNT],
    next_clip_index: usize,
    source_toggle: usize,
    next_start_time: f64,
    last_now: f64,
    running: bool,
    resyncs: u32,
}

impl LookaheadScheduler {
    /// Start scheduling `playlist`; the first clip starts at `now + lookahead`
    pub fn start(playlist: Playlist, config: ScheduleConfig, now: f64) -> Result<Self> {
        Self::start_at(playlist, config, now, now)
    }

    /// Start scheduling with a requested first start time
    ///
    /// The first clip starts at `first_start` or `now + lookahead`, whichever
    /// is later. Both times must be finite.
    pub fn start_at(
        playlist: Playlist,
        config: ScheduleConfig,
        now: f64,
        first_start: f64,
    ) -> Result<Self> {
        config.validate()?;
        for time in [now, first_start] {
            if !time.is_finite() {
                return Err(ConfigurationError::InvalidStartTime(time).into());
            }
        }

        let lookahead = config.lookahead_secs;
        let earliest = now + lookahead;
        let next_start_time = if first_start > earliest {
            first_start
        } else {
            earliest
        };

        debug!(
            "Scheduler started: {} clips, lookahead {:.3}s, first start at {:.3}",
            playlist.len(),
            lookahead,
            next_start_time
        );

        Ok(Self {
            playlist,
            lookahead,
            slots: [PlaybackSlot::new(), PlaybackSlot::new()],
            next_clip_index: 0,
            source_toggle: 0,
            next_start_time,
            last_now: now,
            running: true,
            resyncs: 0,
        })
    }

    /// Run one scheduling decision at audio time `now`
    ///
    /// Arms at most one clip. Returns `Ok(None)` when nothing was due, the
    /// target slot is still occupied, the playlist is empty, or the scheduler
    /// is stopped. A clip with an invalid duration is a configuration error;
    /// the schedule is left untouched and the same error is reported on
    /// every following tick.
    pub fn tick(
        &mut self,
        now: f64,
        output: &mut impl ScheduledPlayback,
    ) -> Result<Option<ArmedClip>> {
        if !self.running || self.playlist.is_empty() {
            return Ok(None);
        }

        if now.is_nan() || now < self.last_now {
            warn!(
                "Ignoring audio clock reading {} (previous {})",
                now, self.last_now
            );
            return Ok(None);
        }
        self.last_now = now;

        for slot in &mut self.slots {
            slot.advance(now);
        }

        if now <= self.next_start_time - self.lookahead {
            return Ok(None);
        }

        let clip_index = self.next_clip_index;
        let Some(clip) = self.playlist.get(clip_index) else {
            return Ok(None);
        };
        let duration = clip.validate()?;

        let slot_index = self.source_toggle;
        if !self.slots[slot_index].is_idle() {
            debug!(
                "Slot {} still occupied, holding clip '{}'",
                slot_index, clip.id
            );
            return Ok(None);
        }

        if now >= self.next_start_time {
            let resynced = now + self.lookahead;
            warn!(
                "Schedule fell behind (now {:.3}, next start {:.3}), resyncing to {:.3}",
                now, self.next_start_time, resynced
            );
            self.next_start_time = resynced;
            self.resyncs += 1;
        }

        let start = self.next_start_time;
        let end = start + duration;
        self.slots[slot_index].arm(clip_index, start, end);
        output.play_scheduled(slot_index, clip, start);

        debug!(
            "Armed clip '{}' on slot {} at {:.6} (until {:.6})",
            clip.id, slot_index, start, end
        );

        let armed = ArmedClip {
            slot: slot_index,
            clip_index,
            clip_id: clip.id.clone(),
            start,
            end,
        };

        self.next_start_time = end;
        self.source_toggle = (slot_index + 1) % SLOT_COUNT;
        self.next_clip_index = (clip_index + 1) % self.playlist.len();

        Ok(Some(armed))
    }

    /// Read `clock` and run one scheduling decision
    pub fn poll(
        &mut self,
        clock: &impl AudioClock,
        output: &mut impl ScheduledPlayback,
    ) -> Result<Option<ArmedClip>> {
        self.tick(clock.now(), output)
    }

    /// Stop both slots and halt scheduling
    pub fn stop(&mut self, output: &mut impl ScheduledPlayback) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            output.stop(index);
            slot.clear();
        }
        self.running = false;
        debug!("Scheduler stopped");
    }

    /// Resume after [`stop`](Self::stop), continuing with the next clip at
    /// `now + lookahead`
    pub fn resume_at(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.running = true;
        if now > self.last_now {
            self.last_now = now;
        }
        self.next_start_time = self.last_now + self.lookahead;
        debug!("Scheduler resumed, next start at {:.3}", self.next_start_time);
    }

    /// Check if the scheduler is arming clips
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start time that will be committed to the next armed clip
    pub fn next_start_time(&self) -> f64 {
        self.next_start_time
    }

    /// Playlist position of the next clip to arm
    pub fn next_clip_index(&self) -> usize {
        self.next_clip_index
    }

    /// Clip that will be armed next, if the playlist is not empty
    pub fn next_clip(&self) -> Option<&Clip> {
        self.playlist.get(self.next_clip_index)
    }

    /// Slot the next clip will be armed on
    pub fn source_toggle(&self) -> usize {
        self.source_toggle
    }

    /// Both playback slots
    pub fn slots(&self) -> &[PlaybackSlot; SLOT_COUNT] {
        &self.slots
    }

    /// Lookahead window in seconds
    pub fn lookahead(&self) -> f64 {
        self.lookahead
    }

    /// Scheduled playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// How many times the schedule had to be moved forward after a stall
    pub fn resync_count(&self) -> u32 {
        self.resyncs
    }
}
