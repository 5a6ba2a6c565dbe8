//! Session simulation
//!
//! Runs a frame loop against a [`ManualClock`]: every frame applies the fade
//! events that have come due, ticks the fade controller with the frame's
//! delta and polls the lookahead scheduler. Frame times are jittered with a
//! seeded RNG so a session always replays the same way.

use crate::config::{ChannelSettings, DriverSettings, FadeAction, FadeEvent, SessionConfig};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sonance_fade::{AudioChannel, CancelHandle, FadeController, FadeRequest, TaskStatus};
use sonance_schedule::{AudioClock, Clip, LookaheadScheduler, ManualClock, ScheduledPlayback};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

// ===== Virtual outputs =====

/// Channel that only remembers its state
#[derive(Debug)]
pub struct VirtualChannel {
    id: String,
    volume: f32,
    playing: bool,
    eligible: bool,
}

impl VirtualChannel {
    pub fn new(settings: &ChannelSettings) -> Self {
        Self {
            id: settings.id.clone(),
            volume: settings.volume,
            playing: settings.playing,
            eligible: true,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl AudioChannel for VirtualChannel {
    fn id(&self) -> &str {
        &self.id
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_eligible(&self) -> bool {
        self.eligible
    }
}

/// Two-slot device that logs what it is asked to play
#[derive(Debug, Default)]
pub struct VirtualDevice {
    scheduled: Vec<ScheduledEntry>,
    stopped_slots: u32,
}

impl ScheduledPlayback for VirtualDevice {
    fn play_scheduled(&mut self, slot: usize, clip: &Clip, start_time: f64) {
        let end = start_time + clip.duration_secs();
        info!(
            "Slot {} <- '{}' at {:.6}s (until {:.6}s)",
            slot, clip.id, start_time, end
        );
        self.scheduled.push(ScheduledEntry {
            slot,
            clip: clip.id.clone(),
            start: start_time,
            end,
        });
    }

    fn stop(&mut self, slot: usize) {
        debug!("Slot {} stopped", slot);
        self.stopped_slots += 1;
    }
}

// ===== Report =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledEntry {
    pub slot: usize,
    pub clip: String,
    pub start: f64,
    pub end: f64,
}

/// Outcome of a simulated session
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationReport {
    pub frames: u64,
    pub elapsed_secs: f64,
    pub scheduled: Vec<ScheduledEntry>,
    pub resyncs: u32,
    /// Slots silenced when the session ended
    pub slots_stopped: u32,
    pub events_applied: u32,
    pub events_rejected: u32,
    pub fades_started: u32,
    pub fades_completed: u32,
    pub fades_cancelled: u32,
    pub stops_fired: u32,
    pub final_volume: f32,
    pub peak_volume: f32,
    pub playing: bool,
}

// ===== Driver =====

/// Run a session to completion
///
/// Scheduling errors are fatal. Rejected fade requests are logged and
/// counted, and the session carries on.
pub fn run(session: &SessionConfig) -> Result<SimulationReport> {
    session.validate()?;

    let clock = ManualClock::new(0.0);
    let mut rng = StdRng::seed_from_u64(session.driver.seed);
    let mut device = VirtualDevice::default();
    let mut channel = VirtualChannel::new(&session.channel);
    let mut fades = FadeController::with_settings(session.fade.clone());
    let mut scheduler =
        LookaheadScheduler::start(session.playlist(), session.schedule, clock.now())?;

    let mut events: Vec<&FadeEvent> = session.events.iter().collect();
    events.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
    let mut pending = events.into_iter().peekable();

    let stops_fired = Rc::new(Cell::new(0u32));
    let mut handles: Vec<CancelHandle> = Vec::new();
    let mut report = SimulationReport {
        peak_volume: channel.volume(),
        ..SimulationReport::default()
    };

    info!(
        "Simulating {:.1}s: {} clips, {} fade events, seed {}",
        session.driver.run_secs,
        session.playlist.len(),
        session.events.len(),
        session.driver.seed
    );

    while clock.now() < session.driver.run_secs {
        let delta = frame_delta(&session.driver, &mut rng);
        clock.advance(delta);
        let now = clock.now();

        while let Some(event) = pending.next_if(|e| e.at_secs <= now) {
            match apply_event(event, &mut fades, &mut channel, &stops_fired) {
                Ok(handle) => {
                    report.events_applied += 1;
                    handles.extend(handle);
                }
                Err(e) => {
                    warn!("{} at {:.3}s rejected: {}", event.action.name(), now, e);
                    report.events_rejected += 1;
                }
            }
        }

        if let Some(status) = fades.tick(&mut channel, delta as f32) {
            if status != TaskStatus::Running {
                debug!("Fade {:?} at {:.3}s", status, now);
            }
        }

        scheduler.poll(&clock, &mut device)?;

        report.frames += 1;
        report.peak_volume = report.peak_volume.max(channel.volume());
    }

    // End of session: silence both slots
    scheduler.stop(&mut device);

    report.elapsed_secs = clock.now();
    report.slots_stopped = device.stopped_slots;
    report.scheduled = device.scheduled;
    report.resyncs = scheduler.resync_count();
    report.fades_started = handles.len() as u32;
    report.fades_completed = handles.iter().filter(|h| h.is_finished()).count() as u32;
    report.fades_cancelled = handles.iter().filter(|h| h.is_cancelled()).count() as u32;
    report.stops_fired = stops_fired.get();
    report.final_volume = channel.volume();
    report.playing = channel.is_playing();

    info!(
        "Simulation finished after {} frames: {} clips scheduled, {} resyncs",
        report.frames,
        report.scheduled.len(),
        report.resyncs
    );

    Ok(report)
}

fn frame_delta(driver: &DriverSettings, rng: &mut StdRng) -> f64 {
    if driver.jitter_secs > 0.0 {
        driver.frame_secs + rng.gen_range(-driver.jitter_secs..=driver.jitter_secs)
    } else {
        driver.frame_secs
    }
}

fn apply_event(
    event: &FadeEvent,
    fades: &mut FadeController,
    channel: &mut VirtualChannel,
    stops_fired: &Rc<Cell<u32>>,
) -> Result<Option<CancelHandle>> {
    let secs = event.secs.unwrap_or(fades.settings().fade_secs);
    debug!(
        "Applying {} ({:.3}s) at {:.3}s",
        event.action.name(),
        secs,
        event.at_secs
    );

    let handle = match event.action {
        FadeAction::Play => fades.play(channel, secs, || {})?,
        FadeAction::Stop => {
            let fired = Rc::clone(stops_fired);
            fades.stop(channel, secs, move || fired.set(fired.get() + 1))?
        }
        FadeAction::FadeIn => Some(fades.fade_in(&*channel, secs)?),
        FadeAction::FadeOut => Some(fades.fade_out(&*channel, secs)?),
        FadeAction::Fade => {
            let to = event.to.unwrap_or(1.0);
            let curve = event.curve.unwrap_or(fades.settings().curve);
            let request = FadeRequest::new(channel.volume(), to, secs).with_curve(curve);
            Some(fades.fade(&*channel, request)?)
        }
        FadeAction::Cancel => {
            fades.cancel();
            None
        }
        FadeAction::Disable => {
            channel.eligible = false;
            None
        }
        FadeAction::Enable => {
            channel.eligible = true;
            None
        }
    };

    Ok(handle)
}
