//! Per-channel fade controller
//!
//! Guarantees that at most one interpolation task writes a channel's volume.
//! Starting a new fade cancels the previous one synchronously, so the old
//! task is already `Cancelled` before the new task's first tick.
//!
//! The controller is tick-driven: call [`FadeController::tick`] once per
//! frame with the frame's delta time and the channel it controls.

use crate::{
    channel::AudioChannel,
    curve::{FadeCurve, Interpolator},
    deferred::DeferredStop,
    error::{FadeError, Result},
    task::{Callback, InterpolationTask, TaskStatus},
    token::{CancelHandle, CancellationToken},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fade durations at or below this are treated as "no fade"
const INSTANT_FADE_SECS: f32 = f32::EPSILON;

/// Default settings for convenience fades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeSettings {
    /// Curve used by `fade_in`, `fade_out`, `play` and `stop`
    #[serde(default)]
    pub curve: FadeCurve,

    /// Default fade time in seconds (default: 2.0)
    #[serde(default = "default_fade_secs")]
    pub fade_secs: f32,
}

fn default_fade_secs() -> f32 {
    2.0
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            curve: FadeCurve::default(),
            fade_secs: default_fade_secs(),
        }
    }
}

/// A fade to start on a channel
///
/// ```rust
/// use sonance_fade::{FadeCurve, FadeRequest};
///
/// let request = FadeRequest::new(0.0, 1.0, 2.0)
///     .with_curve(FadeCurve::Linear)
///     .on_complete(|| println!("faded in"));
/// ```
pub struct FadeRequest {
    from: f32,
    to: f32,
    duration: f32,
    interpolator: Box<dyn Interpolator>,
    on_complete: Option<Callback>,
    on_cancel: Option<Callback>,
}

impl FadeRequest {
    /// Fade from `from` to `to` over `duration` seconds along a smooth step
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            interpolator: Box::new(FadeCurve::default()),
            on_complete: None,
            on_cancel: None,
        }
    }

    /// Use a different curve or interpolation function
    pub fn with_curve(mut self, interpolator: impl Interpolator + 'static) -> Self {
        self.interpolator = Box::new(interpolator);
        self
    }

    /// Invoke `callback` once if the fade reaches its target
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Invoke `callback` once if the fade is cancelled or superseded
    pub fn on_cancel(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for FadeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FadeRequest")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// Fade controller for a single channel
#[derive(Debug, Default)]
pub struct FadeController {
    settings: FadeSettings,

    /// Active fade, if any (owns the cancellation token)
    active: Option<InterpolationTask>,

    /// Stops waiting for their fade-out time to elapse
    pending_stops: Vec<DeferredStop>,
}

impl FadeController {
    /// Create a controller with default settings
    pub fn new() -> Self {
        Self::with_settings(FadeSettings::default())
    }

    /// Create a controller with specific settings
    pub fn with_settings(settings: FadeSettings) -> Self {
        Self {
            settings,
            active: None,
            pending_stops: Vec::new(),
        }
    }

    /// Get current settings
    pub fn settings(&self) -> &FadeSettings {
        &self.settings
    }

    /// Update settings (affects fades started afterwards)
    pub fn set_settings(&mut self, settings: FadeSettings) {
        self.settings = settings;
    }

    /// Check if a fade is in progress
    pub fn is_fading(&self) -> bool {
        self.active.as_ref().is_some_and(|task| !task.is_done())
    }

    /// Handle to the active fade's token
    pub fn active_handle(&self) -> Option<CancelHandle> {
        self.active.as_ref().map(InterpolationTask::handle)
    }

    /// Number of stops waiting to fire
    pub fn pending_stops(&self) -> usize {
        self.pending_stops.len()
    }

    /// Start a fade, superseding any fade already running
    ///
    /// Fails with [`FadeError::InactiveTarget`] if the channel is not eligible
    /// and with [`FadeError::InvalidDuration`] for negative or non-finite
    /// durations. Nothing changes on failure.
    pub fn fade<C: AudioChannel>(&mut self, channel: &C, request: FadeRequest) -> Result<CancelHandle> {
        ensure_eligible(channel)?;
        ensure_valid_duration(request.duration)?;

        if self.cancel_active() {
            debug!("Superseded fade on channel '{}'", channel.id());
        }

        let FadeRequest {
            from,
            to,
            duration,
            interpolator,
            on_complete,
            on_cancel,
        } = request;

        let mut task =
            InterpolationTask::from_boxed(from, to, duration, interpolator, CancellationToken::new());
        task.set_callbacks(on_complete, on_cancel);
        task.start();

        let handle = task.handle();
        self.active = Some(task);

        debug!(
            "Fade started on channel '{}': {:.3} -> {:.3} over {:.3}s",
            channel.id(),
            from,
            to,
            duration
        );

        Ok(handle)
    }

    /// Fade from the current volume up to 1.0
    ///
    /// Use [`fade`](Self::fade) with [`FadeRequest::on_complete`] to be told
    /// when it finishes.
    pub fn fade_in<C: AudioChannel>(&mut self, channel: &C, duration: f32) -> Result<CancelHandle> {
        let request =
            FadeRequest::new(channel.volume(), 1.0, duration).with_curve(self.settings.curve);
        self.fade(channel, request)
    }

    /// Fade from the current volume down to 0.0
    pub fn fade_out<C: AudioChannel>(&mut self, channel: &C, duration: f32) -> Result<CancelHandle> {
        let request =
            FadeRequest::new(channel.volume(), 0.0, duration).with_curve(self.settings.curve);
        self.fade(channel, request)
    }

    /// Start playback, optionally fading in to the channel's current volume
    ///
    /// With a fade time of zero the channel simply starts. Otherwise the
    /// channel's volume is remembered, set to 0, playback starts, and a fade
    /// back to the remembered volume begins. Pending deferred stops are
    /// discarded so they cannot cut off the new playback. A rejected request
    /// leaves the channel untouched.
    pub fn play<C: AudioChannel>(
        &mut self,
        channel: &mut C,
        fade_secs: f32,
        on_complete: impl FnOnce() + 'static,
    ) -> Result<Option<CancelHandle>> {
        let fade_secs = clamp_fade_time(fade_secs);

        if fade_secs <= INSTANT_FADE_SECS {
            self.pending_stops.clear();
            channel.play();
            on_complete();
            return Ok(None);
        }

        ensure_eligible(channel)?;
        ensure_valid_duration(fade_secs)?;
        self.pending_stops.clear();

        let target = channel.volume();
        channel.set_volume(0.0);
        channel.play();

        let request = FadeRequest::new(0.0, target, fade_secs)
            .with_curve(self.settings.curve)
            .on_complete(on_complete);
        self.fade(channel, request).map(Some)
    }

    /// Stop playback, optionally fading out first
    ///
    /// With a fade time of zero the active fade is cancelled and the channel
    /// stops immediately. Otherwise a fade to silence starts and a deferred
    /// stop is scheduled for when the fade time has elapsed. The deferred
    /// stop fires even if the fade itself is later superseded; `on_complete`
    /// runs when the channel is actually stopped.
    pub fn stop<C: AudioChannel>(
        &mut self,
        channel: &mut C,
        fade_secs: f32,
        on_complete: impl FnOnce() + 'static,
    ) -> Result<Option<CancelHandle>> {
        let fade_secs = clamp_fade_time(fade_secs);

        if fade_secs <= INSTANT_FADE_SECS {
            self.cancel_active();
            channel.stop();
            on_complete();
            return Ok(None);
        }

        let request =
            FadeRequest::new(channel.volume(), 0.0, fade_secs).with_curve(self.settings.curve);
        let handle = self.fade(channel, request)?;

        self.pending_stops
            .push(DeferredStop::new(fade_secs, Some(Box::new(on_complete))));
        debug!("Channel '{}' will stop in {:.3}s", channel.id(), fade_secs);

        Ok(Some(handle))
    }

    /// Cancel the active fade, if any
    ///
    /// The fade's volume stays wherever its last tick left it.
    pub fn cancel(&mut self) -> bool {
        self.cancel_active()
    }

    /// Advance the active fade and any deferred stops by one tick
    ///
    /// Returns the active fade's status for this tick, or `None` if no fade
    /// was running. If the channel has become ineligible, the active fade is
    /// cancelled and pending stops are dropped without firing.
    pub fn tick<C: AudioChannel>(&mut self, channel: &mut C, delta: f32) -> Option<TaskStatus> {
        if !channel.is_eligible() {
            let cancelled = self.cancel_active();
            if !self.pending_stops.is_empty() {
                debug!(
                    "Dropping {} pending stop(s) on inactive channel '{}'",
                    self.pending_stops.len(),
                    channel.id()
                );
                self.pending_stops.clear();
            }
            return cancelled.then_some(TaskStatus::Cancelled);
        }

        let status = self
            .active
            .as_mut()
            .map(|task| task.resume(delta, |volume| channel.set_volume(volume)));

        match status {
            Some(TaskStatus::Completed) => {
                debug!("Fade completed on channel '{}'", channel.id());
                self.active = None;
            }
            Some(TaskStatus::Cancelled) => {
                debug!("Fade cancelled on channel '{}'", channel.id());
                self.active = None;
            }
            Some(TaskStatus::Running) | None => {}
        }

        let mut index = 0;
        while index < self.pending_stops.len() {
            if self.pending_stops[index].advance(delta) {
                let stop = self.pending_stops.remove(index);
                channel.stop();
                debug!("Deferred stop fired on channel '{}'", channel.id());
                stop.fire();
            } else {
                index += 1;
            }
        }

        status
    }

    /// Seconds until the next deferred stop fires
    pub fn next_stop_in(&self) -> Option<f32> {
        self.pending_stops
            .iter()
            .map(DeferredStop::remaining)
            .min_by(f32::total_cmp)
    }

    /// Request cancellation of the active task and let it observe the request
    ///
    /// Returns `true` if a running task was cancelled.
    fn cancel_active(&mut self) -> bool {
        let Some(mut task) = self.active.take() else {
            return false;
        };

        if task.is_done() {
            return false;
        }

        task.handle().request_cancel();
        task.settle_cancellation()
    }
}

fn ensure_eligible<C: AudioChannel>(channel: &C) -> Result<()> {
    if channel.is_eligible() {
        return Ok(());
    }

    warn!("Refusing fade on inactive channel '{}'", channel.id());
    Err(FadeError::InactiveTarget {
        channel: channel.id().to_string(),
    })
}

fn ensure_valid_duration(duration: f32) -> Result<()> {
    if duration.is_finite() && duration >= 0.0 {
        return Ok(());
    }
    Err(FadeError::InvalidDuration(duration))
}

fn clamp_fade_time(fade_secs: f32) -> f32 {
    if fade_secs.is_nan() {
        0.0
    } else {
        fade_secs.max(0.0)
    }
}
