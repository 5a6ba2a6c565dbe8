//! Sonance - Fade Control
//!
//! Tick-driven, cancellable volume fades for audio channels.
//!
//! This crate provides:
//! - Fade curves (linear, smooth step, square root, S-curve, equal power)
//! - Cancellation tokens with an explicit lifecycle
//! - A resumable interpolation task, advanced once per tick
//! - A per-channel controller that keeps at most one fade active
//! - Fade-in on play and fade-out-then-stop
//!
//! # Architecture
//!
//! Everything runs on the single thread that drives the frame loop. Nothing
//! here spawns threads or blocks: the driver calls
//! [`FadeController::tick`] once per frame with that frame's delta time, and
//! fades only ever suspend between ticks.
//!
//! Platform-specific playback objects are provided via the [`AudioChannel`]
//! trait.
//!
//! # Example
//!
//! ```rust
//! use sonance_fade::{AudioChannel, FadeController, FadeCurve, FadeRequest};
//!
//! struct Channel {
//!     volume: f32,
//!     playing: bool,
//! }
//!
//! impl AudioChannel for Channel {
//!     fn id(&self) -> &str { "music" }
//!     fn volume(&self) -> f32 { self.volume }
//!     fn set_volume(&mut self, volume: f32) { self.volume = volume; }
//!     fn play(&mut self) { self.playing = true; }
//!     fn stop(&mut self) { self.playing = false; }
//! }
//!
//! let mut channel = Channel { volume: 0.0, playing: true };
//! let mut fades = FadeController::new();
//!
//! fades
//!     .fade(&channel, FadeRequest::new(0.0, 1.0, 0.5).with_curve(FadeCurve::Linear))
//!     .unwrap();
//!
//! // Frame loop
//! for _ in 0..60 {
//!     fades.tick(&mut channel, 1.0 / 60.0);
//! }
//! assert_eq!(channel.volume, 1.0);
//! ```

mod channel;
mod controller;
mod curve;
mod deferred;
mod error;
mod task;
mod token;

// Public exports
pub use channel::AudioChannel;
pub use controller::{FadeController, FadeRequest, FadeSettings};
pub use curve::{FadeCurve, Interpolator};
pub use error::{FadeError, Result};
pub use task::{Callback, InterpolationTask, TaskPhase, TaskStatus};
pub use token::{CancelHandle, CancellationToken, TokenState};
