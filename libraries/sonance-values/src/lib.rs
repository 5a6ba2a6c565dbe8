//! Sonance - Volume and Pitch Values
//!
//! Pure conversions between the units sound designers think in and the
//! units playback code consumes.
//!
//! This crate provides:
//! - Decibel ↔ linear volume conversion (exact and fast approximation)
//! - Semitone ↔ pitch ratio conversion
//! - Sample-accurate clip lengths for scheduled playback
//! - An editor field model that keeps a decibel and a linear field in sync
//!
//! Every function here is total: silence, zero and negative inputs map to the
//! silence cutoff instead of `NaN` or `-inf`.
//!
//! # Example
//!
//! ```rust
//! use sonance_values::{decibel_to_linear, linear_to_decibel, ConversionMode};
//!
//! let linear = decibel_to_linear(-6.0, ConversionMode::Exact);
//! assert!((linear - 0.501).abs() < 0.001);
//!
//! // Silence never produces -inf
//! assert_eq!(linear_to_decibel(0.0, ConversionMode::Approximate), -60.0);
//! ```

mod clip;
mod field;
mod pitch;
mod volume;

pub use clip::clip_length_secs;
pub use field::VolumeField;
pub use pitch::{pitch_ratio_to_semitones, semitones_to_pitch_ratio, SEMITONES_PER_OCTAVE};
pub use volume::{
    decibel_to_linear, linear_to_decibel, ConversionMode, VolumeSample, DB_CUTOFF, DB_FLOOR,
    LINEAR_CUTOFF,
};
