//! Decibel ↔ linear volume conversion
//!
//! Two conversion modes are supported:
//! - `Exact`: `20 * log10(linear)` and its inverse
//! - `Approximate`: `6.02 * log2(linear)`, cheaper and clamped at the cutoff
//!
//! Both modes share the same -60 dB cutoff so they agree near silence.

use serde::{Deserialize, Serialize};

/// Decibel value treated as silence
pub const DB_CUTOFF: f32 = -60.0;

/// Linear value corresponding to [`DB_CUTOFF`] under the approximation
///
/// Equal to `2^(DB_CUTOFF / 6.02)`.
pub const LINEAR_CUTOFF: f32 = 0.000_999_311_9;

/// Lowest decibel value editors and callers clamp to
pub const DB_FLOOR: f32 = -80.0;

/// Decibels per doubling of amplitude used by the approximation
const DB_PER_OCTAVE: f32 = 6.02;

/// Conversion mode for decibel/linear functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// `6.02 * log2(x)` with the silence cutoff applied in both directions
    #[default]
    Approximate,

    /// `20 * log10(x)`
    Exact,
}

impl ConversionMode {
    /// Map the "use approximation" flag used by settings and editors
    pub fn from_approximate(approximate: bool) -> Self {
        if approximate {
            Self::Approximate
        } else {
            Self::Exact
        }
    }

    /// Whether this mode is the approximation
    pub fn is_approximate(self) -> bool {
        self == Self::Approximate
    }
}

/// Convert a linear volume (0-1) to decibels
///
/// Zero, negative and `NaN` volumes are silence and return [`DB_CUTOFF`] in
/// both modes. In `Approximate` mode anything below [`LINEAR_CUTOFF`] also
/// returns the cutoff.
pub fn linear_to_decibel(linear: f32, mode: ConversionMode) -> f32 {
    if linear.is_nan() || linear <= 0.0 {
        return DB_CUTOFF;
    }

    match mode {
        ConversionMode::Approximate => {
            if linear < LINEAR_CUTOFF {
                return DB_CUTOFF;
            }
            DB_PER_OCTAVE * linear.log2()
        }
        ConversionMode::Exact => 20.0 * linear.log10(),
    }
}

/// Convert decibels to a linear volume
///
/// In `Approximate` mode any value at or below [`DB_CUTOFF`] returns exactly
/// `0.0`, mirroring the clamp in [`linear_to_decibel`]. `NaN` and `-inf`
/// return `0.0` in both modes.
pub fn decibel_to_linear(decibels: f32, mode: ConversionMode) -> f32 {
    if decibels.is_nan() || decibels == f32::NEG_INFINITY {
        return 0.0;
    }

    match mode {
        ConversionMode::Approximate => {
            if decibels <= DB_CUTOFF {
                return 0.0;
            }
            2.0_f32.powf(decibels / DB_PER_OCTAVE)
        }
        ConversionMode::Exact => 10.0_f32.powf(decibels / 20.0),
    }
}

/// A volume expressed in both representations
///
/// Always derived from one side on demand, never stored as the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeSample {
    /// Volume in decibels (clamped to [`DB_FLOOR`, 0])
    pub decibels: f32,

    /// Linear volume (clamped to 0-1)
    pub linear: f32,
}

impl VolumeSample {
    /// Derive a sample from a linear volume
    pub fn from_linear(linear: f32, mode: ConversionMode) -> Self {
        let linear = if linear.is_nan() {
            0.0
        } else {
            linear.clamp(0.0, 1.0)
        };

        Self {
            decibels: linear_to_decibel(linear, mode).clamp(DB_FLOOR, 0.0),
            linear,
        }
    }

    /// Derive a sample from a decibel value
    pub fn from_decibels(decibels: f32, mode: ConversionMode) -> Self {
        let decibels = if decibels.is_nan() {
            DB_FLOOR
        } else {
            decibels.clamp(DB_FLOOR, 0.0)
        };

        Self {
            decibels,
            linear: decibel_to_linear(decibels, mode).clamp(0.0, 1.0),
        }
    }

    /// Check if this sample is silent
    pub fn is_silent(&self) -> bool {
        self.linear == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_constant_matches_formula() {
        let computed = 2.0_f32.powf(DB_CUTOFF / DB_PER_OCTAVE);
        assert!((computed - LINEAR_CUTOFF).abs() < 1e-8);
    }

    #[test]
    fn exact_cutoff_behavior() {
        assert_eq!(decibel_to_linear(-60.0, ConversionMode::Approximate), 0.0);
        assert_eq!(linear_to_decibel(0.0, ConversionMode::Approximate), -60.0);
    }

    #[test]
    fn silence_never_produces_infinity() {
        for mode in [ConversionMode::Approximate, ConversionMode::Exact] {
            assert_eq!(linear_to_decibel(0.0, mode), DB_CUTOFF);
            assert_eq!(linear_to_decibel(-0.5, mode), DB_CUTOFF);
            assert_eq!(linear_to_decibel(f32::NAN, mode), DB_CUTOFF);
            assert_eq!(decibel_to_linear(f32::NEG_INFINITY, mode), 0.0);
            assert_eq!(decibel_to_linear(f32::NAN, mode), 0.0);
        }
    }

    #[test]
    fn approximate_below_cutoff_is_silence() {
        assert_eq!(
            linear_to_decibel(LINEAR_CUTOFF / 2.0, ConversionMode::Approximate),
            DB_CUTOFF
        );
        assert_eq!(decibel_to_linear(-75.0, ConversionMode::Approximate), 0.0);
    }

    #[test]
    fn exact_mode_is_not_clamped_above_zero_volume() {
        // -80 dB is representable in exact mode
        let linear = decibel_to_linear(-80.0, ConversionMode::Exact);
        assert!((linear - 0.0001).abs() < 1e-6);

        let db = linear_to_decibel(0.0001, ConversionMode::Exact);
        assert!((db + 80.0).abs() < 0.01);
    }

    #[test]
    fn unity_is_zero_db() {
        for mode in [ConversionMode::Approximate, ConversionMode::Exact] {
            assert!(linear_to_decibel(1.0, mode).abs() < 1e-6);
            assert!((decibel_to_linear(0.0, mode) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn modes_agree_closely() {
        // 6.02 dB per doubling vs 20*log10(2) = 6.0206 dB
        let approx = linear_to_decibel(0.5, ConversionMode::Approximate);
        let exact = linear_to_decibel(0.5, ConversionMode::Exact);
        assert!((approx - exact).abs() < 0.01);
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(
            ConversionMode::from_approximate(true),
            ConversionMode::Approximate
        );
        assert_eq!(ConversionMode::from_approximate(false), ConversionMode::Exact);
        assert!(ConversionMode::default().is_approximate());
    }

    #[test]
    fn sample_from_linear_clamps() {
        let sample = VolumeSample::from_linear(1.5, ConversionMode::Exact);
        assert_eq!(sample.linear, 1.0);
        assert!(sample.decibels.abs() < 1e-6);

        let silent = VolumeSample::from_linear(-1.0, ConversionMode::Exact);
        assert!(silent.is_silent());
        assert_eq!(silent.decibels, DB_CUTOFF);
    }

    #[test]
    fn sample_from_decibels_clamps() {
        let sample = VolumeSample::from_decibels(12.0, ConversionMode::Approximate);
        assert_eq!(sample.decibels, 0.0);
        assert!((sample.linear - 1.0).abs() < 1e-6);

        let floor = VolumeSample::from_decibels(-200.0, ConversionMode::Approximate);
        assert_eq!(floor.decibels, DB_FLOOR);
        assert!(floor.is_silent());
    }
}
