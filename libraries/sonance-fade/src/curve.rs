//! Fade curves for volume interpolation
//!
//! Provides the curve shapes a fade can follow:
//! - Linear: constant rate of change
//! - SmoothStep: Hermite ease-in/ease-out, the default for channel fades
//! - SquareRoot: fast rise, slow finish
//! - S-Curve: cosine ease-in/ease-out
//! - Equal Power: quarter sine, keeps perceived loudness steadier
//!
//! Any closure `Fn(from, to, t) -> value` can be used in place of a curve.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::str::FromStr;

/// Interpolation between two values at normalized position `t` (0.0 to 1.0)
pub trait Interpolator {
    /// Value between `from` and `to` at position `t`
    fn interpolate(&self, from: f32, to: f32, t: f32) -> f32;
}

impl<F> Interpolator for F
where
    F: Fn(f32, f32, f32) -> f32,
{
    #[inline]
    fn interpolate(&self, from: f32, to: f32, t: f32) -> f32 {
        self(from, to, t)
    }
}

/// Fade curve type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FadeCurve {
    /// Linear interpolation (lerp)
    Linear,

    /// Smooth step: `3t² - 2t³`, zero slope at both ends
    #[default]
    SmoothStep,

    /// Square root: rises quickly then levels off
    SquareRoot,

    /// Cosine S-curve: slow start, fast middle, slow end
    SCurve,

    /// Equal power: `sin(t·π/2)`
    EqualPower,
}

impl FadeCurve {
    /// Progress along the curve at normalized position `t`
    ///
    /// `t` is clamped to 0.0-1.0. Returns 0.0 at the start and 1.0 at the end
    /// for every curve.
    #[inline]
    pub fn progress(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            FadeCurve::Linear => t,

            FadeCurve::SmoothStep => t * t * (3.0 - 2.0 * t),

            FadeCurve::SquareRoot => t.sqrt(),

            FadeCurve::SCurve => (1.0 - (PI * t).cos()) * 0.5,

            FadeCurve::EqualPower => (t * PI * 0.5).sin(),
        }
    }

    /// Get a human-readable name for the curve
    pub fn display_name(&self) -> &'static str {
        match self {
            FadeCurve::Linear => "Linear",
            FadeCurve::SmoothStep => "Smooth Step",
            FadeCurve::SquareRoot => "Square Root",
            FadeCurve::SCurve => "S-Curve",
            FadeCurve::EqualPower => "Equal Power",
        }
    }
}

impl Interpolator for FadeCurve {
    #[inline]
    fn interpolate(&self, from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * self.progress(t)
    }
}

impl FromStr for FadeCurve {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "linear" | "lerp" => Ok(Self::Linear),
            "smooth-step" | "smoothstep" => Ok(Self::SmoothStep),
            "square-root" | "sqrt" => Ok(Self::SquareRoot),
            "s-curve" | "scurve" | "cosine" => Ok(Self::SCurve),
            "equal-power" => Ok(Self::EqualPower),
            other => Err(format!("unknown fade curve: {}", other)),
        }
    }
}
