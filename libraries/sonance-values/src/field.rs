//! Linked decibel/linear field model for volume editors
//!
//! The editor shows a decibel field and a normalized (0-1) field side by side.
//! Editing either one recomputes the other. Only the value the user last typed
//! is stored; the other side is derived on demand.

use crate::volume::{decibel_to_linear, linear_to_decibel, ConversionMode, VolumeSample, DB_FLOOR};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Edited {
    Decibels(f32),
    Linear(f32),
}

/// Pair of linked volume fields
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeField {
    edited: Edited,
    mode: ConversionMode,
}

impl VolumeField {
    /// Create a field pair at 0 dB (unity)
    pub fn new(mode: ConversionMode) -> Self {
        Self {
            edited: Edited::Decibels(0.0),
            mode,
        }
    }

    /// Conversion mode used to derive the other field
    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    /// Switch between exact and approximate conversion
    pub fn set_mode(&mut self, mode: ConversionMode) {
        self.mode = mode;
    }

    /// User edited the decibel field (clamped to -80..=0 dB)
    pub fn set_decibels(&mut self, decibels: f32) {
        let decibels = if decibels.is_nan() {
            DB_FLOOR
        } else {
            decibels.clamp(DB_FLOOR, 0.0)
        };
        self.edited = Edited::Decibels(decibels);
    }

    /// User edited the linear field (clamped to 0..=1)
    pub fn set_linear(&mut self, linear: f32) {
        let linear = if linear.is_nan() {
            0.0
        } else {
            linear.clamp(0.0, 1.0)
        };
        self.edited = Edited::Linear(linear);
    }

    /// Current decibel field value
    pub fn decibels(&self) -> f32 {
        match self.edited {
            Edited::Decibels(db) => db,
            Edited::Linear(linear) => linear_to_decibel(linear, self.mode).clamp(DB_FLOOR, 0.0),
        }
    }

    /// Current linear field value
    pub fn linear(&self) -> f32 {
        match self.edited {
            Edited::Decibels(db) => decibel_to_linear(db, self.mode).clamp(0.0, 1.0),
            Edited::Linear(linear) => linear,
        }
    }

    /// Both fields as a value
    pub fn sample(&self) -> VolumeSample {
        VolumeSample {
            decibels: self.decibels(),
            linear: self.linear(),
        }
    }
}

impl Default for VolumeField {
    /// Editors start in exact mode
    fn default() -> Self {
        Self::new(ConversionMode::Exact)
    }
}
