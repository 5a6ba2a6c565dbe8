/// Volume and pitch conversions for the `convert` command
use serde::Serialize;
use sonance_values::{
    pitch_ratio_to_semitones, semitones_to_pitch_ratio, ConversionMode, VolumeField,
};
use std::fmt;

/// Value typed into one of the editor fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvertInput {
    Decibels(f32),
    Linear(f32),
    Semitones(f32),
    Ratio(f32),
}

/// Both sides of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Conversion {
    Volume {
        decibels: f32,
        linear: f32,
        approximate: bool,
    },
    Pitch {
        semitones: f32,
        ratio: f32,
    },
}

/// Convert a single field value
///
/// Volume inputs go through the editor's linked fields, so decibels are
/// clamped to -80..=0 and linear values to 0..=1.
pub fn convert(input: ConvertInput, mode: ConversionMode) -> Conversion {
    match input {
        ConvertInput::Decibels(db) => {
            let mut field = VolumeField::new(mode);
            field.set_decibels(db);
            volume(&field)
        }
        ConvertInput::Linear(linear) => {
            let mut field = VolumeField::new(mode);
            field.set_linear(linear);
            volume(&field)
        }
        ConvertInput::Semitones(semitones) => Conversion::Pitch {
            semitones,
            ratio: semitones_to_pitch_ratio(semitones),
        },
        ConvertInput::Ratio(ratio) => Conversion::Pitch {
            semitones: pitch_ratio_to_semitones(ratio),
            ratio,
        },
    }
}

fn volume(field: &VolumeField) -> Conversion {
    let sample = field.sample();
    Conversion::Volume {
        decibels: sample.decibels,
        linear: sample.linear,
        approximate: field.mode().is_approximate(),
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Volume {
                decibels,
                linear,
                approximate,
            } => {
                let mode = if *approximate { "approximate" } else { "exact" };
                write!(f, "{:.2} dB = {:.4} linear ({})", decibels, linear, mode)
            }
            Conversion::Pitch { semitones, ratio } => {
                write!(f, "{:+.2} st = {:.4}x", semitones, ratio)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decibels_to_linear() {
        let result = convert(ConvertInput::Decibels(-6.0), ConversionMode::Exact);
        let Conversion::Volume { linear, .. } = result else {
            panic!("expected a volume conversion");
        };
        assert!((linear - 0.501).abs() < 0.001);
    }

    #[test]
    fn test_linear_is_clamped_like_the_editor() {
        let result = convert(ConvertInput::Linear(3.0), ConversionMode::Exact);
        assert_eq!(
            result,
            Conversion::Volume {
                decibels: 0.0,
                linear: 1.0,
                approximate: false
            }
        );
    }

    #[test]
    fn test_approximate_silence_below_cutoff() {
        let result = convert(ConvertInput::Decibels(-70.0), ConversionMode::Approximate);
        let Conversion::Volume { linear, .. } = result else {
            panic!("expected a volume conversion");
        };
        assert_eq!(linear, 0.0);
    }

    #[test]
    fn test_pitch_both_ways() {
        let up = convert(ConvertInput::Semitones(12.0), ConversionMode::Exact);
        assert_eq!(up.to_string(), "+12.00 st = 2.0000x");

        let down = convert(ConvertInput::Ratio(0.5), ConversionMode::Exact);
        let Conversion::Pitch { semitones, .. } = down else {
            panic!("expected a pitch conversion");
        };
        assert!((semitones + 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_display_volume() {
        let result = convert(ConvertInput::Decibels(0.0), ConversionMode::Exact);
        assert_eq!(result.to_string(), "0.00 dB = 1.0000 linear (exact)");
    }
}
