//! Semitone ↔ pitch ratio conversion
//!
//! A pitch ratio of 2.0 is one octave up, 0.5 one octave down.

/// Semitones in one octave
pub const SEMITONES_PER_OCTAVE: f32 = 12.0;

/// Convert a semitone offset to a playback pitch ratio
///
/// Downward shifts are computed as the reciprocal of the matching upward
/// shift so that `+n` and `-n` are exact inverses of each other.
pub fn semitones_to_pitch_ratio(semitones: f32) -> f32 {
    let up = 2.0_f32.powf(semitones.abs() / SEMITONES_PER_OCTAVE);
    if semitones >= 0.0 {
        up
    } else {
        1.0 / up
    }
}

/// Convert a playback pitch ratio to a semitone offset
///
/// Ratios below 1 are converted through their reciprocal and negated.
/// A non-positive ratio has no finite pitch and returns `f32::NEG_INFINITY`.
pub fn pitch_ratio_to_semitones(ratio: f32) -> f32 {
    if ratio.is_nan() || ratio <= 0.0 {
        return f32::NEG_INFINITY;
    }

    if ratio < 1.0 {
        -(SEMITONES_PER_OCTAVE * (1.0 / ratio).log2())
    } else {
        SEMITONES_PER_OCTAVE * ratio.log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octaves() {
        assert!((semitones_to_pitch_ratio(12.0) - 2.0).abs() < 1e-6);
        assert!((semitones_to_pitch_ratio(-12.0) - 0.5).abs() < 1e-6);
        assert!((semitones_to_pitch_ratio(0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn single_semitone() {
        // 2^(1/12)
        assert!((semitones_to_pitch_ratio(1.0) - 1.059_463).abs() < 1e-5);
    }

    #[test]
    fn round_trip_reference_points() {
        for s in [-24.0, -1.0, 0.0, 1.0, 24.0] {
            let back = pitch_ratio_to_semitones(semitones_to_pitch_ratio(s));
            assert!((back - s).abs() < 1e-4, "{} came back as {}", s, back);
        }
    }

    #[test]
    fn symmetric_around_unity() {
        let up = pitch_ratio_to_semitones(1.5);
        let down = pitch_ratio_to_semitones(1.0 / 1.5);
        assert!((up + down).abs() < 1e-4);
    }

    #[test]
    fn non_positive_ratio() {
        assert_eq!(pitch_ratio_to_semitones(0.0), f32::NEG_INFINITY);
        assert_eq!(pitch_ratio_to_semitones(-2.0), f32::NEG_INFINITY);
        assert_eq!(pitch_ratio_to_semitones(f32::NAN), f32::NEG_INFINITY);
    }
}
