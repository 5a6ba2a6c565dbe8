//! Sample-accurate clip lengths

/// Exact length of a clip in seconds, for scheduling back-to-back playback
///
/// Computed in `f64` from the sample count so that consecutive start times
/// do not accumulate rounding drift. Returns `0.0` for a zero sample rate;
/// schedulers reject non-positive lengths.
pub fn clip_length_secs(samples: u64, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    samples as f64 / f64::from(sample_rate)
}
