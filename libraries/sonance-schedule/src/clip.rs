//! Clips and playlists
//!
//! A playlist is an ordered, read-only list of clips. It is cheap to clone
//! so the owner and the scheduler can share one copy.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use sonance_values::clip_length_secs;
use std::sync::Arc;

/// A decoded clip, described by its length in samples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip identifier
    pub id: String,

    /// Length in sample frames
    pub samples: u64,

    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Clip {
    /// Create a clip
    pub fn new(id: impl Into<String>, samples: u64, sample_rate: u32) -> Self {
        Self {
            id: id.into(),
            samples,
            sample_rate,
        }
    }

    /// Create a clip lasting `seconds` at `sample_rate`, rounded to whole samples
    pub fn with_duration(id: impl Into<String>, seconds: f64, sample_rate: u32) -> Self {
        let samples = (seconds.max(0.0) * f64::from(sample_rate)).round() as u64;
        Self::new(id, samples, sample_rate)
    }

    /// Exact duration in seconds (`samples / sample_rate`)
    pub fn duration_secs(&self) -> f64 {
        clip_length_secs(self.samples, self.sample_rate)
    }

    /// Check that the clip can be scheduled
    pub fn validate(&self) -> std::result::Result<f64, ConfigurationError> {
        if self.sample_rate == 0 {
            return Err(ConfigurationError::InvalidSampleRate {
                clip: self.id.clone(),
            });
        }

        let duration = self.duration_secs();
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ConfigurationError::InvalidClipDuration {
                clip: self.id.clone(),
                duration,
            });
        }

        Ok(duration)
    }
}

/// Ordered, read-only sequence of clips
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Playlist {
    clips: Arc<[Clip]>,
}

impl Playlist {
    /// Create a playlist
    pub fn new(clips: Vec<Clip>) -> Self {
        Self {
            clips: clips.into(),
        }
    }

    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if the playlist is empty
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Get a clip by position
    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    /// Iterate over clips in order
    pub fn iter(&self) -> impl Iterator<Item = &Clip> {
        self.clips.iter()
    }

    /// Total length of one pass through the playlist, in seconds
    pub fn total_duration_secs(&self) -> f64 {
        self.clips.iter().map(Clip::duration_secs).sum()
    }

    /// Check every clip; returns the first problem found
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        for clip in self.clips.iter() {
            clip.validate()?;
        }
        Ok(())
    }
}

impl From<Vec<Clip>> for Playlist {
    fn from(clips: Vec<Clip>) -> Self {
        Self::new(clips)
    }
}
