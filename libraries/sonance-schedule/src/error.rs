//! Error types for clip scheduling

use thiserror::Error;

/// Invalid playlist or scheduler settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Clip length is zero, negative or not finite
    #[error("Clip '{clip}' has invalid duration {duration} s")]
    InvalidClipDuration {
        /// Clip identifier
        clip: String,
        /// Computed duration in seconds
        duration: f64,
    },

    /// Clip declares a sample rate of zero
    #[error("Clip '{clip}' has a sample rate of 0 Hz")]
    InvalidSampleRate {
        /// Clip identifier
        clip: String,
    },

    /// Clock reading or requested start time is not finite
    #[error("Invalid schedule time: {0} s (must be finite)")]
    InvalidStartTime(f64),

    /// Lookahead window is zero, negative or not finite
    #[error("Invalid lookahead window: {0} s (must be positive)")]
    InvalidLookahead(f64),
}

/// Scheduling errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// Fatal configuration problem; the schedule was not advanced
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Result type for scheduling operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
