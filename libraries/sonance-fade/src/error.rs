//! Error types for fade control

use thiserror::Error;

/// Fade errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FadeError {
    /// The channel's owner cannot run scheduled work right now
    #[error("Channel '{channel}' is inactive and cannot run a fade")]
    InactiveTarget {
        /// Channel identifier
        channel: String,
    },

    /// Fade duration is negative, infinite or NaN
    #[error("Invalid fade duration: {0} seconds")]
    InvalidDuration(f32),
}

/// Result type for fade operations
pub type Result<T> = std::result::Result<T, FadeError>;
