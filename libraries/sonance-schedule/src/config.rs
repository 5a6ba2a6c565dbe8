//! Scheduler configuration

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Scheduler settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// How far ahead of a clip's start time the next clip is armed, in seconds
    #[serde(default = "default_lookahead_secs")]
    pub lookahead_secs: f64,
}

fn default_lookahead_secs() -> f64 {
    1.0
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            lookahead_secs: default_lookahead_secs(),
        }
    }
}

impl ScheduleConfig {
    /// Create settings with the given lookahead window
    pub fn with_lookahead(lookahead_secs: f64) -> Self {
        Self { lookahead_secs }
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.lookahead_secs.is_finite() || self.lookahead_secs <= 0.0 {
            return Err(ConfigurationError::InvalidLookahead(self.lookahead_secs));
        }
        Ok(())
    }
}
