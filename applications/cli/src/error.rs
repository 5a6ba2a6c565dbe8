/// CLI error types
use sonance_fade::FadeError;
use sonance_schedule::{ConfigurationError, ScheduleError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scheduling error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Fade error: {0}")]
    Fade(#[from] FadeError),
}

impl From<ConfigurationError> for CliError {
    fn from(err: ConfigurationError) -> Self {
        CliError::Schedule(err.into())
    }
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
