/// Simulation session configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use sonance_fade::{FadeCurve, FadeSettings};
use sonance_schedule::{Clip, Playlist, ScheduleConfig};
use std::path::Path;

/// Prefix for environment overrides (`SONANCE_DRIVER__SEED=7`)
pub const ENV_PREFIX: &str = "SONANCE";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub playlist: Vec<Clip>,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default = "default_driver")]
    pub driver: DriverSettings,

    #[serde(default)]
    pub fade: FadeSettings,

    #[serde(default = "default_channel")]
    pub channel: ChannelSettings,

    #[serde(default)]
    pub events: Vec<FadeEvent>,
}

/// How the simulated frame loop advances the audio clock
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverSettings {
    #[serde(default = "default_frame_secs")]
    pub frame_secs: f64,

    /// Each frame is longer or shorter by up to this much
    #[serde(default)]
    pub jitter_secs: f64,

    #[serde(default = "default_run_secs")]
    pub run_secs: f64,

    #[serde(default)]
    pub seed: u64,
}

/// The virtual channel the fade events act on
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChannelSettings {
    #[serde(default = "default_channel_id")]
    pub id: String,

    #[serde(default = "default_channel_volume")]
    pub volume: f32,

    #[serde(default)]
    pub playing: bool,
}

/// A fade command issued at a point in simulated time
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FadeEvent {
    pub at_secs: f64,

    pub action: FadeAction,

    /// Fade time; defaults to `fade.fade_secs`
    #[serde(default)]
    pub secs: Option<f32>,

    /// Target volume for `fade`
    #[serde(default)]
    pub to: Option<f32>,

    /// Curve for `fade`; defaults to `fade.curve`
    #[serde(default)]
    pub curve: Option<FadeCurve>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FadeAction {
    Play,
    Stop,
    FadeIn,
    FadeOut,
    Fade,
    Cancel,
    /// Make the channel ineligible (as if its owner was deactivated)
    Disable,
    Enable,
}

impl FadeAction {
    pub fn name(&self) -> &'static str {
        match self {
            FadeAction::Play => "play",
            FadeAction::Stop => "stop",
            FadeAction::FadeIn => "fade-in",
            FadeAction::FadeOut => "fade-out",
            FadeAction::Fade => "fade",
            FadeAction::Cancel => "cancel",
            FadeAction::Disable => "disable",
            FadeAction::Enable => "enable",
        }
    }
}

impl SessionConfig {
    /// Load a session from an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Load a session, reading overrides from `env` instead of the process
    /// environment when given
    pub fn load_from(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Session file not found: {:?}",
                    path
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        // Override with environment variables (SONANCE_<SECTION>__<KEY>)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Playlist to schedule
    pub fn playlist(&self) -> Playlist {
        Playlist::new(self.playlist.clone())
    }

    /// Validate the session before the driver starts
    pub fn validate(&self) -> Result<()> {
        self.schedule.validate()?;
        self.playlist().validate()?;

        let driver = &self.driver;
        if !driver.frame_secs.is_finite() || driver.frame_secs <= 0.0 {
            return Err(CliError::Config(format!(
                "driver.frame_secs must be positive (got {})",
                driver.frame_secs
            )));
        }
        let jitter = driver.jitter_secs;
        if jitter.is_nan() || jitter < 0.0 || jitter >= driver.frame_secs {
            return Err(CliError::Config(format!(
                "driver.jitter_secs must be in [0, frame_secs) (got {})",
                driver.jitter_secs
            )));
        }
        if !driver.run_secs.is_finite() || driver.run_secs <= 0.0 {
            return Err(CliError::Config(format!(
                "driver.run_secs must be positive (got {})",
                driver.run_secs
            )));
        }

        if self.fade.fade_secs.is_nan() || self.fade.fade_secs < 0.0 {
            return Err(CliError::Config(format!(
                "fade.fade_secs must not be negative (got {})",
                self.fade.fade_secs
            )));
        }
        if !(0.0..=1.0).contains(&self.channel.volume) {
            return Err(CliError::Config(format!(
                "channel.volume must be in [0, 1] (got {})",
                self.channel.volume
            )));
        }

        for (index, event) in self.events.iter().enumerate() {
            validate_event(index, event)?;
        }

        Ok(())
    }
}

fn validate_event(index: usize, event: &FadeEvent) -> Result<()> {
    if !event.at_secs.is_finite() || event.at_secs < 0.0 {
        return Err(CliError::Config(format!(
            "events[{}]: at_secs must not be negative (got {})",
            index, event.at_secs
        )));
    }

    if let Some(secs) = event.secs {
        let clamped = matches!(event.action, FadeAction::Play | FadeAction::Stop);
        if secs.is_nan() || (!clamped && secs < 0.0) {
            return Err(CliError::Config(format!(
                "events[{}]: invalid fade time {} for {}",
                index,
                secs,
                event.action.name()
            )));
        }
    }

    if event.action == FadeAction::Fade {
        match event.to {
            Some(to) if (0.0..=1.0).contains(&to) => {}
            Some(to) => {
                return Err(CliError::Config(format!(
                    "events[{}]: fade target must be in [0, 1] (got {})",
                    index, to
                )));
            }
            None => {
                return Err(CliError::Config(format!(
                    "events[{}]: fade requires a target volume (`to`)",
                    index
                )));
            }
        }
    }

    Ok(())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            playlist: Vec::new(),
            schedule: ScheduleConfig::default(),
            driver: default_driver(),
            fade: FadeSettings::default(),
            channel: default_channel(),
            events: Vec::new(),
        }
    }
}

// Default values
fn default_driver() -> DriverSettings {
    DriverSettings {
        frame_secs: default_frame_secs(),
        jitter_secs: 0.0,
        run_secs: default_run_secs(),
        seed: 0,
    }
}

fn default_frame_secs() -> f64 {
    1.0 / 60.0
}

fn default_run_secs() -> f64 {
    10.0
}

fn default_channel() -> ChannelSettings {
    ChannelSettings {
        id: default_channel_id(),
        volume: default_channel_volume(),
        playing: false,
    }
}

fn default_channel_id() -> String {
    "music".to_string()
}

fn default_channel_volume() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(action: FadeAction) -> FadeEvent {
        FadeEvent {
            at_secs: 1.0,
            action,
            secs: None,
            to: None,
            curve: None,
        }
    }

    #[test]
    fn test_default_session_is_valid() {
        let session = SessionConfig::default();
        assert!(session.validate().is_ok());
        assert_eq!(session.channel.id, "music");
        assert_eq!(session.schedule.lookahead_secs, 1.0);
    }

    #[test]
    fn test_rejects_bad_clip() {
        let mut session = SessionConfig::default();
        session.playlist.push(Clip::new("empty", 0, 44_100));

        let err = session.validate().unwrap_err();
        assert!(matches!(err, CliError::Schedule(_)));
        assert!(err.to_string().contains("'empty'"));
    }

    #[test]
    fn test_rejects_jitter_larger_than_frame() {
        let mut session = SessionConfig::default();
        session.driver.jitter_secs = 0.5;
        assert!(session.validate().is_err());
    }

    #[test]
    fn test_fade_event_needs_target() {
        let mut session = SessionConfig::default();
        session.events.push(event(FadeAction::Fade));
        assert!(session.validate().is_err());

        session.events[0].to = Some(0.25);
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_negative_fade_time_only_allowed_for_play_and_stop() {
        let mut session = SessionConfig::default();
        let mut stop = event(FadeAction::Stop);
        stop.secs = Some(-1.0);
        session.events.push(stop);
        assert!(session.validate().is_ok());

        let mut fade_out = event(FadeAction::FadeOut);
        fade_out.secs = Some(-1.0);
        session.events.push(fade_out);
        assert!(session.validate().is_err());
    }
}
