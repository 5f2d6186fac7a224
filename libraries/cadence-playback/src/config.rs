//! Controller configuration
//!
//! Loaded from an optional `cadence.toml` and overridden by `CADENCE_*`
//! environment variables, nested keys separated by `__`
//! (`CADENCE_REPLAY_GAIN__MODE=album`).

use crate::error::{PlaybackError, Result};
use cadence_loudness::ReplayGainConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// ReplayGain mode and pre-amp
    #[serde(default)]
    pub replay_gain: ReplayGainConfig,

    /// Host-level switch for the gain tap (default: true)
    #[serde(default = "default_true")]
    pub replay_gain_enabled: bool,

    /// Stored (square-root compensated) volume, 0.0-1.0 (default: 1.0)
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Show a system notification when a track starts (default: false)
    #[serde(default)]
    pub notifications: bool,

    /// Analytics tracking identifier; analytics are off when absent
    #[serde(default)]
    pub analytics_tracking_id: Option<String>,

    /// Generic title shown when nothing is playing (default: "Cadence")
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Always apply full raw volume (hosts where the OS owns volume)
    #[serde(default)]
    pub fixed_output_volume: bool,
}

impl ControllerConfig {
    /// Load from `cadence.toml` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load from the given file (if present) and the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading controller configuration");

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("CADENCE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(PlaybackError::InvalidVolume(self.volume));
        }

        self.replay_gain.validate()?;

        if self.analytics_tracking_id.as_deref() == Some("") {
            return Err(PlaybackError::Config(
                "analytics_tracking_id must not be empty (omit it to disable analytics)"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            replay_gain: ReplayGainConfig::default(),
            replay_gain_enabled: true,
            volume: default_volume(),
            notifications: false,
            analytics_tracking_id: None,
            app_title: default_app_title(),
            fixed_output_volume: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_volume() -> f64 {
    1.0
}

fn default_app_title() -> String {
    "Cadence".to_string()
}
