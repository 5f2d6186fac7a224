//! ReplayGain multiplier computation
//!
//! The multiplier follows the ReplayGain 1.0 playback rule, normalized to
//! the peak so the applied gain never drives the track past full scale:
//!
//! ```text
//! multiplier = min(10^((gain + pre_amp) / 20), 1 / peak)
//! ```
//!
//! The result is not clamped to 1.0. Quiet tracks with headroom are
//! boosted; the `1 / peak` term alone bounds clipping.

use crate::error::{LoudnessError, Result};
use crate::{ReplayGainTags, MAX_PREAMP_DB, MIN_PREAMP_DB, NEUTRAL_GAIN};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which set of ReplayGain tags drives playback volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayGainMode {
    /// No normalization applied
    #[default]
    Off,
    /// Per-track normalization
    Track,
    /// Album-relative normalization
    Album,
}

impl ReplayGainMode {
    /// Whether this mode requires a gain stage at all
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Convert to string for settings persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Track => "track",
            Self::Album => "album",
        }
    }
}

impl FromStr for ReplayGainMode {
    type Err = LoudnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" | "disabled" | "none" => Ok(Self::Off),
            "track" => Ok(Self::Track),
            "album" => Ok(Self::Album),
            other => Err(LoudnessError::UnknownMode(other.to_string())),
        }
    }
}

/// Process-wide ReplayGain settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplayGainConfig {
    /// Gain mode
    #[serde(default)]
    pub mode: ReplayGainMode,

    /// Pre-amp in dB, added to the tag gain before conversion
    #[serde(default)]
    pub pre_amp: f64,
}

impl ReplayGainConfig {
    /// Create a config with the given mode and pre-amp
    pub fn new(mode: ReplayGainMode, pre_amp: f64) -> Self {
        Self { mode, pre_amp }
    }

    /// Check that the pre-amp is usable
    pub fn validate(&self) -> Result<()> {
        if !self.pre_amp.is_finite() {
            return Err(LoudnessError::InvalidPreAmp(self.pre_amp));
        }
        if !(MIN_PREAMP_DB..=MAX_PREAMP_DB).contains(&self.pre_amp) {
            return Err(LoudnessError::PreAmpOutOfRange(self.pre_amp));
        }
        Ok(())
    }

    /// Multiplier for a track under this config
    ///
    /// `Off` always yields the neutral multiplier.
    pub fn multiplier(&self, tags: &ReplayGainTags) -> f64 {
        match select_fields(self.mode, tags) {
            Some((gain, peak)) => compute_gain(self.pre_amp, gain, peak),
            None => NEUTRAL_GAIN,
        }
    }
}

/// Compute the volume multiplier for one gain/peak pair
///
/// Returns exactly `1.0` when either value is missing. A peak that is not
/// strictly positive counts as missing; it would otherwise invert polarity.
pub fn compute_gain(pre_amp: f64, gain: Option<f64>, peak: Option<f64>) -> f64 {
    match (gain, peak) {
        (Some(gain), Some(peak)) if peak > 0.0 => {
            10.0_f64.powf((gain + pre_amp) / 20.0).min(1.0 / peak)
        }
        _ => NEUTRAL_GAIN,
    }
}

/// Pick the `(gain, peak)` pair the mode reads
///
/// Returns `None` for [`ReplayGainMode::Off`], meaning no computation at all.
pub fn select_fields(
    mode: ReplayGainMode,
    tags: &ReplayGainTags,
) -> Option<(Option<f64>, Option<f64>)> {
    match mode {
        ReplayGainMode::Off => None,
        ReplayGainMode::Track => Some((tags.track_gain, tags.track_peak)),
        ReplayGainMode::Album => Some((tags.album_gain, tags.album_peak)),
    }
}
