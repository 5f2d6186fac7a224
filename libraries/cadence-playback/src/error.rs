//! Error types for playback control

use thiserror::Error;

/// Playback control errors
///
/// Event handlers never fail; these cover configuration and host-side
/// setup only.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Volume outside 0.0-1.0
    #[error("Invalid volume: {0} (must be between 0.0 and 1.0)")]
    InvalidVolume(f64),

    /// ReplayGain settings rejected
    #[error("ReplayGain error: {0}")]
    ReplayGain(#[from] cadence_loudness::LoudnessError),
}

impl From<config::ConfigError> for PlaybackError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
