//! Error types for ReplayGain handling

use thiserror::Error;

/// Result type for loudness operations
pub type Result<T> = std::result::Result<T, LoudnessError>;

/// Errors that can occur while configuring or constructing the gain path
#[derive(Error, Debug)]
pub enum LoudnessError {
    /// Pre-amp is NaN or infinite
    #[error("Invalid pre-amp: {0} dB (must be a finite number)")]
    InvalidPreAmp(f64),

    /// Pre-amp outside the supported range
    #[error("Pre-amp out of range: {0} dB (must be between -15 and +15)")]
    PreAmpOutOfRange(f64),

    /// Unknown gain mode string
    #[error("Unknown ReplayGain mode: {0}")]
    UnknownMode(String),

    /// The host audio graph refused to build the gain tap
    #[error("Gain tap construction failed: {0}")]
    TapConstruction(String),
}
