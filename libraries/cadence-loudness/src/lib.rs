//! ReplayGain support for Cadence
//!
//! This crate provides:
//! - The volume multiplier for a track from its ReplayGain tags
//! - Track/album field selection driven by the user's gain mode
//! - A lazily-constructed gain tap that applies the multiplier to the
//!   host's audio path, when the host has one
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ ReplayGainTags   │ ──► │ ReplayGainConfig │ ──► │  multiplier  │
//! └──────────────────┘     └──────────────────┘     └──────┬───────┘
//!                                                          │
//! During Playback:                                         ▼
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────────┐
//! │ Audio Source│ ──► │  Gain Node   │ ──► │ Output Destination   │
//! └─────────────┘     └──────────────┘     └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use cadence_loudness::{ReplayGainConfig, ReplayGainMode, ReplayGainTags};
//!
//! let config = ReplayGainConfig::new(ReplayGainMode::Track, 0.0);
//! let tags = ReplayGainTags {
//!     track_gain: Some(-6.0),
//!     track_peak: Some(0.5),
//!     ..Default::default()
//! };
//!
//! let multiplier = config.multiplier(&tags);
//! assert!((multiplier - 0.5012).abs() < 1e-4);
//! ```

#![deny(unsafe_code)]

mod error;
mod replaygain;
mod tags;
mod tap;

pub use error::{LoudnessError, Result};
pub use replaygain::{compute_gain, select_fields, ReplayGainConfig, ReplayGainMode};
pub use tags::ReplayGainTags;
pub use tap::{AudioGraph, BufferGraph, GainNode, GainTap, SampleGain};

/// Multiplier used whenever no gain can be computed
pub const NEUTRAL_GAIN: f64 = 1.0;

/// Maximum pre-amp gain in dB
pub const MAX_PREAMP_DB: f64 = 15.0;

/// Minimum pre-amp gain in dB
pub const MIN_PREAMP_DB: f64 = -15.0;
