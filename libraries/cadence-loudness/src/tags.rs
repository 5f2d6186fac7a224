//! ReplayGain tag values carried by a track

use serde::{Deserialize, Serialize};

/// ReplayGain tag values attached to a track
///
/// Any field may be absent; a missing gain or peak yields the neutral
/// multiplier rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayGainTags {
    /// Track gain in dB
    #[serde(default, rename = "rgTrackGain")]
    pub track_gain: Option<f64>,
    /// Track peak (linear, 0.0-1.0+)
    #[serde(default, rename = "rgTrackPeak")]
    pub track_peak: Option<f64>,
    /// Album gain in dB
    #[serde(default, rename = "rgAlbumGain")]
    pub album_gain: Option<f64>,
    /// Album peak (linear, 0.0-1.0+)
    #[serde(default, rename = "rgAlbumPeak")]
    pub album_peak: Option<f64>,
}
