//! Core types for playback control

use cadence_loudness::ReplayGainTags;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Track information for queue management
///
/// Immutable once enqueued. The same library track may appear several
/// times in one queue; each appearance gets its own `instance_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Durable track identifier from the server
    pub id: String,

    /// Identifier unique to this queue entry
    #[serde(default = "new_instance_id")]
    pub instance_id: String,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: String,

    /// Album identifier (used for cover navigation)
    #[serde(default)]
    pub album_id: Option<String>,

    /// Location of the audio stream
    pub stream_url: String,

    /// Cover art location
    #[serde(default)]
    pub cover_url: Option<String>,

    /// Duration in seconds; `None` for live streams
    #[serde(default)]
    pub duration: Option<f64>,

    /// ReplayGain tags
    #[serde(default, flatten)]
    pub replay_gain: ReplayGainTags,
}

fn new_instance_id() -> String {
    Uuid::new_v4().to_string()
}

impl Track {
    /// Create a track with minimal metadata and a fresh instance id
    pub fn new(id: impl Into<String>, title: impl Into<String>, stream_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            instance_id: new_instance_id(),
            title: title.into(),
            artist: String::new(),
            album: String::new(),
            album_id: None,
            stream_url: stream_url.into(),
            cover_url: None,
            duration: None,
            replay_gain: ReplayGainTags::default(),
        }
    }

    /// Copy of this track as a new queue entry
    pub fn reinstanced(&self) -> Self {
        Self {
            instance_id: new_instance_id(),
            ..self.clone()
        }
    }
}

/// Snapshot of what the playback engine reports with each lifecycle event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Track being played, if the engine knows it
    pub track: Option<Track>,

    /// Playback position in seconds
    pub current_time: f64,

    /// Track duration in seconds; NaN or infinite for live streams
    pub duration: f64,

    /// Whether the engine reports the track as finished
    #[serde(default)]
    pub ended: bool,

    /// Whether the engine is paused
    #[serde(default)]
    pub paused: bool,

    /// Cover art the engine is showing
    #[serde(default)]
    pub cover_url: Option<String>,
}

impl AudioInfo {
    /// Info for a track at the given position
    pub fn for_track(track: &Track, current_time: f64) -> Self {
        Self {
            duration: track.duration.unwrap_or(f64::NAN),
            cover_url: track.cover_url.clone(),
            track: Some(track.clone()),
            current_time,
            ended: false,
            paused: false,
        }
    }

    /// Durable id of the reported track
    pub fn track_id(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.id.as_str())
    }

    /// Queue-instance id of the reported track
    pub fn instance_id(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.instance_id.as_str())
    }

    /// Whether this is a genuine track rather than a metadata-less stream
    pub fn has_known_duration(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }
}

/// Externally visible playback state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackInfo {
    /// Durable id of the current track
    pub track_id: Option<String>,

    /// Metadata of the current track
    pub track: Option<Track>,

    /// Playback position in seconds
    pub current_time: f64,

    /// Track duration in seconds
    pub duration: f64,

    /// Whether the current track has finished
    pub ended: bool,

    /// Whether playback is paused
    pub paused: bool,
}

impl PlaybackInfo {
    pub(crate) fn update_from(&mut self, info: &AudioInfo) {
        self.track_id = info.track_id().map(str::to_string);
        self.track.clone_from(&info.track);
        self.current_time = info.current_time;
        self.duration = info.duration;
        self.ended = info.ended;
        self.paused = info.paused;
    }
}

/// Snapshot of the playback queue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Tracks in play order
    pub tracks: Vec<Track>,

    /// Index of the current entry
    pub play_index: usize,

    /// Instance id of the current entry
    pub current: Option<String>,

    /// Whether the queue was just reset by a load
    pub clear: bool,
}

/// How the player widget was showing the cover when it was clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerMode {
    /// Full player
    Full,
    /// Collapsed mini player
    Mini,
}
