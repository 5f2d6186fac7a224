//! Per-track playback session
//!
//! Ephemeral state that lives only while one queue entry is the active
//! track: when it started, whether the next entry was preloaded, and whether
//! the play was scrobbled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the active track is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No play-start seen since the last reset
    NotStarted,
    /// Started, next track not yet preloaded
    Playing,
    /// Next track preloaded, scrobble still pending
    PreloadIssued,
    /// Scrobble sent
    Scrobbled,
    /// Track reached its end
    Ended,
}

/// Transient state for the currently playing track
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackSession {
    start_time: Option<DateTime<Utc>>,
    preloaded: bool,
    scrobbled: bool,
    ended: bool,
}

impl PlaybackSession {
    /// Create a session in the not-started state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a play-start
    ///
    /// Starts a new session only if none is running; resuming after a pause
    /// keeps the original start time and flags. Returns whether a new
    /// session began.
    pub fn begin(&mut self, now: DateTime<Utc>) -> bool {
        if self.start_time.is_some() {
            return false;
        }
        self.start_time = Some(now);
        self.preloaded = false;
        self.scrobbled = false;
        self.ended = false;
        true
    }

    /// Drop all per-track state (track changed before ending)
    pub fn reset(&mut self) {
        self.start_time = None;
        self.preloaded = false;
        self.scrobbled = false;
        self.ended = false;
    }

    /// Drop all per-track state and remember that the track ended
    pub fn finish(&mut self) {
        self.reset();
        self.ended = true;
    }

    /// Mark the next track as preloaded
    pub fn mark_preloaded(&mut self) {
        self.preloaded = true;
    }

    /// Mark the play as scrobbled
    ///
    /// Ignored unless the preload has already happened.
    pub fn mark_scrobbled(&mut self) -> bool {
        if !self.preloaded {
            return false;
        }
        self.scrobbled = true;
        true
    }

    /// When the session started
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Start time as Unix milliseconds
    pub fn start_time_millis(&self) -> Option<i64> {
        self.start_time.map(|t| t.timestamp_millis())
    }

    /// Whether the next track was preloaded
    pub fn is_preloaded(&self) -> bool {
        self.preloaded
    }

    /// Whether the play was scrobbled
    pub fn is_scrobbled(&self) -> bool {
        self.scrobbled
    }

    /// Whether the track reached its end
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        if self.ended {
            SessionState::Ended
        } else if self.scrobbled {
            SessionState::Scrobbled
        } else if self.preloaded {
            SessionState::PreloadIssued
        } else if self.start_time.is_some() {
            SessionState::Playing
        } else {
            SessionState::NotStarted
        }
    }
}
