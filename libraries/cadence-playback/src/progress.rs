//! Progress-driven preload and scrobble decisions
//!
//! A track qualifies once half of it has played or four minutes have
//! elapsed, whichever comes first. The first qualifying tick preloads the
//! next queue entry; a later qualifying tick scrobbles. Each fires at most
//! once per session.

use crate::session::{PlaybackSession, SessionState};

/// Percentage of the track after which it qualifies
pub const QUALIFY_PERCENT: f64 = 50.0;

/// Elapsed seconds after which a track qualifies regardless of length
pub const QUALIFY_SECONDS: f64 = 240.0;

/// Outcome of evaluating one progress tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressDecision {
    /// Duration is unbounded or unknown (live stream); tick ignored
    UnknownDuration,
    /// Track ended; stale tick ignored
    SessionEnded,
    /// Not far enough into the track yet
    BelowThreshold,
    /// Preload the next entry now
    Preload,
    /// Scrobble the play now
    Scrobble,
    /// Both already done for this session
    Done,
}

/// Decides when progress ticks trigger preload and scrobble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressMonitor {
    qualify_percent: f64,
    qualify_seconds: f64,
}

impl ProgressMonitor {
    /// Monitor with the standard thresholds
    pub fn new() -> Self {
        Self {
            qualify_percent: QUALIFY_PERCENT,
            qualify_seconds: QUALIFY_SECONDS,
        }
    }

    /// Whether the position is far enough into the track
    pub fn qualifies(&self, current_time: f64, duration: f64) -> bool {
        let progress = current_time / duration * 100.0;
        !(progress < self.qualify_percent && current_time < self.qualify_seconds)
    }

    /// Evaluate one tick against the session flags
    ///
    /// Pure: the caller performs the action and updates the session.
    pub fn evaluate(
        &self,
        session: &PlaybackSession,
        current_time: f64,
        duration: f64,
    ) -> ProgressDecision {
        if !duration.is_finite() || duration <= 0.0 {
            return ProgressDecision::UnknownDuration;
        }
        if session.state() == SessionState::Ended {
            return ProgressDecision::SessionEnded;
        }
        if !self.qualifies(current_time, duration) {
            return ProgressDecision::BelowThreshold;
        }
        if !session.is_preloaded() {
            return ProgressDecision::Preload;
        }
        if !session.is_scrobbled() {
            return ProgressDecision::Scrobble;
        }
        ProgressDecision::Done
    }
}

impl Default for ProgressMonitor {
    fn default() -> Self {
        Self::new()
    }
}
