//! Cadence - Playback Control
//!
//! Platform-agnostic decision logic around playing a queue of tracks.
//!
//! This crate provides:
//! - Queue management with per-entry instance ids
//! - Per-track session state (start time, preload and scrobble flags)
//! - Progress-driven preload and scrobble decisions
//! - ReplayGain multipliers applied through a lazily built gain tap
//! - Volume fader compensation
//! - Play-start notifications and analytics
//!
//! # Architecture
//!
//! `cadence-playback` knows nothing about any concrete player:
//! - The playback engine reports lifecycle events through [`PlayerEvents`]
//! - The controller answers with [`PresentationCommand`]s for the UI
//! - Network services, notifications and analytics sit behind the traits
//!   in [`collaborators`]
//!
//! # Example
//!
//! ```rust
//! use cadence_playback::{
//!     AudioInfo, Collaborators, ControllerConfig, PlaybackController, PlayerEvents, Track,
//! };
//!
//! let mut controller =
//!     PlaybackController::new(ControllerConfig::default(), Collaborators::disconnected())?;
//!
//! let mut first = Track::new("t1", "First", "https://music.example.com/stream/t1");
//! first.duration = Some(400.0);
//! let second = Track::new("t2", "Second", "https://music.example.com/stream/t2");
//! controller.load_queue(vec![first.clone(), second], 0, true);
//!
//! controller.on_play(&AudioInfo::for_track(&first, 0.0));
//! controller.on_progress(&AudioInfo::for_track(&first, 200.0)); // preloads "Second"
//! controller.on_progress(&AudioInfo::for_track(&first, 210.0)); // scrobbles "First"
//!
//! assert!(controller.session().is_scrobbled());
//! # Ok::<(), cadence_playback::PlaybackError>(())
//! ```

pub mod collaborators;
mod config;
mod controller;
mod dispatch;
mod error;
mod events;
mod progress;
mod queue;
mod session;
pub mod types;
mod volume;

// Public exports
pub use collaborators::{
    Analytics, AnalyticsEvent, Clock, Collaborators, Disconnected, KeepAlive, Notification,
    NotificationPermission, Notifier, Scrobbler, StreamPrimer, SystemClock,
};
pub use config::{ControllerConfig, DEFAULT_CONFIG_FILE};
pub use controller::PlaybackController;
pub use dispatch::{play_event, play_notification, send_notification, Announcement, Dispatcher};
pub use error::{PlaybackError, Result};
pub use events::{PlayerEvents, PresentationCommand};
pub use progress::{ProgressDecision, ProgressMonitor, QUALIFY_PERCENT, QUALIFY_SECONDS};
pub use queue::Queue;
pub use session::{PlaybackSession, SessionState};
pub use types::{AudioInfo, PlaybackInfo, PlayerMode, QueueSnapshot, Track};
pub use volume::Volume;

pub use cadence_loudness::{ReplayGainConfig, ReplayGainMode, ReplayGainTags};
