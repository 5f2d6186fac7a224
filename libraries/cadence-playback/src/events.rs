//! Player event sink and presentation commands
//!
//! Whatever engine actually plays audio reports its lifecycle through
//! [`PlayerEvents`]. The controller answers each event with the
//! [`PresentationCommand`]s the presentation layer should apply, instead of
//! reaching into global UI state itself.

use crate::types::{AudioInfo, PlayerMode, Track};
use serde::{Deserialize, Serialize};

/// Commands for the presentation collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationCommand {
    /// Show this window/document title
    SetTitle(String),

    /// Restore the generic application title
    ResetTitle(String),

    /// Navigate to the album page
    NavigateToAlbum {
        /// Album to show
        album_id: String,
    },
}

/// Lifecycle events delivered by the playback engine
///
/// Events arrive serially from the host's event loop. Every handler returns
/// the commands the presentation layer should apply, possibly none.
pub trait PlayerEvents {
    /// Playback started or resumed
    fn on_play(&mut self, info: &AudioInfo) -> Vec<PresentationCommand>;

    /// Playback paused
    fn on_pause(&mut self, info: &AudioInfo) -> Vec<PresentationCommand>;

    /// Periodic position update
    fn on_progress(&mut self, info: &AudioInfo) -> Vec<PresentationCommand>;

    /// Another track is about to play (before the current one ended)
    fn on_track_change(&mut self) -> Vec<PresentationCommand>;

    /// Current track finished
    fn on_ended(&mut self, info: &AudioInfo) -> Vec<PresentationCommand>;

    /// The user moved the volume fader
    fn on_volume_change(&mut self, fader: f64) -> Vec<PresentationCommand>;

    /// The engine changed the queue itself (drag-reorder, removal)
    fn on_queue_change(&mut self, new_order: Vec<Track>) -> Vec<PresentationCommand>;

    /// The cover image was clicked
    fn on_cover_click(&mut self, mode: PlayerMode, info: &AudioInfo) -> Vec<PresentationCommand>;
}
