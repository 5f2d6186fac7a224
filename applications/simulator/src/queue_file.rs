//! Queue files: a JSON array of tracks

use crate::error::{Result, SimError};
use cadence_playback::Track;
use std::path::Path;
use tracing::info;

/// Read a queue file
///
/// Entries without an `instance_id` get a fresh one, so the same track may
/// be listed twice.
pub fn load_tracks(path: &Path) -> Result<Vec<Track>> {
    let path_display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| SimError::QueueRead {
        path: path_display.clone(),
        source,
    })?;

    let tracks = parse_tracks(&raw).map_err(|source| SimError::QueueParse {
        path: path_display.clone(),
        source,
    })?;

    info!(path = %path_display, tracks = tracks.len(), "Queue file loaded");
    Ok(tracks)
}

/// Parse a queue from JSON text
pub fn parse_tracks(raw: &str) -> serde_json::Result<Vec<Track>> {
    serde_json::from_str(raw)
}
