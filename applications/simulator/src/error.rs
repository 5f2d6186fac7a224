//! Simulator errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Failed to read queue file {path}: {source}")]
    QueueRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid queue file {path}: {source}")]
    QueueParse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Invalid simulation options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Playback(#[from] cadence_playback::PlaybackError),
}

pub type Result<T> = std::result::Result<T, SimError>;
