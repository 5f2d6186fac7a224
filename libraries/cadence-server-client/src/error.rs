//! Error types for the Cadence server client.

use thiserror::Error;

/// Errors that can occur when talking to a music server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Subsonic API answered with `status: failed`
    #[error("Subsonic error {code}: {message}")]
    Subsonic { code: i32, message: String },

    /// Credentials rejected or missing
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid server or stream URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;
