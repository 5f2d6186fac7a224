//! Cadence Server Client
//!
//! HTTP implementations of the playback controller's network
//! collaborators, against a Subsonic-compatible server.
//!
//! # Features
//!
//! - **Scrobble / now-playing**: Subsonic `scrobble` endpoint
//! - **Keep-alive**: native `api/keepalive/{id}` endpoint
//! - **Stream priming**: GET on the next track's stream, body discarded
//!
//! # Example
//!
//! ```ignore
//! use cadence_playback::Collaborators;
//! use cadence_server_client::{CadenceServerClient, ServerCollaborators, ServerConfig};
//! use std::sync::Arc;
//!
//! let config = ServerConfig::new("https://music.example.com", "alice")
//!     .with_token("26719a1196d2a940705a59634eb18eab", "c19b2d");
//! let server = Arc::new(ServerCollaborators::on_current_runtime(
//!     CadenceServerClient::new(config)?,
//! ));
//!
//! let collaborators = Collaborators::disconnected()
//!     .with_scrobbler(server.clone())
//!     .with_keep_alive(server.clone())
//!     .with_primer(server);
//! ```

mod client;
mod collaborators;
mod error;
mod types;

// Re-export main types
pub use client::CadenceServerClient;
pub use collaborators::ServerCollaborators;
pub use error::{Result, ServerClientError};
pub use types::{
    ServerConfig, SubsonicEnvelope, SubsonicFailure, SubsonicResponse, DEFAULT_CLIENT_NAME,
    SUBSONIC_API_VERSION,
};
