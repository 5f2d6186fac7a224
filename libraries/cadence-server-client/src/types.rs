//! Types for server requests and responses.

use serde::Deserialize;

/// Client name reported to the server
pub const DEFAULT_CLIENT_NAME: &str = "cadence";

/// Subsonic REST API version the client speaks
pub const SUBSONIC_API_VERSION: &str = "1.16.1";

/// Configuration for connecting to a Subsonic-compatible server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
    /// Subsonic user name
    pub username: String,
    /// Subsonic token, `md5(password + salt)`
    pub token: Option<String>,
    /// Salt the token was derived with
    pub salt: Option<String>,
    /// Bearer token for the native API (keep-alive)
    pub access_token: Option<String>,
    /// Client name sent as `c`
    pub client_name: String,
}

impl ServerConfig {
    /// Create a config with just the URL and user name.
    pub fn new(url: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            token: None,
            salt: None,
            access_token: None,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
        }
    }

    /// Attach Subsonic token credentials.
    pub fn with_token(mut self, token: impl Into<String>, salt: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.salt = Some(salt.into());
        self
    }

    /// Attach a native API bearer token.
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Whether Subsonic credentials are present.
    pub fn has_credentials(&self) -> bool {
        self.token.is_some() && self.salt.is_some()
    }
}

// =============================================================================
// Subsonic Response Types
// =============================================================================

/// Top-level Subsonic JSON envelope.
#[derive(Debug, Deserialize)]
pub struct SubsonicEnvelope {
    #[serde(rename = "subsonic-response")]
    pub response: SubsonicResponse,
}

/// Subsonic response body (only the fields the client reads).
#[derive(Debug, Deserialize)]
pub struct SubsonicResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub error: Option<SubsonicFailure>,
}

impl SubsonicResponse {
    /// Whether the server accepted the call.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Error payload of a failed Subsonic call.
#[derive(Debug, Deserialize)]
pub struct SubsonicFailure {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}
