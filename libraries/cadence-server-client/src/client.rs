//! HTTP client for scrobble, now-playing, keep-alive and stream priming.

use crate::error::{Result, ServerClientError};
use crate::types::{ServerConfig, SubsonicEnvelope, SUBSONIC_API_VERSION};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for a Subsonic-compatible music server.
///
/// Every call is a plain async request; fire-and-forget behaviour lives in
/// [`crate::ServerCollaborators`].
#[derive(Debug, Clone)]
pub struct CadenceServerClient {
    http: Client,
    base: Url,
    config: ServerConfig,
}

impl CadenceServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let trimmed = config.url.trim_end_matches('/');
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // Trailing slash so relative joins stay under any path prefix
        let base = Url::parse(&format!("{}/", trimmed))
            .map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(url = %base, user = %config.username, "Server client created");

        Ok(Self { http, base, config })
    }

    /// Server base URL, without trailing slash.
    pub fn url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Client configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Register a completed play.
    ///
    /// `start_time_millis` is when playback of the track began.
    pub async fn scrobble(&self, track_id: &str, start_time_millis: Option<i64>) -> Result<()> {
        let mut params = vec![
            ("id", track_id.to_string()),
            ("submission", "true".to_string()),
        ];
        if let Some(time) = start_time_millis {
            params.push(("time", time.to_string()));
        }

        debug!(track_id = %track_id, time = ?start_time_millis, "Sending scrobble");
        self.subsonic("scrobble", &params).await
    }

    /// Announce the track currently playing.
    pub async fn now_playing(&self, track_id: &str) -> Result<()> {
        let params = [
            ("id", track_id.to_string()),
            ("submission", "false".to_string()),
        ];

        debug!(track_id = %track_id, "Sending now-playing");
        self.subsonic("scrobble", &params).await
    }

    /// Tell the server the session is still alive after a track ended.
    pub async fn keep_alive(&self, track_id: &str) -> Result<()> {
        let url = self.resolve(&format!("api/keepalive/{}", track_id))?;
        debug!(url = %url, "Sending keep-alive");

        let mut request = self.http.get(url);
        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(unreachable_or_request)?;
        check_status(response).await.map(|_| ())
    }

    /// Fetch a stream so the server and any cache in between have it ready.
    ///
    /// `stream_url` may be absolute or relative to the server URL. The body
    /// is read and discarded; the byte count is returned.
    pub async fn warm_stream(&self, stream_url: &str) -> Result<u64> {
        let url = self.resolve(stream_url)?;
        debug!(url = %url, "Priming stream");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(unreachable_or_request)?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;

        debug!(bytes = bytes.len(), "Stream primed");
        Ok(bytes.len() as u64)
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ServerClientError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn subsonic(&self, endpoint: &str, params: &[(&str, String)]) -> Result<()> {
        let (token, salt) = match (&self.config.token, &self.config.salt) {
            (Some(token), Some(salt)) => (token, salt),
            _ => return Err(ServerClientError::AuthRequired),
        };

        let url = self.resolve(&format!("rest/{}", endpoint))?;
        let response = self
            .http
            .get(url)
            .query(&[
                ("u", self.config.username.as_str()),
                ("t", token.as_str()),
                ("s", salt.as_str()),
                ("v", SUBSONIC_API_VERSION),
                ("c", self.config.client_name.as_str()),
                ("f", "json"),
            ])
            .query(params)
            .send()
            .await
            .map_err(unreachable_or_request)?;

        let response = check_status(response).await?;
        let envelope: SubsonicEnvelope = response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
        })?;

        if envelope.response.is_ok() {
            return Ok(());
        }

        let (code, message) = envelope
            .response
            .error
            .map(|e| (e.code, e.message))
            .unwrap_or((0, "unknown error".to_string()));
        Err(ServerClientError::Subsonic { code, message })
    }
}

fn unreachable_or_request(e: reqwest::Error) -> ServerClientError {
    if e.is_connect() || e.is_timeout() {
        ServerClientError::ServerUnreachable(e.to_string())
    } else {
        ServerClientError::Request(e)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status.as_u16() == 401 {
        Err(ServerClientError::AuthRequired)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(ServerClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}
