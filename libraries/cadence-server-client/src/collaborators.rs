//! Fire-and-forget adapters from the controller's collaborator traits to
//! [`CadenceServerClient`].
//!
//! Each call spawns a task on the given runtime and returns immediately.
//! Failures are logged once and dropped; nothing flows back into the
//! controller.

use crate::client::CadenceServerClient;
use cadence_playback::{KeepAlive, Scrobbler, StreamPrimer};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

/// Network collaborators backed by a server client
#[derive(Debug, Clone)]
pub struct ServerCollaborators {
    client: Arc<CadenceServerClient>,
    runtime: Handle,
    tracker: TaskTracker,
}

impl ServerCollaborators {
    /// Create collaborators that spawn onto `runtime`
    pub fn new(client: CadenceServerClient, runtime: Handle) -> Self {
        Self {
            client: Arc::new(client),
            runtime,
            tracker: TaskTracker::new(),
        }
    }

    /// Create collaborators on the runtime of the calling context
    ///
    /// Panics outside a tokio runtime, like [`Handle::current`].
    pub fn on_current_runtime(client: CadenceServerClient) -> Self {
        Self::new(client, Handle::current())
    }

    /// The wrapped client
    pub fn client(&self) -> &CadenceServerClient {
        &self.client
    }

    /// Number of spawned calls that have not finished
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every spawned call has finished or `timeout` passes
    ///
    /// Returns whether everything finished. Used by hosts before exiting.
    /// Calls may still be spawned afterwards.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.tracker.close();
        let finished = tokio::time::timeout(timeout, self.tracker.wait())
            .await
            .is_ok();
        self.tracker.reopen();

        if finished {
            debug!("All server calls finished");
        } else {
            warn!(pending = self.in_flight(), "Server calls still pending");
        }
        finished
    }

    fn spawn<F, Fut, T>(&self, what: &'static str, target: String, call: F)
    where
        F: FnOnce(Arc<CadenceServerClient>, String) -> Fut + Send + 'static,
        Fut: Future<Output = crate::Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let client = Arc::clone(&self.client);
        self.tracker.spawn_on(
            async move {
                if let Err(e) = call(client, target.clone()).await {
                    warn!(call = what, target = %target, error = %e, "Server call failed");
                }
            },
            &self.runtime,
        );
    }
}

impl Scrobbler for ServerCollaborators {
    fn scrobble(&self, track_id: &str, start_time_millis: Option<i64>) {
        self.spawn("scrobble", track_id.to_string(), move |client, id| async move {
            client.scrobble(&id, start_time_millis).await
        });
    }

    fn now_playing(&self, track_id: &str) {
        self.spawn("now_playing", track_id.to_string(), |client, id| async move {
            client.now_playing(&id).await
        });
    }
}

impl KeepAlive for ServerCollaborators {
    fn ping(&self, track_id: &str) {
        self.spawn("keep_alive", track_id.to_string(), |client, id| async move {
            client.keep_alive(&id).await
        });
    }
}

impl StreamPrimer for ServerCollaborators {
    fn warm(&self, url: &str) {
        self.spawn("warm_stream", url.to_string(), |client, url| async move {
            client.warm_stream(&url).await
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ServerClientError, ServerConfig};

    fn collaborators() -> ServerCollaborators {
        let client =
            CadenceServerClient::new(ServerConfig::new("http://127.0.0.1:9", "alice")).unwrap();
        ServerCollaborators::on_current_runtime(client)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn panicking_call_does_not_block_drain() {
        let collaborators = collaborators();

        collaborators.spawn("boom", "x".to_string(), |_, _| async move {
            if true {
                panic!("call blew up");
            }
            Ok::<(), ServerClientError>(())
        });

        assert!(collaborators.drain(Duration::from_secs(2)).await);
        assert_eq!(collaborators.in_flight(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn drain_times_out_on_slow_call() {
        let collaborators = collaborators();

        collaborators.spawn("slow", "x".to_string(), |_, _| async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<(), ServerClientError>(())
        });

        assert!(!collaborators.drain(Duration::from_millis(50)).await);
        assert_eq!(collaborators.in_flight(), 1);

        // Still usable after a timed-out drain
        collaborators.spawn("quick", "y".to_string(), |_, _| async move {
            Ok::<(), ServerClientError>(())
        });
        assert!(collaborators.in_flight() >= 1);
    }
}
