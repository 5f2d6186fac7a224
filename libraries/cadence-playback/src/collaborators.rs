//! External collaborators
//!
//! The controller talks to the outside world only through these traits.
//! Every call is fire-and-forget: implementations catch and log their own
//! failures and return nothing, so a slow or broken service can never
//! interrupt playback control or touch the session flags after the fact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Keeps the server-side session alive when a track finishes
#[cfg_attr(test, automock)]
pub trait KeepAlive: Send + Sync {
    /// Ping the server for `track_id`
    fn ping(&self, track_id: &str);
}

/// Play-count submission service
#[cfg_attr(test, automock)]
pub trait Scrobbler: Send + Sync {
    /// Submit a completed play
    fn scrobble(&self, track_id: &str, start_time_millis: Option<i64>);

    /// Announce the track that just started
    fn now_playing(&self, track_id: &str);
}

/// Best-effort prefetch of a track's audio resource
#[cfg_attr(test, automock)]
pub trait StreamPrimer: Send + Sync {
    /// Start fetching `url` so the next track starts without a gap
    fn warm(&self, url: &str);
}

/// Permission state of the OS notification primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    /// Notifications may be shown
    Granted,
    /// The user refused notifications
    Denied,
    /// The user has not been asked, or the platform has no notifications
    Default,
}

/// A system notification request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Headline
    pub title: String,
    /// Body text
    pub body: String,
    /// Icon or cover image
    pub image_url: Option<String>,
    /// Whether the notification should be shown without sound
    pub silent: bool,
    /// Tag grouping notifications from this app
    pub tag: String,
}

/// OS-level notification primitive
#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    /// Current permission state
    fn permission(&self) -> NotificationPermission;

    /// Show a notification
    fn send(&self, notification: &Notification);
}

/// A single analytics event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event category
    pub category: String,
    /// Event action
    pub action: String,
    /// Event label
    pub label: String,
}

/// Analytics tracker
#[cfg_attr(test, automock)]
pub trait Analytics: Send + Sync {
    /// Record one event
    fn event(&self, event: &AnalyticsEvent);
}

/// Source of the current time
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Collaborator that does nothing, for hosts without a given service
#[derive(Debug, Clone, Copy, Default)]
pub struct Disconnected;

impl KeepAlive for Disconnected {
    fn ping(&self, _track_id: &str) {}
}

impl Scrobbler for Disconnected {
    fn scrobble(&self, _track_id: &str, _start_time_millis: Option<i64>) {}

    fn now_playing(&self, _track_id: &str) {}
}

impl StreamPrimer for Disconnected {
    fn warm(&self, _url: &str) {}
}

impl Notifier for Disconnected {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Default
    }

    fn send(&self, _notification: &Notification) {}
}

impl Analytics for Disconnected {
    fn event(&self, _event: &AnalyticsEvent) {}
}

/// Everything the controller calls out to
#[derive(Clone)]
pub struct Collaborators {
    pub keep_alive: Arc<dyn KeepAlive>,
    pub scrobbler: Arc<dyn Scrobbler>,
    pub primer: Arc<dyn StreamPrimer>,
    pub notifier: Arc<dyn Notifier>,
    pub analytics: Arc<dyn Analytics>,
    pub clock: Arc<dyn Clock>,
}

impl Collaborators {
    /// No services connected, wall clock
    pub fn disconnected() -> Self {
        Self {
            keep_alive: Arc::new(Disconnected),
            scrobbler: Arc::new(Disconnected),
            primer: Arc::new(Disconnected),
            notifier: Arc::new(Disconnected),
            analytics: Arc::new(Disconnected),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the keep-alive service
    pub fn with_keep_alive(mut self, keep_alive: Arc<dyn KeepAlive>) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Replace the scrobbler
    pub fn with_scrobbler(mut self, scrobbler: Arc<dyn Scrobbler>) -> Self {
        self.scrobbler = scrobbler;
        self
    }

    /// Replace the stream primer
    pub fn with_primer(mut self, primer: Arc<dyn StreamPrimer>) -> Self {
        self.primer = primer;
        self
    }

    /// Replace the notifier
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the analytics tracker
    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::disconnected()
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
