//! Play-start notification and analytics dispatch
//!
//! Both are one-shot per play-start and gated by configuration. Neither
//! can fail playback: the collaborators swallow their own errors.

use crate::collaborators::{
    Analytics, AnalyticsEvent, Notification, NotificationPermission, Notifier,
};
use crate::config::ControllerConfig;
use crate::types::Track;
use std::sync::Arc;
use tracing::debug;

/// Analytics category for player events
pub const ANALYTICS_CATEGORY: &str = "Player";

/// Analytics action for a track starting
pub const ANALYTICS_PLAY_ACTION: &str = "Play song";

/// What a play-start announcement actually did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Announcement {
    /// A notification was sent
    pub notified: bool,
    /// An analytics event was recorded
    pub tracked: bool,
}

/// Sends play-start notifications and analytics events
#[derive(Clone)]
pub struct Dispatcher {
    notifier: Arc<dyn Notifier>,
    analytics: Arc<dyn Analytics>,
}

impl Dispatcher {
    /// Create a dispatcher over the given collaborators
    pub fn new(notifier: Arc<dyn Notifier>, analytics: Arc<dyn Analytics>) -> Self {
        Self {
            notifier,
            analytics,
        }
    }

    /// Announce that `track` started playing
    pub fn announce_play(
        &self,
        config: &ControllerConfig,
        track: &Track,
        cover_url: Option<&str>,
    ) -> Announcement {
        let mut announcement = Announcement::default();

        if config.notifications {
            let notification = play_notification(track, cover_url, &config.app_title);
            announcement.notified = send_notification(self.notifier.as_ref(), &notification);
        }

        if config.analytics_tracking_id.is_some() {
            self.analytics.event(&play_event(track));
            announcement.tracked = true;
        }

        announcement
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

/// Send a notification if permission is already granted
///
/// Permission is checked before anything is created; without it this has
/// no side effect. Returns whether the notification was sent.
pub fn send_notification(notifier: &dyn Notifier, notification: &Notification) -> bool {
    match notifier.permission() {
        NotificationPermission::Granted => {
            notifier.send(notification);
            true
        }
        permission => {
            debug!(?permission, "Notification permission not granted, skipping");
            false
        }
    }
}

/// Notification for a track starting: title, "artist - album", cover
pub fn play_notification(track: &Track, cover_url: Option<&str>, tag: &str) -> Notification {
    Notification {
        title: track.title.clone(),
        body: format!("{} - {}", track.artist, track.album),
        image_url: cover_url
            .map(str::to_string)
            .or_else(|| track.cover_url.clone()),
        silent: false,
        tag: tag.to_string(),
    }
}

/// Analytics event for a track starting
pub fn play_event(track: &Track) -> AnalyticsEvent {
    AnalyticsEvent {
        category: ANALYTICS_CATEGORY.to_string(),
        action: ANALYTICS_PLAY_ACTION.to_string(),
        label: format!("{} - {}", track.title, track.artist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MockAnalytics, MockNotifier};
    use mockall::predicate::*;

    fn track() -> Track {
        let mut track = Track::new("t1", "Blue Train", "/stream/t1");
        track.artist = "John Coltrane".to_string();
        track.album = "Blue Train".to_string();
        track
    }

    fn dispatcher(notifier: MockNotifier, analytics: MockAnalytics) -> Dispatcher {
        Dispatcher::new(Arc::new(notifier), Arc::new(analytics))
    }

    #[test]
    fn notification_content() {
        let n = play_notification(&track(), Some("/cover/t1"), "Cadence");

        assert_eq!(n.title, "Blue Train");
        assert_eq!(n.body, "John Coltrane - Blue Train");
        assert_eq!(n.image_url.as_deref(), Some("/cover/t1"));
        assert!(!n.silent);
        assert_eq!(n.tag, "Cadence");
    }

    #[test]
    fn analytics_event_content() {
        let event = play_event(&track());

        assert_eq!(event.category, "Player");
        assert_eq!(event.action, "Play song");
        assert_eq!(event.label, "Blue Train - John Coltrane");
    }

    #[test]
    fn permission_checked_before_sending() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .times(1)
            .return_const(NotificationPermission::Denied);
        notifier.expect_send().never();

        let n = play_notification(&track(), None, "Cadence");
        assert!(!send_notification(&notifier, &n));
    }

    #[test]
    fn granted_permission_sends() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_permission()
            .return_const(NotificationPermission::Granted);
        notifier
            .expect_send()
            .withf(|n: &Notification| n.title == "Blue Train" && !n.silent)
            .times(1)
            .return_const(());

        let n = play_notification(&track(), None, "Cadence");
        assert!(send_notification(&notifier, &n));
    }

    #[test]
    fn disabled_preferences_do_nothing() {
        let mut notifier = MockNotifier::new();
        notifier.expect_permission().never();
        notifier.expect_send().never();
        let mut analytics = MockAnalytics::new();
        analytics.expect_event().never();

        let config = ControllerConfig::default();
        let announcement = dispatcher(notifier, analytics).announce_play(&config, &track(), None);

        assert_eq!(announcement, Announcement::default());
    }

    #[test]
    fn tracking_id_enables_analytics() {
        let notifier = MockNotifier::new();
        let mut analytics = MockAnalytics::new();
        analytics
            .expect_event()
            .with(eq(play_event(&track())))
            .times(1)
            .return_const(());

        let config = ControllerConfig {
            analytics_tracking_id: Some("UA-1".to_string()),
            ..Default::default()
        };
        let announcement = dispatcher(notifier, analytics).announce_play(&config, &track(), None);

        assert!(announcement.tracked);
        assert!(!announcement.notified);
    }
}
