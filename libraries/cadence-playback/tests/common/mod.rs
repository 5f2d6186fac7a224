//! Shared helpers for controller integration tests

#![allow(dead_code)]

use cadence_playback::{
    Analytics, AnalyticsEvent, Clock, Collaborators, KeepAlive, Notification,
    NotificationPermission, Notifier, Scrobbler, StreamPrimer, Track,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};

/// Every outbound call the controller made, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Ping(String),
    Scrobble(String, Option<i64>),
    NowPlaying(String),
    Warm(String),
    Notify(Notification),
    Event(AnalyticsEvent),
}

/// Collaborator that records every call
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
    permission: Mutex<NotificationPermission>,
    now: Mutex<DateTime<Utc>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            permission: Mutex::new(NotificationPermission::Granted),
            now: Mutex::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn scrobbles(&self) -> Vec<(String, Option<i64>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Scrobble(id, time) => Some((id, time)),
                _ => None,
            })
            .collect()
    }

    pub fn warmed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Warm(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn set_permission(&self, permission: NotificationPermission) {
        *self.permission.lock().unwrap() = permission;
    }

    pub fn set_now(&self, secs: i64) {
        *self.now.lock().unwrap() = Utc.timestamp_opt(secs, 0).unwrap();
    }

    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators::disconnected()
            .with_keep_alive(self.clone())
            .with_scrobbler(self.clone())
            .with_primer(self.clone())
            .with_notifier(self.clone())
            .with_analytics(self.clone())
            .with_clock(self.clone())
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl KeepAlive for Recorder {
    fn ping(&self, track_id: &str) {
        self.push(Call::Ping(track_id.to_string()));
    }
}

impl Scrobbler for Recorder {
    fn scrobble(&self, track_id: &str, start_time_millis: Option<i64>) {
        self.push(Call::Scrobble(track_id.to_string(), start_time_millis));
    }

    fn now_playing(&self, track_id: &str) {
        self.push(Call::NowPlaying(track_id.to_string()));
    }
}

impl StreamPrimer for Recorder {
    fn warm(&self, url: &str) {
        self.push(Call::Warm(url.to_string()));
    }
}

impl Notifier for Recorder {
    fn permission(&self) -> NotificationPermission {
        *self.permission.lock().unwrap()
    }

    fn send(&self, notification: &Notification) {
        self.push(Call::Notify(notification.clone()));
    }
}

impl Analytics for Recorder {
    fn event(&self, event: &AnalyticsEvent) {
        self.push(Call::Event(event.clone()));
    }
}

impl Clock for Recorder {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Track with a stable instance id derived from its id
pub fn create_track(id: &str, title: &str, artist: &str, duration_secs: f64) -> Track {
    let mut track = Track::new(id, title, format!("/stream/{}", id));
    track.instance_id = format!("uuid-{}", id);
    track.artist = artist.to_string();
    track.album = "Test Album".to_string();
    track.duration = Some(duration_secs);
    track
}
