//! Host-side collaborators for the simulator: log-only notifications and
//! analytics, and a clock that follows simulated playback time.

use cadence_playback::{
    Analytics, AnalyticsEvent, Clock, Notification, NotificationPermission, Notifier,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;
use tracing::info;

/// Notifier that writes notifications to the log
#[derive(Debug, Clone, Copy)]
pub struct LogNotifier {
    permission: NotificationPermission,
}

impl LogNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self { permission }
    }
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new(NotificationPermission::Granted)
    }
}

impl Notifier for LogNotifier {
    fn permission(&self) -> NotificationPermission {
        self.permission
    }

    fn send(&self, notification: &Notification) {
        info!(
            title = %notification.title,
            body = %notification.body,
            tag = %notification.tag,
            "Notification"
        );
    }
}

/// Analytics sink that writes events to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnalytics;

impl Analytics for LogAnalytics {
    fn event(&self, event: &AnalyticsEvent) {
        info!(
            category = %event.category,
            action = %event.action,
            label = %event.label,
            "Analytics event"
        );
    }
}

/// Clock advanced by the simulation instead of the wall
#[derive(Debug)]
pub struct SimulatedClock {
    now: Mutex<DateTime<Utc>>,
}

impl SimulatedClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move time forward
    pub fn advance(&self, seconds: f64) {
        let step = Duration::milliseconds((seconds * 1000.0).round() as i64);
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += step;
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_clock_advances() {
        let clock = SimulatedClock::starting_at(Utc.timestamp_opt(1_000, 0).unwrap());
        clock.advance(1.5);
        clock.advance(0.25);

        assert_eq!(clock.now().timestamp_millis(), 1_001_750);
    }

    #[test]
    fn test_notifier_reports_permission() {
        assert_eq!(
            LogNotifier::default().permission(),
            NotificationPermission::Granted
        );
        assert_eq!(
            LogNotifier::new(NotificationPermission::Denied).permission(),
            NotificationPermission::Denied
        );
    }
}
