//! Playback controller - core orchestration
//!
//! Receives lifecycle events from the playback engine and coordinates the
//! queue, the per-track session, ReplayGain, and the outbound
//! collaborators (scrobble, now-playing, preload, keep-alive,
//! notifications, analytics).

use crate::{
    collaborators::Collaborators,
    config::ControllerConfig,
    dispatch::Dispatcher,
    error::Result,
    events::{PlayerEvents, PresentationCommand},
    progress::{ProgressDecision, ProgressMonitor},
    queue::Queue,
    session::PlaybackSession,
    types::{AudioInfo, PlaybackInfo, PlayerMode, QueueSnapshot, Track},
    volume::Volume,
};
use cadence_loudness::{AudioGraph, GainTap, ReplayGainConfig, ReplayGainTags, NEUTRAL_GAIN};
use tracing::{debug, info, trace};

/// Central playback control
///
/// Single-threaded: every handler runs to completion inside the host's
/// event loop. Outbound calls are fire-and-forget, so nothing a collaborator
/// does can feed back into the session flags.
#[derive(Debug)]
pub struct PlaybackController {
    config: ControllerConfig,

    // Queue and per-track state
    queue: Queue,
    session: PlaybackSession,
    session_instance: Option<String>,
    monitor: ProgressMonitor,
    info: PlaybackInfo,

    // Output level
    volume: Volume,
    gain_tap: GainTap,
    multiplier: f64,

    // Outbound
    collaborators: Collaborators,
    dispatcher: Dispatcher,
}

impl PlaybackController {
    /// Create a controller
    ///
    /// No audio graph is attached; ReplayGain multipliers are computed but
    /// only applied once [`PlaybackController::with_audio_graph`] provides one.
    pub fn new(config: ControllerConfig, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;

        let volume = Volume::new(config.volume)?.with_fixed_output(config.fixed_output_volume);
        let dispatcher = Dispatcher::new(
            collaborators.notifier.clone(),
            collaborators.analytics.clone(),
        );

        info!(
            replay_gain = config.replay_gain.mode.as_str(),
            pre_amp = config.replay_gain.pre_amp,
            volume = config.volume,
            "Playback controller created"
        );

        Ok(Self {
            config,
            queue: Queue::new(),
            session: PlaybackSession::new(),
            session_instance: None,
            monitor: ProgressMonitor::new(),
            info: PlaybackInfo::default(),
            volume,
            gain_tap: GainTap::unavailable(),
            multiplier: NEUTRAL_GAIN,
            collaborators,
            dispatcher,
        })
    }

    /// Attach the host's audio-processing graph
    ///
    /// The gain tap is not built here; it is built on first use.
    pub fn with_audio_graph(mut self, graph: Box<dyn AudioGraph>) -> Self {
        self.gain_tap = GainTap::new(Some(graph));
        self
    }

    // ===== Queue =====

    /// Load tracks into the queue
    ///
    /// Returns `ResetTitle` when the queue ends up empty.
    pub fn load_queue(
        &mut self,
        tracks: Vec<Track>,
        start_index: usize,
        clear_existing: bool,
    ) -> Vec<PresentationCommand> {
        self.queue.load(tracks, start_index, clear_existing);
        if self.queue.is_empty() {
            self.session.reset();
            return vec![self.reset_title()];
        }
        Vec::new()
    }

    /// Empty the queue and forget the current track
    pub fn clear_queue(&mut self) -> Vec<PresentationCommand> {
        self.queue.clear();
        self.session.reset();
        self.session_instance = None;
        self.info = PlaybackInfo::default();
        debug!("Queue cleared");
        vec![self.reset_title()]
    }

    /// Tear down before the host destroys its player
    pub fn before_destroy(&mut self) -> Vec<PresentationCommand> {
        info!("Player teardown requested");
        self.clear_queue()
    }

    /// Entry following the current one
    pub fn next_track(&self) -> Option<&Track> {
        self.queue.peek_next()
    }

    /// Snapshot of the queue
    pub fn queue_snapshot(&self) -> QueueSnapshot {
        self.queue.snapshot()
    }

    /// The queue itself
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    // ===== State =====

    /// Snapshot of the playback state
    pub fn playback_info(&self) -> &PlaybackInfo {
        &self.info
    }

    /// Session of the current track
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Current configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // ===== Volume & gain =====

    /// Stored (compensated) volume
    pub fn volume(&self) -> f64 {
        self.volume.stored()
    }

    /// Volume to apply to the raw playback engine
    pub fn applied_volume(&self) -> f64 {
        self.volume.applied()
    }

    /// Multiplier for the current track under the current ReplayGain config
    pub fn gain_multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Whether the gain tap has been built
    pub fn gain_tap_active(&self) -> bool {
        self.gain_tap.is_active()
    }

    /// Change ReplayGain mode or pre-amp
    ///
    /// The multiplier for the current track is recomputed and reapplied.
    pub fn set_replay_gain_config(&mut self, replay_gain: ReplayGainConfig) -> Result<()> {
        replay_gain.validate()?;
        self.config.replay_gain = replay_gain;

        let tags = self.current_tags();
        self.refresh_gain(tags);

        info!(
            mode = replay_gain.mode.as_str(),
            pre_amp = replay_gain.pre_amp,
            multiplier = self.multiplier,
            "ReplayGain settings changed"
        );
        Ok(())
    }

    /// Turn play-start notifications on or off
    pub fn set_notifications(&mut self, enabled: bool) {
        self.config.notifications = enabled;
    }

    fn current_tags(&self) -> ReplayGainTags {
        self.info
            .track
            .as_ref()
            .map(|t| t.replay_gain)
            .unwrap_or_default()
    }

    fn refresh_gain(&mut self, tags: ReplayGainTags) {
        self.multiplier = self.config.replay_gain.multiplier(&tags);

        if self.config.replay_gain_enabled && self.config.replay_gain.mode.is_enabled() {
            self.gain_tap.ensure();
        }

        if self.gain_tap.apply(self.multiplier) {
            debug!(multiplier = self.multiplier, "ReplayGain applied");
        }
    }

    // ===== Helpers =====

    fn reset_title(&self) -> PresentationCommand {
        PresentationCommand::ResetTitle(self.config.app_title.clone())
    }

    fn current_instance_id(&self, info: &AudioInfo) -> Option<String> {
        info.instance_id()
            .map(str::to_string)
            .or_else(|| self.queue.current().map(|t| t.instance_id.clone()))
    }

    /// Start a fresh session when the engine switched entries without a
    /// track-change event
    fn adopt_instance(&mut self, instance_id: &str) {
        if self.session_instance.as_deref() == Some(instance_id) {
            return;
        }
        if self.session.start_time().is_some() {
            debug!(
                previous = ?self.session_instance,
                current = %instance_id,
                "Track changed without track-change event, resetting session"
            );
            self.session.reset();
        }
        self.session_instance = Some(instance_id.to_string());
    }

    fn preload_next(&mut self, info: &AudioInfo) {
        let next = self
            .current_instance_id(info)
            .and_then(|id| self.queue.next_track(&id));

        match next {
            Some(track) => {
                debug!(track_id = %track.id, url = %track.stream_url, "Preloading next track");
                self.collaborators.primer.warm(&track.stream_url);
            }
            None => debug!("No next track to preload"),
        }

        self.session.mark_preloaded();
    }

    fn scrobble(&mut self, info: &AudioInfo) {
        let track_id = info
            .track_id()
            .map(str::to_string)
            .or_else(|| self.info.track_id.clone());

        if let Some(track_id) = track_id {
            info!(track_id = %track_id, "Scrobbling");
            self.collaborators
                .scrobbler
                .scrobble(&track_id, self.session.start_time_millis());
        }

        self.session.mark_scrobbled();
    }
}

impl PlayerEvents for PlaybackController {
    fn on_play(&mut self, info: &AudioInfo) -> Vec<PresentationCommand> {
        // Graphs created before any user interaction start suspended
        self.gain_tap.resume();

        self.info.update_from(info);
        self.info.paused = false;
        if let Some(instance_id) = info.instance_id() {
            self.queue.set_current(instance_id);
            self.adopt_instance(instance_id);
        }

        let now = self.collaborators.clock.now();
        if self.session.begin(now) {
            debug!(track_id = ?info.track_id(), "Session started");
        }

        let tags = info
            .track
            .as_ref()
            .map(|t| t.replay_gain)
            .unwrap_or_default();
        self.refresh_gain(tags);

        let mut commands = Vec::new();
        if !info.has_known_duration() {
            return commands;
        }

        if let Some(track) = &info.track {
            commands.push(PresentationCommand::SetTitle(format!(
                "{} - {} - {}",
                track.title, track.artist, self.config.app_title
            )));
            self.collaborators.scrobbler.now_playing(&track.id);

            let announcement =
                self.dispatcher
                    .announce_play(&self.config, track, info.cover_url.as_deref());
            trace!(?announcement, "Play announced");
        }

        commands
    }

    fn on_pause(&mut self, info: &AudioInfo) -> Vec<PresentationCommand> {
        self.info.update_from(info);
        self.info.paused = true;
        Vec::new()
    }

    fn on_progress(&mut self, info: &AudioInfo) -> Vec<PresentationCommand> {
        self.info.current_time = info.current_time;
        self.info.duration = info.duration;

        let mut commands = Vec::new();
        if info.ended {
            commands.push(self.reset_title());
        }

        match self
            .monitor
            .evaluate(&self.session, info.current_time, info.duration)
        {
            ProgressDecision::Preload => self.preload_next(info),
            ProgressDecision::Scrobble => self.scrobble(info),
            decision => trace!(?decision, current_time = info.current_time, "Progress tick"),
        }

        commands
    }

    fn on_track_change(&mut self) -> Vec<PresentationCommand> {
        if self.session.start_time().is_some() && !self.session.is_scrobbled() {
            debug!(track_id = ?self.info.track_id, "Track abandoned before scrobble");
        }
        self.session.reset();
        Vec::new()
    }

    fn on_ended(&mut self, info: &AudioInfo) -> Vec<PresentationCommand> {
        self.session.finish();
        self.info.update_from(info);
        self.info.ended = true;

        if let Some(track_id) = &self.info.track_id {
            debug!(track_id = %track_id, "Track ended, sending keep-alive");
            self.collaborators.keep_alive.ping(track_id);
        }

        vec![self.reset_title()]
    }

    fn on_volume_change(&mut self, fader: f64) -> Vec<PresentationCommand> {
        self.volume.set_from_fader(fader);
        self.config.volume = self.volume.stored();
        trace!(fader, stored = self.config.volume, "Volume changed");
        Vec::new()
    }

    fn on_queue_change(&mut self, new_order: Vec<Track>) -> Vec<PresentationCommand> {
        self.queue.sync_from_external_reorder(new_order);
        if self.queue.is_empty() {
            self.session.reset();
            return vec![self.reset_title()];
        }
        Vec::new()
    }

    fn on_cover_click(&mut self, mode: PlayerMode, info: &AudioInfo) -> Vec<PresentationCommand> {
        if mode != PlayerMode::Full {
            return Vec::new();
        }
        info.track
            .as_ref()
            .and_then(|t| t.album_id.clone())
            .map(|album_id| vec![PresentationCommand::NavigateToAlbum { album_id }])
            .unwrap_or_default()
    }
}
