//! Simulated playback run
//!
//! Plays a queue front to back by feeding the controller the same lifecycle
//! events a playback engine would: play, progress ticks, an optional
//! pause/resume, ended and track-change. Every step that changes something
//! visible is recorded in a [`Transcript`].

use crate::error::{Result, SimError};
use crate::host::SimulatedClock;
use cadence_loudness::{BufferGraph, SampleGain};
use cadence_playback::{
    AudioInfo, Collaborators, ControllerConfig, PlaybackController, PlayerEvents,
    PresentationCommand, Track,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Samples per render buffer
const RENDER_FRAMES: usize = 256;

/// How the run is driven
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOptions {
    /// Seconds between progress ticks
    pub tick_seconds: f64,
    /// How long to play tracks with no known duration before moving on
    pub live_seconds: f64,
    /// Queue position to start at
    pub start_index: usize,
    /// Pause and resume every track at this position
    pub pause_at: Option<f64>,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            tick_seconds: 1.0,
            live_seconds: 30.0,
            start_index: 0,
            pause_at: None,
        }
    }
}

impl SimulationOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.tick_seconds.is_finite() || self.tick_seconds <= 0.0 {
            return Err(SimError::InvalidOptions(format!(
                "tick must be a positive number of seconds, got {}",
                self.tick_seconds
            )));
        }
        if !self.live_seconds.is_finite() || self.live_seconds < 0.0 {
            return Err(SimError::InvalidOptions(format!(
                "live stream length must be non-negative, got {}",
                self.live_seconds
            )));
        }
        Ok(())
    }
}

/// What happened at a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Play,
    Pause,
    Resume,
    Preload,
    Scrobble,
    Ended,
    /// Live stream cut off after `live_seconds`
    Stopped,
}

/// One recorded step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub track_id: String,
    pub at: f64,
    pub kind: StepKind,
    pub commands: Vec<PresentationCommand>,
    /// Gain the render side applied to the last buffer
    pub gain: f32,
}

/// Everything a run produced
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    pub steps: Vec<Step>,
}

impl Transcript {
    pub fn of_kind(&self, kind: StepKind) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.kind == kind)
    }

    /// Track ids that were scrobbled, in order
    pub fn scrobbled(&self) -> Vec<&str> {
        self.of_kind(StepKind::Scrobble)
            .map(|s| s.track_id.as_str())
            .collect()
    }

    /// Every presentation command, in order
    pub fn commands(&self) -> impl Iterator<Item = &PresentationCommand> {
        self.steps.iter().flat_map(|s| s.commands.iter())
    }
}

/// A controller wired to a render buffer and a simulated clock
#[derive(Debug)]
pub struct Simulation {
    controller: PlaybackController,
    render: SampleGain,
    clock: Arc<SimulatedClock>,
    options: SimulationOptions,
}

impl Simulation {
    pub fn new(
        config: ControllerConfig,
        collaborators: Collaborators,
        options: SimulationOptions,
    ) -> Result<Self> {
        options.validate()?;

        let clock = Arc::new(SimulatedClock::starting_at(Utc::now()));
        let (graph, render) = BufferGraph::new();
        let controller =
            PlaybackController::new(config, collaborators.with_clock(clock.clone()))?
                .with_audio_graph(Box::new(graph));

        Ok(Self {
            controller,
            render,
            clock,
            options,
        })
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController {
        &mut self.controller
    }

    /// Play `tracks` from the start index to the end of the queue
    pub fn run(&mut self, tracks: Vec<Track>) -> Transcript {
        let mut transcript = Transcript::default();

        let commands = self
            .controller
            .load_queue(tracks, self.options.start_index, true);
        if !commands.is_empty() {
            info!("Queue is empty, nothing to play");
            return transcript;
        }

        let mut current = self.controller.queue().current().cloned();
        let mut first = true;
        while let Some(track) = current {
            if !first {
                self.controller.on_track_change();
            }
            first = false;

            self.play_track(&track, &mut transcript);
            current = self.controller.next_track().cloned();
        }

        info!(
            steps = transcript.steps.len(),
            scrobbles = transcript.scrobbled().len(),
            "Simulation finished"
        );
        transcript
    }

    fn play_track(&mut self, track: &Track, transcript: &mut Transcript) {
        let known = track.duration.filter(|d| d.is_finite() && *d > 0.0);
        let length = known.unwrap_or(self.options.live_seconds);
        debug!(track_id = %track.id, length, live = known.is_none(), "Playing track");

        let commands = self.controller.on_play(&AudioInfo::for_track(track, 0.0));
        self.record(transcript, track, 0.0, StepKind::Play, commands);

        let mut paused = false;
        let mut t = 0.0;
        loop {
            t += self.options.tick_seconds;
            if t >= length {
                break;
            }
            self.clock.advance(self.options.tick_seconds);

            if !paused && self.options.pause_at.is_some_and(|p| t >= p) {
                paused = true;
                let commands = self.controller.on_pause(&AudioInfo::for_track(track, t));
                self.record(transcript, track, t, StepKind::Pause, commands);
                let commands = self.controller.on_play(&AudioInfo::for_track(track, t));
                self.record(transcript, track, t, StepKind::Resume, commands);
            }

            let session = self.controller.session();
            let before = (session.is_preloaded(), session.is_scrobbled());

            let commands = self.controller.on_progress(&AudioInfo::for_track(track, t));

            let session = self.controller.session();
            if !before.0 && session.is_preloaded() {
                self.record(transcript, track, t, StepKind::Preload, commands);
            } else if !before.1 && session.is_scrobbled() {
                self.record(transcript, track, t, StepKind::Scrobble, commands);
            }
        }

        if known.is_some() {
            self.clock.advance(length - (t - self.options.tick_seconds));
            let mut info = AudioInfo::for_track(track, length);
            info.ended = true;
            let commands = self.controller.on_ended(&info);
            self.record(transcript, track, length, StepKind::Ended, commands);
        } else {
            self.record(transcript, track, length, StepKind::Stopped, Vec::new());
        }
    }

    fn record(
        &self,
        transcript: &mut Transcript,
        track: &Track,
        at: f64,
        kind: StepKind,
        commands: Vec<PresentationCommand>,
    ) {
        // Run a unit buffer through the render side to see what it applies
        let mut buffer = [1.0_f32; RENDER_FRAMES];
        self.render.process(&mut buffer);

        transcript.steps.push(Step {
            track_id: track.id.clone(),
            at,
            kind,
            commands,
            gain: buffer[0],
        });
    }
}
