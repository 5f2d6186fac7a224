//! Gain tap on the host audio path
//!
//! Hosts that expose an audio-processing graph can have a gain node
//! inserted between the track's source and the output destination. The tap
//! is built on first use, at most once; when the host has no graph or
//! refuses to build one, playback simply passes through unmodified.

use crate::error::{LoudnessError, Result};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A gain control node living in the host's audio graph
pub trait GainNode: Send {
    /// Schedule `value` as the node's gain at graph time `time` (seconds)
    fn set_value_at_time(&mut self, value: f64, time: f64);
}

/// Host audio-processing graph capable of carrying a gain tap
pub trait AudioGraph: Send {
    /// Allow the media source to be captured even when it is served from
    /// another origin (remote radio streams)
    fn allow_cross_origin_capture(&mut self);

    /// Insert a gain node between the source and the output destination
    fn connect_gain_node(&mut self) -> Result<Box<dyn GainNode>>;

    /// Current graph time in seconds
    fn current_time(&self) -> f64;

    /// Whether the graph is currently rendering
    fn is_running(&self) -> bool {
        true
    }

    /// Resume a suspended graph
    fn resume(&mut self) {}
}

enum TapState {
    /// Not built yet
    Pending,
    /// Built and connected
    Active(Box<dyn GainNode>),
    /// Host has no graph, or construction failed; never retried
    Disabled,
}

/// Lazily constructed, one-time gain tap
pub struct GainTap {
    graph: Option<Box<dyn AudioGraph>>,
    state: TapState,
}

impl GainTap {
    /// Create a tap over an optional host graph
    ///
    /// Nothing is built until [`GainTap::ensure`] is called.
    pub fn new(graph: Option<Box<dyn AudioGraph>>) -> Self {
        let state = if graph.is_some() {
            TapState::Pending
        } else {
            TapState::Disabled
        };
        Self { graph, state }
    }

    /// Tap for a host without any audio graph
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    /// Build the tap if it has not been built yet
    ///
    /// Returns whether the tap is active afterwards. Calling this again
    /// after construction (or after a failed construction) is a no-op.
    pub fn ensure(&mut self) -> bool {
        if !matches!(self.state, TapState::Pending) {
            return self.is_active();
        }

        let Some(graph) = self.graph.as_mut() else {
            self.state = TapState::Disabled;
            return false;
        };

        graph.allow_cross_origin_capture();
        match graph.connect_gain_node() {
            Ok(node) => {
                info!("ReplayGain tap connected");
                self.state = TapState::Active(node);
                true
            }
            Err(e) => {
                warn!(error = %e, "ReplayGain tap unavailable, playing unmodified");
                self.state = TapState::Disabled;
                false
            }
        }
    }

    /// Apply a multiplier immediately at the graph's current time
    ///
    /// Returns `false` when the tap is not active.
    pub fn apply(&mut self, multiplier: f64) -> bool {
        let TapState::Active(node) = &mut self.state else {
            return false;
        };
        let time = self.graph.as_ref().map_or(0.0, |g| g.current_time());
        debug!(multiplier, time, "Scheduling ReplayGain multiplier");
        node.set_value_at_time(multiplier, time);
        true
    }

    /// Resume the host graph if the tap exists and the graph is suspended
    pub fn resume(&mut self) {
        if !self.is_active() {
            return;
        }
        if let Some(graph) = self.graph.as_mut() {
            if !graph.is_running() {
                debug!("Resuming suspended audio graph");
                graph.resume();
            }
        }
    }

    /// Check if the tap has been built and connected
    pub fn is_active(&self) -> bool {
        matches!(self.state, TapState::Active(_))
    }

    /// Check if the tap can never become active
    pub fn is_disabled(&self) -> bool {
        matches!(self.state, TapState::Disabled)
    }
}

impl std::fmt::Debug for GainTap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            TapState::Pending => "pending",
            TapState::Active(_) => "active",
            TapState::Disabled => "disabled",
        };
        f.debug_struct("GainTap").field("state", &state).finish()
    }
}

/// Shared gain applied to interleaved sample buffers
///
/// Cloning yields another handle to the same gain, so the control side can
/// hold one while the render side holds another.
#[derive(Debug, Clone)]
pub struct SampleGain {
    bits: Arc<AtomicU32>,
}

impl SampleGain {
    /// Create a gain handle at unity
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(1.0_f32.to_bits())),
        }
    }

    /// Current gain
    pub fn value(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Set the gain
    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Apply gain to audio buffer (in-place)
    pub fn process(&self, buffer: &mut [f32]) {
        let gain = self.value();

        if gain == 0.0 {
            buffer.fill(0.0);
        } else if gain != 1.0 {
            for sample in buffer.iter_mut() {
                *sample *= gain;
            }
        }
    }
}

impl Default for SampleGain {
    fn default() -> Self {
        Self::new()
    }
}

impl GainNode for SampleGain {
    fn set_value_at_time(&mut self, value: f64, _time: f64) {
        // Sample buffers have no scheduling; the value takes effect on the next buffer
        self.set(value as f32);
    }
}

/// Audio graph for hosts that render sample buffers themselves
///
/// The render side keeps the [`SampleGain`] returned by [`BufferGraph::new`]
/// and runs every buffer through it.
#[derive(Debug)]
pub struct BufferGraph {
    gain: SampleGain,
    connected: bool,
}

impl BufferGraph {
    /// Create a graph and the render-side gain handle
    pub fn new() -> (Self, SampleGain) {
        let gain = SampleGain::new();
        let graph = Self {
            gain: gain.clone(),
            connected: false,
        };
        (graph, gain)
    }
}

impl AudioGraph for BufferGraph {
    fn allow_cross_origin_capture(&mut self) {}

    fn connect_gain_node(&mut self) -> Result<Box<dyn GainNode>> {
        if self.connected {
            return Err(LoudnessError::TapConstruction(
                "gain node already connected".to_string(),
            ));
        }
        self.connected = true;
        Ok(Box::new(self.gain.clone()))
    }

    fn current_time(&self) -> f64 {
        // Takes effect on the next buffer
        0.0
    }
}
