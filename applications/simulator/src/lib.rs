//! Cadence simulator
//!
//! Drives the playback controller the way a playback engine would and
//! records what it decides. Used by the `cadence-sim` binary and handy for
//! checking configuration and queue files without an audio device.

pub mod error;
pub mod host;
pub mod queue_file;
pub mod simulation;

pub use error::{Result, SimError};
pub use host::{LogAnalytics, LogNotifier, SimulatedClock};
pub use queue_file::{load_tracks, parse_tracks};
pub use simulation::{Simulation, SimulationOptions, Step, StepKind, Transcript};
