//! Retrace playback engine
//!
//! The seek/playback scheduler of a time-travel debugger timeline, kept
//! free of any UI concern:
//!
//! - **Mapper**: time ↔ normalized position ↔ pixel conversions within a
//!   zoom region
//! - **Checkpoints**: pure queries over the sparse paint/mouse event grid
//! - **Scheduler**: the playback session state machine and its pacing loop
//! - **Controller**: user seek/step/play intents orchestrated over the rest
//!
//! Graphics fetching, protocol calls, rendering, and wall-clock time are
//! all injected through the `retrace_core` collaborator traits, so the
//! engine runs the same on a live replay connection and on scripted mocks
//! under a paused test clock.

pub mod checkpoints;
pub mod clock;
pub mod controller;
pub mod mapper;
pub mod scheduler;

pub use checkpoints::CheckpointIndex;
pub use clock::SystemClock;
pub use controller::SeekController;
pub use scheduler::{PlaybackConfig, PlaybackDeps, PlaybackScheduler};
