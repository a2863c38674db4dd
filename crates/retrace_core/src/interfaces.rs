//! Interfaces to the engine's external collaborators.
//!
//! The playback engine never talks to the replay protocol or the UI
//! directly: graphics arrive through [`GraphicsSource`], precise stop
//! targets through [`ExecutionResolver`], and effects leave through
//! [`Renderer`] and [`Host`]. Wall-clock time is injected via [`Clock`] so
//! playback pacing can run on virtual time in tests.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::events::{ExecutionPoint, GraphicsFrame, PauseTarget};
use crate::time::Time;

/// Asynchronous cache/fetcher for renderable graphics.
#[async_trait]
pub trait GraphicsSource: Send + Sync {
    /// Fetch the graphics for an arbitrary recording time.
    ///
    /// May be slow. A failure means the frame never arrives; the session
    /// that asked for it stops rather than hanging or retrying.
    async fn fetch(&self, time: Time) -> Result<GraphicsFrame, TransportError>;
}

/// Remote resolver computing where execution should actually pause next.
#[async_trait]
pub trait ExecutionResolver: Send + Sync {
    /// Resolve the next pause target after `point`, if any.
    async fn resume_target(
        &self,
        point: &ExecutionPoint,
    ) -> Result<Option<PauseTarget>, TransportError>;
}

/// Synchronous sink for fetched frames.
pub trait Renderer: Send + Sync {
    /// Display a frame. Fire-and-forget.
    fn paint(&self, frame: &GraphicsFrame);
}

/// Command channel to the remote debugging session.
pub trait Host: Send + Sync {
    /// Select an execution point. Fire-and-forget; the engine does not
    /// await confirmation that the remote side changed state.
    fn seek(&self, point: &ExecutionPoint, time: Time, has_frames: bool);
}

/// Injected wall-clock time source.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current wall-clock time in milliseconds.
    fn now_ms(&self) -> u64;

    /// Suspend the calling task for `ms` milliseconds.
    async fn sleep_ms(&self, ms: u64);
}
