//! Retrace core model
//!
//! Foundational types for the retrace playback engine:
//!
//! - **Timeline types**: recording [`Time`] and the visible [`ZoomRegion`]
//! - **Checkpoint events**: the sparse paint/mouse grid playback steps over
//! - **Collaborator interfaces**: graphics source, execution resolver,
//!   renderer, host, and clock
//! - **Errors**: transport failures from the remote side

pub mod error;
pub mod events;
pub mod interfaces;
pub mod time;

pub use error::TransportError;
pub use events::{CheckpointEvent, CheckpointKind, ExecutionPoint, GraphicsFrame, PauseTarget};
pub use interfaces::{Clock, ExecutionResolver, GraphicsSource, Host, Renderer};
pub use time::{Time, ZoomRegion};
