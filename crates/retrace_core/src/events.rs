//! Checkpoint events and protocol payloads.

use serde::{Deserialize, Serialize};

use crate::time::Time;

/// Opaque token identifying an exact step in recorded execution.
///
/// Not derivable from a [`Time`]: the timeline positions things by time,
/// but seeks and resumes need the point.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionPoint(String);

impl ExecutionPoint {
    pub fn new(point: impl Into<String>) -> Self {
        Self(point.into())
    }

    /// The zero point at the very beginning of the recording.
    pub fn root() -> Self {
        Self("0".to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExecutionPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a checkpoint records: a composited frame or a mouse update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointKind {
    Paint,
    Mouse,
}

impl CheckpointKind {
    pub fn is_paint(self) -> bool {
        matches!(self, CheckpointKind::Paint)
    }

    pub fn is_mouse(self) -> bool {
        matches!(self, CheckpointKind::Mouse)
    }
}

/// A recorded instant where screen and mouse state are known to exist.
///
/// Checkpoints form the coarse grid playback steps over. They are supplied
/// to the engine as a time-ordered snapshot (stable order within equal
/// times) and never mutated by it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckpointEvent {
    pub time: Time,
    pub point: ExecutionPoint,
    pub kind: CheckpointKind,
    /// Horizontal client position, carried by mouse checkpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_x: Option<f64>,
}

impl CheckpointEvent {
    pub fn paint(time: Time, point: ExecutionPoint) -> Self {
        Self {
            time,
            point,
            kind: CheckpointKind::Paint,
            client_x: None,
        }
    }

    pub fn mouse(time: Time, point: ExecutionPoint, client_x: f64) -> Self {
        Self {
            time,
            point,
            kind: CheckpointKind::Mouse,
            client_x: Some(client_x),
        }
    }
}

/// Where the remote side decided playback must actually stop, independent
/// of checkpoint granularity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PauseTarget {
    pub time: Time,
    pub point: ExecutionPoint,
    /// Whether the target carries call-stack context. Absent means a
    /// point-only stop.
    #[serde(default)]
    pub frame: bool,
}

/// Renderable payload for a single time.
///
/// Fetched asynchronously, immutable once obtained, and opaque to the
/// engine — it is handed to the renderer untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphicsFrame {
    pub screen: serde_json::Value,
    pub mouse: serde_json::Value,
}
