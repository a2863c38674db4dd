//! Error taxonomy for the remote collaborators.
//!
//! Stale async results and missing checkpoints are normal control flow,
//! not errors; only transport-level failures surface here.

use thiserror::Error;

/// Failure reported by a remote collaborator.
///
/// The engine never retries: a failed fetch or resolution stops the live
/// session and leaves the last displayed time in effect.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request was sent but the remote side reported failure.
    #[error("replay request failed: {0}")]
    Failed(String),
    /// The replay session went away mid-request.
    #[error("replay session disconnected")]
    Disconnected,
}
