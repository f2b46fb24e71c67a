//! Top-level error type for the radar pipeline

use crate::config::ConfigError;
use crate::radar::transform::TransformError;
use crate::render::{BackendError, DrawQueueError};

/// Errors surfaced by a radar session tick or setup
#[derive(Debug, thiserror::Error)]
pub enum RadarError {
    /// Settings could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Draw queue protocol violation (capacity overrun, draw before finish, ...)
    #[error("Draw queue error: {0}")]
    DrawQueue(#[from] DrawQueueError),

    /// Coordinate transform misuse
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Rendering backend rejected a call outside of queue replay
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}
