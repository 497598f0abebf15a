//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `sr-spatial`.
///
/// Graph construction and routing are infallible by design (empty graphs and
/// unreachable goals are valid states, not errors); only snapshot loading
/// can fail.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("region snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
