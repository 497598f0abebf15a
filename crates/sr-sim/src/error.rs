//! Simulation-level error type.

use thiserror::Error;

use sr_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("region load error: {0}")]
    Region(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
