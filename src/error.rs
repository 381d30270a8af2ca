//! Error types for frame transformations

use thiserror::Error;

/// Result alias used throughout the crate
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors surfaced by frame transformations.
///
/// Validation failures (shapes, broadcast counts) abort a call before any
/// rotation is applied. Capability absence is only reported on the explicit
/// high-precision entry points; the auto entry points fall back instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("shape mismatch: x: {x:?}  y: {y:?}  z: {z:?}")]
    ShapeMismatch {
        x: Vec<usize>,
        y: Vec<usize>,
        z: Vec<usize>,
    },

    #[error("shape mismatch: {points} positions but {angles} sidereal angles")]
    AngleCountMismatch { points: usize, angles: usize },

    #[error("shape mismatch: {points} positions but {instants} observation instants")]
    InstantCountMismatch { points: usize, instants: usize },

    #[error("high-precision frame service unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("frame service '{service}' failed: {message}")]
    Service { service: String, message: String },

    #[error("frame service '{service}' returned a non-finite vector at index {index}")]
    NonFiniteResult { service: String, index: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Errors reported by a [`FrameService`](crate::iers::FrameService) implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The capability (model, data, engine) is not present in this environment.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The capability is present but could not produce a result.
    #[error("{0}")]
    Failed(String),
}
