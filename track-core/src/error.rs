//! Error types for editor operations.

use thiserror::Error;

use crate::board::GridCoordinate;

/// Result type for editor operations.
pub type TrackResult<T> = Result<T, TrackError>;

/// Errors that can occur in editor operations.
#[derive(Debug, Error)]
pub enum TrackError {
    /// Target cell already holds an element.
    #[error("Cell ({}, {}) is already occupied", .0.row, .0.col)]
    Occupied(GridCoordinate),

    /// Source cell holds no element.
    #[error("No element at ({}, {})", .0.row, .0.col)]
    NotFound(GridCoordinate),

    /// Coordinate out of bounds or malformed input data.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
