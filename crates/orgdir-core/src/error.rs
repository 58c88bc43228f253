//! Error types for the directory core.

use crate::ids::ActivityId;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when constructing domain values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude must be within [-90, 90], got {0}")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude must be within [-180, 180], got {0}")]
    LongitudeOutOfRange(f64),

    /// The activity hierarchy contains a cycle.
    #[error("activity hierarchy contains a cycle through {0}")]
    CyclicHierarchy(ActivityId),
}
