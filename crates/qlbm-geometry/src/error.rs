//! Error types for the geometry crate.

use thiserror::Error;

/// Errors produced while validating an obstacle or building its geometry.
///
/// Every variant describes a configuration problem of the caller. Nothing is
/// retried and no partial geometry is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GeometryError {
    /// Only 1, 2 and 3 dimensional obstacles are supported.
    #[error("obstacles must have 1, 2 or 3 dimensions, got {0}")]
    UnsupportedDimensions(usize),

    /// The bit-width list does not line up with the bound pairs.
    #[error("obstacle has {bounds} bound pairs but {widths} bit widths were supplied")]
    BitWidthCountMismatch {
        /// Number of bound pairs.
        bounds: usize,
        /// Number of bit widths.
        widths: usize,
    },

    /// A bit width of zero, or one too large to address with `u32` coordinates.
    #[error("bit width {width} in dimension {dim} is outside 1..=32")]
    InvalidBitWidth {
        /// Offending dimension.
        dim: usize,
        /// Offending width.
        width: u32,
    },

    /// Lower bound exceeds upper bound.
    #[error("bounds in dimension {dim} are not increasing: ({lower}, {upper})")]
    InvertedBounds {
        /// Offending dimension.
        dim: usize,
        /// Lower bound.
        lower: u32,
        /// Upper bound.
        upper: u32,
    },

    /// A bound lies beyond the last grid point of its dimension.
    #[error("bound {bound} in dimension {dim} exceeds the grid extent (largest coordinate {limit})")]
    BoundOutOfGrid {
        /// Offending dimension.
        dim: usize,
        /// Offending bound.
        bound: u32,
        /// Largest valid coordinate.
        limit: u32,
    },

    /// Circles need a positive radius.
    #[error("radius must be a positive integer, got {0}")]
    InvalidRadius(u32),

    /// A serialized obstacle record could not be turned into an obstacle.
    #[error("invalid obstacle record: {0}")]
    InvalidRecord(String),

    /// JSON encoding or decoding of a record failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GeometryError {
    fn from(e: serde_json::Error) -> Self {
        GeometryError::Serialization(e.to_string())
    }
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
