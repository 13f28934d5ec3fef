//! Lattice configuration error types.

use qlbm_geometry::GeometryError;
use thiserror::Error;

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors raised while loading or validating a lattice configuration.
///
/// Obstacles are numbered from 1 in the order they appear in the
/// configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// Reading the configuration file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON input could not be parsed or output could not be written.
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML input could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// The file extension does not name a supported format.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Only 1, 2 and 3 dimensional lattices are supported.
    #[error("Only 1, 2, and 3-dimensional lattices are supported. Provided lattice has {0} dimensions.")]
    UnsupportedDimensions(usize),

    /// A key of `lattice.dim` is not one of `x`, `y`, `z`, or a lower
    /// dimension is missing.
    #[error("Lattice dimensions must be named x, y, z in order; missing '{0}'")]
    MissingDimension(char),

    /// A dimension does not have a power-of-two number of grid points.
    #[error("Lattice extent {extent} in dimension {dim} is not a power of two")]
    NonPowerOfTwoExtent {
        /// Dimension letter.
        dim: char,
        /// Number of grid points supplied.
        extent: u32,
    },

    /// The velocity section does not agree with the lattice.
    #[error("Invalid velocity specification: {0}")]
    InvalidVelocities(String),

    /// An obstacle's dimensionality differs from the lattice's.
    #[error("Obstacle {index} has {found} dimensions whereas the lattice has {expected}.")]
    ObstacleDimensions {
        /// 1-based obstacle position.
        index: usize,
        /// Dimensions of the obstacle.
        found: usize,
        /// Dimensions of the lattice.
        expected: usize,
    },

    /// Spheres can only be placed on two-dimensional lattices.
    #[error("Obstacle {index}: spheres are unsupported on {dims}-dimensional lattices.")]
    UnsupportedSphere {
        /// 1-based obstacle position.
        index: usize,
        /// Dimensions of the lattice.
        dims: usize,
    },

    /// An obstacle failed geometric validation.
    #[error("Obstacle {index} is invalid: {source}")]
    InvalidObstacle {
        /// 1-based obstacle position.
        index: usize,
        /// The underlying geometry error.
        #[source]
        source: GeometryError,
    },

    /// Building geometry from an already validated lattice failed.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

impl From<serde_json::Error> for LatticeError {
    fn from(e: serde_json::Error) -> Self {
        LatticeError::Json(e.to_string())
    }
}

impl From<serde_yaml_ng::Error> for LatticeError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        LatticeError::Yaml(e.to_string())
    }
}

impl From<std::io::Error> for LatticeError {
    fn from(e: std::io::Error) -> Self {
        LatticeError::Io(e.to_string())
    }
}
