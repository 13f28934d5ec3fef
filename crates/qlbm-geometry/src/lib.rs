//! QLBM Boundary Geometry
//!
//! This crate computes the boundary descriptors needed to build the
//! reflection circuits of a quantum lattice Boltzmann simulation. Grid
//! coordinates live in per-dimension qubit registers; each descriptor tells a
//! circuit generator which qubits to flip (or which comparator to use) to
//! target a wall, corner, edge, or point of an axis-aligned obstacle.
//!
//! # Overview
//!
//! A [`GeometryBuilder`] takes an [`Obstacle`] and the number of qubits per
//! dimension, and eagerly computes every descriptor family:
//!
//! - **Faces**: [`FaceDescriptor`] for the inside and outside face at each
//!   bound of each dimension
//! - **Walls**: [`WallDescriptor`] for each face, spanning the other dimensions
//! - **Corners**: [`CornerDescriptor`] for inside, outside, and (2D)
//!   near-corner points
//! - **Edges**: [`EdgeDescriptor`] for corner and near-corner edges (3D)
//! - **Overlap points**: [`OverlapPointDescriptor`] where near-corner edges
//!   meet (3D)
//!
//! Circles are handled separately by [`Circle`], which rasterizes a
//! perimeter and groups it into runs.
//!
//! # Example
//!
//! ```rust
//! use qlbm_geometry::{BoundaryCondition, GeometryBuilder, Obstacle};
//!
//! let obstacle = Obstacle::new(vec![(5, 6), (2, 10)], BoundaryCondition::Specular).unwrap();
//! let geometry = GeometryBuilder::new(obstacle, &[4, 4]).unwrap();
//!
//! // Lower inside wall in x sits at coordinate 5 = 0b0101.
//! let wall = &geometry.walls_inside()[0][0];
//! assert_eq!(wall.face().zero_bits(), &[1, 3]);
//! assert_eq!(wall.lower_bounds(), &[2]);
//!
//! assert_eq!(geometry.corners_inside().len(), 4);
//! assert_eq!(geometry.near_corner_points().len(), 8);
//! assert!(geometry.corner_edges().is_empty());
//! ```

pub mod builder;
pub mod circle;
pub mod corner;
pub mod diagnostics;
pub mod edge;
pub mod encoding;
pub mod error;
pub mod face;
pub mod obstacle;
pub mod overlap;
pub mod record;
pub mod wall;

pub use builder::GeometryBuilder;
pub use circle::{Circle, PerimeterSegments, Point, Segment};
pub use corner::{CornerDescriptor, near_corner_inversion};
pub use diagnostics::{BuildReport, DiagnosticsSink, NullSink, TracingSink};
pub use edge::{EdgeDescriptor, EdgeKey, EdgeKind, PinnedDim, PinnedSlot};
pub use encoding::{bit_width, bits_equal_to_zero, dimension_index, dimension_letter};
pub use error::{GeometryError, GeometryResult};
pub use face::{Bound, FaceDescriptor, FaceKind, FaceTable, Side};
pub use obstacle::{BoundaryCondition, Obstacle};
pub use overlap::OverlapPointDescriptor;
pub use record::{CuboidRecord, ObstacleRecord, SphereRecord};
pub use wall::WallDescriptor;
