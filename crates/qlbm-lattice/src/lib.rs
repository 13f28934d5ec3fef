//! QLBM Lattice Configuration
//!
//! Loads lattice configurations from JSON or YAML, validates them, and turns
//! their obstacles into boundary geometry with [`qlbm_geometry`].
//!
//! # Example
//!
//! ```rust
//! use qlbm_geometry::BoundaryCondition;
//! use qlbm_lattice::Lattice;
//!
//! let lattice = Lattice::from_json_str(r#"{
//!     "lattice": {"dim": {"x": 16, "y": 16}, "velocities": "D2Q4"},
//!     "geometry": [
//!         {"shape": "cuboid", "x": [5, 6], "y": [2, 10], "boundary": "specular"},
//!         {"shape": "sphere", "center": [8, 8], "radius": 3, "boundary": "bounceback"}
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(lattice.bit_widths(), vec![4, 4]);
//!
//! let geometry = lattice.geometry().unwrap();
//! assert_eq!(geometry.blocks(BoundaryCondition::Specular).len(), 1);
//! assert_eq!(geometry.circles(BoundaryCondition::Bounceback).len(), 1);
//! ```

pub mod config;
pub mod error;

pub use config::{BoundaryGroup, Lattice, LatticeConfig, LatticeGeometry, LatticeSection, Velocities};
pub use error::{LatticeError, LatticeResult};
