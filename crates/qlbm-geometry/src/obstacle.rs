//! Axis-aligned solid obstacles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::record::{CuboidRecord, ObstacleRecord};

/// Boundary condition applied at an obstacle's surface.
///
/// The geometry encoder treats this as an opaque tag and passes it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryCondition {
    /// Mirror reflection: only the velocity component normal to the wall
    /// is reversed.
    Specular,
    /// Bounce-back: every velocity component is reversed.
    Bounceback,
}

impl BoundaryCondition {
    /// All supported conditions, in grouping order.
    pub const ALL: [BoundaryCondition; 2] =
        [BoundaryCondition::Specular, BoundaryCondition::Bounceback];

    /// The serialized name.
    pub const fn as_str(self) -> &'static str {
        match self {
            BoundaryCondition::Specular => "specular",
            BoundaryCondition::Bounceback => "bounceback",
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryCondition {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bc| bc.as_str() == s)
            .ok_or_else(|| GeometryError::InvalidRecord(format!("unknown boundary condition '{s}'")))
    }
}

/// An axis-aligned cuboid (rectangle in 2D, segment in 1D) of solid cells.
///
/// Bounds are inclusive: the obstacle covers every grid point whose
/// coordinate in each dimension lies in `[lower, upper]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Obstacle {
    bounds: Vec<(u32, u32)>,
    boundary: BoundaryCondition,
}

impl Obstacle {
    /// Create an obstacle from one `(lower, upper)` pair per dimension.
    ///
    /// # Errors
    ///
    /// Fails if there are not 1 to 3 pairs, or if any pair has
    /// `lower > upper`.
    pub fn new(bounds: Vec<(u32, u32)>, boundary: BoundaryCondition) -> GeometryResult<Self> {
        if !(1..=3).contains(&bounds.len()) {
            return Err(GeometryError::UnsupportedDimensions(bounds.len()));
        }
        if let Some((dim, &(lower, upper))) =
            bounds.iter().enumerate().find(|(_, (lo, hi))| lo > hi)
        {
            return Err(GeometryError::InvertedBounds { dim, lower, upper });
        }
        Ok(Self { bounds, boundary })
    }

    /// The `(lower, upper)` pairs, one per dimension.
    pub fn bounds(&self) -> &[(u32, u32)] {
        &self.bounds
    }

    /// Number of dimensions.
    pub fn num_dims(&self) -> usize {
        self.bounds.len()
    }

    /// The boundary condition tag.
    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    /// Check that the obstacle fits a grid whose largest coordinate in each
    /// dimension is `grid_max[d]`.
    ///
    /// # Errors
    ///
    /// Fails on a dimension mismatch or when an upper bound exceeds the grid.
    pub fn validate_within(&self, grid_max: &[u32]) -> GeometryResult<()> {
        if grid_max.len() != self.num_dims() {
            return Err(GeometryError::BitWidthCountMismatch {
                bounds: self.num_dims(),
                widths: grid_max.len(),
            });
        }
        for (dim, (&(_, upper), &limit)) in self.bounds.iter().zip(grid_max).enumerate() {
            if upper > limit {
                return Err(GeometryError::BoundOutOfGrid {
                    dim,
                    bound: upper,
                    limit,
                });
            }
        }
        Ok(())
    }

    /// Whether `gridpoint` lies within the obstacle (inclusive bounds).
    ///
    /// Points with a different number of coordinates are never contained.
    pub fn contains_gridpoint(&self, gridpoint: &[u32]) -> bool {
        gridpoint.len() == self.bounds.len()
            && gridpoint
                .iter()
                .zip(&self.bounds)
                .all(|(&c, &(lo, hi))| lo <= c && c <= hi)
    }

    /// The serializable record of this obstacle.
    pub fn to_record(&self) -> ObstacleRecord {
        let pair = |dim: usize| self.bounds.get(dim).map(|&(lo, hi)| [lo, hi]);
        ObstacleRecord::Cuboid(CuboidRecord {
            x: pair(0).unwrap_or_default(),
            y: pair(1),
            z: pair(2),
            boundary: self.boundary,
        })
    }

    /// Rebuild an obstacle from its record.
    ///
    /// # Errors
    ///
    /// Fails on a `z` pair without a `y` pair, or on invalid bounds.
    pub fn from_record(record: &CuboidRecord) -> GeometryResult<Self> {
        let mut bounds = vec![(record.x[0], record.x[1])];
        match (record.y, record.z) {
            (Some(y), z) => {
                bounds.push((y[0], y[1]));
                if let Some(z) = z {
                    bounds.push((z[0], z[1]));
                }
            }
            (None, Some(_)) => {
                return Err(GeometryError::InvalidRecord(
                    "cuboid has z bounds but no y bounds".to_string(),
                ));
            }
            (None, None) => {}
        }
        Self::new(bounds, record.boundary)
    }

    /// JSON form of [`Obstacle::to_record`].
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> GeometryResult<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }
}
