//! Serializable obstacle records.
//!
//! Records are the plain-data form of obstacles as they appear in lattice
//! configuration files:
//!
//! ```json
//! {"shape": "cuboid", "x": [5, 6], "y": [2, 10], "boundary": "specular"}
//! {"shape": "sphere", "center": [8, 8], "radius": 4, "boundary": "bounceback"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GeometryResult;
use crate::obstacle::BoundaryCondition;

/// A serialized obstacle, tagged by its `shape`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ObstacleRecord {
    /// An axis-aligned cuboid.
    Cuboid(CuboidRecord),
    /// A sphere; only circles in 2D are encoded.
    Sphere(SphereRecord),
}

impl ObstacleRecord {
    /// The boundary condition tag of either shape.
    pub fn boundary(&self) -> BoundaryCondition {
        match self {
            ObstacleRecord::Cuboid(c) => c.boundary,
            ObstacleRecord::Sphere(s) => s.boundary,
        }
    }

    /// The `shape` tag.
    pub fn shape(&self) -> &'static str {
        match self {
            ObstacleRecord::Cuboid(_) => "cuboid",
            ObstacleRecord::Sphere(_) => "sphere",
        }
    }

    /// Number of dimensions the record describes.
    pub fn num_dims(&self) -> usize {
        match self {
            ObstacleRecord::Cuboid(c) => 1 + usize::from(c.y.is_some()) + usize::from(c.z.is_some()),
            ObstacleRecord::Sphere(s) => s.center.len(),
        }
    }

    /// Parse a single record from JSON.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, an unknown shape, or missing fields.
    pub fn from_json(json: &str) -> GeometryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as compact JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> GeometryResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Inclusive per-dimension bounds of a cuboid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuboidRecord {
    /// Bounds along x.
    pub x: [u32; 2],
    /// Bounds along y, for 2D and 3D obstacles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<[u32; 2]>,
    /// Bounds along z, for 3D obstacles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<[u32; 2]>,
    /// Boundary condition tag.
    pub boundary: BoundaryCondition,
}

/// Center and radius of a sphere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SphereRecord {
    /// One coordinate per dimension.
    pub center: Vec<u32>,
    /// Radius in grid units.
    pub radius: u32,
    /// Boundary condition tag.
    pub boundary: BoundaryCondition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cuboid() {
        let record =
            ObstacleRecord::from_json(r#"{"shape":"cuboid","x":[5,6],"y":[2,10],"boundary":"specular"}"#)
                .unwrap();
        assert_eq!(record.shape(), "cuboid");
        assert_eq!(record.num_dims(), 2);
        assert_eq!(record.boundary(), BoundaryCondition::Specular);
        let ObstacleRecord::Cuboid(cuboid) = record else {
            panic!("expected a cuboid");
        };
        assert_eq!(cuboid.y, Some([2, 10]));
        assert_eq!(cuboid.z, None);
    }

    #[test]
    fn test_parse_sphere() {
        let record = ObstacleRecord::from_json(
            r#"{"shape":"sphere","center":[8,8],"radius":4,"boundary":"bounceback"}"#,
        )
        .unwrap();
        assert_eq!(record.num_dims(), 2);
        assert_eq!(record.boundary(), BoundaryCondition::Bounceback);
    }

    #[test]
    fn test_cuboid_json_omits_missing_dimensions() {
        let record = ObstacleRecord::Cuboid(CuboidRecord {
            x: [1, 2],
            y: None,
            z: None,
            boundary: BoundaryCondition::Bounceback,
        });
        let json = record.to_json().unwrap();
        assert!(!json.contains("\"y\""));
        assert_eq!(ObstacleRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_rejects_malformed_records() {
        assert!(ObstacleRecord::from_json(r#"{"shape":"torus","boundary":"specular"}"#).is_err());
        assert!(ObstacleRecord::from_json(r#"{"shape":"cuboid","x":[1,2,3],"boundary":"specular"}"#).is_err());
        assert!(ObstacleRecord::from_json(r#"{"shape":"cuboid","x":[1,2],"boundary":"sticky"}"#).is_err());
    }
}
