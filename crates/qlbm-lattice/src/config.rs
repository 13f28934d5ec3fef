//! Lattice configuration files.
//!
//! A configuration names the grid extent per dimension, the velocity
//! discretization, and a list of obstacles:
//!
//! ```yaml
//! lattice:
//!   dim: { x: 16, y: 16 }
//!   velocities: D2Q4
//! geometry:
//!   - { shape: cuboid, x: [5, 6], y: [2, 10], boundary: specular }
//!   - { shape: sphere, center: [8, 8], radius: 3, boundary: bounceback }
//! ```
//!
//! Every check runs when the configuration is loaded, so a [`Lattice`] that
//! exists is always valid.

use std::collections::BTreeMap;
use std::path::Path;

use qlbm_geometry::{
    BoundaryCondition, Circle, GeometryBuilder, Obstacle, ObstacleRecord, bit_width,
    dimension_letter,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LatticeError, LatticeResult};

/// On-disk form of a lattice configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Grid and velocity settings.
    pub lattice: LatticeSection,

    /// Obstacles placed on the grid.
    #[serde(default)]
    pub geometry: Vec<ObstacleRecord>,
}

/// The `lattice` section of a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeSection {
    /// Number of grid points per dimension letter.
    pub dim: BTreeMap<String, u32>,

    /// Velocity discretization, passed through unchanged.
    pub velocities: Velocities,
}

/// Velocity discretization of a lattice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Velocities {
    /// A `DdQq` name such as `"D2Q4"`.
    Named(String),
    /// Number of velocities per dimension letter.
    PerDimension(BTreeMap<String, u32>),
}

/// A validated lattice configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    extents: Vec<u32>,
    velocities: Velocities,
    obstacles: Vec<ObstacleRecord>,
}

impl Lattice {
    /// Validate a parsed configuration.
    ///
    /// # Errors
    ///
    /// Fails on the first invalid extent, velocity setting, or obstacle.
    pub fn from_config(config: LatticeConfig) -> LatticeResult<Self> {
        let extents = parse_extents(&config.lattice.dim)?;
        validate_velocities(&config.lattice.velocities, extents.len())?;

        let grid_max: Vec<u32> = extents.iter().map(|&n| n - 1).collect();
        for (i, record) in config.geometry.iter().enumerate() {
            validate_obstacle(i + 1, record, &grid_max)?;
            debug!(
                index = i + 1,
                shape = record.shape(),
                boundary = %record.boundary(),
                "Validated obstacle"
            );
        }

        info!(
            num_dims = extents.len(),
            obstacles = config.geometry.len(),
            "Loaded lattice configuration"
        );
        Ok(Self {
            extents,
            velocities: config.lattice.velocities,
            obstacles: config.geometry,
        })
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or an invalid configuration.
    pub fn from_json_str(json: &str) -> LatticeResult<Self> {
        Self::from_config(serde_json::from_str(json)?)
    }

    /// Parse and validate a YAML configuration.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or an invalid configuration.
    pub fn from_yaml_str(yaml: &str) -> LatticeResult<Self> {
        Self::from_config(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a configuration file. `.json` files are read as JSON, `.yaml`
    /// and `.yml` files as YAML.
    ///
    /// # Errors
    ///
    /// Fails on an unknown extension, an unreadable file, or an invalid
    /// configuration.
    pub fn from_path<P: AsRef<Path>>(path: P) -> LatticeResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?),
            Some("yaml" | "yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?),
            _ => Err(LatticeError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Number of dimensions.
    pub fn num_dims(&self) -> usize {
        self.extents.len()
    }

    /// Number of grid points per dimension.
    pub fn extents(&self) -> &[u32] {
        &self.extents
    }

    /// Largest coordinate per dimension.
    pub fn grid_max(&self) -> Vec<u32> {
        self.extents.iter().map(|&n| n - 1).collect()
    }

    /// Qubits needed to address each dimension.
    pub fn bit_widths(&self) -> Vec<u32> {
        self.extents.iter().map(|&n| bit_width(n - 1)).collect()
    }

    /// The velocity discretization.
    pub fn velocities(&self) -> &Velocities {
        &self.velocities
    }

    /// Obstacle records in configuration order.
    pub fn obstacles(&self) -> &[ObstacleRecord] {
        &self.obstacles
    }

    /// The configuration this lattice was loaded from.
    pub fn to_config(&self) -> LatticeConfig {
        let dim = self
            .extents
            .iter()
            .enumerate()
            .map(|(d, &n)| (dimension_letter(d).to_string(), n))
            .collect();
        LatticeConfig {
            lattice: LatticeSection {
                dim,
                velocities: self.velocities.clone(),
            },
            geometry: self.obstacles.clone(),
        }
    }

    /// Render as pretty-printed JSON that [`Lattice::from_json_str`] reads
    /// back.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> LatticeResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_config())?)
    }

    /// Build the boundary geometry of every obstacle.
    ///
    /// # Errors
    ///
    /// Only fails if an obstacle could not be built, which validation at
    /// load time rules out.
    pub fn geometry(&self) -> LatticeResult<LatticeGeometry> {
        let widths = self.bit_widths();
        let mut groups: BTreeMap<BoundaryCondition, BoundaryGroup> = BoundaryCondition::ALL
            .into_iter()
            .map(|bc| (bc, BoundaryGroup::new(bc)))
            .collect();

        for record in &self.obstacles {
            let group = groups
                .entry(record.boundary())
                .or_insert_with(|| BoundaryGroup::new(record.boundary()));
            match record {
                ObstacleRecord::Cuboid(cuboid) => {
                    let obstacle = Obstacle::from_record(cuboid)?;
                    group.blocks.push(GeometryBuilder::new(obstacle, &widths)?);
                }
                ObstacleRecord::Sphere(sphere) => {
                    group.circles.push(Circle::from_record(sphere)?);
                }
            }
        }

        let geometry = LatticeGeometry { groups };
        info!(
            blocks = geometry.groups().map(|g| g.blocks.len()).sum::<usize>(),
            circles = geometry.groups().map(|g| g.circles.len()).sum::<usize>(),
            "Built lattice geometry"
        );
        Ok(geometry)
    }
}

/// Boundary geometry of a lattice, grouped by boundary condition.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeGeometry {
    groups: BTreeMap<BoundaryCondition, BoundaryGroup>,
}

impl LatticeGeometry {
    /// Every group, specular first. Groups without obstacles are included.
    pub fn groups(&self) -> impl Iterator<Item = &BoundaryGroup> {
        self.groups.values()
    }

    /// The group of one boundary condition.
    pub fn group(&self, boundary: BoundaryCondition) -> Option<&BoundaryGroup> {
        self.groups.get(&boundary)
    }

    /// Cuboid geometries with the given boundary condition.
    pub fn blocks(&self, boundary: BoundaryCondition) -> &[GeometryBuilder] {
        self.group(boundary).map(BoundaryGroup::blocks).unwrap_or_default()
    }

    /// Circles with the given boundary condition.
    pub fn circles(&self, boundary: BoundaryCondition) -> &[Circle] {
        self.group(boundary).map(BoundaryGroup::circles).unwrap_or_default()
    }

    /// Total number of obstacles across all groups.
    pub fn num_obstacles(&self) -> usize {
        self.groups().map(BoundaryGroup::len).sum()
    }
}

/// Obstacles sharing one boundary condition, in configuration order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryGroup {
    boundary: BoundaryCondition,
    blocks: Vec<GeometryBuilder>,
    circles: Vec<Circle>,
}

impl BoundaryGroup {
    fn new(boundary: BoundaryCondition) -> Self {
        Self {
            boundary,
            blocks: Vec::new(),
            circles: Vec::new(),
        }
    }

    /// The shared boundary condition.
    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    /// Cuboid geometries.
    pub fn blocks(&self) -> &[GeometryBuilder] {
        &self.blocks
    }

    /// Circles.
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Number of obstacles in the group.
    pub fn len(&self) -> usize {
        self.blocks.len() + self.circles.len()
    }

    /// Whether the group holds no obstacles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_extents(dim: &BTreeMap<String, u32>) -> LatticeResult<Vec<u32>> {
    if !(1..=3).contains(&dim.len()) {
        return Err(LatticeError::UnsupportedDimensions(dim.len()));
    }
    (0..dim.len())
        .map(|d| {
            let letter = dimension_letter(d);
            let extent = *dim
                .get(&letter.to_string())
                .ok_or(LatticeError::MissingDimension(letter))?;
            if !extent.is_power_of_two() {
                return Err(LatticeError::NonPowerOfTwoExtent { dim: letter, extent });
            }
            Ok(extent)
        })
        .collect()
}

fn validate_velocities(velocities: &Velocities, num_dims: usize) -> LatticeResult<()> {
    match velocities {
        Velocities::Named(name) => {
            let malformed = || {
                LatticeError::InvalidVelocities(format!(
                    "{name}. Expected a format like 'D2Q4'."
                ))
            };
            let spec = name.to_ascii_uppercase();
            let (d, q) = spec
                .strip_prefix('D')
                .and_then(|rest| rest.split_once('Q'))
                .ok_or_else(malformed)?;
            let d: usize = d.parse().map_err(|_| malformed())?;
            q.parse::<u32>().map_err(|_| malformed())?;
            if d != num_dims {
                return Err(LatticeError::InvalidVelocities(format!(
                    "velocity dimensions ({d}) do not match lattice dimensions ({num_dims})"
                )));
            }
        }
        Velocities::PerDimension(per_dim) => {
            if per_dim.len() != num_dims {
                return Err(LatticeError::InvalidVelocities(
                    "lattice configuration dimensionality is inconsistent".to_string(),
                ));
            }
            for d in 0..num_dims {
                let letter = dimension_letter(d).to_string();
                if !per_dim.contains_key(&letter) {
                    return Err(LatticeError::InvalidVelocities(format!(
                        "no velocity count for dimension '{letter}'"
                    )));
                }
            }
        }
    }
    Ok(())
}

fn validate_obstacle(index: usize, record: &ObstacleRecord, grid_max: &[u32]) -> LatticeResult<()> {
    let expected = grid_max.len();
    if record.num_dims() != expected {
        return Err(LatticeError::ObstacleDimensions {
            index,
            found: record.num_dims(),
            expected,
        });
    }
    let invalid = |source| LatticeError::InvalidObstacle { index, source };
    match record {
        ObstacleRecord::Cuboid(cuboid) => Obstacle::from_record(cuboid)
            .and_then(|obstacle| obstacle.validate_within(grid_max))
            .map_err(invalid),
        ObstacleRecord::Sphere(sphere) => {
            if expected != 2 {
                return Err(LatticeError::UnsupportedSphere {
                    index,
                    dims: expected,
                });
            }
            Circle::from_record(sphere).map(|_| ()).map_err(invalid)
        }
    }
}
