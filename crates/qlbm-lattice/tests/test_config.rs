//! Loading and validating lattice configurations.

use qlbm_geometry::{BoundaryCondition, GeometryError, ObstacleRecord};
use qlbm_lattice::{Lattice, LatticeError, Velocities};

// ============================================================================
// Test helpers
// ============================================================================

const LATTICE_2D: &str = r#"{
    "lattice": {"dim": {"x": 16, "y": 16}, "velocities": "D2Q4"},
    "geometry": [
        {"shape": "cuboid", "x": [5, 6], "y": [2, 10], "boundary": "specular"},
        {"shape": "cuboid", "x": [10, 13], "y": [1, 3], "boundary": "bounceback"},
        {"shape": "sphere", "center": [8, 8], "radius": 3, "boundary": "bounceback"}
    ]
}"#;

const LATTICE_3D_YAML: &str = "
lattice:
  dim:
    x: 16
    y: 16
    z: 8
  velocities:
    x: 4
    y: 4
    z: 4
geometry:
  - shape: cuboid
    x: [5, 6]
    y: [2, 10]
    z: [3, 7]
    boundary: bounceback
";

fn with_geometry(dim: &str, geometry: &str) -> String {
    format!(r#"{{"lattice": {{"dim": {dim}, "velocities": "D2Q4"}}, "geometry": [{geometry}]}}"#)
}

fn load_err(json: &str) -> LatticeError {
    Lattice::from_json_str(json).unwrap_err()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_json() {
    let lattice = Lattice::from_json_str(LATTICE_2D).unwrap();
    assert_eq!(lattice.num_dims(), 2);
    assert_eq!(lattice.extents(), &[16, 16]);
    assert_eq!(lattice.grid_max(), vec![15, 15]);
    assert_eq!(lattice.bit_widths(), vec![4, 4]);
    assert_eq!(lattice.velocities(), &Velocities::Named("D2Q4".to_string()));
    assert_eq!(lattice.obstacles().len(), 3);
}

#[test]
fn test_load_yaml() {
    let lattice = Lattice::from_yaml_str(LATTICE_3D_YAML).unwrap();
    assert_eq!(lattice.extents(), &[16, 16, 8]);
    assert_eq!(lattice.bit_widths(), vec![4, 4, 3]);
    assert!(matches!(lattice.velocities(), Velocities::PerDimension(v) if v.len() == 3));
}

#[test]
fn test_missing_geometry_section() {
    let lattice =
        Lattice::from_json_str(r#"{"lattice": {"dim": {"x": 8}, "velocities": "D1Q2"}}"#).unwrap();
    assert!(lattice.obstacles().is_empty());
    let geometry = lattice.geometry().unwrap();
    assert_eq!(geometry.num_obstacles(), 0);
    assert_eq!(geometry.groups().count(), 2);
}

#[test]
fn test_json_round_trip() {
    let lattice = Lattice::from_json_str(LATTICE_2D).unwrap();
    let reloaded = Lattice::from_json_str(&lattice.to_json().unwrap()).unwrap();
    assert_eq!(reloaded, lattice);

    let yaml = Lattice::from_yaml_str(LATTICE_3D_YAML).unwrap();
    assert_eq!(Lattice::from_json_str(&yaml.to_json().unwrap()).unwrap(), yaml);
}

#[test]
fn test_from_path() {
    let dir = std::env::temp_dir().join(format!("qlbm-lattice-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let json_path = dir.join("lattice.json");
    std::fs::write(&json_path, LATTICE_2D).unwrap();
    assert_eq!(Lattice::from_path(&json_path).unwrap().num_dims(), 2);

    let yaml_path = dir.join("lattice.yml");
    std::fs::write(&yaml_path, LATTICE_3D_YAML).unwrap();
    assert_eq!(Lattice::from_path(&yaml_path).unwrap().num_dims(), 3);

    assert!(matches!(
        Lattice::from_path(dir.join("lattice.toml")),
        Err(LatticeError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        Lattice::from_path(dir.join("missing.json")),
        Err(LatticeError::Io(_))
    ));

    std::fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_geometry_grouped_by_boundary() {
    let geometry = Lattice::from_json_str(LATTICE_2D).unwrap().geometry().unwrap();

    let order: Vec<BoundaryCondition> = geometry.groups().map(|g| g.boundary()).collect();
    assert_eq!(order, vec![BoundaryCondition::Specular, BoundaryCondition::Bounceback]);

    assert_eq!(geometry.blocks(BoundaryCondition::Specular).len(), 1);
    assert!(geometry.circles(BoundaryCondition::Specular).is_empty());
    assert_eq!(geometry.blocks(BoundaryCondition::Bounceback).len(), 1);
    assert_eq!(geometry.circles(BoundaryCondition::Bounceback).len(), 1);
    assert_eq!(geometry.num_obstacles(), 3);

    let block = &geometry.blocks(BoundaryCondition::Specular)[0];
    assert_eq!(block.widths(), &[4, 4]);
    assert_eq!(block.walls_inside()[0][0].face().zero_bits(), &[1, 3]);
    assert_eq!(block.corners_inside()[0].zero_bits(), vec![1, 3, 4, 6, 7]);
}

#[test]
fn test_geometry_3d() {
    let geometry = Lattice::from_yaml_str(LATTICE_3D_YAML).unwrap().geometry().unwrap();
    let blocks = geometry.blocks(BoundaryCondition::Bounceback);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].widths(), &[4, 4, 3]);
    assert_eq!(blocks[0].corner_edges().len(), 12);
    assert_eq!(blocks[0].overlap_points().len(), 24);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_rejects_unsupported_dimensions() {
    let json = r#"{"lattice": {"dim": {"x": 4, "y": 4, "z": 4, "w": 4}, "velocities": "D4Q8"}}"#;
    assert!(matches!(load_err(json), LatticeError::UnsupportedDimensions(4)));
}

#[test]
fn test_rejects_non_power_of_two() {
    let json = r#"{"lattice": {"dim": {"x": 16, "y": 10}, "velocities": "D2Q4"}}"#;
    assert!(matches!(
        load_err(json),
        LatticeError::NonPowerOfTwoExtent { dim: 'y', extent: 10 }
    ));
}

#[test]
fn test_rejects_mismatched_velocities() {
    let json = r#"{"lattice": {"dim": {"x": 16, "y": 16}, "velocities": "D3Q6"}}"#;
    assert!(matches!(load_err(json), LatticeError::InvalidVelocities(_)));
}

#[test]
fn test_rejects_cuboid_dimension_mismatch() {
    let json = with_geometry(
        r#"{"x": 16, "y": 16}"#,
        r#"{"shape": "cuboid", "x": [1, 2], "boundary": "specular"}"#,
    );
    assert!(matches!(
        load_err(&json),
        LatticeError::ObstacleDimensions {
            index: 1,
            found: 1,
            expected: 2
        }
    ));
}

#[test]
fn test_rejects_non_increasing_bounds() {
    let json = with_geometry(
        r#"{"x": 16, "y": 16}"#,
        r#"{"shape": "cuboid", "x": [1, 2], "y": [1, 3], "boundary": "specular"},
           {"shape": "cuboid", "x": [6, 5], "y": [1, 3], "boundary": "specular"}"#,
    );
    assert!(matches!(
        load_err(&json),
        LatticeError::InvalidObstacle {
            index: 2,
            source: GeometryError::InvertedBounds { dim: 0, .. }
        }
    ));
}

#[test]
fn test_rejects_out_of_grid_bounds() {
    let json = with_geometry(
        r#"{"x": 16, "y": 8}"#,
        r#"{"shape": "cuboid", "x": [1, 2], "y": [1, 8], "boundary": "bounceback"}"#,
    );
    assert!(matches!(
        load_err(&json),
        LatticeError::InvalidObstacle {
            index: 1,
            source: GeometryError::BoundOutOfGrid {
                dim: 1,
                bound: 8,
                limit: 7
            }
        }
    ));
}

#[test]
fn test_rejects_bad_spheres() {
    let zero_radius = with_geometry(
        r#"{"x": 16, "y": 16}"#,
        r#"{"shape": "sphere", "center": [4, 4], "radius": 0, "boundary": "specular"}"#,
    );
    assert!(matches!(
        load_err(&zero_radius),
        LatticeError::InvalidObstacle {
            source: GeometryError::InvalidRadius(0),
            ..
        }
    ));

    let wrong_center = with_geometry(
        r#"{"x": 16, "y": 16}"#,
        r#"{"shape": "sphere", "center": [4, 4, 4], "radius": 2, "boundary": "specular"}"#,
    );
    assert!(matches!(
        load_err(&wrong_center),
        LatticeError::ObstacleDimensions { found: 3, .. }
    ));

    let json = r#"{"lattice": {"dim": {"x": 8, "y": 8, "z": 8}, "velocities": "D3Q6"},
        "geometry": [{"shape": "sphere", "center": [4, 4, 4], "radius": 2, "boundary": "specular"}]}"#;
    assert!(matches!(
        load_err(json),
        LatticeError::UnsupportedSphere { index: 1, dims: 3 }
    ));
}

#[test]
fn test_rejects_unknown_shape_and_boundary() {
    let shape = with_geometry(
        r#"{"x": 16, "y": 16}"#,
        r#"{"shape": "torus", "boundary": "specular"}"#,
    );
    assert!(matches!(load_err(&shape), LatticeError::Json(_)));

    let boundary = with_geometry(
        r#"{"x": 16, "y": 16}"#,
        r#"{"shape": "cuboid", "x": [1, 2], "y": [1, 2], "boundary": "periodic"}"#,
    );
    assert!(matches!(load_err(&boundary), LatticeError::Json(_)));
}

#[test]
fn test_error_messages_number_obstacles_from_one() {
    let json = with_geometry(
        r#"{"x": 16, "y": 16}"#,
        r#"{"shape": "cuboid", "x": [1, 2], "boundary": "specular"}"#,
    );
    assert_eq!(
        load_err(&json).to_string(),
        "Obstacle 1 has 1 dimensions whereas the lattice has 2."
    );
}

#[test]
fn test_records_keep_configuration_order() {
    let lattice = Lattice::from_json_str(LATTICE_2D).unwrap();
    let shapes: Vec<&str> = lattice.obstacles().iter().map(ObstacleRecord::shape).collect();
    assert_eq!(shapes, vec!["cuboid", "cuboid", "sphere"]);
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use proptest::prelude::*;
    use qlbm_lattice::Lattice;

    proptest! {
        #[test]
        fn bit_widths_follow_extents(exponents in prop::collection::vec(0_u32..=10, 1..=3)) {
            let dim: Vec<String> = exponents
                .iter()
                .zip(["x", "y", "z"])
                .map(|(e, letter)| format!("\"{letter}\": {}", 1_u32 << e))
                .collect();
            let json = format!(
                r#"{{"lattice": {{"dim": {{{}}}, "velocities": "D{}Q4"}}}}"#,
                dim.join(", "),
                exponents.len()
            );
            let lattice = Lattice::from_json_str(&json).unwrap();
            let expected: Vec<u32> = exponents.iter().map(|&e| e.max(1)).collect();
            prop_assert_eq!(lattice.bit_widths(), expected);
        }
    }
}
