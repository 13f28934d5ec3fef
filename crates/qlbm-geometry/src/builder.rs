//! Eager construction of every boundary descriptor of an obstacle.

use std::time::Instant;

use rustc_hash::FxHashMap;

use crate::corner::CornerDescriptor;
use crate::diagnostics::{BuildReport, DiagnosticsSink, TracingSink};
use crate::edge::{self, EdgeDescriptor, EdgeKey};
use crate::encoding::{cartesian_product, max_value};
use crate::error::{GeometryError, GeometryResult};
use crate::face::{FaceDescriptor, FaceKind, FaceTable, Side};
use crate::obstacle::{BoundaryCondition, Obstacle};
use crate::overlap::{self, OverlapPointDescriptor};
use crate::wall::WallDescriptor;

/// All boundary descriptors of one obstacle, computed once at construction.
///
/// Families that only exist in higher dimensions are empty otherwise:
/// near-corner points are built for 2D obstacles, edges and overlap points
/// for 3D obstacles.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuilder {
    obstacle: Obstacle,
    widths: Vec<u32>,
    faces: FaceTable,
    walls_inside: Vec<[WallDescriptor; 2]>,
    walls_outside: Vec<[WallDescriptor; 2]>,
    corners_inside: Vec<CornerDescriptor>,
    corners_outside: Vec<CornerDescriptor>,
    near_corner_points: Vec<CornerDescriptor>,
    corner_edges: Vec<EdgeDescriptor>,
    near_corner_edges: Vec<EdgeDescriptor>,
    overlap_points: Vec<OverlapPointDescriptor>,
    edge_index: FxHashMap<EdgeKey, usize>,
}

impl GeometryBuilder {
    /// Build the geometry of `obstacle` on a grid with `widths[d]` qubits in
    /// dimension `d`, logging the build through `tracing`.
    ///
    /// # Errors
    ///
    /// Fails if the widths do not match the obstacle's dimensions, if a
    /// width is outside `1..=32`, or if a bound does not fit its width.
    pub fn new(obstacle: Obstacle, widths: &[u32]) -> GeometryResult<Self> {
        Self::with_diagnostics(obstacle, widths, &TracingSink)
    }

    /// Convenience wrapper that validates `bounds` into an [`Obstacle`] first.
    ///
    /// # Errors
    ///
    /// See [`Obstacle::new`] and [`GeometryBuilder::new`].
    pub fn from_bounds(
        bounds: &[(u32, u32)],
        widths: &[u32],
        boundary: BoundaryCondition,
    ) -> GeometryResult<Self> {
        Self::new(Obstacle::new(bounds.to_vec(), boundary)?, widths)
    }

    /// Like [`GeometryBuilder::new`], reporting to `sink` instead.
    ///
    /// # Errors
    ///
    /// See [`GeometryBuilder::new`].
    pub fn with_diagnostics(
        obstacle: Obstacle,
        widths: &[u32],
        sink: &dyn DiagnosticsSink,
    ) -> GeometryResult<Self> {
        let start = Instant::now();
        validate_widths(&obstacle, widths)?;

        let bounds = obstacle.bounds();
        let num_dims = obstacle.num_dims();
        let faces = FaceTable::new(bounds, widths);

        let walls = |side: Side| -> Vec<[WallDescriptor; 2]> {
            faces
                .side(side)
                .iter()
                .map(|pair| pair.clone().map(|face| WallDescriptor::new(face, bounds)))
                .collect()
        };
        let walls_inside = walls(Side::Inside);
        let walls_outside = walls(Side::Outside);

        let corners = |factors: Vec<Vec<FaceDescriptor>>| {
            cartesian_product(&factors)
                .into_iter()
                .map(CornerDescriptor::new)
                .collect::<Vec<_>>()
        };
        let side_factors = |side: Side| -> Vec<Vec<FaceDescriptor>> {
            faces.side(side).iter().map(|pair| pair.to_vec()).collect()
        };
        let corners_inside = corners(side_factors(Side::Inside));
        let corners_outside = corners(side_factors(Side::Outside));

        let near_corner_points = if num_dims == 2 {
            (0..num_dims)
                .flat_map(|outside_dim| {
                    let factors = (0..num_dims)
                        .map(|dim| {
                            let side = if dim == outside_dim {
                                Side::Outside
                            } else {
                                Side::Inside
                            };
                            faces.side(side)[dim].to_vec()
                        })
                        .collect();
                    corners(factors)
                })
                .collect()
        } else {
            Vec::new()
        };

        let corner_edges = edge::corner_edges(&faces, bounds);
        let near_corner_edges = edge::near_corner_edges(&faces, bounds);
        let overlap_points = overlap::overlap_points(&faces);

        let mut edge_index = FxHashMap::default();
        for (i, e) in corner_edges.iter().enumerate() {
            edge_index.insert(e.key(), i);
        }
        for (i, e) in near_corner_edges.iter().enumerate() {
            edge_index.insert(e.key(), i);
        }

        let geometry = Self {
            widths: widths.to_vec(),
            faces,
            walls_inside,
            walls_outside,
            corners_inside,
            corners_outside,
            near_corner_points,
            corner_edges,
            near_corner_edges,
            overlap_points,
            edge_index,
            obstacle,
        };

        sink.geometry_built(&BuildReport {
            num_dims,
            walls: 4 * num_dims,
            corners: geometry.corners_inside.len() + geometry.corners_outside.len(),
            near_corner_points: geometry.near_corner_points.len(),
            corner_edges: geometry.corner_edges.len(),
            near_corner_edges: geometry.near_corner_edges.len(),
            overlap_points: geometry.overlap_points.len(),
            elapsed: start.elapsed(),
        });
        Ok(geometry)
    }

    /// The obstacle this geometry was built for.
    pub fn obstacle(&self) -> &Obstacle {
        &self.obstacle
    }

    /// Qubits per dimension.
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    /// Number of dimensions.
    pub fn num_dims(&self) -> usize {
        self.obstacle.num_dims()
    }

    /// All faces.
    pub fn faces(&self) -> &FaceTable {
        &self.faces
    }

    /// The face of `kind` in `dim`.
    pub fn face(&self, dim: usize, kind: FaceKind) -> Option<&FaceDescriptor> {
        self.faces.face(dim, kind)
    }

    /// Lower and upper inside walls, indexed by dimension.
    pub fn walls_inside(&self) -> &[[WallDescriptor; 2]] {
        &self.walls_inside
    }

    /// Lower and upper outside walls, indexed by dimension.
    pub fn walls_outside(&self) -> &[[WallDescriptor; 2]] {
        &self.walls_outside
    }

    /// The `2^num_dims` inside corners; the last dimension varies fastest.
    pub fn corners_inside(&self) -> &[CornerDescriptor] {
        &self.corners_inside
    }

    /// The `2^num_dims` outside corners; the last dimension varies fastest.
    pub fn corners_outside(&self) -> &[CornerDescriptor] {
        &self.corners_outside
    }

    /// Near-corner points of a 2D obstacle, grouped by outside dimension.
    pub fn near_corner_points(&self) -> &[CornerDescriptor] {
        &self.near_corner_points
    }

    /// The 12 corner edges of a 3D obstacle.
    pub fn corner_edges(&self) -> &[EdgeDescriptor] {
        &self.corner_edges
    }

    /// The 24 near-corner edges of a 3D obstacle.
    pub fn near_corner_edges(&self) -> &[EdgeDescriptor] {
        &self.near_corner_edges
    }

    /// The 24 overlap points of a 3D obstacle.
    pub fn overlap_points(&self) -> &[OverlapPointDescriptor] {
        &self.overlap_points
    }

    /// Look up a corner edge by its pinned dimensions and bounds.
    pub fn corner_edge(&self, key: &EdgeKey) -> Option<&EdgeDescriptor> {
        if key.orthogonal.is_some() {
            return None;
        }
        self.edge_index
            .get(key)
            .and_then(|&i| self.corner_edges.get(i))
    }

    /// Look up a near-corner edge by its pinned dimensions, bounds and
    /// outside slot.
    pub fn near_corner_edge(&self, key: &EdgeKey) -> Option<&EdgeDescriptor> {
        key.orthogonal?;
        self.edge_index
            .get(key)
            .and_then(|&i| self.near_corner_edges.get(i))
    }
}

fn validate_widths(obstacle: &Obstacle, widths: &[u32]) -> GeometryResult<()> {
    if widths.len() != obstacle.num_dims() {
        return Err(GeometryError::BitWidthCountMismatch {
            bounds: obstacle.num_dims(),
            widths: widths.len(),
        });
    }
    if let Some((dim, &width)) = widths
        .iter()
        .enumerate()
        .find(|&(_, &w)| !(1..=32).contains(&w))
    {
        return Err(GeometryError::InvalidBitWidth { dim, width });
    }
    let grid_max: Vec<u32> = widths.iter().map(|&w| max_value(w)).collect();
    obstacle.validate_within(&grid_max)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::diagnostics::NullSink;
    use crate::face::Bound;

    #[derive(Default)]
    struct CountingSink {
        builds: AtomicUsize,
        walls: AtomicUsize,
    }

    impl DiagnosticsSink for CountingSink {
        fn geometry_built(&self, report: &BuildReport) {
            self.builds.fetch_add(1, Ordering::SeqCst);
            self.walls.store(report.walls, Ordering::SeqCst);
        }
    }

    fn obstacle(bounds: &[(u32, u32)]) -> Obstacle {
        Obstacle::new(bounds.to_vec(), BoundaryCondition::Specular).unwrap()
    }

    #[test]
    fn test_width_count_mismatch() {
        let err = GeometryBuilder::new(obstacle(&[(5, 6), (2, 10)]), &[4]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::BitWidthCountMismatch {
                bounds: 2,
                widths: 1
            }
        );
    }

    #[test]
    fn test_invalid_width() {
        let err = GeometryBuilder::new(obstacle(&[(5, 6)]), &[0]).unwrap_err();
        assert_eq!(err, GeometryError::InvalidBitWidth { dim: 0, width: 0 });
        let err = GeometryBuilder::new(obstacle(&[(5, 6)]), &[33]).unwrap_err();
        assert_eq!(err, GeometryError::InvalidBitWidth { dim: 0, width: 33 });
    }

    #[test]
    fn test_bound_must_fit_width() {
        let err = GeometryBuilder::new(obstacle(&[(5, 6), (2, 10)]), &[4, 3]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::BoundOutOfGrid {
                dim: 1,
                bound: 10,
                limit: 7
            }
        );
    }

    #[test]
    fn test_one_dimensional_families() {
        let geometry = GeometryBuilder::with_diagnostics(obstacle(&[(3, 9)]), &[4], &NullSink).unwrap();
        assert_eq!(geometry.walls_inside().len(), 1);
        assert_eq!(geometry.corners_inside().len(), 2);
        assert_eq!(geometry.corners_outside().len(), 2);
        assert!(geometry.near_corner_points().is_empty());
        assert!(geometry.corner_edges().is_empty());
        assert!(geometry.overlap_points().is_empty());
        assert!(geometry.walls_inside()[0][0].alignment_dims().is_empty());
    }

    #[test]
    fn test_sink_receives_one_report() {
        let sink = CountingSink::default();
        GeometryBuilder::with_diagnostics(obstacle(&[(5, 6), (2, 10), (3, 8)]), &[4, 4, 4], &sink)
            .unwrap();
        assert_eq!(sink.builds.load(Ordering::SeqCst), 1);
        assert_eq!(sink.walls.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn test_sink_not_called_on_error() {
        let sink = CountingSink::default();
        assert!(GeometryBuilder::with_diagnostics(obstacle(&[(5, 6)]), &[4, 4], &sink).is_err());
        assert_eq!(sink.builds.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_edge_lookup_by_key() {
        let geometry = GeometryBuilder::from_bounds(
            &[(5, 6), (2, 10), (3, 8)],
            &[4, 4, 4],
            BoundaryCondition::Bounceback,
        )
        .unwrap();

        let key = EdgeKey::corner([0, 2], [Bound::Upper, Bound::Lower]);
        let edge = geometry.corner_edge(&key).unwrap();
        assert_eq!(edge.key(), key);
        assert_eq!(edge.free_dim(), 1);
        assert!(geometry.near_corner_edge(&key).is_none());

        let key = EdgeKey::near_corner(
            [1, 2],
            [Bound::Lower, Bound::Lower],
            crate::edge::PinnedSlot::Second,
        );
        let edge = geometry.near_corner_edge(&key).unwrap();
        assert_eq!(edge.key(), key);
        assert!(geometry.corner_edge(&key).is_none());
    }

    #[test]
    fn test_construction_is_idempotent() {
        let a = GeometryBuilder::from_bounds(&[(1, 4), (2, 3)], &[3, 3], BoundaryCondition::Specular)
            .unwrap();
        let b = GeometryBuilder::from_bounds(&[(1, 4), (2, 3)], &[3, 3], BoundaryCondition::Specular)
            .unwrap();
        assert_eq!(a, b);
    }
}
