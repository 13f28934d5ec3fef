//! Faces extruded across the obstacle.
//!
//! A wall fixes one dimension at a [`FaceDescriptor`] and spans the
//! obstacle's extent in every other (alignment) dimension. The alignment
//! extent is carried as raw bound pairs; turning it into a range test is the
//! job of whoever consumes the wall.

use crate::encoding::cartesian_product;
use crate::face::FaceDescriptor;

/// Comparator strictness flags for 2D walls, per alignment dimension.
const STRICTNESS_2D: &[&[bool]] = &[&[true], &[false]];

/// Comparator strictness flags for 3D walls, per alignment dimension.
const STRICTNESS_3D: &[&[bool]] = &[&[true, true], &[false, false], &[false, true]];

/// A face of the obstacle spanning its extent in the remaining dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WallDescriptor {
    dim: usize,
    alignment_dims: Vec<usize>,
    lower_bounds: Vec<u32>,
    upper_bounds: Vec<u32>,
    face: FaceDescriptor,
}

impl WallDescriptor {
    /// Build a wall from the face that fixes it and the obstacle's bound
    /// pairs (one per dimension, including the fixed one).
    pub fn new(face: FaceDescriptor, bounds: &[(u32, u32)]) -> Self {
        let dim = face.dim();
        let alignment_dims: Vec<usize> = (0..bounds.len()).filter(|&d| d != dim).collect();
        let lower_bounds = alignment_dims.iter().map(|&d| bounds[d].0).collect();
        let upper_bounds = alignment_dims.iter().map(|&d| bounds[d].1).collect();
        Self {
            dim,
            alignment_dims,
            lower_bounds,
            upper_bounds,
            face,
        }
    }

    /// The dimension the wall is fixed in (and reflects).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Every other dimension, ascending.
    pub fn alignment_dims(&self) -> &[usize] {
        &self.alignment_dims
    }

    /// Obstacle lower bounds along the alignment dimensions.
    pub fn lower_bounds(&self) -> &[u32] {
        &self.lower_bounds
    }

    /// Obstacle upper bounds along the alignment dimensions.
    pub fn upper_bounds(&self) -> &[u32] {
        &self.upper_bounds
    }

    /// The face fixing this wall.
    pub fn face(&self) -> &FaceDescriptor {
        &self.face
    }

    /// Total number of dimensions of the obstacle.
    pub fn num_dims(&self) -> usize {
        self.alignment_dims.len() + 1
    }

    /// Comparator strictness flags, one row per entry.
    ///
    /// These values have no documented derivation; they are exposed as-is
    /// for 2D and 3D walls and are absent for 1D walls.
    pub fn comparator_strictness(&self) -> Option<&'static [&'static [bool]]> {
        match self.num_dims() {
            2 => Some(STRICTNESS_2D),
            3 => Some(STRICTNESS_3D),
            _ => None,
        }
    }

    /// Every grid point on the wall, as full coordinate vectors.
    ///
    /// The fixed dimension takes the face's coordinate; alignment dimensions
    /// range over the obstacle's bounds inclusively, the last one varying
    /// fastest.
    pub fn surface_points(&self) -> Vec<Vec<u32>> {
        let ranges: Vec<Vec<u32>> = self
            .lower_bounds
            .iter()
            .zip(&self.upper_bounds)
            .map(|(&lo, &hi)| (lo..=hi).collect())
            .collect();
        cartesian_product(&ranges)
            .into_iter()
            .map(|mut point| {
                point.insert(self.dim, self.face.gridpoint());
                point
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::FaceKind;

    #[test]
    fn test_wall_alignment() {
        let bounds = [(5, 6), (2, 10), (3, 8)];
        let face = FaceDescriptor::new(1, FaceKind::InsideUpper, 10, 4, 4);
        let wall = WallDescriptor::new(face, &bounds);
        assert_eq!(wall.dim(), 1);
        assert_eq!(wall.alignment_dims(), &[0, 2]);
        assert_eq!(wall.lower_bounds(), &[5, 3]);
        assert_eq!(wall.upper_bounds(), &[6, 8]);
        assert_eq!(wall.num_dims(), 3);
        assert_eq!(wall.comparator_strictness().map(<[_]>::len), Some(3));
    }

    #[test]
    fn test_surface_points_2d() {
        let bounds = [(5, 6), (2, 4)];
        let face = FaceDescriptor::new(0, FaceKind::InsideLower, 5, 4, 0);
        let wall = WallDescriptor::new(face, &bounds);
        assert_eq!(
            wall.surface_points(),
            vec![vec![5, 2], vec![5, 3], vec![5, 4]]
        );
    }

    #[test]
    fn test_surface_points_outside_wall() {
        let bounds = [(5, 6), (2, 3)];
        let face = FaceDescriptor::new(1, FaceKind::OutsideUpper, 3, 4, 4);
        let wall = WallDescriptor::new(face, &bounds);
        assert_eq!(wall.surface_points(), vec![vec![5, 4], vec![6, 4]]);
    }

    #[test]
    fn test_1d_wall_is_a_point() {
        let face = FaceDescriptor::new(0, FaceKind::InsideLower, 3, 3, 0);
        let wall = WallDescriptor::new(face, &[(3, 5)]);
        assert!(wall.alignment_dims().is_empty());
        assert_eq!(wall.comparator_strictness(), None);
        assert_eq!(wall.surface_points(), vec![vec![3]]);
    }
}
