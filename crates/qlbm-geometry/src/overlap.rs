//! Points where two near-corner edges of a 3D obstacle meet.
//!
//! Each such point is outside the obstacle in exactly one dimension and
//! inside in the other two. Both meeting edges already corrected it, so it
//! needs one more pass. Enumeration: outside dimension `0, 1, 2`, then its
//! bound, then the bounds of the two inside dimensions in ascending order,
//! giving 3 x 2 x 2 x 2 = 24 points.

use crate::corner::near_corner_inversion;
use crate::face::{Bound, FaceDescriptor, FaceKind, FaceTable, Side};

/// A point at the intersection of two near-corner edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverlapPointDescriptor {
    faces: [FaceDescriptor; 3],
    outside_dim: usize,
    invert: [bool; 3],
}

impl OverlapPointDescriptor {
    /// Build from three faces, exactly one of them outside. The faces are
    /// sorted by dimension here.
    pub(crate) fn new(mut faces: [FaceDescriptor; 3]) -> Self {
        faces.sort_by_key(FaceDescriptor::dim);
        debug_assert_eq!(
            faces.iter().filter(|face| face.is_outside()).count(),
            1,
            "exactly one face must be outside"
        );
        let outside_dim = faces
            .iter()
            .find(|face| face.is_outside())
            .map_or(0, FaceDescriptor::dim);
        let invert = faces.each_ref().map(near_corner_inversion);
        Self {
            faces,
            outside_dim,
            invert,
        }
    }

    /// Faces sorted by dimension.
    pub fn faces(&self) -> &[FaceDescriptor; 3] {
        &self.faces
    }

    /// The single dimension in which the point is outside the obstacle.
    pub fn outside_dim(&self) -> usize {
        self.outside_dim
    }

    /// The two dimensions in which the point is inside, ascending.
    pub fn dims_inside(&self) -> Vec<usize> {
        (0..3).filter(|&d| d != self.outside_dim).collect()
    }

    /// `NOT bound` for the outside dimension, `bound` for the others.
    pub fn invert(&self) -> [bool; 3] {
        self.invert
    }

    /// Concatenated zero-bit positions, in dimension order.
    pub fn zero_bits(&self) -> Vec<u32> {
        self.faces
            .iter()
            .flat_map(|face| face.zero_bits().iter().copied())
            .collect()
    }
}

/// All 24 overlap points of a 3D obstacle, in positional order. Empty for any
/// other dimensionality.
pub(crate) fn overlap_points(faces: &FaceTable) -> Vec<OverlapPointDescriptor> {
    if faces.num_dims() != 3 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(24);
    for outside_dim in 0..3 {
        let [d0, d1] = match outside_dim {
            0 => [1, 2],
            1 => [0, 2],
            _ => [0, 1],
        };
        for bound in Bound::BOTH {
            for b0 in Bound::BOTH {
                for b1 in Bound::BOTH {
                    points.push(OverlapPointDescriptor::new([
                        faces.at(outside_dim, FaceKind::new(Side::Outside, bound)).clone(),
                        faces.at(d0, FaceKind::new(Side::Inside, b0)).clone(),
                        faces.at(d1, FaceKind::new(Side::Inside, b1)).clone(),
                    ]));
                }
            }
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FaceTable {
        FaceTable::new(&[(5, 6), (2, 10), (3, 8)], &[4, 4, 4])
    }

    #[test]
    fn test_faces_are_sorted() {
        let faces = table();
        let point = OverlapPointDescriptor::new([
            faces.at(1, FaceKind::OutsideUpper).clone(),
            faces.at(0, FaceKind::InsideLower).clone(),
            faces.at(2, FaceKind::InsideUpper).clone(),
        ]);
        let dims: Vec<usize> = point.faces().iter().map(FaceDescriptor::dim).collect();
        assert_eq!(dims, vec![0, 1, 2]);
        assert_eq!(point.outside_dim(), 1);
        assert_eq!(point.dims_inside(), vec![0, 2]);
        // x inside lower, y outside upper, z inside upper
        assert_eq!(point.invert(), [false, false, true]);
    }

    #[test]
    fn test_overlap_points_need_three_dimensions() {
        assert!(overlap_points(&FaceTable::new(&[(5, 6)], &[4])).is_empty());
        assert!(overlap_points(&FaceTable::new(&[(5, 6), (2, 10)], &[4, 4])).is_empty());
    }

    #[test]
    fn test_overlap_count_and_outside_dims() {
        let points = overlap_points(&table());
        assert_eq!(points.len(), 24);
        for (chunk, dim) in points.chunks(8).zip(0..) {
            assert!(chunk.iter().all(|p| p.outside_dim() == dim));
        }
    }
}
