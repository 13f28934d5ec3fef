//! Points fixed at a bound in every dimension.
//!
//! Corners are Cartesian products of per-dimension faces. Inside corners use
//! the obstacle's own bounds everywhere, outside corners use the outside
//! faces everywhere, and (in 2D) near-corner points mix one outside
//! dimension with inside faces in all others.

use crate::face::{FaceDescriptor, Side};

/// A point formed by one face per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CornerDescriptor {
    faces: Vec<FaceDescriptor>,
    dims_inside: Vec<usize>,
    dims_outside: Vec<usize>,
    invert: Vec<bool>,
}

impl CornerDescriptor {
    /// Build a point from faces ordered by dimension.
    ///
    /// Pure corners invert each dimension with its face's flag. Near-corner
    /// points follow [`near_corner_inversion`].
    pub fn new(faces: Vec<FaceDescriptor>) -> Self {
        let (outside, inside): (Vec<&FaceDescriptor>, Vec<&FaceDescriptor>) =
            faces.iter().partition(|face| face.is_outside());
        let near_corner = !inside.is_empty() && !outside.is_empty();
        let dims_inside = inside.iter().map(|face| face.dim()).collect();
        let dims_outside = outside.iter().map(|face| face.dim()).collect();
        let invert = if near_corner {
            faces.iter().map(near_corner_inversion).collect()
        } else {
            faces.iter().map(FaceDescriptor::invert).collect()
        };
        Self {
            faces,
            dims_inside,
            dims_outside,
            invert,
        }
    }

    /// The faces, one per dimension, in dimension order.
    pub fn faces(&self) -> &[FaceDescriptor] {
        &self.faces
    }

    /// Number of dimensions.
    pub fn num_dims(&self) -> usize {
        self.faces.len()
    }

    /// Dimensions in which the point lies inside the obstacle's bounds.
    pub fn dims_inside(&self) -> &[usize] {
        &self.dims_inside
    }

    /// Dimensions in which the point lies outside the obstacle's bounds.
    pub fn dims_outside(&self) -> &[usize] {
        &self.dims_outside
    }

    /// Per-dimension inversion flags.
    pub fn invert(&self) -> &[bool] {
        &self.invert
    }

    /// Inside in some dimensions and outside in others.
    pub fn is_near_corner(&self) -> bool {
        !self.dims_inside.is_empty() && !self.dims_outside.is_empty()
    }

    /// Concatenated zero-bit positions of all faces, in dimension order.
    pub fn zero_bits(&self) -> Vec<u32> {
        self.faces
            .iter()
            .flat_map(|face| face.zero_bits().iter().copied())
            .collect()
    }
}

/// Inversion flag of one dimension of a near-corner or overlap point:
/// `NOT bound` where the point is outside, `bound` where it is inside.
///
/// Coincides with [`FaceDescriptor::invert`] for every face.
pub fn near_corner_inversion(face: &FaceDescriptor) -> bool {
    let upper = face.bound().is_upper();
    match face.side() {
        Side::Outside => !upper,
        Side::Inside => upper,
    }
}
