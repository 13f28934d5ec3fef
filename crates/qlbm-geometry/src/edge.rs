//! Edges of 3D obstacles.
//!
//! An edge pins two dimensions at a face each and spans the obstacle's
//! extent in the third (free) dimension. Two families exist:
//!
//! - **Corner edges** pin both dimensions at their outside faces. They sit
//!   diagonally next to an edge of the solid and reflect both pinned
//!   velocity components. 3 pinned-dimension pairs x 2 x 2 bounds = 12.
//! - **Near-corner edges** pin one dimension outside and the other inside,
//!   and correct particles that streamed past the edge without reflecting.
//!   The [`PinnedSlot`] marked *orthogonal* is the outside one.
//!   12 x 2 orthogonal choices = 24.
//!
//! Both families are built by [`GeometryBuilder`](crate::GeometryBuilder),
//! whose positional order is fixed: pinned pairs `(0,1)`, `(0,2)`, `(1,2)`, then the first pinned
//! bound, then the second, then (for near-corner edges) the orthogonal slot.
//! [`EdgeKey`] offers the same edges by logical identity.

use serde::{Deserialize, Serialize};

use crate::face::{Bound, FaceDescriptor, FaceKind, FaceTable, Side};

/// Pinned dimension pairs in enumeration order.
pub const PINNED_PAIRS: [[usize; 2]; 3] = [[0, 1], [0, 2], [1, 2]];

/// One of the two pinned dimensions of an edge, in ascending dimension order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PinnedSlot {
    /// The lower-numbered pinned dimension.
    First,
    /// The higher-numbered pinned dimension.
    Second,
}

impl PinnedSlot {
    /// Both slots, first before second.
    pub const BOTH: [PinnedSlot; 2] = [PinnedSlot::First, PinnedSlot::Second];

    /// 0 or 1.
    pub const fn index(self) -> usize {
        match self {
            PinnedSlot::First => 0,
            PinnedSlot::Second => 1,
        }
    }

    /// `true` for the second slot.
    pub const fn is_second(self) -> bool {
        matches!(self, PinnedSlot::Second)
    }
}

/// A dimension pinned by an edge, identified by what it is rather than by
/// where it sits in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinnedDim {
    /// The pinned dimension.
    pub dim: usize,
    /// Inside or outside the obstacle.
    pub side: Side,
    /// Lower or upper bound.
    pub bound: Bound,
}

impl PinnedDim {
    /// The face kind this pin selects.
    pub const fn kind(&self) -> FaceKind {
        FaceKind::new(self.side, self.bound)
    }
}

/// Corner edge, or near-corner edge with its outside slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Both pinned dimensions outside.
    Corner,
    /// Exactly one pinned dimension outside.
    NearCorner {
        /// The slot whose pinned dimension is outside.
        orthogonal: PinnedSlot,
    },
}

/// Logical identity of an edge: which dimensions it pins, at which bounds,
/// and (for near-corner edges) which slot is outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    /// Pinned dimensions, ascending.
    pub dims: [usize; 2],
    /// Bound of each pinned dimension.
    pub bounds: [Bound; 2],
    /// `None` for corner edges.
    pub orthogonal: Option<PinnedSlot>,
}

impl EdgeKey {
    /// Key of a corner edge.
    pub const fn corner(dims: [usize; 2], bounds: [Bound; 2]) -> Self {
        Self {
            dims,
            bounds,
            orthogonal: None,
        }
    }

    /// Key of a near-corner edge.
    pub const fn near_corner(dims: [usize; 2], bounds: [Bound; 2], orthogonal: PinnedSlot) -> Self {
        Self {
            dims,
            bounds,
            orthogonal: Some(orthogonal),
        }
    }
}

/// A line along one free dimension with the other two pinned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeDescriptor {
    faces: [FaceDescriptor; 2],
    free_dim: usize,
    free_range: (u32, u32),
    kind: EdgeKind,
    invert: [bool; 2],
    reflected_dims: Vec<usize>,
}

impl EdgeDescriptor {
    /// Corner edge from two outside faces, sorted by dimension.
    pub(crate) fn corner(faces: [FaceDescriptor; 2], free_range: (u32, u32)) -> Self {
        Self::new(faces, free_range, EdgeKind::Corner)
    }

    /// Near-corner edge; `orthogonal` names the slot holding the outside
    /// face.
    pub(crate) fn near_corner(
        faces: [FaceDescriptor; 2],
        free_range: (u32, u32),
        orthogonal: PinnedSlot,
    ) -> Self {
        Self::new(faces, free_range, EdgeKind::NearCorner { orthogonal })
    }

    fn new(faces: [FaceDescriptor; 2], free_range: (u32, u32), kind: EdgeKind) -> Self {
        debug_assert!(faces[0].dim() < faces[1].dim(), "pinned faces must be sorted");
        let pinned_dims = [faces[0].dim(), faces[1].dim()];
        let free_dim = 3 - pinned_dims[0] - pinned_dims[1];
        let bounds = [faces[0].bound().is_upper(), faces[1].bound().is_upper()];
        let (invert, reflected_dims) = match kind {
            EdgeKind::Corner => (corner_inversions(bounds), pinned_dims.to_vec()),
            EdgeKind::NearCorner { orthogonal } => (
                near_corner_inversions(bounds, orthogonal.is_second()),
                vec![pinned_dims[orthogonal.index()]],
            ),
        };
        Self {
            faces,
            free_dim,
            free_range,
            kind,
            invert,
            reflected_dims,
        }
    }

    /// Pinned faces, sorted by dimension.
    pub fn faces(&self) -> &[FaceDescriptor; 2] {
        &self.faces
    }

    /// The two pinned dimensions, ascending.
    pub fn pinned_dims(&self) -> [usize; 2] {
        [self.faces[0].dim(), self.faces[1].dim()]
    }

    /// Pinned dimensions with their side and bound.
    pub fn pinned(&self) -> [PinnedDim; 2] {
        self.faces.each_ref().map(|face| PinnedDim {
            dim: face.dim(),
            side: face.side(),
            bound: face.bound(),
        })
    }

    /// The dimension the edge spans.
    pub fn free_dim(&self) -> usize {
        self.free_dim
    }

    /// The obstacle's bounds in the free dimension.
    pub fn free_range(&self) -> (u32, u32) {
        self.free_range
    }

    /// Corner or near-corner.
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Outside slot of a near-corner edge.
    pub fn orthogonal(&self) -> Option<PinnedSlot> {
        match self.kind {
            EdgeKind::Corner => None,
            EdgeKind::NearCorner { orthogonal } => Some(orthogonal),
        }
    }

    /// Whether both pinned dimensions are outside.
    pub fn is_corner_edge(&self) -> bool {
        matches!(self.kind, EdgeKind::Corner)
    }

    /// Inversion flags of the two pinned dimensions.
    pub fn invert(&self) -> [bool; 2] {
        self.invert
    }

    /// Dimensions whose velocity component this edge reflects.
    pub fn reflected_dims(&self) -> &[usize] {
        &self.reflected_dims
    }

    /// Logical identity of this edge.
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            dims: self.pinned_dims(),
            bounds: [self.faces[0].bound(), self.faces[1].bound()],
            orthogonal: self.orthogonal(),
        }
    }

    /// Concatenated zero-bit positions of the pinned faces.
    pub fn zero_bits(&self) -> Vec<u32> {
        self.faces
            .iter()
            .flat_map(|face| face.zero_bits().iter().copied())
            .collect()
    }
}

/// `(NOT bound0, NOT bound1)`.
fn corner_inversions(bounds: [bool; 2]) -> [bool; 2] {
    [!bounds[0], !bounds[1]]
}

/// With `x = bound0 XOR orthogonal`: both flags are `NOT x` when the bounds
/// differ, otherwise `(NOT x, x)`.
fn near_corner_inversions(bounds: [bool; 2], orthogonal: bool) -> [bool; 2] {
    let x = bounds[0] ^ orthogonal;
    if bounds[0] ^ bounds[1] {
        [!x, !x]
    } else {
        [!x, x]
    }
}

fn is_3d(faces: &FaceTable, bounds: &[(u32, u32)]) -> bool {
    faces.num_dims() == 3 && bounds.len() == 3
}

/// The 12 corner edges of a 3D obstacle, in positional order. Empty for any
/// other dimensionality.
pub(crate) fn corner_edges(faces: &FaceTable, bounds: &[(u32, u32)]) -> Vec<EdgeDescriptor> {
    if !is_3d(faces, bounds) {
        return Vec::new();
    }
    let mut edges = Vec::with_capacity(12);
    for dims in PINNED_PAIRS {
        let free_range = bounds[3 - dims[0] - dims[1]];
        for b0 in Bound::BOTH {
            for b1 in Bound::BOTH {
                let pins = [(dims[0], b0), (dims[1], b1)]
                    .map(|(dim, bound)| faces.at(dim, FaceKind::new(Side::Outside, bound)).clone());
                edges.push(EdgeDescriptor::corner(pins, free_range));
            }
        }
    }
    edges
}

/// The 24 near-corner edges of a 3D obstacle, in positional order. Empty for
/// any other dimensionality.
pub(crate) fn near_corner_edges(faces: &FaceTable, bounds: &[(u32, u32)]) -> Vec<EdgeDescriptor> {
    if !is_3d(faces, bounds) {
        return Vec::new();
    }
    let mut edges = Vec::with_capacity(24);
    for dims in PINNED_PAIRS {
        let free_range = bounds[3 - dims[0] - dims[1]];
        for b0 in Bound::BOTH {
            for b1 in Bound::BOTH {
                for orthogonal in PinnedSlot::BOTH {
                    let pins = [
                        (PinnedSlot::First, dims[0], b0),
                        (PinnedSlot::Second, dims[1], b1),
                    ]
                    .map(|(slot, dim, bound)| {
                        let side = if slot == orthogonal {
                            Side::Outside
                        } else {
                            Side::Inside
                        };
                        faces.at(dim, FaceKind::new(side, bound)).clone()
                    });
                    edges.push(EdgeDescriptor::near_corner(pins, free_range, orthogonal));
                }
            }
        }
    }
    edges
}
