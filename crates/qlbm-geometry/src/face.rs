//! Per-dimension boundary facts.
//!
//! A [`FaceDescriptor`] records one coordinate of one dimension that sits on
//! the boundary of an obstacle, either just inside the solid (the obstacle's
//! own bound) or just outside it (one step past the bound). Every sign used
//! by the higher-level descriptors is derived from [`FaceKind::invert`]:
//! a particle that just crossed a face flips its directional indicator iff
//! exactly one of "crossed an upper bound" and "now outside the solid" holds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encoding::{bits_equal_to_zero, dimension_letter, max_value};

/// Lower or upper bound of an obstacle in one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    /// The smaller coordinate.
    Lower,
    /// The larger coordinate.
    Upper,
}

impl Bound {
    /// Both bounds, lower first. This is the enumeration order everywhere.
    pub const BOTH: [Bound; 2] = [Bound::Lower, Bound::Upper];

    /// `true` for [`Bound::Upper`].
    pub const fn is_upper(self) -> bool {
        matches!(self, Bound::Upper)
    }

    /// 0 for lower, 1 for upper.
    pub const fn index(self) -> usize {
        match self {
            Bound::Lower => 0,
            Bound::Upper => 1,
        }
    }

    /// Pick the matching end of a `(lower, upper)` pair.
    pub const fn select(self, pair: (u32, u32)) -> u32 {
        match self {
            Bound::Lower => pair.0,
            Bound::Upper => pair.1,
        }
    }

    const fn prefix(self) -> char {
        match self {
            Bound::Lower => 'l',
            Bound::Upper => 'u',
        }
    }
}

/// Whether a coordinate belongs to the solid or lies one step outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// On the obstacle's own bound.
    Inside,
    /// One grid point past the obstacle's bound.
    Outside,
}

impl Side {
    /// `true` for [`Side::Outside`].
    pub const fn is_outside(self) -> bool {
        matches!(self, Side::Outside)
    }

    const fn suffix(self) -> &'static str {
        match self {
            Side::Inside => "in",
            Side::Outside => "out",
        }
    }
}

/// The four kinds of face, each with its inversion flag fixed up front.
///
/// | kind            | invert |
/// |-----------------|--------|
/// | `InsideLower`   | false  |
/// | `InsideUpper`   | true   |
/// | `OutsideLower`  | true   |
/// | `OutsideUpper`  | false  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaceKind {
    /// The obstacle's lower bound.
    InsideLower,
    /// The obstacle's upper bound.
    InsideUpper,
    /// One point below the obstacle's lower bound.
    OutsideLower,
    /// One point above the obstacle's upper bound.
    OutsideUpper,
}

impl FaceKind {
    /// All four kinds: inside before outside, lower before upper.
    pub const ALL: [FaceKind; 4] = [
        FaceKind::InsideLower,
        FaceKind::InsideUpper,
        FaceKind::OutsideLower,
        FaceKind::OutsideUpper,
    ];

    /// Combine a side and a bound.
    pub const fn new(side: Side, bound: Bound) -> Self {
        match (side, bound) {
            (Side::Inside, Bound::Lower) => FaceKind::InsideLower,
            (Side::Inside, Bound::Upper) => FaceKind::InsideUpper,
            (Side::Outside, Bound::Lower) => FaceKind::OutsideLower,
            (Side::Outside, Bound::Upper) => FaceKind::OutsideUpper,
        }
    }

    /// The bound this face sits on.
    pub const fn bound(self) -> Bound {
        match self {
            FaceKind::InsideLower | FaceKind::OutsideLower => Bound::Lower,
            FaceKind::InsideUpper | FaceKind::OutsideUpper => Bound::Upper,
        }
    }

    /// Inside or outside the solid.
    pub const fn side(self) -> Side {
        match self {
            FaceKind::InsideLower | FaceKind::InsideUpper => Side::Inside,
            FaceKind::OutsideLower | FaceKind::OutsideUpper => Side::Outside,
        }
    }

    /// `bound XOR outside`.
    pub const fn invert(self) -> bool {
        match self {
            FaceKind::InsideLower | FaceKind::OutsideUpper => false,
            FaceKind::InsideUpper | FaceKind::OutsideLower => true,
        }
    }

    /// Grid coordinate of this face for an obstacle bound, in a `width`-bit
    /// dimension. Outside faces wrap around the periodic grid.
    pub fn coordinate(self, obstacle_bound: u32, width: u32) -> u32 {
        let max = max_value(width);
        match self {
            FaceKind::InsideLower | FaceKind::InsideUpper => obstacle_bound,
            FaceKind::OutsideLower => obstacle_bound.checked_sub(1).unwrap_or(max),
            FaceKind::OutsideUpper => {
                if obstacle_bound >= max {
                    0
                } else {
                    obstacle_bound + 1
                }
            }
        }
    }
}

/// A boundary fact for one (dimension, bound, side) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceDescriptor {
    dim: usize,
    kind: FaceKind,
    gridpoint: u32,
    zero_bits: Vec<u32>,
    invert: bool,
}

impl FaceDescriptor {
    /// Build the face of `kind` in dimension `dim`.
    ///
    /// `register_offset` is the number of bits occupied by all lower
    /// dimensions, so that the zero-bit positions address the whole grid
    /// register rather than this dimension alone.
    pub fn new(
        dim: usize,
        kind: FaceKind,
        obstacle_bound: u32,
        width: u32,
        register_offset: u32,
    ) -> Self {
        let gridpoint = kind.coordinate(obstacle_bound, width);
        let zero_bits = bits_equal_to_zero(gridpoint, width)
            .into_iter()
            .map(|bit| bit + register_offset)
            .collect();
        Self {
            dim,
            kind,
            gridpoint,
            zero_bits,
            invert: kind.invert(),
        }
    }

    /// The dimension this face fixes.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Which of the four faces this is.
    pub fn kind(&self) -> FaceKind {
        self.kind
    }

    /// Lower or upper.
    pub fn bound(&self) -> Bound {
        self.kind.bound()
    }

    /// Inside or outside.
    pub fn side(&self) -> Side {
        self.kind.side()
    }

    /// Shorthand for `self.side().is_outside()`.
    pub fn is_outside(&self) -> bool {
        self.kind.side().is_outside()
    }

    /// The encoded grid coordinate.
    pub fn gridpoint(&self) -> u32 {
        self.gridpoint
    }

    /// Register positions holding a `0` at this coordinate, ascending.
    pub fn zero_bits(&self) -> &[u32] {
        &self.zero_bits
    }

    /// Whether a particle crossing this face has its directional indicator
    /// flipped.
    pub fn invert(&self) -> bool {
        self.invert
    }

    /// Debug label such as `lx_in` or `uz_out`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}_{}",
            self.bound().prefix(),
            dimension_letter(self.dim),
            self.side().suffix()
        )
    }
}

/// Inside and outside faces of an obstacle, two per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceTable {
    inside: Vec<[FaceDescriptor; 2]>,
    outside: Vec<[FaceDescriptor; 2]>,
}

impl FaceTable {
    /// Encode every face of an obstacle.
    ///
    /// `bounds` and `widths` must have the same length; the caller validates
    /// that every bound fits its width.
    pub fn new(bounds: &[(u32, u32)], widths: &[u32]) -> Self {
        let mut inside = Vec::with_capacity(bounds.len());
        let mut outside = Vec::with_capacity(bounds.len());
        let mut offset = 0;
        for (dim, (&pair, &width)) in bounds.iter().zip(widths).enumerate() {
            let face = |side| {
                Bound::BOTH.map(|bound| {
                    FaceDescriptor::new(
                        dim,
                        FaceKind::new(side, bound),
                        bound.select(pair),
                        width,
                        offset,
                    )
                })
            };
            inside.push(face(Side::Inside));
            outside.push(face(Side::Outside));
            offset += width;
        }
        Self { inside, outside }
    }

    /// Number of dimensions covered.
    pub fn num_dims(&self) -> usize {
        self.inside.len()
    }

    /// Lower and upper inside faces of `dim`.
    pub fn inside(&self, dim: usize) -> Option<&[FaceDescriptor; 2]> {
        self.inside.get(dim)
    }

    /// Lower and upper outside faces of `dim`.
    pub fn outside(&self, dim: usize) -> Option<&[FaceDescriptor; 2]> {
        self.outside.get(dim)
    }

    /// The face of `kind` in `dim`, if the dimension exists.
    pub fn face(&self, dim: usize, kind: FaceKind) -> Option<&FaceDescriptor> {
        let pair = match kind.side() {
            Side::Inside => self.inside.get(dim)?,
            Side::Outside => self.outside.get(dim)?,
        };
        Some(&pair[kind.bound().index()])
    }

    /// Both faces of one side, per dimension.
    pub(crate) fn side(&self, side: Side) -> &[[FaceDescriptor; 2]] {
        match side {
            Side::Inside => &self.inside,
            Side::Outside => &self.outside,
        }
    }

    /// Indexing access for dimensions already known to exist.
    pub(crate) fn at(&self, dim: usize, kind: FaceKind) -> &FaceDescriptor {
        &self.side(kind.side())[dim][kind.bound().index()]
    }
}
