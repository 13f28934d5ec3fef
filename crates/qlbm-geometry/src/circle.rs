//! Circular obstacles on a 2D grid.
//!
//! The perimeter is rasterized with the midpoint (Bresenham) circle
//! algorithm. For encoding, perimeter points are grouped into runs along
//! rows, columns and both diagonals so that each run can be handled by a
//! single comparator instead of one point at a time.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{GeometryError, GeometryResult};
use crate::obstacle::BoundaryCondition;
use crate::record::{ObstacleRecord, SphereRecord};

/// A signed grid point. Perimeters of circles near the grid origin may
/// extend to negative coordinates.
pub type Point = (i64, i64);

/// A run of perimeter points, given by its two endpoints.
pub type Segment = [Point; 2];

/// A solid disc of grid points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    center: (u32, u32),
    radius: u32,
    boundary: BoundaryCondition,
    perimeter: Vec<Point>,
}

impl Circle {
    /// Create a circle and rasterize its perimeter.
    ///
    /// # Errors
    ///
    /// Fails on a zero radius.
    pub fn new(center: (u32, u32), radius: u32, boundary: BoundaryCondition) -> GeometryResult<Self> {
        if radius == 0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        let perimeter = rasterize(center, radius);
        Ok(Self {
            center,
            radius,
            boundary,
            perimeter,
        })
    }

    /// Rebuild a circle from its record.
    ///
    /// # Errors
    ///
    /// Fails when the center does not have exactly two coordinates or the
    /// radius is zero.
    pub fn from_record(record: &SphereRecord) -> GeometryResult<Self> {
        match record.center.as_slice() {
            &[x, y] => Self::new((x, y), record.radius, record.boundary),
            other => Err(GeometryError::InvalidRecord(format!(
                "circle center must have 2 coordinates, got {}",
                other.len()
            ))),
        }
    }

    /// Center point.
    pub fn center(&self) -> (u32, u32) {
        self.center
    }

    /// Radius in grid units.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// The boundary condition tag.
    pub fn boundary(&self) -> BoundaryCondition {
        self.boundary
    }

    /// Perimeter points, deduplicated and sorted by `(x, y)`.
    pub fn perimeter(&self) -> &[Point] {
        &self.perimeter
    }

    /// Whether `point` lies on the perimeter or strictly within the disc.
    pub fn contains_gridpoint(&self, point: Point) -> bool {
        if self.perimeter.binary_search(&point).is_ok() {
            return true;
        }
        let dx = point.0 - i64::from(self.center.0);
        let dy = point.1 - i64::from(self.center.1);
        let r = i64::from(self.radius);
        dx * dx + dy * dy <= r * r
    }

    /// Group the perimeter into runs.
    pub fn split_perimeter_points(&self) -> PerimeterSegments {
        let axis = axis_segments(&self.perimeter);
        let diagonal = diagonal_segments(&self.perimeter);
        let points = self
            .perimeter
            .iter()
            .copied()
            .filter(|&p| {
                !axis.iter().any(|s| on_segment(p, s)) && !diagonal.iter().any(|s| on_segment(p, s))
            })
            .collect();
        PerimeterSegments {
            axis,
            diagonal,
            points,
        }
    }

    /// The serializable record of this circle.
    pub fn to_record(&self) -> ObstacleRecord {
        ObstacleRecord::Sphere(SphereRecord {
            center: vec![self.center.0, self.center.1],
            radius: self.radius,
            boundary: self.boundary,
        })
    }

    /// JSON form of [`Circle::to_record`].
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> GeometryResult<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }
}

/// Perimeter points grouped for encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerimeterSegments {
    /// Horizontal and vertical runs with their end points trimmed off.
    /// Rows come first (ascending `y`), then columns (ascending `x`).
    pub axis: Vec<Segment>,
    /// Diagonal runs of at least two points, endpoints included. Runs along
    /// `x - y = const` come first, then runs along `x + y = const`.
    pub diagonal: Vec<Segment>,
    /// Perimeter points on none of the runs above.
    pub points: Vec<Point>,
}

impl PerimeterSegments {
    /// Every grid point covered by the axis runs.
    pub fn expand_axis_segments(&self) -> Vec<Point> {
        self.axis
            .iter()
            .flat_map(|&[(x0, y0), (x1, y1)]| {
                if y0 == y1 {
                    (x0..=x1).map(|x| (x, y0)).collect::<Vec<_>>()
                } else {
                    (y0..=y1).map(|y| (x0, y)).collect()
                }
            })
            .collect()
    }

    /// Every grid point covered by the diagonal runs.
    pub fn expand_diagonal_segments(&self) -> Vec<Point> {
        self.diagonal
            .iter()
            .flat_map(|&[(x0, y0), (x1, y1)]| {
                let dy = if y1 >= y0 { 1 } else { -1 };
                (0..=(x1 - x0)).map(move |step| (x0 + step, y0 + dy * step))
            })
            .collect()
    }
}

fn rasterize(center: (u32, u32), radius: u32) -> Vec<Point> {
    let (cx, cy) = (i64::from(center.0), i64::from(center.1));
    let mut x = i64::from(radius);
    let mut y = 0;
    let mut d = 1 - x;
    let mut points = BTreeSet::new();

    while x >= y {
        for (a, b) in [(x, y), (y, x)] {
            points.insert((cx + a, cy + b));
            points.insert((cx - a, cy + b));
            points.insert((cx + a, cy - b));
            points.insert((cx - a, cy - b));
        }
        y += 1;
        if d <= 0 {
            d += 2 * y + 1;
        } else {
            x -= 1;
            d += 2 * (y - x) + 1;
        }
    }
    points.into_iter().collect()
}

/// Runs of consecutive values in `coords`, trimmed by one at each end.
/// Runs that trim to fewer than two values are dropped.
fn trimmed_runs(coords: &[i64]) -> Vec<(i64, i64)> {
    let mut runs = Vec::new();
    let Some(&first) = coords.first() else {
        return runs;
    };
    let mut start = first;
    for pair in coords.windows(2) {
        if pair[1] != pair[0] + 1 {
            if start + 2 < pair[0] {
                runs.push((start + 1, pair[0] - 1));
            }
            start = pair[1];
        }
    }
    if let Some(&last) = coords.last() {
        if start + 2 < last {
            runs.push((start + 1, last - 1));
        }
    }
    runs
}

fn axis_segments(perimeter: &[Point]) -> Vec<Segment> {
    let mut rows: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    let mut columns: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for &(x, y) in perimeter {
        rows.entry(y).or_default().push(x);
        columns.entry(x).or_default().push(y);
    }

    let mut segments = Vec::new();
    for (y, mut xs) in rows {
        xs.sort_unstable();
        segments.extend(trimmed_runs(&xs).into_iter().map(|(a, b)| [(a, y), (b, y)]));
    }
    for (x, mut ys) in columns {
        ys.sort_unstable();
        segments.extend(trimmed_runs(&ys).into_iter().map(|(a, b)| [(x, a), (x, b)]));
    }
    segments
}

fn diagonal_runs(mut points: Vec<Point>, step_y: i64, out: &mut Vec<Segment>) {
    points.sort_unstable();
    let Some(&first) = points.first() else {
        return;
    };
    let mut start = first;
    for pair in points.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next != (prev.0 + 1, prev.1 + step_y) {
            if start != prev {
                out.push([start, prev]);
            }
            start = next;
        }
    }
    if let Some(&last) = points.last() {
        if start != last {
            out.push([start, last]);
        }
    }
}

fn diagonal_segments(perimeter: &[Point]) -> Vec<Segment> {
    let mut primary: BTreeMap<i64, Vec<Point>> = BTreeMap::new();
    let mut secondary: BTreeMap<i64, Vec<Point>> = BTreeMap::new();
    for &(x, y) in perimeter {
        primary.entry(x - y).or_default().push((x, y));
        secondary.entry(x + y).or_default().push((x, y));
    }

    let mut segments = Vec::new();
    for points in primary.into_values() {
        diagonal_runs(points, 1, &mut segments);
    }
    for points in secondary.into_values() {
        diagonal_runs(points, -1, &mut segments);
    }
    segments
}

fn on_segment(p: Point, &[a, b]: &Segment) -> bool {
    let within = |v: i64, lo: i64, hi: i64| lo.min(hi) <= v && v <= lo.max(hi);
    if !within(p.0, a.0, b.0) || !within(p.1, a.1, b.1) {
        return false;
    }
    // Collinear with the segment's direction.
    (b.0 - a.0) * (p.1 - a.1) == (b.1 - a.1) * (p.0 - a.0)
}
