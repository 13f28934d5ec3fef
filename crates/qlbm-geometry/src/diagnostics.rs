//! Build reporting.
//!
//! A [`GeometryBuilder`](crate::GeometryBuilder) hands one [`BuildReport`]
//! to its sink after every successful build. The default sink logs it through
//! `tracing`.

use std::time::Duration;

use tracing::debug;

/// Counts and timing of one geometry build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Dimensionality of the obstacle.
    pub num_dims: usize,
    /// Walls on both sides, all dimensions.
    pub walls: usize,
    /// Inside plus outside corners.
    pub corners: usize,
    /// Near-corner points (2D only).
    pub near_corner_points: usize,
    /// Corner edges (3D only).
    pub corner_edges: usize,
    /// Near-corner edges (3D only).
    pub near_corner_edges: usize,
    /// Overlap points (3D only).
    pub overlap_points: usize,
    /// Wall-clock time spent building.
    pub elapsed: Duration,
}

/// Receiver of build reports.
pub trait DiagnosticsSink: Send + Sync {
    /// Called once per successful build.
    fn geometry_built(&self, report: &BuildReport);
}

/// Logs each report at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn geometry_built(&self, report: &BuildReport) {
        debug!(
            num_dims = report.num_dims,
            walls = report.walls,
            corners = report.corners,
            near_corner_points = report.near_corner_points,
            corner_edges = report.corner_edges,
            near_corner_edges = report.near_corner_edges,
            overlap_points = report.overlap_points,
            elapsed_us = report.elapsed.as_micros() as u64,
            "Built obstacle geometry"
        );
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn geometry_built(&self, _report: &BuildReport) {}
}
