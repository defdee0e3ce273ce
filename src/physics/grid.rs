//! Uniform coordinate grids
//!
//! Spatial and temporal coordinates are both built by [`build_grid`]:
//!
//! ```text
//! start, start + step, start + 2·step, ...   (every value < end + step/2)
//! ```
//!
//! The half-step tolerance guarantees that `end` itself is part of the grid
//! even when `(end - start) / step` is not exactly representable. Values are
//! computed as `start + k·step`, never by repeated addition, so rounding does
//! not accumulate along the grid.
//!
//! # Example
//!
//! ```rust
//! use river_rs::physics::{build_grid, SpatialGrid};
//!
//! let x = build_grid(0.0, 20.0, 0.2).unwrap();
//! assert_eq!(x.len(), 101);
//!
//! let grid = SpatialGrid::new(0.0, 1.0, 0.25).unwrap();
//! assert_eq!(grid.len(), 5);
//! assert_eq!(grid.spacing(), 0.25);
//! ```

use std::ops::Deref;

use crate::error::{TransportError, TransportResult};

/// Largest number of points [`build_grid`] will allocate
pub const MAX_GRID_POINTS: usize = 1 << 26;

/// Build an evenly spaced sequence from `start` to `end` inclusive
///
/// # Errors
///
/// `InvalidGridConfiguration` when `step` is not strictly positive, when any
/// argument is not finite, when `end < start`, or when the grid would hold
/// more than [`MAX_GRID_POINTS`] points.
pub fn build_grid(start: f64, end: f64, step: f64) -> TransportResult<Vec<f64>> {
    if !start.is_finite() || !end.is_finite() {
        return Err(TransportError::InvalidGridConfiguration(format!(
            "grid bounds must be finite, got [{}, {}]",
            start, end
        )));
    }
    if !step.is_finite() || step <= 0.0 {
        return Err(TransportError::InvalidGridConfiguration(format!(
            "grid step must be positive, got {}",
            step
        )));
    }
    if end < start {
        return Err(TransportError::InvalidGridConfiguration(format!(
            "grid end {} lies before start {}",
            end, start
        )));
    }

    // Same count as a half-open range [start, end + step/2)
    let span = (end - start) / step;
    if !span.is_finite() || span + 0.5 > MAX_GRID_POINTS as f64 {
        return Err(TransportError::InvalidGridConfiguration(format!(
            "grid [{}, {}] with step {} exceeds {} points",
            start, end, step, MAX_GRID_POINTS
        )));
    }
    let count = (span + 0.5).ceil() as usize;

    Ok((0..count).map(|k| start + k as f64 * step).collect())
}

// =================================================================================================
// Uniform Grid
// =================================================================================================

/// Immutable evenly spaced coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct UniformGrid {
    points: Vec<f64>,
    spacing: f64,
}

impl UniformGrid {
    /// Build a grid from `start` to `end` (inclusive) with the given spacing
    pub fn new(start: f64, end: f64, spacing: f64) -> TransportResult<Self> {
        let points = build_grid(start, end, spacing)?;
        Ok(Self { points, spacing })
    }

    /// Coordinates
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Distance between consecutive points
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A successfully built grid always holds at least one point
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First coordinate
    pub fn start(&self) -> f64 {
        self.points[0]
    }

    /// Last coordinate
    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }
}

// =================================================================================================
// Spatial and Temporal Grids
// =================================================================================================

/// Node positions along the reach \[m\]
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid(UniformGrid);

impl SpatialGrid {
    /// Positions from `start` to `end` with spacing `dx`
    pub fn new(start: f64, end: f64, dx: f64) -> TransportResult<Self> {
        UniformGrid::new(start, end, dx).map(Self)
    }

    /// Spatial step dx \[m\]
    pub fn dx(&self) -> f64 {
        self.0.spacing()
    }
}

impl Deref for SpatialGrid {
    type Target = UniformGrid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Time instants of the simulation \[s\]
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid(UniformGrid);

impl TimeGrid {
    /// Instants from `start` to `end` with spacing `dt`
    pub fn new(start: f64, end: f64, dt: f64) -> TransportResult<Self> {
        UniformGrid::new(start, end, dt).map(Self)
    }

    /// Time step dt \[s\]
    pub fn dt(&self) -> f64 {
        self.0.spacing()
    }
}

impl Deref for TimeGrid {
    type Target = UniformGrid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// =================================================================================================
// Tests
// =================================================================================================
