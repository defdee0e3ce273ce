//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - [`Scenario`](crate::solver::Scenario) says WHAT to solve (initial
//!   profile, velocity, inlet, decay)
//! - [`SolverConfiguration`] says HOW to discretise it (dx, dt, number of
//!   time levels)
//! - [`Solver`] is the numerical method turning both into a
//!   [`SimulationResult`]

use std::collections::HashMap;

use crate::error::{TransportError, TransportResult};
use crate::physics::{ConcentrationField, SpatialGrid, TimeGrid};
use crate::solver::Scenario;

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Discretisation parameters of a solve
///
/// # Examples
///
/// ```rust
/// use river_rs::physics::{SpatialGrid, TimeGrid};
/// use river_rs::solver::SolverConfiguration;
///
/// // Explicit values
/// let config = SolverConfiguration::new(0.2, 10.0, 31);
/// assert!(config.validate().is_ok());
///
/// // From grids
/// let x = SpatialGrid::new(0.0, 20.0, 0.2).unwrap();
/// let t = TimeGrid::new(0.0, 300.0, 10.0).unwrap();
/// let config = SolverConfiguration::from_grids(&x, &t);
/// assert_eq!(config.time_steps, 31);
/// assert_eq!(config.total_time(), 300.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Spatial step dx \[m\]
    pub dx: f64,

    /// Time step dt \[s\]
    pub dt: f64,

    /// Number of time levels nt, including the initial one
    pub time_steps: usize,
}

impl SolverConfiguration {
    /// Create a configuration from explicit values
    pub fn new(dx: f64, dt: f64, time_steps: usize) -> Self {
        Self { dx, dt, time_steps }
    }

    /// Take dx from the spatial grid, dt and nt from the time grid
    pub fn from_grids(space: &SpatialGrid, time: &TimeGrid) -> Self {
        Self::new(space.dx(), time.dt(), time.len())
    }

    /// Simulated duration (nt - 1)·dt \[s\]
    pub fn total_time(&self) -> f64 {
        self.time_steps.saturating_sub(1) as f64 * self.dt
    }

    /// Time of level `step`
    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 * self.dt
    }

    /// Validate configuration
    pub fn validate(&self) -> TransportResult<()> {
        if !self.dx.is_finite() || self.dx <= 0.0 {
            return Err(TransportError::InvalidGridConfiguration(format!(
                "dx must be positive, got {}",
                self.dx
            )));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(TransportError::InvalidGridConfiguration(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if self.time_steps == 0 {
            return Err(TransportError::InvalidGridConfiguration(
                "at least one time level is required".to_string(),
            ));
        }
        Ok(())
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Output of a solve
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// t\[n\] = n·dt for every row of the field
    pub time_points: Vec<f64>,

    /// Concentration field, one row per time point
    pub field: ConcentrationField,

    /// Diagnostics and run parameters
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a result without metadata
    pub fn new(time_points: Vec<f64>, field: ConcentrationField) -> Self {
        Self {
            time_points,
            field,
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Read a metadata entry
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Number of time levels
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    /// Whether the result holds no time level
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Profile at the last time level
    pub fn final_profile(&self) -> Vec<f64> {
        self.field.final_profile()
    }

    /// Concentration history at the downstream end of the reach
    pub fn outlet_series(&self) -> Vec<f64> {
        self.field.column(self.field.nodes() - 1)
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// A numerical method for the advection-decay equation
///
/// ```text
/// ∂C/∂t + u ∂C/∂x = -λ C
/// ```
pub trait Solver {
    /// Solve `scenario` with the discretisation in `config`
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> TransportResult<SimulationResult>;

    /// Human-readable method name
    fn name(&self) -> &str;

    /// Optional longer description
    fn description(&self) -> Option<&str> {
        None
    }
}
