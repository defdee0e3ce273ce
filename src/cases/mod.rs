//! Study cases
//!
//! Ready-made scenarios for the river-reach study, each returning its
//! results to the caller:
//!
//! | Entry point                    | Scenario                                          |
//! |--------------------------------|---------------------------------------------------|
//! | [`run_base_case`]              | Constant 250 µg/m³ source at x = 0, U = 0.1 m/s   |
//! | [`run_csv_case`]               | Measured initial profile, inlet held               |
//! | [`sensitivity_sweep`]          | Every (U, dx, dt) combination                      |
//! | [`inlet_decay_sweep`]          | Exponentially decaying source, several rates       |
//! | [`decay_rate_sweep`]           | Constant source, several in-reach decay rates λ    |
//! | [`perturbed_velocity_study`]   | Randomly perturbed U(x) against a uniform baseline |
//!
//! All cases share [`CaseParameters`], whose defaults describe a 20 m reach
//! (dx = 0.2 m) simulated for 300 s (dt = 10 s).

mod perturbed;
pub(crate) mod sweeps;

pub use perturbed::{perturbed_velocity_study, PerturbedRealization, PerturbedStudy};
pub use sweeps::{
    decay_rate_sweep, inlet_decay_sweep, sensitivity_sweep, ParameterRun, SensitivityRun,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::TransportResult;
use crate::input::MeasuredProfile;
use crate::physics::{SpatialGrid, TimeGrid, VelocityField};
use crate::solver::{
    ImplicitUpwindSolver, InletPolicy, Scenario, SimulationResult, Solver, SolverConfiguration,
};

// =================================================================================================
// Parameters
// =================================================================================================

/// Physical and numerical parameters shared by the study cases
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseParameters {
    /// Reach length L \[m\]
    pub length: f64,

    /// Spatial step \[m\]
    pub dx: f64,

    /// End time \[s\]
    pub t_end: f64,

    /// Time step \[s\]
    pub dt: f64,

    /// Advection velocity U \[m/s\]
    pub velocity: f64,

    /// Source concentration at x = 0 \[µg/m³\]
    pub inlet_concentration: f64,

    /// In-reach first-order decay rate λ \[1/s\]
    pub decay_rate: f64,
}

impl Default for CaseParameters {
    fn default() -> Self {
        Self {
            length: 20.0,
            dx: 0.2,
            t_end: 300.0,
            dt: 10.0,
            velocity: 0.1,
            inlet_concentration: 250.0,
            decay_rate: 0.0,
        }
    }
}

impl CaseParameters {
    /// Spatial grid `[0, length]` and time grid `[0, t_end]`
    pub fn grids(&self) -> TransportResult<(SpatialGrid, TimeGrid)> {
        Ok((
            SpatialGrid::new(0.0, self.length, self.dx)?,
            TimeGrid::new(0.0, self.t_end, self.dt)?,
        ))
    }

    /// Clean reach with the source value at the inlet node
    pub fn pulse_profile(&self, nodes: usize) -> Vec<f64> {
        let mut profile = vec![0.0; nodes];
        if let Some(first) = profile.first_mut() {
            *first = self.inlet_concentration;
        }
        profile
    }

    /// Same parameters with a different grid and velocity
    pub(crate) fn with_discretisation(&self, velocity: f64, dx: f64, dt: f64) -> Self {
        Self {
            velocity,
            dx,
            dt,
            ..self.clone()
        }
    }
}

// =================================================================================================
// Case result
// =================================================================================================

/// Grids and result of one case run
#[derive(Clone, Debug)]
pub struct CaseRun {
    pub space: SpatialGrid,
    pub time: TimeGrid,
    pub result: SimulationResult,
}

impl CaseRun {
    /// Concentration at the downstream end at the final time
    pub fn final_outlet(&self) -> f64 {
        let field = &self.result.field;
        field.get(field.steps() - 1, field.nodes() - 1)
    }
}

/// Solve `scenario` on the case grids
pub(crate) fn solve_on_grids(
    space: SpatialGrid,
    time: TimeGrid,
    scenario: &Scenario,
) -> TransportResult<CaseRun> {
    let config = SolverConfiguration::from_grids(&space, &time);
    let result = ImplicitUpwindSolver::new().solve(scenario, &config)?;
    Ok(CaseRun {
        space,
        time,
        result,
    })
}

/// Pulse profile, uniform velocity and `inlet` on the parameter grids
pub(crate) fn run_pulse(params: &CaseParameters, inlet: InletPolicy) -> TransportResult<CaseRun> {
    let (space, time) = params.grids()?;
    let scenario = Scenario::new(
        params.pulse_profile(space.len()),
        VelocityField::uniform(params.velocity),
    )
    .with_inlet(inlet)
    .with_decay_rate(params.decay_rate);

    solve_on_grids(space, time, &scenario)
}

// =================================================================================================
// Base and CSV cases
// =================================================================================================

/// Base case: constant source at x = 0, clean reach downstream
///
/// # Example
///
/// ```rust
/// use river_rs::cases::{run_base_case, CaseParameters};
///
/// let run = run_base_case(&CaseParameters::default()).unwrap();
/// assert_eq!(run.result.field.shape(), (31, 101));
/// ```
pub fn run_base_case(params: &CaseParameters) -> TransportResult<CaseRun> {
    let run = run_pulse(params, InletPolicy::constant(params.inlet_concentration))?;
    info!(
        "Base case complete: nx={}, nt={}",
        run.space.len(),
        run.time.len()
    );
    Ok(run)
}

/// Measured initial condition advected with a held inlet
///
/// The spatial grid spans the measured positions with step `params.dx`; the
/// reach length of `params` is not used.
pub fn run_csv_case(profile: &MeasuredProfile, params: &CaseParameters) -> TransportResult<CaseRun> {
    let (x_min, x_max) = profile.extent();
    let space = SpatialGrid::new(x_min, x_max, params.dx)?;
    let time = TimeGrid::new(0.0, params.t_end, params.dt)?;

    let initial = profile.onto_grid(space.points());
    let scenario = Scenario::new(initial, VelocityField::uniform(params.velocity))
        .with_decay_rate(params.decay_rate);

    let run = solve_on_grids(space, time, &scenario)?;
    info!(
        "CSV case complete: {} measured points, nx={}, nt={}",
        profile.len(),
        run.space.len(),
        run.time.len()
    );
    Ok(run)
}

// =================================================================================================
// Tests
// =================================================================================================
