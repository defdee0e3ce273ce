//! Simulation scenario definition
//!
//! A scenario gathers everything that describes the physical problem:
//! the initial concentration profile, the velocity field, the inlet policy
//! and the first-order decay rate.

use nalgebra::DVector;

use crate::error::{TransportError, TransportResult};
use crate::physics::VelocityField;
use crate::solver::boundary::InletPolicy;

/// Simulation scenario
///
/// This is the "WHAT to solve" (not "HOW to solve"): the same scenario can be
/// run with several [`SolverConfiguration`](crate::solver::SolverConfiguration)s.
///
/// # Examples
///
/// ```rust
/// use river_rs::solver::{InletPolicy, Scenario};
/// use river_rs::physics::VelocityField;
///
/// let mut c0 = vec![0.0; 101];
/// c0[0] = 250.0;
///
/// let scenario = Scenario::new(c0, VelocityField::uniform(0.1))
///     .with_inlet(InletPolicy::constant(250.0))
///     .with_decay_rate(0.005);
///
/// assert_eq!(scenario.nodes(), 101);
/// assert!(scenario.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Initial profile C(x, t = 0), owned by the scenario
    pub initial: DVector<f64>,

    /// Advection velocity
    pub velocity: VelocityField,

    /// Upstream boundary condition
    pub inlet: InletPolicy,

    /// First-order decay rate λ \[1/s\]
    pub decay_rate: f64,
}

impl Scenario {
    /// Create a scenario with a held inlet and no decay
    pub fn new(initial: Vec<f64>, velocity: VelocityField) -> Self {
        Self {
            initial: DVector::from_vec(initial),
            velocity,
            inlet: InletPolicy::Hold,
            decay_rate: 0.0,
        }
    }

    /// Replace the inlet policy
    pub fn with_inlet(mut self, inlet: InletPolicy) -> Self {
        self.inlet = inlet;
        self
    }

    /// Replace the decay rate
    pub fn with_decay_rate(mut self, decay_rate: f64) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    /// Number of spatial nodes nx
    pub fn nodes(&self) -> usize {
        self.initial.len()
    }

    /// Verify the parameters that do not depend on the discretisation
    ///
    /// The velocity shape is checked by the solver, which knows nt.
    pub fn validate(&self) -> TransportResult<()> {
        validate_parameters(self.initial.as_slice(), self.decay_rate)
    }
}

/// Checks shared by [`Scenario::validate`] and the stepper entry point
pub(crate) fn validate_parameters(initial: &[f64], decay_rate: f64) -> TransportResult<()> {
    if initial.is_empty() {
        return Err(TransportError::InvalidParameter(
            "initial profile must contain at least one node".to_string(),
        ));
    }
    if let Some(node) = initial.iter().position(|c| !c.is_finite()) {
        return Err(TransportError::InvalidParameter(format!(
            "initial concentration is not finite at node {}",
            node
        )));
    }
    if !decay_rate.is_finite() || decay_rate < 0.0 {
        return Err(TransportError::InvalidParameter(format!(
            "decay rate must be finite and non-negative, got {}",
            decay_rate
        )));
    }
    Ok(())
}

// ================================================================================================
// Tests
// ================================================================================================
