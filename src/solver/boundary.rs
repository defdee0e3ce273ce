//! Inlet boundary policy
//!
//! Defines the concentration imposed at the upstream edge of the reach
//! (node 0) at every time step.
//!
//! # Policies
//!
//! - **Hold**: node 0 keeps the initial value C(x=0, t=0) for the whole run
//! - **Driven**: node 0 follows a pure function of elapsed time g(t),
//!   evaluated once per step at t = n·dt (never at t = 0, row 0 is the
//!   initial condition)
//!
//! Driven policies are plain values: a parameter set (`Constant`,
//! `ExponentialDecay`) or a shared function (`Custom`). Nothing is captured
//! from the caller's loop state, so a policy built inside a sweep always
//! evaluates with its own parameters.
//!
//! # Example
//!
//! ```rust
//! use river_rs::solver::InletPolicy;
//!
//! let inlet = InletPolicy::exponential_decay(250.0, 0.01);
//! assert_eq!(inlet.evaluate(0.0), Some(250.0));
//! assert!(inlet.evaluate(100.0).unwrap() < 250.0);
//!
//! // Hold never evaluates a function: the solver uses C0[0]
//! assert_eq!(InletPolicy::Hold.evaluate(10.0), None);
//! assert_eq!(InletPolicy::Hold.boundary_value(7.5, 10.0), 7.5);
//! ```

use std::sync::Arc;

/// Concentration imposed at the inlet node
pub enum InletPolicy {
    /// Keep node 0 at its initial value
    Hold,

    /// Constant inlet concentration C_in \[µg/m³\]
    Constant { concentration: f64 },

    /// Exponentially decaying source
    ///
    /// ```text
    /// C_in(t) = C_in0 · exp(-k · t)
    /// ```
    ///
    /// A rate of zero is exactly the constant inlet.
    ExponentialDecay {
        initial_concentration: f64,
        rate: f64,
    },

    /// User-defined inlet concentration as a function of time
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

// ==================== Manual Clone Implementation ====================

impl Clone for InletPolicy {
    fn clone(&self) -> Self {
        match self {
            Self::Hold => Self::Hold,
            Self::Constant { concentration } => Self::Constant {
                concentration: *concentration,
            },
            Self::ExponentialDecay { initial_concentration, rate } => Self::ExponentialDecay {
                initial_concentration: *initial_concentration,
                rate: *rate,
            },
            Self::Custom(f) => Self::Custom(Arc::clone(f)),
        }
    }
}

// ==================== Manual Debug Implementation ====================

impl std::fmt::Debug for InletPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hold => f.debug_struct("Hold").finish(),
            Self::Constant { concentration } => f
                .debug_struct("Constant")
                .field("concentration", concentration)
                .finish(),
            Self::ExponentialDecay { initial_concentration, rate } => f
                .debug_struct("ExponentialDecay")
                .field("initial_concentration", initial_concentration)
                .field("rate", rate)
                .finish(),
            Self::Custom(_) => f
                .debug_struct("Custom")
                .field("function", &"<user-defined>")
                .finish(),
        }
    }
}

impl Default for InletPolicy {
    fn default() -> Self {
        Self::Hold
    }
}

// ==================== Implementation ====================

impl InletPolicy {
    /// Constant inlet concentration
    pub fn constant(concentration: f64) -> Self {
        Self::Constant { concentration }
    }

    /// Exponentially decaying inlet `initial_concentration · exp(-rate · t)`
    pub fn exponential_decay(initial_concentration: f64, rate: f64) -> Self {
        Self::ExponentialDecay { initial_concentration, rate }
    }

    /// Inlet driven by an arbitrary pure function of time
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Whether node 0 is held at its initial value
    pub fn is_hold(&self) -> bool {
        matches!(self, Self::Hold)
    }

    /// Short name of the policy
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Constant { .. } => "constant",
            Self::ExponentialDecay { .. } => "exponential-decay",
            Self::Custom(_) => "custom",
        }
    }

    /// Evaluate the driving function at time `t`
    ///
    /// Returns `None` for [`InletPolicy::Hold`], which has no function.
    pub fn evaluate(&self, t: f64) -> Option<f64> {
        match self {
            Self::Hold => None,
            Self::Constant { concentration } => Some(*concentration),
            Self::ExponentialDecay { initial_concentration, rate } => {
                Some(initial_concentration * (-rate * t).exp())
            }
            Self::Custom(f) => Some(f(t)),
        }
    }

    /// Value imposed at node 0 at time `t`
    ///
    /// `held` is the initial inlet value C0\[0\], used by the hold policy.
    #[inline]
    pub fn boundary_value(&self, held: f64, t: f64) -> f64 {
        self.evaluate(t).unwrap_or(held)
    }

    /// Evaluate at several instants (hold yields `held` everywhere)
    pub fn evaluate_series(&self, held: f64, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.boundary_value(held, t)).collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
