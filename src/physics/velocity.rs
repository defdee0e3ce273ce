//! Velocity field of the reach
//!
//! The solver accepts exactly one velocity shape per invocation:
//!
//! - **Uniform**: one value for every node and every step
//! - **PerNode**: one value per spatial node, constant in time
//! - **PerStep**: one value per time step, uniform in space
//!
//! Mixing spatial and temporal variation is not supported. The shape is
//! checked once against the grid by [`VelocityField::validate`] before any
//! step is taken; afterwards [`VelocityField::at`] is infallible.

use nalgebra::DVector;
use std::fmt;

use crate::error::{TransportError, TransportResult};

/// Advection velocity u \[m/s\]
#[derive(Debug, Clone, PartialEq)]
pub enum VelocityField {
    /// Same velocity everywhere, at all times
    Uniform(f64),

    /// `u[i]` at node `i`, held constant across time
    PerNode(DVector<f64>),

    /// `u[n]` broadcast to all nodes; step `n` of the solver reads `u[n - 1]`
    PerStep(DVector<f64>),
}

impl VelocityField {
    // ======================================= constructors =======================================

    /// Create a uniform velocity
    pub fn uniform(value: f64) -> Self {
        Self::Uniform(value)
    }

    /// Create a per-node velocity profile
    pub fn per_node(values: Vec<f64>) -> Self {
        Self::PerNode(DVector::from_vec(values))
    }

    /// Create a per-step velocity series
    pub fn per_step(values: Vec<f64>) -> Self {
        Self::PerStep(DVector::from_vec(values))
    }

    // ========================================== Queries ==========================================

    /// Short name of the active shape
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Uniform(_) => "uniform",
            Self::PerNode(_) => "per-node",
            Self::PerStep(_) => "per-step",
        }
    }

    /// Iterate over all stored values
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        let slice: &[f64] = match self {
            Self::Uniform(value) => std::slice::from_ref(value),
            Self::PerNode(values) | Self::PerStep(values) => values.as_slice(),
        };
        slice.iter().copied()
    }

    /// Largest stored velocity (used for Courant number diagnostics)
    pub fn max_speed(&self) -> f64 {
        self.values().fold(0.0, f64::max)
    }

    /// Velocity seen by `node` while computing step `step` (`step >= 1`)
    #[inline]
    pub fn at(&self, step: usize, node: usize) -> f64 {
        match self {
            Self::Uniform(value) => *value,
            Self::PerNode(values) => values[node],
            Self::PerStep(values) => values[step - 1],
        }
    }

    // ======================================== Validation ========================================

    /// Check the shape against `nodes` × `steps` and the sign of every value
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` when a per-node vector is not `nodes` long or a
    ///   per-step vector is not `steps` long
    /// - `InvalidParameter` for NaN or infinite values
    /// - `NegativeVelocity` for any value below zero
    pub fn validate(&self, nodes: usize, steps: usize) -> TransportResult<()> {
        match self {
            Self::Uniform(_) => {}
            Self::PerNode(values) if values.len() != nodes => {
                return Err(TransportError::DimensionMismatch {
                    quantity: "per-node velocity",
                    expected: nodes,
                    found: values.len(),
                });
            }
            Self::PerStep(values) if values.len() != steps => {
                return Err(TransportError::DimensionMismatch {
                    quantity: "per-step velocity",
                    expected: steps,
                    found: values.len(),
                });
            }
            _ => {}
        }

        for (index, value) in self.values().enumerate() {
            if !value.is_finite() {
                return Err(TransportError::InvalidParameter(format!(
                    "velocity must be finite, got {} at {}",
                    value,
                    self.location(index)
                )));
            }
            if value < 0.0 {
                return Err(TransportError::NegativeVelocity {
                    value,
                    location: self.location(index),
                });
            }
        }

        Ok(())
    }

    fn location(&self, index: usize) -> String {
        match self {
            Self::Uniform(_) => "every node".to_string(),
            Self::PerNode(_) => format!("node {}", index),
            Self::PerStep(_) => format!("step {}", index),
        }
    }
}

impl From<f64> for VelocityField {
    fn from(value: f64) -> Self {
        Self::Uniform(value)
    }
}

impl fmt::Display for VelocityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform(value) => write!(f, "Uniform ({} m/s)", value),
            Self::PerNode(values) => write!(f, "PerNode [{}]", values.len()),
            Self::PerStep(values) => write!(f, "PerStep [{}]", values.len()),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_lookup() {
        let u = VelocityField::uniform(0.1);
        assert_eq!(u.at(1, 0), 0.1);
        assert_eq!(u.at(7, 42), 0.1);
        assert!(u.validate(10, 3).is_ok());
    }

    #[test]
    fn test_per_node_lookup() {
        let u = VelocityField::per_node(vec![0.1, 0.2, 0.3]);
        assert_eq!(u.at(1, 2), 0.3);
        assert_eq!(u.at(5, 2), 0.3);
        assert_eq!(u.kind(), "per-node");
    }

    #[test]
    fn test_per_step_reads_previous_entry() {
        let u = VelocityField::per_step(vec![0.1, 0.2, 0.3]);
        assert_eq!(u.at(1, 0), 0.1);
        assert_eq!(u.at(2, 4), 0.2);
    }

    #[test]
    fn test_per_node_length_mismatch() {
        let u = VelocityField::per_node(vec![0.1; 4]);
        match u.validate(5, 3) {
            Err(TransportError::DimensionMismatch { expected, found, .. }) => {
                assert_eq!(expected, 5);
                assert_eq!(found, 4);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_per_step_length_mismatch() {
        let u = VelocityField::per_step(vec![0.1; 2]);
        assert!(matches!(
            u.validate(5, 3),
            Err(TransportError::DimensionMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_negative_velocity_rejected() {
        let u = VelocityField::per_node(vec![0.1, -0.2, 0.1]);
        match u.validate(3, 2) {
            Err(TransportError::NegativeVelocity { value, location }) => {
                assert_eq!(value, -0.2);
                assert_eq!(location, "node 1");
            }
            other => panic!("expected NegativeVelocity, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_velocity_rejected() {
        let u = VelocityField::uniform(f64::NAN);
        assert!(matches!(
            u.validate(3, 2),
            Err(TransportError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_max_speed_and_display() {
        let u = VelocityField::per_step(vec![0.1, 0.4, 0.2]);
        assert_eq!(u.max_speed(), 0.4);
        assert_eq!(u.to_string(), "PerStep [3]");
        assert_eq!(VelocityField::from(0.5).to_string(), "Uniform (0.5 m/s)");
    }
}
