//! Numerical methods for the advection-decay equation
//!
//! This module contains the concrete implementations of the
//! [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`ImplicitUpwindSolver`]**: backward Euler in time, first-order upwind
//!   in space. The per-step system is lower bidiagonal and is solved by a
//!   single forward substitution sweep ([`advance`]).
//!   - Order: first order in dt and dx
//!   - Cost: O(nx) per step
//!   - Stability: unconditional for u ≥ 0

pub mod implicit_upwind;

// Re-exports for convenience
pub use implicit_upwind::{advance, ImplicitUpwindSolver};
