//! river-rs: one-dimensional pollutant transport along a river reach
//!
//! Advances a concentration profile C(x, t) under advection at velocity u
//! and first-order decay at rate λ:
//!
//! ```text
//! ∂C/∂t + u ∂C/∂x = -λ C
//! ```
//!
//! The equation is discretised backward in time and upwind in space. Each
//! time step is a lower-bidiagonal system solved by a single forward
//! substitution sweep, so the scheme is unconditionally stable for u ≥ 0.
//!
//! # Architecture
//!
//! 1. **Separation of problem and method**
//!    - A [`Scenario`](solver::Scenario) says what to solve
//!    - A [`SolverConfiguration`](solver::SolverConfiguration) says how to
//!      discretise it
//!    - A [`Solver`](solver::Solver) turns both into a
//!      [`SimulationResult`](solver::SimulationResult)
//!
//! 2. **Thin collaborators around the core**
//!    - CSV initial conditions and interpolation ([`input`])
//!    - CSV/JSON export, snapshot plots and GIF animation ([`output`])
//!    - Ready-made study cases and sweeps ([`cases`])
//!    - JSON run files for the `river-rs` binary ([`config`])
//!
//! # Quick Start
//!
//! ```rust
//! use river_rs::prelude::*;
//!
//! # fn main() -> Result<(), TransportError> {
//! let x = SpatialGrid::new(0.0, 20.0, 0.2)?;
//! let t = TimeGrid::new(0.0, 300.0, 10.0)?;
//!
//! let mut c0 = vec![0.0; x.len()];
//! c0[0] = 250.0;
//!
//! let scenario = Scenario::new(c0, VelocityField::uniform(0.1))
//!     .with_inlet(InletPolicy::exponential_decay(250.0, 0.01))
//!     .with_decay_rate(0.001);
//!
//! let config = SolverConfiguration::from_grids(&x, &t);
//! let result = ImplicitUpwindSolver::new().solve(&scenario, &config)?;
//!
//! assert_eq!(result.field.shape(), (t.len(), x.len()));
//! assert_eq!(result.field.row(0)[0], 250.0);
//! # Ok(())
//! # }
//! ```
//!
//! The stepper is also available as a free function:
//!
//! ```rust
//! use river_rs::physics::VelocityField;
//! use river_rs::solver::{advance, InletPolicy};
//!
//! let field = advance(
//!     &[1.0, 0.0, 0.0, 0.0, 0.0],
//!     &VelocityField::uniform(0.1),
//!     0.2,
//!     0.1,
//!     3,
//!     &InletPolicy::Hold,
//!     0.0,
//! )
//! .unwrap();
//! assert_eq!(field.shape(), (3, 5));
//! ```
//!
//! # Features
//!
//! - `parallel` (default): study sweeps run their independent solves on the
//!   rayon thread pool

pub mod cases;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod physics;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use river_rs::prelude::*;
    //! ```
    pub use crate::error::{TransportError, TransportResult};
    pub use crate::physics::{
        build_grid, ConcentrationField, SpatialGrid, TimeGrid, VelocityField,
    };
    pub use crate::solver::{
        advance, ImplicitUpwindSolver, InletPolicy, Scenario, SimulationResult, Solver,
        SolverConfiguration,
    };
}
