//! Numerical solvers
//!
//! # Core Concepts
//!
//! The solver architecture separates concerns into three layers:
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Initial concentration profile
//!    - Velocity field
//!    - Inlet boundary policy
//!    - Decay rate
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to discretise
//!    - Spatial step dx
//!    - Time step dt
//!    - Number of time levels nt
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the scheme
//!    - Returns a `SimulationResult` (time points, field, metadata)
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverConfiguration`, `SimulationResult`
//! - **`boundary`**: `InletPolicy`, the value imposed at the upstream node
//! - **`scenario`**: `Scenario`, the problem definition
//! - **`methods`**: `ImplicitUpwindSolver` and the `advance` stepper
//!
//! # Quick Start Example
//!
//! ```rust
//! use river_rs::physics::{SpatialGrid, TimeGrid, VelocityField};
//! use river_rs::solver::{
//!     ImplicitUpwindSolver, InletPolicy, Scenario, Solver, SolverConfiguration,
//! };
//!
//! // 1. Grids
//! let x = SpatialGrid::new(0.0, 20.0, 0.2).unwrap();
//! let t = TimeGrid::new(0.0, 300.0, 10.0).unwrap();
//!
//! // 2. Scenario (WHAT to solve)
//! let mut c0 = vec![0.0; x.len()];
//! c0[0] = 250.0;
//! let scenario = Scenario::new(c0, VelocityField::uniform(0.1))
//!     .with_inlet(InletPolicy::constant(250.0));
//!
//! // 3. Configuration (HOW to solve)
//! let config = SolverConfiguration::from_grids(&x, &t);
//!
//! // 4. Solve
//! let result = ImplicitUpwindSolver::new().solve(&scenario, &config).unwrap();
//! assert_eq!(result.field.shape(), (31, 101));
//! ```
//!
//! # Error Handling
//!
//! Every precondition (grid steps, velocity shape and sign, decay rate,
//! initial profile) is checked before the first step. A failed check returns
//! a [`TransportError`](crate::error::TransportError) and no field.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod boundary;
pub mod methods;
mod scenario;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use boundary::InletPolicy;
pub use methods::{advance, ImplicitUpwindSolver};
pub use scenario::Scenario;
pub use traits::{SimulationResult, Solver, SolverConfiguration};
