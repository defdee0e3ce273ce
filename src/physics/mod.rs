//! Physical description of the reach
//!
//! This module holds the data the solver works on, independent of the
//! numerical method:
//!
//! - [`grid`]: uniform spatial and temporal coordinates
//! - [`velocity`]: advection velocity (uniform, per node or per step)
//! - [`field`]: the concentration field C(t, x) produced by a solve
//!
//! # Example
//!
//! ```rust
//! use river_rs::physics::{SpatialGrid, TimeGrid, VelocityField};
//!
//! let x = SpatialGrid::new(0.0, 20.0, 0.2).unwrap();
//! let t = TimeGrid::new(0.0, 300.0, 10.0).unwrap();
//! let u = VelocityField::uniform(0.1);
//!
//! assert!(u.validate(x.len(), t.len()).is_ok());
//! ```

pub mod field;
pub mod grid;
pub mod velocity;

pub use field::ConcentrationField;
pub use grid::{build_grid, MAX_GRID_POINTS, SpatialGrid, TimeGrid, UniformGrid};
pub use velocity::VelocityField;
