//! Initial-condition input
//!
//! Measured concentration profiles arrive as `(position, concentration)`
//! pairs in a CSV file. They are loaded into a [`MeasuredProfile`] and then
//! interpolated onto the solver grid.
//!
//! # Example
//!
//! ```rust
//! use river_rs::input::{parse_initial_conditions, InitialConditionCsvConfig};
//! use river_rs::physics::SpatialGrid;
//!
//! let content = "x (m),C (ug/m3)\n0.0,10.0\n1.0,20.0\n";
//! let profile = parse_initial_conditions(content, &InitialConditionCsvConfig::default()).unwrap();
//!
//! let grid = SpatialGrid::new(0.0, 1.0, 0.5).unwrap();
//! let c0 = profile.onto_grid(grid.points());
//! assert_eq!(c0, vec![10.0, 15.0, 20.0]);
//! ```

pub mod csv;
pub mod interpolate;

pub use csv::{
    load_initial_conditions, parse_initial_conditions, InitialConditionCsvConfig,
    MeasuredProfile,
};
pub use interpolate::interpolate_to_grid;
