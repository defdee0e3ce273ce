//! Visualization of concentration fields
//!
//! This module draws simulation results with the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **snapshots**: Spatial profiles at a few time levels (PNG or SVG)
//! - **animation**: Animated profile, one frame per time level (GIF)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use river_rs::output::visualization::{animate_field, plot_space_time_snapshots, PlotConfig};
//!
//! let result = solver.solve(&scenario, &config)?;
//!
//! // Rows 0, nt/3, 2nt/3 and nt-1
//! plot_space_time_snapshots(x.points(), &result.time_points, &result.field,
//!     None, "snapshots.png", None)?;
//!
//! // Animated GIF
//! animate_field(x.points(), &result.time_points, &result.field,
//!     "advection.gif", Some(&PlotConfig::animation("Base case")))?;
//! ```

pub mod animation;
pub mod config;
pub mod snapshots;

pub use animation::animate_field;
pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};
pub use snapshots::{default_snapshot_rows, plot_space_time_snapshots};
