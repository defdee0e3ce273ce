//! Output of simulation results
//!
//! - **Visualization**: PNG/SVG snapshot plots and GIF animations using plotters
//! - **Export**: CSV/JSON data files for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← Plots and animations
//! │   ├── config.rs
//! │   ├── snapshots.rs
//! │   └── animation.rs
//! └── export/             ← Data export
//!     ├── csv.rs
//!     └── json.rs
//! ```
//!
//! Both sub-modules take the coordinates as plain `&[f64]` slices next to the
//! [`ConcentrationField`](crate::physics::ConcentrationField).

pub mod export;
pub mod visualization;

pub use export::{
    export_field_csv, export_field_json, export_profile_csv, CsvConfig, CsvExporter, Exporter,
    JsonExporter,
};
pub use visualization::{animate_field, plot_space_time_snapshots, PlotConfig};
