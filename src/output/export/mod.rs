//! Export of simulation results
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the file format. Each format lives in its
//! own sub-module; adding a format means adding a file.
//!
//! | Format | Module   | Layout                                         |
//! |--------|----------|------------------------------------------------|
//! | CSV    | [`csv`]  | `Time (s)` column, then one column per node    |
//! | JSON   | [`json`] | `{"x": [...], "t": [...], "c": [[...]], ...}`  |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use river_rs::output::export::{CsvExporter, Exporter, JsonExporter};
//!
//! CsvExporter::default().export(x.points(), &result, "run.csv".as_ref())?;
//! JsonExporter::pretty().export(x.points(), &result, "run.json".as_ref())?;
//! ```

pub mod csv;
pub mod json;

pub use csv::{export_field_csv, export_profile_csv, CsvConfig, CsvExporter, CsvMetadata};
pub use json::{export_field_json, JsonExporter};

use std::path::Path;

use crate::error::{TransportError, TransportResult};
use crate::physics::ConcentrationField;
use crate::solver::SimulationResult;

/// Abstraction over export formats
///
/// The caller supplies the spatial coordinates `x`, since a
/// [`SimulationResult`] only carries time points.
pub trait Exporter {
    /// Error type specific to this export format
    type Error: std::error::Error;

    /// Write `result` on the grid `x` to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `x` does not match the number of nodes of the field
    /// - the result contains no data or non-finite values
    /// - the file cannot be written
    fn export(&self, x: &[f64], result: &SimulationResult, path: &Path)
    -> Result<(), Self::Error>;

    /// File extension written by this exporter, without the dot
    fn extension(&self) -> &'static str;
}

/// Checks shared by all exporters: shapes agree, values are finite
pub(crate) fn validate_export(
    x: &[f64],
    t: &[f64],
    field: &ConcentrationField,
) -> TransportResult<()> {
    let (steps, nodes) = field.shape();

    if steps == 0 || nodes == 0 {
        return Err(TransportError::InvalidParameter(
            "empty field: nothing to export".to_string(),
        ));
    }
    if x.len() != nodes {
        return Err(TransportError::DimensionMismatch {
            quantity: "spatial grid",
            expected: nodes,
            found: x.len(),
        });
    }
    if t.len() != steps {
        return Err(TransportError::DimensionMismatch {
            quantity: "time points",
            expected: steps,
            found: t.len(),
        });
    }
    if x.iter().chain(t).any(|v| !v.is_finite()) {
        return Err(TransportError::InvalidParameter(
            "coordinates contain NaN or Inf".to_string(),
        ));
    }
    if !field.is_finite() {
        return Err(TransportError::InvalidParameter(
            "field contains NaN or Inf".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_export() {
        let field = ConcentrationField::zeros(2, 3);
        assert!(validate_export(&[0.0, 1.0, 2.0], &[0.0, 1.0], &field).is_ok());
        assert!(matches!(
            validate_export(&[0.0, 1.0, 2.0], &[0.0], &field),
            Err(TransportError::DimensionMismatch { quantity: "time points", .. })
        ));
        assert!(validate_export(&[], &[], &ConcentrationField::zeros(0, 0)).is_err());
    }
}
