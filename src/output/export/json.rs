//! JSON export of concentration fields
//!
//! Document layout:
//!
//! ```json
//! {
//!   "x": [0.0, 0.2, ...],
//!   "t": [0.0, 10.0, ...],
//!   "c": [[250.0, 0.0, ...], ...],
//!   "metadata": { "solver": "Implicit Upwind", ... }
//! }
//! ```
//!
//! `c[n][i]` is the concentration at `t[n]`, `x[i]`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{TransportError, TransportResult};
use crate::output::export::{validate_export, Exporter};
use crate::physics::ConcentrationField;
use crate::solver::SimulationResult;

#[derive(Serialize)]
struct FieldDocument<'a> {
    x: &'a [f64],
    t: &'a [f64],
    c: Vec<Vec<f64>>,
    metadata: BTreeMap<&'a str, &'a str>,
}

/// Write `(x, t, field)` and metadata as one JSON document
pub fn export_field_json(
    x: &[f64],
    t: &[f64],
    field: &ConcentrationField,
    metadata: &BTreeMap<&str, &str>,
    output_path: impl AsRef<Path>,
    pretty: bool,
) -> TransportResult<()> {
    validate_export(x, t, field)?;

    let document = FieldDocument {
        x,
        t,
        c: field.to_rows(),
        metadata: metadata.clone(),
    };

    let mut out = BufWriter::new(File::create(output_path.as_ref())?);
    if pretty {
        serde_json::to_writer_pretty(&mut out, &document)?;
    } else {
        serde_json::to_writer(&mut out, &document)?;
    }
    out.flush()?;
    Ok(())
}

/// [`Exporter`] writing a single JSON document
#[derive(Clone, Debug, Default)]
pub struct JsonExporter {
    /// Indent the output (default: false)
    pub pretty: bool,
}

impl JsonExporter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Exporter for JsonExporter {
    type Error = TransportError;

    fn export(&self, x: &[f64], result: &SimulationResult, path: &Path) -> TransportResult<()> {
        let metadata: BTreeMap<&str, &str> = result
            .metadata
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        export_field_json(
            x,
            &result.time_points,
            &result.field,
            &metadata,
            path,
            self.pretty,
        )
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_document() {
        let field =
            ConcentrationField::from_matrix(DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 0.5]));
        let mut result = SimulationResult::new(vec![0.0, 10.0], field);
        result.add_metadata("solver", "Implicit Upwind");

        let file = NamedTempFile::new().unwrap();
        JsonExporter::pretty()
            .export(&[0.0, 0.2], &result, file.path())
            .unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["x"][1], 0.2);
        assert_eq!(value["t"][1], 10.0);
        assert_eq!(value["c"][1][1], 0.5);
        assert_eq!(value["metadata"]["solver"], "Implicit Upwind");
    }

    #[test]
    fn test_json_rejects_non_finite() {
        let field = ConcentrationField::from_matrix(DMatrix::from_row_slice(1, 1, &[f64::NAN]));
        let result = SimulationResult::new(vec![0.0], field);
        let file = NamedTempFile::new().unwrap();
        assert!(JsonExporter::default().export(&[0.0], &result, file.path()).is_err());
    }
}
