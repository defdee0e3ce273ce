//! CSV export of concentration fields
//!
//! Two layouts are available:
//!
//! - **Field** ([`CsvExporter`], [`export_field_csv`]): one row per time level,
//!   a `Time (s)` column followed by one column per node (`x=<position>`).
//!   Opens directly in a spreadsheet or `pandas.read_csv(..., comment='#')`.
//! - **Profile** ([`export_profile_csv`]): two columns, position and
//!   concentration, for a single time level.
//!
//! # Example
//!
//! ```rust,ignore
//! use river_rs::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
//!
//! let exporter = CsvExporter::new(
//!     CsvConfig::default().with_metadata(CsvMetadata::from_result(&result)),
//! );
//! exporter.export(x.points(), &result, "base_case.csv".as_ref())?;
//! ```
//!
//! **Output**:
//! ```csv
//! # River Pollutant Transport Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Solver: Implicit Upwind
//! # Total Time: 300 s
//! # Time Steps: 31
//! # decay rate: 0
//! #
//! Time (s),x=0.000000,x=0.200000,...
//! 0.000000,250.000000,0.000000,...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::{TransportError, TransportResult};
use crate::output::export::{validate_export, Exporter};
use crate::physics::ConcentrationField;
use crate::solver::SimulationResult;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use river_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(!config.include_metadata);
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the time column (default: "Time (s)")
    pub time_header: String,

    /// Header of the position column in profile exports (default: "Position (m)")
    pub position_header: String,

    /// Header of the concentration column in profile exports
    /// (default: "Concentration (µg/m³)")
    pub concentration_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time (s)".to_string(),
            position_header: "Position (m)".to_string(),
            concentration_header: "Concentration (µg/m³)".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    /// Format a number with the configured precision and decimal separator
    pub fn format_number(&self, value: f64) -> String {
        let formatted = format!("{:.prec$}", value, prec = self.precision);
        if self.decimal_separator != '.' {
            formatted.replace('.', &self.decimal_separator.to_string())
        } else {
            formatted
        }
    }
}

/// Metadata for CSV header comments
///
/// Only the fields that are set are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Solver name (e.g. "Implicit Upwind")
    pub solver_name: Option<String>,

    /// Simulated duration \[s\]
    pub total_time: Option<f64>,

    /// Number of time levels
    pub time_steps: Option<usize>,

    /// Additional `key: value` lines
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Collect the metadata recorded by the solver
    ///
    /// Custom entries are sorted by key so the header is stable between runs.
    pub fn from_result(result: &SimulationResult) -> Self {
        let mut custom: Vec<(String, String)> = result
            .metadata
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "solver" | "total time" | "time steps"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        custom.sort();

        Self {
            solver_name: result.get_metadata("solver").map(str::to_string),
            total_time: result.time_points.last().copied(),
            time_steps: Some(result.len()),
            custom,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# River Pollutant Transport Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some(total_time) = metadata.total_time {
        writeln!(out, "# Total Time: {} s", total_time)?;
    }
    if let Some(time_steps) = metadata.time_steps {
        writeln!(out, "# Time Steps: {}", time_steps)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

fn write_header_comments<W: Write>(out: &mut W, config: &CsvConfig) -> std::io::Result<()> {
    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(out, metadata)?;
    }
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export a full field: one row per time level, one column per node
///
/// # Errors
///
/// - `DimensionMismatch` when `x` or `t` disagree with the field shape
/// - `InvalidParameter` for empty or non-finite data
/// - `Io` on file errors
pub fn export_field_csv(
    x: &[f64],
    t: &[f64],
    field: &ConcentrationField,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> TransportResult<()> {
    validate_export(x, t, field)?;

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    let delimiter = configuration.delimiter;

    let mut out = BufWriter::new(File::create(output_path.as_ref())?);
    write_header_comments(&mut out, configuration)?;

    // ============================= Header =================================

    write!(out, "{}", configuration.time_header)?;
    for position in x {
        write!(out, "{}x={}", delimiter, configuration.format_number(*position))?;
    }
    writeln!(out)?;

    // ============================= Rows ===================================

    for (step, time) in t.iter().enumerate() {
        write!(out, "{}", configuration.format_number(*time))?;
        for node in 0..field.nodes() {
            write!(
                out,
                "{}{}",
                delimiter,
                configuration.format_number(field.get(step, node))
            )?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    debug!(
        "Exported {} field to {}",
        field,
        output_path.as_ref().display()
    );
    Ok(())
}

/// Export one spatial profile as `(position, concentration)` rows
pub fn export_profile_csv(
    x: &[f64],
    concentrations: &[f64],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> TransportResult<()> {
    if x.is_empty() {
        return Err(TransportError::InvalidParameter(
            "empty profile: nothing to export".to_string(),
        ));
    }
    if x.len() != concentrations.len() {
        return Err(TransportError::DimensionMismatch {
            quantity: "profile",
            expected: x.len(),
            found: concentrations.len(),
        });
    }
    if x.iter().chain(concentrations).any(|v| !v.is_finite()) {
        return Err(TransportError::InvalidParameter(
            "profile contains NaN or Inf".to_string(),
        ));
    }

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut out = BufWriter::new(File::create(output_path.as_ref())?);
    write_header_comments(&mut out, configuration)?;

    writeln!(
        out,
        "{}{}{}",
        configuration.position_header, configuration.delimiter, configuration.concentration_header
    )?;
    for (position, concentration) in x.iter().zip(concentrations) {
        writeln!(
            out,
            "{}{}{}",
            configuration.format_number(*position),
            configuration.delimiter,
            configuration.format_number(*concentration)
        )?;
    }

    out.flush()?;
    Ok(())
}

// =============================================================================
// Exporter
// =============================================================================

/// [`Exporter`] writing the wide field layout
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = TransportError;

    fn export(&self, x: &[f64], result: &SimulationResult, path: &Path) -> TransportResult<()> {
        export_field_csv(x, &result.time_points, &result.field, path, Some(&self.config))
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;
    use std::fs;
    use tempfile::NamedTempFile;

    fn small_result() -> (Vec<f64>, SimulationResult) {
        let field = ConcentrationField::from_matrix(DMatrix::from_row_slice(
            2,
            3,
            &[1.0, 0.0, 0.0, 1.0, 0.5, 0.25],
        ));
        let mut result = SimulationResult::new(vec![0.0, 10.0], field);
        result.add_metadata("solver", "Implicit Upwind");
        result.add_metadata("decay rate", "0");
        (vec![0.0, 0.2, 0.4], result)
    }

    #[test]
    fn test_format_number() {
        let config = CsvConfig::default();
        assert_eq!(config.format_number(1.5), "1.500000");

        let european = CsvConfig::european().precision(2);
        assert_eq!(european.format_number(1.5), "1,50");
    }

    #[test]
    fn test_export_field_layout() {
        let (x, result) = small_result();
        let file = NamedTempFile::new().unwrap();

        let exporter = CsvExporter::new(CsvConfig::default().precision(2));
        exporter.export(&x, &result, file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Time (s),x=0.00,x=0.20,x=0.40");
        assert_eq!(lines[1], "0.00,1.00,0.00,0.00");
        assert_eq!(lines[2], "10.00,1.00,0.50,0.25");
    }

    #[test]
    fn test_export_with_metadata() {
        let (x, result) = small_result();
        let file = NamedTempFile::new().unwrap();

        let config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&result));
        export_field_csv(&x, &result.time_points, &result.field, file.path(), Some(&config))
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("# River Pollutant Transport Data"));
        assert!(content.contains("# Generated: "));
        assert!(content.contains("# Solver: Implicit Upwind"));
        assert!(content.contains("# Time Steps: 2"));
        assert!(content.contains("# decay rate: 0"));

        let data_lines = content.lines().filter(|l| !l.starts_with('#')).count();
        assert_eq!(data_lines, 3);
    }

    #[test]
    fn test_export_rejects_mismatched_grid() {
        let (_, result) = small_result();
        let file = NamedTempFile::new().unwrap();
        let error = CsvExporter::default()
            .export(&[0.0, 0.2], &result, file.path())
            .unwrap_err();
        assert!(matches!(error, TransportError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_export_profile() {
        let file = NamedTempFile::new().unwrap();
        export_profile_csv(&[0.0, 1.0], &[2.0, 3.0], file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Position (m),Concentration (µg/m³)");
        assert_eq!(lines[1], "0.000000,2.000000");
    }

    #[test]
    fn test_export_profile_validation() {
        let file = NamedTempFile::new().unwrap();
        assert!(export_profile_csv(&[], &[], file.path(), None).is_err());
        assert!(export_profile_csv(&[0.0], &[1.0, 2.0], file.path(), None).is_err());
        assert!(export_profile_csv(&[0.0], &[f64::NAN], file.path(), None).is_err());
    }
}
