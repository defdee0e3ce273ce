//! CSV loader for measured initial conditions
//!
//! Expected layout: column 0 is the position along the reach \[m\], column 1
//! the concentration \[µg/m³\]. Additional columns are ignored.
//!
//! ```csv
//! x (m),C (µg/m³)
//! 0.0,250.0
//! 0.5,180.0
//! # comment lines are skipped
//! 1.0,95.0
//! ```
//!
//! File bytes are decoded lossily: headers written in Latin-1 (`µg/m³`) load
//! without error since only the numeric rows matter.

use std::path::Path;

use log::{debug, warn};

use crate::error::{TransportError, TransportResult};

// =================================================================================================
// Configuration
// =================================================================================================

/// Configuration for reading an initial-condition CSV file
#[derive(Clone, Debug)]
pub struct InitialConditionCsvConfig {
    /// Whether the first data line is a header (default: true)
    pub has_header: bool,

    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Lines starting with this character are skipped (default: '#')
    pub comment_prefix: Option<char>,
}

impl Default for InitialConditionCsvConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: ',',
            comment_prefix: Some('#'),
        }
    }
}

impl InitialConditionCsvConfig {
    /// File without a header row
    pub fn no_header() -> Self {
        Self {
            has_header: false,
            ..Default::default()
        }
    }

    /// Semicolon-separated file
    pub fn semicolon_separated() -> Self {
        Self {
            delimiter: ';',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

// =================================================================================================
// Measured profile
// =================================================================================================

/// Measured concentrations, sorted by increasing position
#[derive(Clone, Debug, PartialEq)]
pub struct MeasuredProfile {
    positions: Vec<f64>,
    concentrations: Vec<f64>,
}

impl MeasuredProfile {
    /// Build a profile from unsorted pairs
    ///
    /// # Errors
    ///
    /// `MalformedInput` when the two lists differ in length or are empty,
    /// `InvalidParameter` when a value is not finite.
    pub fn new(positions: Vec<f64>, concentrations: Vec<f64>) -> TransportResult<Self> {
        if positions.len() != concentrations.len() {
            return Err(TransportError::MalformedInput(format!(
                "{} positions versus {} concentrations",
                positions.len(),
                concentrations.len()
            )));
        }
        if positions.is_empty() {
            return Err(TransportError::MalformedInput(
                "measured profile contains no data".to_string(),
            ));
        }
        if positions
            .iter()
            .chain(concentrations.iter())
            .any(|v| !v.is_finite())
        {
            return Err(TransportError::InvalidParameter(
                "measured profile contains a non-finite value".to_string(),
            ));
        }

        let mut pairs: Vec<(f64, f64)> = positions.into_iter().zip(concentrations).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (positions, concentrations) = pairs.into_iter().unzip();
        Ok(Self {
            positions,
            concentrations,
        })
    }

    /// Sorted positions \[m\]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Concentrations matching [`positions`](Self::positions)
    pub fn concentrations(&self) -> &[f64] {
        &self.concentrations
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Smallest and largest measured position
    pub fn extent(&self) -> (f64, f64) {
        // Never empty once constructed
        (
            self.positions[0],
            self.positions[self.positions.len() - 1],
        )
    }
}

// =================================================================================================
// Loading
// =================================================================================================

/// Load a measured profile from a CSV file
///
/// # Example
///
/// ```rust,ignore
/// use river_rs::input::{load_initial_conditions, InitialConditionCsvConfig};
///
/// let profile = load_initial_conditions("data/initial_conditions.csv", &Default::default())?;
/// let (x_min, x_max) = profile.extent();
/// ```
pub fn load_initial_conditions(
    path: impl AsRef<Path>,
    config: &InitialConditionCsvConfig,
) -> TransportResult<MeasuredProfile> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);

    debug!("Loading initial conditions from {}", path.display());
    parse_initial_conditions(&content, config)
}

/// Parse a measured profile from CSV text
///
/// Rules:
/// - blank lines and comment lines are skipped
/// - the first remaining line is the header when `has_header` is set
/// - a row with fewer than two fields is an error
/// - a row whose position or concentration is not a finite number is dropped
/// - surviving rows are sorted by position
pub fn parse_initial_conditions(
    content: &str,
    config: &InitialConditionCsvConfig,
) -> TransportResult<MeasuredProfile> {
    let mut positions = Vec::new();
    let mut concentrations = Vec::new();
    let mut header_pending = config.has_header;
    let mut dropped = 0usize;

    for (line_index, line) in content.lines().enumerate() {
        let line_number = line_index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if let Some(prefix) = config.comment_prefix
            && trimmed.starts_with(prefix)
        {
            continue;
        }
        if header_pending {
            header_pending = false;
            continue;
        }

        let fields: Vec<&str> = trimmed.split(config.delimiter).collect();
        if fields.len() < 2 {
            return Err(TransportError::MalformedInput(format!(
                "line {}: expected at least 2 columns, found {}",
                line_number,
                fields.len()
            )));
        }

        match (parse_value(fields[0]), parse_value(fields[1])) {
            (Some(x), Some(c)) => {
                positions.push(x);
                concentrations.push(c);
            }
            _ => {
                warn!("line {}: dropping non-numeric row '{}'", line_number, trimmed);
                dropped += 1;
            }
        }
    }

    if positions.is_empty() {
        return Err(TransportError::MalformedInput(
            "no numeric rows in initial-condition data".to_string(),
        ));
    }

    debug!(
        "Parsed {} measured points ({} rows dropped)",
        positions.len(),
        dropped
    );

    MeasuredProfile::new(positions, concentrations)
}

fn parse_value(field: &str) -> Option<f64> {
    field
        .trim()
        .trim_matches('"')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_with_header() {
        let content = "x,C\n0.0,1.0\n0.5,2.0\n1.0,3.0\n";
        let profile = parse_initial_conditions(content, &Default::default()).unwrap();
        assert_eq!(profile.positions(), &[0.0, 0.5, 1.0]);
        assert_eq!(profile.concentrations(), &[1.0, 2.0, 3.0]);
        assert_eq!(profile.extent(), (0.0, 1.0));
    }

    #[test]
    fn test_rows_are_sorted_by_position() {
        let content = "x,C\n2.0,20.0\n0.0,0.0\n1.0,10.0\n";
        let profile = parse_initial_conditions(content, &Default::default()).unwrap();
        assert_eq!(profile.positions(), &[0.0, 1.0, 2.0]);
        assert_eq!(profile.concentrations(), &[0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let content = "# measured 2024\n\nx,C\n# mid comment\n0.0,5.0\n\n1.0,6.0\n";
        let profile = parse_initial_conditions(content, &Default::default()).unwrap();
        assert_eq!(profile.len(), 2);
    }

    #[test]
    fn test_no_header() {
        let content = "0.0,5.0\n1.0,6.0\n";
        let profile =
            parse_initial_conditions(content, &InitialConditionCsvConfig::no_header()).unwrap();
        assert_eq!(profile.len(), 2);
    }

    #[test]
    fn test_semicolon_delimiter_and_extra_columns() {
        let content = "x;C;note\n0.0;5.0;upstream\n1.0;6.0;bridge\n";
        let config = InitialConditionCsvConfig::semicolon_separated();
        let profile = parse_initial_conditions(content, &config).unwrap();
        assert_eq!(profile.concentrations(), &[5.0, 6.0]);
    }

    #[test]
    fn test_single_column_row_is_error() {
        let content = "x,C\n0.0,1.0\n0.5\n";
        let error = parse_initial_conditions(content, &Default::default()).unwrap_err();
        match error {
            TransportError::MalformedInput(message) => assert!(message.contains("line 3")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_rows_dropped() {
        let content = "x,C\n0.0,1.0\nn/a,2.0\n1.0,NaN\n2.0,3.0\n";
        let profile = parse_initial_conditions(content, &Default::default()).unwrap();
        assert_eq!(profile.positions(), &[0.0, 2.0]);
    }

    #[test]
    fn test_empty_after_cleaning_is_error() {
        let content = "x,C\nfoo,bar\n";
        assert!(matches!(
            parse_initial_conditions(content, &Default::default()),
            Err(TransportError::MalformedInput(_))
        ));
        assert!(parse_initial_conditions("", &Default::default()).is_err());
    }

    #[test]
    fn test_load_latin1_file() {
        let mut file = NamedTempFile::new().unwrap();
        // "C (µg/m³)" encoded as Latin-1
        file.write_all(b"x (m),C (\xb5g/m\xb3)\n0.0,250.0\n0.2,125.0\n")
            .unwrap();

        let profile = load_initial_conditions(file.path(), &Default::default()).unwrap();
        assert_eq!(profile.concentrations(), &[250.0, 125.0]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_initial_conditions("/nonexistent/initial.csv", &Default::default());
        assert!(matches!(result, Err(TransportError::Io(_))));
    }

    #[test]
    fn test_measured_profile_validation() {
        assert!(MeasuredProfile::new(vec![0.0], vec![]).is_err());
        assert!(MeasuredProfile::new(vec![], vec![]).is_err());
        assert!(MeasuredProfile::new(vec![f64::NAN], vec![1.0]).is_err());
    }
}
