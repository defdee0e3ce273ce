//! Run configuration
//!
//! A run is described by a JSON file. Every field is optional and falls back
//! to the base case (20 m reach, dx = 0.2 m, 300 s, dt = 10 s, U = 0.1 m/s,
//! constant 250 µg/m³ source):
//!
//! ```json
//! {
//!   "x_end": 20.0,
//!   "dx": 0.2,
//!   "t_end": 300.0,
//!   "dt": 10.0,
//!   "velocity": { "kind": "uniform", "value": 0.1 },
//!   "inlet": { "kind": "exponential-decay", "initial_concentration": 250.0, "rate": 0.01 },
//!   "decay_rate": 0.0,
//!   "initial": { "kind": "pulse", "concentration": 250.0 },
//!   "output": { "directory": "results", "name": "run", "csv": true, "snapshots": true }
//! }
//! ```
//!
//! With `"initial": { "kind": "csv", "path": "initial_conditions.csv" }` the
//! measured profile is interpolated onto `[x_start, x_end]`. A relative path
//! is resolved against the directory of the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::cases::{solve_on_grids, CaseRun};
use crate::error::{TransportError, TransportResult};
use crate::input::{load_initial_conditions, InitialConditionCsvConfig};
use crate::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter, JsonExporter};
use crate::output::visualization::{animate_field, plot_space_time_snapshots, PlotConfig};
use crate::physics::{SpatialGrid, TimeGrid, VelocityField};
use crate::solver::{InletPolicy, Scenario};

// =================================================================================================
// Run file settings
// =================================================================================================

/// Velocity as written in the run file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VelocitySetting {
    Uniform { value: f64 },
    PerNode { values: Vec<f64> },
    PerStep { values: Vec<f64> },
}

impl Default for VelocitySetting {
    fn default() -> Self {
        Self::Uniform { value: 0.1 }
    }
}

impl From<&VelocitySetting> for VelocityField {
    fn from(setting: &VelocitySetting) -> Self {
        match setting {
            VelocitySetting::Uniform { value } => VelocityField::uniform(*value),
            VelocitySetting::PerNode { values } => VelocityField::per_node(values.clone()),
            VelocitySetting::PerStep { values } => VelocityField::per_step(values.clone()),
        }
    }
}

/// Inlet policy as written in the run file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InletSetting {
    Hold,
    Constant {
        concentration: f64,
    },
    ExponentialDecay {
        initial_concentration: f64,
        rate: f64,
    },
}

impl Default for InletSetting {
    fn default() -> Self {
        Self::Constant {
            concentration: 250.0,
        }
    }
}

impl From<&InletSetting> for InletPolicy {
    fn from(setting: &InletSetting) -> Self {
        match setting {
            InletSetting::Hold => InletPolicy::Hold,
            InletSetting::Constant { concentration } => InletPolicy::constant(*concentration),
            InletSetting::ExponentialDecay {
                initial_concentration,
                rate,
            } => InletPolicy::exponential_decay(*initial_concentration, *rate),
        }
    }
}

/// Initial condition as written in the run file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InitialSetting {
    /// `concentration` at the first node, clean reach elsewhere
    Pulse { concentration: f64 },

    /// Same concentration at every node
    Uniform { concentration: f64 },

    /// Measured profile interpolated onto the grid
    Csv {
        path: PathBuf,
        #[serde(default = "default_delimiter")]
        delimiter: char,
        #[serde(default = "default_has_header")]
        has_header: bool,
    },
}

fn default_delimiter() -> char {
    ','
}

fn default_has_header() -> bool {
    true
}

impl Default for InitialSetting {
    fn default() -> Self {
        Self::Pulse {
            concentration: 250.0,
        }
    }
}

/// Which files a run writes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Destination directory, created when missing
    pub directory: PathBuf,

    /// File stem of every output
    pub name: String,

    /// Plot title (default: the file stem)
    pub title: Option<String>,

    pub csv: bool,
    pub json: bool,
    pub snapshots: bool,
    pub animation: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("results"),
            name: "run".to_string(),
            title: None,
            csv: true,
            json: false,
            snapshots: true,
            animation: false,
        }
    }
}

// =================================================================================================
// Run configuration
// =================================================================================================

/// Complete description of one run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub x_start: f64,
    pub x_end: f64,
    pub dx: f64,
    pub t_end: f64,
    pub dt: f64,
    pub velocity: VelocitySetting,
    pub inlet: InletSetting,
    pub decay_rate: f64,
    pub initial: InitialSetting,
    pub output: OutputSettings,

    /// Directory of the file this configuration was read from
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            x_start: 0.0,
            x_end: 20.0,
            dx: 0.2,
            t_end: 300.0,
            dt: 10.0,
            velocity: VelocitySetting::default(),
            inlet: InletSetting::default(),
            decay_rate: 0.0,
            initial: InitialSetting::default(),
            output: OutputSettings::default(),
            base_dir: None,
        }
    }
}

impl RunConfig {
    /// Parse a configuration from JSON text
    pub fn from_json(text: &str) -> TransportResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> TransportResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_json(&text).map_err(|e| {
            TransportError::MalformedInput(format!("{}: {}", path.display(), e))
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Spatial and time grids of the run
    pub fn grids(&self) -> TransportResult<(SpatialGrid, TimeGrid)> {
        Ok((
            SpatialGrid::new(self.x_start, self.x_end, self.dx)?,
            TimeGrid::new(0.0, self.t_end, self.dt)?,
        ))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Initial profile on `space`
    pub fn initial_profile(&self, space: &SpatialGrid) -> TransportResult<Vec<f64>> {
        match &self.initial {
            InitialSetting::Pulse { concentration } => {
                let mut profile = vec![0.0; space.len()];
                profile[0] = *concentration;
                Ok(profile)
            }
            InitialSetting::Uniform { concentration } => Ok(vec![*concentration; space.len()]),
            InitialSetting::Csv {
                path,
                delimiter,
                has_header,
            } => {
                let csv_config = InitialConditionCsvConfig {
                    has_header: *has_header,
                    ..Default::default()
                }
                .delimiter(*delimiter);
                let profile = load_initial_conditions(self.resolve(path), &csv_config)?;

                let (low, high) = profile.extent();
                if low > space.start() || high < space.end() {
                    warn!(
                        "measured data covers [{}, {}] only, grid spans [{}, {}]: zero outside",
                        low,
                        high,
                        space.start(),
                        space.end()
                    );
                }
                Ok(profile.onto_grid(space.points()))
            }
        }
    }

    /// Solve the configured scenario
    pub fn run(&self) -> TransportResult<CaseRun> {
        let (space, time) = self.grids()?;
        let scenario = Scenario::new(self.initial_profile(&space)?, (&self.velocity).into())
            .with_inlet((&self.inlet).into())
            .with_decay_rate(self.decay_rate);

        info!(
            "Running {} nodes x {} time levels, inlet {}",
            space.len(),
            time.len(),
            scenario.inlet.kind()
        );
        solve_on_grids(space, time, &scenario)
    }

    /// Write the enabled outputs of `run`, returning the files written
    pub fn write_outputs(&self, run: &CaseRun) -> TransportResult<Vec<PathBuf>> {
        let output = &self.output;
        fs::create_dir_all(&output.directory)?;

        let x = run.space.points();
        let t = &run.result.time_points;
        let field = &run.result.field;
        let title = output.title.clone().unwrap_or_else(|| output.name.clone());
        let file = |extension: &str| output.directory.join(format!("{}.{}", output.name, extension));

        let mut written = Vec::new();

        if output.csv {
            let exporter = CsvExporter::new(
                CsvConfig::default().with_metadata(CsvMetadata::from_result(&run.result)),
            );
            let path = file(exporter.extension());
            exporter.export(x, &run.result, &path)?;
            written.push(path);
        }
        if output.json {
            let exporter = JsonExporter::pretty();
            let path = file(exporter.extension());
            exporter.export(x, &run.result, &path)?;
            written.push(path);
        }
        if output.snapshots {
            let path = file("png");
            let config = PlotConfig::snapshots(title.as_str());
            plot_space_time_snapshots(x, t, field, None, &path, Some(&config))?;
            written.push(path);
        }
        if output.animation {
            let path = file("gif");
            let config = PlotConfig::animation(title.as_str());
            animate_field(x, t, field, &path, Some(&config))?;
            written.push(path);
        }

        for path in &written {
            info!("Wrote {}", path.display());
        }
        Ok(written)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
