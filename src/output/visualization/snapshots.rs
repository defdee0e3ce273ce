//! Concentration profiles at selected time levels
//!
//! Draws `C(x)` for several rows of the field on one chart, one curve per
//! row, labelled with the time of the row.

use std::path::Path;

use log::{debug, warn};
use plotters::prelude::*;

use crate::error::{TransportError, TransportResult};
use crate::output::visualization::PlotConfig;
use crate::physics::ConcentrationField;

/// Rows shown when the caller does not choose: start, one third, two thirds, end
pub fn default_snapshot_rows(steps: usize) -> Vec<usize> {
    if steps == 0 {
        return Vec::new();
    }
    vec![0, steps / 3, 2 * steps / 3, steps - 1]
}

/// Plot spatial profiles at the given rows
///
/// # Arguments
///
/// * `x` - Node positions \[m\]
/// * `t` - Time of each row \[s\]
/// * `field` - Concentration field (`t.len()` × `x.len()`)
/// * `rows` - Rows to draw; `None` uses [`default_snapshot_rows`]. Indices
///   past the last row are skipped.
/// * `output_path` - `.svg` writes SVG, anything else PNG
/// * `config` - Optional plot configuration
///
/// # Example
///
/// ```rust,ignore
/// plot_space_time_snapshots(x.points(), &result.time_points, &result.field,
///     None, "case_2.png", Some(&PlotConfig::snapshots("CSV initial condition")))?;
/// ```
pub fn plot_space_time_snapshots(
    x: &[f64],
    t: &[f64],
    field: &ConcentrationField,
    rows: Option<&[usize]>,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> TransportResult<()> {
    let (steps, nodes) = field.shape();
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

    let requested = match rows {
        Some(rows) => rows.to_vec(),
        None => default_snapshot_rows(steps),
    };
    let selected: Vec<usize> = requested.into_iter().filter(|&row| row < steps).collect();
    if selected.is_empty() {
        return Err(TransportError::InvalidParameter(
            "no snapshot row inside the field".to_string(),
        ));
    }

    let profiles: Vec<(String, Vec<f64>)> = selected
        .iter()
        .map(|&row| (format!("t = {:.0} s", t[row]), field.row(row)))
        .collect();

    let default_config = PlotConfig::snapshots(None::<&str>);
    let config = config.unwrap_or(&default_config);

    let path = output_path.as_ref();
    debug!("Plotting {} snapshots to {}", profiles.len(), path.display());

    match path.extension().and_then(|s| s.to_str()) {
        Some("svg") => {
            let backend = SVGBackend::new(path, (config.width, config.height));
            plot_snapshots_impl(backend, x, &profiles, config)
        }
        _ => {
            let backend = BitMapBackend::new(path, (config.width, config.height));
            plot_snapshots_impl(backend, x, &profiles, config)
        }
    }
}

/// Axis range covering every curve, never degenerate
pub(crate) fn value_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if max - min <= f64::EPSILON {
        (min, min + 1.0)
    } else {
        (min, max + 0.1 * (max - min))
    }
}

fn plot_snapshots_impl<DB: DrawingBackend>(
    backend: DB,
    x: &[f64],
    profiles: &[(String, Vec<f64>)],
    config: &PlotConfig,
) -> TransportResult<()>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background).map_err(TransportError::plot)?;

    let x_min = x.first().copied().unwrap_or(0.0);
    let x_max = x.last().copied().unwrap_or(1.0).max(x_min + f64::EPSILON);
    let (y_min, y_max) = value_range(profiles.iter().flat_map(|(_, c)| c.iter()));

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(TransportError::plot)?;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|v| format!("{:.1}", v))
        .y_label_formatter(&|v| format!("{:.1}", v))
        .draw()
        .map_err(TransportError::plot)?;

    for (index, (label, concentrations)) in profiles.iter().enumerate() {
        if concentrations.iter().any(|c| !c.is_finite()) {
            warn!("Snapshot '{}' contains non-finite values", label);
        }
        let color = config.series_color(index);
        let style = ShapeStyle::from(&color).stroke_width(config.line_width);

        chart
            .draw_series(LineSeries::new(
                x.iter().zip(concentrations.iter()).map(|(x, c)| (*x, *c)),
                style,
            ))
            .map_err(TransportError::plot)?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(TransportError::plot)?;

    root.present().map_err(TransportError::plot)?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
