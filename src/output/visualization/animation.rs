//! Animated concentration profile (GIF)
//!
//! One frame per row of the field. The axes are fixed over the whole
//! animation so successive frames compare directly.

use std::path::Path;

use log::debug;
use plotters::prelude::*;

use crate::error::{TransportError, TransportResult};
use crate::output::visualization::snapshots::value_range;
use crate::output::visualization::PlotConfig;
use crate::physics::ConcentrationField;

/// Write the evolution of `field` as an animated GIF
///
/// Each frame title reads `"<title>   (t = <time> s)"`. The delay between
/// frames is [`PlotConfig::frame_delay_ms`].
///
/// # Example
///
/// ```rust,ignore
/// animate_field(x.points(), &result.time_points, &result.field, "advection.gif", None)?;
/// ```
pub fn animate_field(
    x: &[f64],
    t: &[f64],
    field: &ConcentrationField,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> TransportResult<()> {
    let (steps, nodes) = field.shape();
    if steps == 0 || nodes == 0 {
        return Err(TransportError::InvalidParameter(
            "empty field: nothing to animate".to_string(),
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

    let default_config = PlotConfig::animation(None::<&str>);
    let config = config.unwrap_or(&default_config);
    let path = output_path.as_ref();

    let root = BitMapBackend::gif(path, (config.width, config.height), config.frame_delay_ms)
        .map_err(TransportError::plot)?
        .into_drawing_area();

    let x_min = x[0];
    let x_max = x[nodes - 1].max(x_min + f64::EPSILON);
    let (y_min, y_max) = value_range(field.as_matrix().iter());

    for (step, time) in t.iter().enumerate() {
        root.fill(&config.background).map_err(TransportError::plot)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{}   (t = {:.1} s)", config.title, time),
                ("sans-serif", 24).into_font(),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(TransportError::plot)?;

        let mut mesh = chart.configure_mesh();
        if !config.show_grid {
            mesh.disable_mesh();
        }
        mesh.x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .draw()
            .map_err(TransportError::plot)?;

        let style = ShapeStyle::from(&config.line_color).stroke_width(config.line_width);
        chart
            .draw_series(LineSeries::new(
                x.iter().enumerate().map(|(node, x)| (*x, field.get(step, node))),
                style,
            ))
            .map_err(TransportError::plot)?;

        root.present().map_err(TransportError::plot)?;
    }

    debug!("Wrote {} animation frames to {}", steps, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    #[test]
    fn test_animate_small_field() {
        let x = vec![0.0, 0.5, 1.0];
        let t = vec![0.0, 1.0, 2.0];
        let mut field = ConcentrationField::zeros(3, 3);
        field.set_row(0, &[1.0, 0.0, 0.0]);
        field.set_row(1, &[1.0, 0.5, 0.0]);
        field.set_row(2, &[1.0, 0.8, 0.4]);

        let file = Builder::new().suffix(".gif").tempfile().unwrap();
        let mut config = PlotConfig::animation("test");
        config.width = 200;
        config.height = 120;

        animate_field(&x, &t, &field, file.path(), Some(&config)).unwrap();

        let bytes = std::fs::read(file.path()).unwrap();
        assert!(bytes.starts_with(b"GIF"));
    }

    #[test]
    fn test_animate_rejects_mismatch() {
        let field = ConcentrationField::zeros(2, 3);
        let file = Builder::new().suffix(".gif").tempfile().unwrap();
        assert!(animate_field(&[0.0, 1.0], &[0.0, 1.0], &field, file.path(), None).is_err());
        assert!(animate_field(&[], &[], &ConcentrationField::zeros(0, 0), file.path(), None).is_err());
    }
}
