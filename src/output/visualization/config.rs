//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust
/// use river_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::snapshots("Base case");
/// config.width = 1920;
/// config.height = 1080;
/// config.series_colors = Some(vec![BLUE, RED]);
/// assert_eq!(config.xlabel, "x (m)");
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "x (m)")
    pub xlabel: String,

    /// Y-axis label (default: "Concentration C (µg/m³)")
    pub ylabel: String,

    /// Line color for single-curve plots and animations (default: BLUE)
    pub line_color: RGBColor,

    /// Optional colors for multi-curve plots, one per curve
    ///
    /// If None, uses the default palette.
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Delay between animation frames in milliseconds (default: 150)
    pub frame_delay_ms: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "x (m)".to_string(),
            ylabel: "Concentration C (µg/m³)".to_string(),
            line_color: BLUE,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            frame_delay_ms: 150,
        }
    }
}

/// Helper trait to accept both `&str`/`String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config for space-time snapshot plots
    ///
    /// Title defaults to "Concentration Profiles".
    pub fn snapshots(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Concentration Profiles".to_string()),
            ..Default::default()
        }
    }

    /// Config for animated profiles
    ///
    /// Title defaults to "Advection Animation". Each frame appends the time
    /// of its row.
    pub fn animation(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Advection Animation".to_string()),
            width: 800,
            height: 400,
            ..Default::default()
        }
    }

    /// Color of curve `index`
    ///
    /// Uses custom colors if provided, otherwise the default palette.
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && index < colors.len()
        {
            return colors[index];
        }

        const PALETTE: [RGBColor; 8] = [
            BLUE,
            RED,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),
            RGBColor(128, 0, 128),
        ];
        PALETTE[index % PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert!(config.show_grid);
        assert_eq!(config.frame_delay_ms, 150);
    }

    #[test]
    fn test_snapshot_titles() {
        assert_eq!(PlotConfig::snapshots(NO_TITLE).title, "Concentration Profiles");
        assert_eq!(PlotConfig::snapshots("Case 2").title, "Case 2");
        assert_eq!(
            PlotConfig::snapshots(format!("U = {}", 0.1)).title,
            "U = 0.1"
        );
    }

    #[test]
    fn test_animation_config() {
        let config = PlotConfig::animation(NO_TITLE);
        assert_eq!(config.title, "Advection Animation");
        assert_eq!((config.width, config.height), (800, 400));
    }

    #[test]
    fn test_series_colors() {
        let config = PlotConfig::default();
        assert_eq!(config.series_color(0), BLUE);
        assert_eq!(config.series_color(8), BLUE);

        let mut custom = PlotConfig::default();
        custom.series_colors = Some(vec![GREEN]);
        assert_eq!(custom.series_color(0), GREEN);
        assert_eq!(custom.series_color(1), RED);
    }
}
