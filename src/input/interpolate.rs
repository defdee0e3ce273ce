//! Linear interpolation of measured data onto the solver grid

use crate::input::MeasuredProfile;

/// Interpolate `(positions, values)` linearly at each `targets` point
///
/// `positions` must be sorted in increasing order. Targets outside
/// `[positions[0], positions[last]]` get `0.0`: the reach carries no
/// pollutant where nothing was measured. A single measured point yields its
/// value only at exactly that position. Duplicate positions take the first
/// matching value.
pub fn interpolate_to_grid(positions: &[f64], values: &[f64], targets: &[f64]) -> Vec<f64> {
    let n = positions.len().min(values.len());
    if n == 0 {
        return vec![0.0; targets.len()];
    }

    let first = positions[0];
    let last = positions[n - 1];

    targets
        .iter()
        .map(|&x| {
            if x < first || x > last {
                return 0.0;
            }
            // First index whose position is >= x
            let upper = positions[..n].partition_point(|&p| p < x);
            if upper == 0 || positions[upper] == x {
                return values[upper];
            }
            let lower = upper - 1;
            let (x0, x1) = (positions[lower], positions[upper]);
            let weight = (x - x0) / (x1 - x0);
            values[lower] + weight * (values[upper] - values[lower])
        })
        .collect()
}

impl MeasuredProfile {
    /// Interpolate the measurements onto grid positions
    pub fn onto_grid(&self, grid: &[f64]) -> Vec<f64> {
        interpolate_to_grid(self.positions(), self.concentrations(), grid)
    }
}
