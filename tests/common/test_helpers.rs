//! Helper functions for integration tests

use river_rs::physics::{SpatialGrid, TimeGrid};

/// Clean reach with `value` at the inlet node
pub fn pulse_profile(nodes: usize, value: f64) -> Vec<f64> {
    let mut profile = vec![0.0; nodes];
    profile[0] = value;
    profile
}

/// 20 m reach with dx = 0.2 m, 300 s with dt = 10 s
pub fn base_case_grids() -> (SpatialGrid, TimeGrid) {
    (
        SpatialGrid::new(0.0, 20.0, 0.2).unwrap(),
        TimeGrid::new(0.0, 300.0, 10.0).unwrap(),
    )
}

/// Assert that two profiles agree node by node within `tolerance`
pub fn assert_profiles_close(actual: &[f64], expected: &[f64], tolerance: f64, message: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: length mismatch", message);

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff < tolerance,
            "{}: node {} differs by {} (tolerance {})",
            message,
            i,
            diff,
            tolerance
        );
    }
}

/// Largest absolute node-wise difference
pub fn max_abs_difference(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
