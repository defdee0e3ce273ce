//! Behavioural properties of the stepper and the solver
//!
//! Each test pins one observable guarantee: field shape, initial row,
//! inlet handling, positivity, monotonicity in the decay rate and input
//! validation.

use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;

use river_rs::error::TransportError;
use river_rs::physics::{build_grid, VelocityField};
use river_rs::solver::{
    advance, ImplicitUpwindSolver, InletPolicy, Scenario, Solver, SolverConfiguration,
};

mod common;
use common::{assert_profiles_close, base_case_grids, pulse_profile};

// =================================================================================================
// Shape and initial row
// =================================================================================================

#[test]
fn test_shape_is_steps_by_nodes() {
    for (nodes, steps) in [(1, 1), (1, 5), (7, 1), (101, 31)] {
        let field = advance(
            &pulse_profile(nodes, 1.0),
            &VelocityField::uniform(0.1),
            0.2,
            10.0,
            steps,
            &InletPolicy::Hold,
            0.0,
        )
        .unwrap();
        assert_eq!(field.shape(), (steps, nodes));
    }
}

#[test]
fn test_initial_row_is_an_independent_copy() {
    let mut c0 = vec![3.0, 1.5, 0.25, 0.0];
    let expected = c0.clone();

    let field = advance(
        &c0,
        &VelocityField::uniform(0.1),
        0.2,
        1.0,
        4,
        &InletPolicy::constant(9.0),
        0.01,
    )
    .unwrap();

    c0.iter_mut().for_each(|c| *c = -1.0);
    assert_eq!(field.row(0), expected);
}

#[test]
fn test_reference_scenario() {
    // nx = 5, dx = 0.2, dt = 0.1, nt = 3, U = 0.1, λ = 0, C0 = [1, 0, 0, 0, 0], hold
    let field = advance(
        &[1.0, 0.0, 0.0, 0.0, 0.0],
        &VelocityField::uniform(0.1),
        0.2,
        0.1,
        3,
        &InletPolicy::Hold,
        0.0,
    )
    .unwrap();

    assert_eq!(field.shape(), (3, 5));
    assert_eq!(field.row(0), vec![1.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(field.column(0), vec![1.0, 1.0, 1.0]);
    assert!(field.is_finite());
    assert!(field.min() >= 0.0);

    // a = 10.5, b = 0.5: C[1][1] = 0.5/10.5
    assert_relative_eq!(field.get(1, 1), 1.0 / 21.0, max_relative = 1e-14);
}

// =================================================================================================
// Inlet policies
// =================================================================================================

#[test]
fn test_hold_keeps_inlet_constant() {
    let field = advance(
        &[42.0, 1.0, 2.0, 3.0],
        &VelocityField::uniform(0.3),
        0.1,
        0.5,
        25,
        &InletPolicy::Hold,
        0.02,
    )
    .unwrap();
    assert!(field.column(0).iter().all(|&c| c == 42.0));
}

#[test]
fn test_driven_inlet_is_exact() {
    let dt = 7.5;
    let g = |t: f64| 100.0 + 20.0 * (0.01 * t).sin();
    let inlet = InletPolicy::custom(g);

    let field = advance(
        &pulse_profile(10, 5.0),
        &VelocityField::uniform(0.1),
        0.2,
        dt,
        12,
        &inlet,
        0.0,
    )
    .unwrap();

    // Row 0 is the initial condition, not g(0)
    assert_eq!(field.get(0, 0), 5.0);
    for n in 1..12 {
        assert_eq!(field.get(n, 0), g(n as f64 * dt), "step {}", n);
    }
}

#[test]
fn test_driven_inlet_evaluated_once_per_step() {
    let dt = 0.5;
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&calls);
    let inlet = InletPolicy::custom(move |t| {
        recorder.lock().unwrap().push(t);
        1.0
    });

    advance(
        &[0.0, 0.0, 0.0],
        &VelocityField::uniform(0.1),
        0.2,
        dt,
        5,
        &inlet,
        0.0,
    )
    .unwrap();

    // One call per step, never at t = 0
    assert_eq!(*calls.lock().unwrap(), vec![0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn test_zero_rate_exponential_inlet_matches_constant_and_hold() {
    let (x, t) = base_case_grids();
    let c0 = pulse_profile(x.len(), 250.0);
    let u = VelocityField::uniform(0.1);

    let run = |inlet: InletPolicy| advance(&c0, &u, x.dx(), t.dt(), t.len(), &inlet, 0.0).unwrap();

    let decaying = run(InletPolicy::exponential_decay(250.0, 0.0));
    let constant = run(InletPolicy::constant(250.0));
    let held = run(InletPolicy::Hold);

    assert_eq!(decaying, constant);
    assert_eq!(decaying, held);
}

// =================================================================================================
// Positivity, monotonicity, steady state
// =================================================================================================

#[test]
fn test_non_negative_for_non_negative_inputs() {
    let c0: Vec<f64> = (0..40).map(|i| ((i * 7) % 5) as f64).collect();
    let velocity: Vec<f64> = (0..40).map(|i| 0.05 + 0.01 * (i % 3) as f64).collect();

    let field = advance(
        &c0,
        &VelocityField::per_node(velocity),
        0.25,
        3.0,
        50,
        &InletPolicy::exponential_decay(4.0, 0.05),
        0.01,
    )
    .unwrap();

    assert!(field.min() >= 0.0);
}

#[test]
fn test_decay_monotonicity() {
    let (x, t) = base_case_grids();
    let c0 = pulse_profile(x.len(), 250.0);
    let u = VelocityField::uniform(0.1);
    let inlet = InletPolicy::constant(250.0);

    let rates = [0.0, 0.001, 0.01, 0.1];
    let finals: Vec<Vec<f64>> = rates
        .iter()
        .map(|&lambda| {
            advance(&c0, &u, x.dx(), t.dt(), t.len(), &inlet, lambda)
                .unwrap()
                .final_profile()
        })
        .collect();

    for pair in finals.windows(2) {
        assert!(pair[1].iter().zip(&pair[0]).all(|(high, low)| high <= low));
    }
}

#[test]
fn test_uniform_profile_is_steady_under_hold() {
    // Dyadic values keep every operation exact
    let field = advance(
        &[5.0; 8],
        &VelocityField::uniform(0.5),
        0.25,
        0.5,
        10,
        &InletPolicy::Hold,
        0.0,
    )
    .unwrap();
    for n in 0..10 {
        assert_eq!(field.row(n), vec![5.0; 8]);
    }

    // Arbitrary values: steady up to rounding
    let field = advance(
        &[3.7; 50],
        &VelocityField::uniform(0.13),
        0.2,
        10.0,
        31,
        &InletPolicy::Hold,
        0.0,
    )
    .unwrap();
    assert_profiles_close(&field.final_profile(), &[3.7; 50], 1e-12, "uniform steady state");
}

// =================================================================================================
// Velocity variants
// =================================================================================================

#[test]
fn test_equal_per_step_matches_uniform() {
    let c0 = pulse_profile(30, 10.0);
    let inlet = InletPolicy::constant(10.0);

    let uniform = advance(&c0, &VelocityField::uniform(0.2), 0.2, 2.0, 15, &inlet, 0.01).unwrap();
    let per_step = advance(
        &c0,
        &VelocityField::per_step(vec![0.2; 15]),
        0.2,
        2.0,
        15,
        &inlet,
        0.01,
    )
    .unwrap();
    let per_node = advance(
        &c0,
        &VelocityField::per_node(vec![0.2; 30]),
        0.2,
        2.0,
        15,
        &inlet,
        0.01,
    )
    .unwrap();

    assert_eq!(uniform, per_step);
    assert_eq!(uniform, per_node);
}

#[test]
fn test_per_step_uses_previous_entry() {
    // Step n reads entry n-1: a zero first entry freezes the interior at step 1
    let field = advance(
        &[1.0, 0.0, 0.0],
        &VelocityField::per_step(vec![0.0, 1.0, 1.0]),
        1.0,
        1.0,
        3,
        &InletPolicy::Hold,
        0.0,
    )
    .unwrap();

    assert_eq!(field.row(1), vec![1.0, 0.0, 0.0]);
    assert!(field.get(2, 1) > 0.0);
}

#[test]
fn test_wrong_length_velocity_is_dimension_mismatch() {
    let c0 = pulse_profile(5, 1.0);

    let per_node = advance(
        &c0,
        &VelocityField::per_node(vec![0.1; 4]),
        0.2,
        0.1,
        3,
        &InletPolicy::Hold,
        0.0,
    );
    assert!(matches!(
        per_node,
        Err(TransportError::DimensionMismatch {
            expected: 5,
            found: 4,
            ..
        })
    ));

    let per_step = advance(
        &c0,
        &VelocityField::per_step(vec![0.1; 4]),
        0.2,
        0.1,
        3,
        &InletPolicy::Hold,
        0.0,
    );
    assert!(matches!(
        per_step,
        Err(TransportError::DimensionMismatch {
            expected: 3,
            found: 4,
            ..
        })
    ));
}

// =================================================================================================
// Validation
// =================================================================================================

#[test]
fn test_negative_velocity_rejected() {
    let result = advance(
        &[1.0, 0.0],
        &VelocityField::per_node(vec![0.1, -0.1]),
        0.2,
        0.1,
        3,
        &InletPolicy::Hold,
        0.0,
    );
    assert!(matches!(result, Err(TransportError::NegativeVelocity { .. })));
}

#[test]
fn test_invalid_grid_rejected() {
    let c0 = [1.0, 0.0];
    let u = VelocityField::uniform(0.1);

    for (dx, dt, nt) in [(0.0, 0.1, 3), (-0.2, 0.1, 3), (0.2, 0.0, 3), (0.2, 0.1, 0)] {
        assert!(matches!(
            advance(&c0, &u, dx, dt, nt, &InletPolicy::Hold, 0.0),
            Err(TransportError::InvalidGridConfiguration(_))
        ));
    }

    assert!(matches!(
        build_grid(10.0, 0.0, 0.2),
        Err(TransportError::InvalidGridConfiguration(_))
    ));
}

#[test]
fn test_non_finite_inlet_aborts() {
    let inlet = InletPolicy::custom(|t| if t > 15.0 { f64::INFINITY } else { 1.0 });
    let result = advance(
        &[1.0, 0.0, 0.0],
        &VelocityField::uniform(0.1),
        0.2,
        10.0,
        5,
        &inlet,
        0.0,
    );
    assert!(matches!(
        result,
        Err(TransportError::NonFinite { step: 2, node: 0 })
    ));
}

#[test]
fn test_base_grid() {
    let grid = build_grid(0.0, 20.0, 0.2).unwrap();
    assert_eq!(grid.len(), 101);
    assert_relative_eq!(grid[100], 20.0, max_relative = 1e-12);
}

// =================================================================================================
// Solver trait
// =================================================================================================

#[test]
fn test_solver_matches_advance() {
    let (x, t) = base_case_grids();
    let c0 = pulse_profile(x.len(), 250.0);
    let inlet = InletPolicy::exponential_decay(250.0, 0.01);

    let scenario = Scenario::new(c0.clone(), VelocityField::uniform(0.1))
        .with_inlet(inlet.clone())
        .with_decay_rate(0.002);
    let config = SolverConfiguration::from_grids(&x, &t);
    let result = ImplicitUpwindSolver::new().solve(&scenario, &config).unwrap();

    let direct = advance(
        &c0,
        &VelocityField::uniform(0.1),
        x.dx(),
        t.dt(),
        t.len(),
        &inlet,
        0.002,
    )
    .unwrap();

    assert_eq!(result.field, direct);
    assert_eq!(result.time_points.len(), 31);
    assert_relative_eq!(result.time_points[30], 300.0, max_relative = 1e-12);
    assert_eq!(result.get_metadata("inlet"), Some("exponential-decay"));
}
