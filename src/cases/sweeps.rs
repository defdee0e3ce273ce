//! Parameter sweeps
//!
//! Every run of a sweep is an independent solve. With the `parallel`
//! feature the runs are spread over the rayon thread pool; results always
//! come back in input order.

use log::{debug, info};

use crate::cases::{run_pulse, CaseParameters, CaseRun};
use crate::error::{TransportError, TransportResult};
use crate::solver::InletPolicy;

/// One run of a (U, dx, dt) sensitivity sweep
#[derive(Clone, Debug)]
pub struct SensitivityRun {
    pub velocity: f64,
    pub dx: f64,
    pub dt: f64,
    pub run: CaseRun,
}

/// One run of a single-parameter sweep
#[derive(Clone, Debug)]
pub struct ParameterRun {
    /// Value of the swept parameter
    pub parameter: f64,
    pub run: CaseRun,
}

/// Run `job` on every item, in parallel when the feature is enabled
pub(crate) fn run_all<T, R, F>(items: Vec<T>, job: F) -> TransportResult<Vec<R>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> TransportResult<R> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items.into_par_iter().map(job).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        items.into_iter().map(job).collect()
    }
}

fn ensure_non_empty(values: &[f64], name: &str) -> TransportResult<()> {
    if values.is_empty() {
        return Err(TransportError::InvalidParameter(format!(
            "{} list must not be empty",
            name
        )));
    }
    Ok(())
}

/// Solve the base case for every (U, dx, dt) combination
///
/// Combinations are enumerated velocity-major, then dx, then dt, so the
/// result has `velocities.len() * dxs.len() * dts.len()` entries in that
/// order. Each run uses a constant source of `params.inlet_concentration`.
///
/// # Example
///
/// ```rust
/// use river_rs::cases::{sensitivity_sweep, CaseParameters};
///
/// let runs = sensitivity_sweep(
///     &CaseParameters::default(),
///     &[0.05, 0.1],
///     &[0.2, 0.5],
///     &[10.0],
/// ).unwrap();
/// assert_eq!(runs.len(), 4);
/// assert_eq!(runs[1].dx, 0.5);
/// ```
pub fn sensitivity_sweep(
    params: &CaseParameters,
    velocities: &[f64],
    dxs: &[f64],
    dts: &[f64],
) -> TransportResult<Vec<SensitivityRun>> {
    ensure_non_empty(velocities, "velocity")?;
    ensure_non_empty(dxs, "dx")?;
    ensure_non_empty(dts, "dt")?;

    let combinations: Vec<(f64, f64, f64)> = velocities
        .iter()
        .flat_map(|&u| {
            dxs.iter()
                .flat_map(move |&dx| dts.iter().map(move |&dt| (u, dx, dt)))
        })
        .collect();

    info!("Sensitivity sweep: {} combinations", combinations.len());

    run_all(combinations, |(velocity, dx, dt)| {
        let case = params.with_discretisation(velocity, dx, dt);
        let run = run_pulse(&case, InletPolicy::constant(case.inlet_concentration))?;
        debug!(
            "U={}, dx={}, dt={}, nx={}, nt={}",
            velocity,
            dx,
            dt,
            run.space.len(),
            run.time.len()
        );
        Ok(SensitivityRun {
            velocity,
            dx,
            dt,
            run,
        })
    })
}

/// Exponentially decaying source, one run per source decay rate
///
/// The inlet follows `inlet_concentration · exp(-k·t)` for each `k` in
/// `rates`; the reach itself decays at `params.decay_rate`.
pub fn inlet_decay_sweep(
    params: &CaseParameters,
    rates: &[f64],
) -> TransportResult<Vec<ParameterRun>> {
    ensure_non_empty(rates, "inlet decay rate")?;
    if let Some(rate) = rates.iter().find(|r| !r.is_finite() || **r < 0.0) {
        return Err(TransportError::InvalidParameter(format!(
            "inlet decay rate must be finite and non-negative, got {}",
            rate
        )));
    }

    info!("Inlet decay sweep: rates {:?}", rates);

    run_all(rates.to_vec(), |rate| {
        let inlet = InletPolicy::exponential_decay(params.inlet_concentration, rate);
        Ok(ParameterRun {
            parameter: rate,
            run: run_pulse(params, inlet)?,
        })
    })
}

/// Constant source, one run per in-reach decay rate λ
pub fn decay_rate_sweep(
    params: &CaseParameters,
    decay_rates: &[f64],
) -> TransportResult<Vec<ParameterRun>> {
    ensure_non_empty(decay_rates, "decay rate")?;

    info!("Decay rate sweep: λ in {:?}", decay_rates);

    run_all(decay_rates.to_vec(), |lambda| {
        let case = CaseParameters {
            decay_rate: lambda,
            ..params.clone()
        };
        Ok(ParameterRun {
            parameter: lambda,
            run: run_pulse(&case, InletPolicy::constant(case.inlet_concentration))?,
        })
    })
}
