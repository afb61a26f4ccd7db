//! Run execution service.

use std::time::Instant;

use pf_components::{LaunchDynamics, LaunchState};
use pf_project::ParameterSet;
use pf_sim::{LaunchModel, SimOptions, run_sim};
use rayon::prelude::*;

use crate::error::{AppError, AppResult};
use crate::result::SimulationResult;
use crate::runtime_compile;

/// Run one launch with default solver settings.
pub fn run(params: &ParameterSet) -> AppResult<SimulationResult> {
    run_with_options(params, &SimOptions::default())
}

/// Run one launch; `base` supplies every solver setting except the horizon
/// and sample count, which come from `params`.
///
/// Parameters are validated before anything is integrated. A failed
/// integration returns an error and no partial trajectory.
pub fn run_with_options(params: &ParameterSet, base: &SimOptions) -> AppResult<SimulationResult> {
    let params = *params;
    let launcher = runtime_compile::build_launcher(&params)?;
    let opts = runtime_compile::sim_options(&params, base);

    tracing::info!(
        end_time = opts.t_end,
        n_points = opts.n_points,
        integrator = ?opts.integrator,
        "starting launch simulation"
    );
    let started = Instant::now();

    let record = run_sim(&LaunchModel::new(&launcher), &opts).map_err(|e| {
        tracing::warn!(error = %e, "launch simulation failed");
        AppError::from(e)
    })?;

    let states: Vec<LaunchState> = record.x.iter().map(LaunchState::from_vector).collect();
    let derived = launcher.derive_series(&states);

    tracing::info!(
        accepted_steps = record.stats.accepted_steps,
        rejected_steps = record.stats.rejected_steps,
        rhs_evals = record.stats.rhs_evals,
        elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
        "launch simulation finished"
    );

    Ok(SimulationResult {
        params,
        times: record.t,
        states,
        derived,
        stats: record.stats,
        success: true,
    })
}

/// Run independent launches concurrently. Results keep the input order.
pub fn run_batch(params: &[ParameterSet], base: &SimOptions) -> Vec<AppResult<SimulationResult>> {
    params
        .par_iter()
        .map(|p| run_with_options(p, base))
        .collect()
}
