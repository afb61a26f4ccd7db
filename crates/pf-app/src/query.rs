//! Query helpers for extracting data from simulation results.

use crate::error::{AppError, AppResult};
use crate::result::{SeriesVariable, SimulationResult};

/// Final and extreme values of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub end_time: f64,
    pub n_points: usize,
    pub success: bool,
    pub dart_final_position: f64,
    pub dart_final_velocity: f64,
    pub dart_max_velocity: f64,
    pub plunger_final_position: f64,
    pub plunger_final_velocity: f64,
    /// Largest plunger speed, either direction
    pub plunger_max_speed: f64,
    pub final_pressure: f64,
    pub min_pressure: f64,
    pub peak_pressure: f64,
    pub final_volume: f64,
    pub max_volume: f64,
    pub max_spring_force: f64,
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}

/// Reduce a result to its summary.
pub fn summarize(result: &SimulationResult) -> AppResult<RunSummary> {
    let last = result
        .sample(result.len().saturating_sub(1))
        .ok_or_else(|| AppError::InvalidInput("No samples in result".to_string()))?;
    let samples = || result.samples();

    Ok(RunSummary {
        end_time: last.time,
        n_points: result.len(),
        success: result.success,
        dart_final_position: last.state.dart_position,
        dart_final_velocity: last.state.dart_velocity,
        dart_max_velocity: max_of(samples().map(|s| s.state.dart_velocity)),
        plunger_final_position: last.state.plunger_position,
        plunger_final_velocity: last.state.plunger_velocity,
        plunger_max_speed: max_of(samples().map(|s| s.state.plunger_velocity.abs())),
        final_pressure: last.derived.pressure,
        min_pressure: min_of(samples().map(|s| s.derived.pressure)),
        peak_pressure: max_of(samples().map(|s| s.derived.pressure)),
        final_volume: last.derived.volume,
        max_volume: max_of(samples().map(|s| s.derived.volume)),
        max_spring_force: max_of(samples().map(|s| s.derived.spring_force)),
    })
}

/// List exportable variable names.
pub fn list_variables() -> Vec<&'static str> {
    SeriesVariable::ALL.iter().map(|v| v.name()).collect()
}

/// Extract `(time, value)` pairs for a named variable.
pub fn extract_series(result: &SimulationResult, variable: &str) -> AppResult<Vec<(f64, f64)>> {
    let variable: SeriesVariable = variable.parse()?;
    Ok(result
        .samples()
        .map(|s| (s.time, variable.value(&s)))
        .collect())
}
