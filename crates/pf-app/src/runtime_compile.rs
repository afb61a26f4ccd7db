//! Translation of a parameter set into executable models.

use pf_components::{DartPlunger, DartPlungerSpec};
use pf_core::units::{kg, m, pa};
use pf_project::{ParameterSet, validate_parameters};
use pf_sim::SimOptions;

use crate::error::AppResult;

/// Typed physical description of the launcher in `params`.
pub fn launcher_spec(params: &ParameterSet) -> DartPlungerSpec {
    DartPlungerSpec {
        initial_pressure: pa(params.p0),
        ambient_pressure: pa(params.p2),
        barrel_diameter: m(params.db),
        plunger_diameter: m(params.dp),
        gamma: params.gamma,
        dart_mass: kg(params.mass_d),
        plunger_mass: kg(params.mass_p),
        spring_precompression: m(params.xso),
        chamber_length: m(params.l0),
        spring_rate: params.k,
    }
}

/// Validate `params` and build the launcher model.
///
/// `fric1`/`fric2` are checked but not carried into the model.
pub fn build_launcher(params: &ParameterSet) -> AppResult<DartPlunger> {
    validate_parameters(params)?;
    Ok(DartPlunger::new("dart-plunger", launcher_spec(params))?)
}

/// Solver options for `params`: horizon and sample count from the
/// parameter set, everything else from `base`.
pub fn sim_options(params: &ParameterSet, base: &SimOptions) -> SimOptions {
    SimOptions {
        t_end: params.end_time,
        n_points: params.n_points,
        ..base.clone()
    }
}
