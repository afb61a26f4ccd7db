//! Transient simulation for launcher models.
//!
//! Provides:
//! - Dormand–Prince 5(4) adaptive integration with dense output (`ode_solvers`)
//! - Fixed-step RK4 for cross-checks
//! - [`LaunchModel`], binding a [`pf_components::LaunchDynamics`] to the integrators
//! - [`run_sim`], sampling a trajectory on an evenly spaced grid

pub mod adaptive;
pub mod error;
pub mod integrator;
pub mod launch;
pub mod model;
pub mod sim;

pub use adaptive::{DormandPrince45, SolverStats};
pub use error::{SimError, SimResult};
pub use integrator::{Integrator, RK4};
pub use launch::LaunchModel;
pub use model::TransientModel;
pub use sim::{IntegratorType, SimOptions, SimRecord, run_sim};
