//! Shared application service layer for plungerflow.
//!
//! This crate provides the interface front ends use: parameter file
//! management, model construction, simulation execution and result queries.

pub mod error;
pub mod project_service;
pub mod query;
pub mod result;
pub mod run_service;
pub mod runtime_compile;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use project_service::{
    default_parameters, load_parameters, reload_parameters, save_parameters, validate_parameters,
};
pub use query::{RunSummary, extract_series, list_variables, summarize};
pub use result::{Sample, SeriesVariable, SimulationResult};
pub use run_service::{run, run_batch, run_with_options};
pub use runtime_compile::{build_launcher, launcher_spec, sim_options};

pub use pf_project::ParameterSet;
pub use pf_sim::{IntegratorType, SimOptions};
