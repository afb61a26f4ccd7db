//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered during transient simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Step size became too small at t = {t:.6e} s")]
    StepSizeTooSmall { t: f64 },

    #[error("Problem became stiff at t = {t:.6e} s")]
    StiffnessDetected { t: f64 },

    #[error("Exceeded {max_steps} steps at t = {t:.6e} s before reaching t_end = {t_end:.6e} s")]
    MaxStepsExceeded { max_steps: usize, t: f64, t_end: f64 },

    #[error("Non-finite state at t = {t:.6e} s")]
    NonFinite { t: f64 },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<pf_core::error::PfError> for SimError {
    fn from(e: pf_core::error::PfError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

impl SimError {
    /// True when the integrator itself gave up, as opposed to being misconfigured.
    pub fn is_integration_failure(&self) -> bool {
        matches!(
            self,
            SimError::StepSizeTooSmall { .. }
                | SimError::StiffnessDetected { .. }
                | SimError::MaxStepsExceeded { .. }
                | SimError::NonFinite { .. }
        )
    }
}
