//! Error types for component operations.

use pf_core::error::PfError;
use thiserror::Error;

/// Errors that can occur while building or evaluating a component.
#[derive(Error, Debug, Clone)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<PfError> for ComponentError {
    fn from(e: PfError) -> Self {
        match e {
            PfError::NonFinite { what, .. }
            | PfError::NonPositive { what, .. }
            | PfError::InvalidArg { what } => ComponentError::NonPhysical { what },
        }
    }
}
