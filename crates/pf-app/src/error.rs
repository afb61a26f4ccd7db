//! Error types for the pf-app service layer.

use pf_project::{ProjectError, ValidationError};
use pf_sim::SimError;

/// Application error shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid parameter {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Integration failed: {message}")]
    IntegrationFailure { message: String },

    #[error("Parameter file error: {0}")]
    Persistence(#[from] ProjectError),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidValue {
                field,
                value,
                reason,
            } => AppError::InvalidParameter {
                field,
                reason: format!("{reason} (got {value})"),
            },
        }
    }
}

impl From<SimError> for AppError {
    fn from(err: SimError) -> Self {
        if err.is_integration_failure() {
            return AppError::IntegrationFailure {
                message: err.to_string(),
            };
        }
        match err {
            SimError::InvalidArg { .. } => AppError::InvalidInput(err.to_string()),
            _ => AppError::Model(err.to_string()),
        }
    }
}

impl From<pf_components::ComponentError> for AppError {
    fn from(err: pf_components::ComponentError) -> Self {
        AppError::Model(err.to_string())
    }
}
