//! Parameter file loading, saving and validation.

use std::path::Path;

use pf_project::ParameterSet;

use crate::error::AppResult;

pub fn default_parameters() -> ParameterSet {
    ParameterSet::default()
}

/// Load and validate a parameter file (JSON or YAML by extension).
pub fn load_parameters(path: &Path) -> AppResult<ParameterSet> {
    Ok(pf_project::load_parameters(path)?)
}

/// Validate `params`, then write them (JSON or YAML by extension).
pub fn save_parameters(path: &Path, params: &ParameterSet) -> AppResult<()> {
    pf_project::save_parameters(path, params)?;
    tracing::info!(path = %path.display(), "saved parameters");
    Ok(())
}

pub fn validate_parameters(params: &ParameterSet) -> AppResult<()> {
    Ok(pf_project::validate_parameters(params)?)
}

/// Replace `current` with the contents of `path`.
///
/// `current` is left untouched when loading or validation fails.
pub fn reload_parameters(path: &Path, current: &mut ParameterSet) -> AppResult<()> {
    match load_parameters(path) {
        Ok(loaded) => {
            *current = loaded;
            Ok(())
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "keeping current parameters");
            Err(e)
        }
    }
}
