//! pf-project: parameter file format and validation.

pub mod coerce;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

pub use coerce::parameters_from_value;
pub use schema::{FieldInfo, ParameterSet};
pub use validate::{MAX_POINTS, ValidationError, validate_parameters};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Parameter file must contain a key/value mapping")]
    NotAMapping,

    #[error("Missing keys: {}", .keys.join(", "))]
    MissingKeys { keys: Vec<String> },

    #[error("Invalid type for {field}: expected a number, found {found}")]
    InvalidType { field: String, found: String },

    #[error("Unsupported parameter file format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml" | "yml") => Ok(Format::Yaml),
            _ => Err(ProjectError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn finish(doc: serde_json::Value) -> ProjectResult<ParameterSet> {
    let params = parameters_from_value(&doc)?;
    validate_parameters(&params)?;
    Ok(params)
}

pub fn from_json_str(content: &str) -> ProjectResult<ParameterSet> {
    finish(serde_json::from_str(content)?)
}

pub fn from_yaml_str(content: &str) -> ProjectResult<ParameterSet> {
    finish(serde_yaml::from_str(content)?)
}

pub fn to_json_string(params: &ParameterSet) -> ProjectResult<String> {
    validate_parameters(params)?;
    Ok(serde_json::to_string_pretty(params)?)
}

pub fn to_yaml_string(params: &ParameterSet) -> ProjectResult<String> {
    validate_parameters(params)?;
    Ok(serde_yaml::to_string(params)?)
}

pub fn load_yaml(path: &Path) -> ProjectResult<ParameterSet> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &Path, params: &ParameterSet) -> ProjectResult<()> {
    let content = to_yaml_string(params)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<ParameterSet> {
    let content = std::fs::read_to_string(path)?;
    from_json_str(&content)
}

pub fn save_json(path: &Path, params: &ParameterSet) -> ProjectResult<()> {
    let content = to_json_string(params)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load and validate a parameter file, JSON or YAML by extension.
pub fn load_parameters(path: &Path) -> ProjectResult<ParameterSet> {
    match Format::from_path(path)? {
        Format::Json => load_json(path),
        Format::Yaml => load_yaml(path),
    }
}

/// Validate, then write a parameter file, JSON or YAML by extension.
pub fn save_parameters(path: &Path, params: &ParameterSet) -> ProjectResult<()> {
    match Format::from_path(path)? {
        Format::Json => save_json(path, params),
        Format::Yaml => save_yaml(path, params),
    }
}
