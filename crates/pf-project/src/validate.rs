//! Parameter validation.

use crate::schema::ParameterSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    /// Persisted key of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidValue { field, .. } => field,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            ValidationError::InvalidValue { reason, .. } => reason,
        }
    }
}

/// Largest accepted `n_points`; each sample holds a state and derived values.
pub const MAX_POINTS: usize = 1_000_000;

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative"))
    }
}

/// Check every field against its physical range; the first violation wins,
/// in schema order.
pub fn validate_parameters(params: &ParameterSet) -> Result<(), ValidationError> {
    for (info, value) in params.entries() {
        if !value.is_finite() {
            return Err(invalid(info.key, value, "must be finite"));
        }
    }

    positive("p0", params.p0)?;
    non_negative("p2", params.p2)?;
    positive("Db", params.db)?;
    positive("Dp", params.dp)?;
    if params.gamma <= 1.0 {
        return Err(invalid("gamma", params.gamma, "must exceed 1"));
    }
    positive("mass_d", params.mass_d)?;
    positive("mass_p", params.mass_p)?;
    non_negative("fric1", params.fric1)?;
    non_negative("fric2", params.fric2)?;
    non_negative("xso", params.xso)?;
    positive("L0", params.l0)?;
    positive("k", params.k)?;
    positive("end_time", params.end_time)?;
    if params.n_points < 2 {
        return Err(invalid(
            "n_points",
            params.n_points as f64,
            "must be at least 2",
        ));
    }
    if params.n_points > MAX_POINTS {
        return Err(invalid(
            "n_points",
            params.n_points as f64,
            "must not exceed 1000000",
        ));
    }
    Ok(())
}
