//! Building a [`ParameterSet`] from a loosely typed key→value mapping.

use crate::schema::ParameterSet;
use crate::{ProjectError, ProjectResult};
use serde_json::{Map, Value};

/// Older files spell some keys with an underscore.
const LEGACY_ALIASES: [(&str, &str); 5] = [
    ("p_0", "p0"),
    ("p_2", "p2"),
    ("D_b", "Db"),
    ("D_p", "Dp"),
    ("L_0", "L0"),
];

fn canonical(key: &str) -> Option<&'static str> {
    if let Some(info) = ParameterSet::FIELDS.iter().find(|f| f.key == key) {
        return Some(info.key);
    }
    LEGACY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, key)| *key)
}

fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).or_else(|| {
        LEGACY_ALIASES
            .iter()
            .filter(|(_, target)| *target == key)
            .find_map(|(alias, _)| map.get(*alias))
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "sequence".to_string(),
        Value::Object(_) => "mapping".to_string(),
    }
}

fn as_real(field: &str, value: &Value) -> ProjectResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ProjectError::InvalidType {
        field: field.to_string(),
        found: describe(value),
    })
}

fn as_count(field: &str, value: &Value) -> ProjectResult<usize> {
    let v = as_real(field, value)?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Ok(v as usize)
    } else {
        Err(ProjectError::InvalidType {
            field: field.to_string(),
            found: describe(value),
        })
    }
}

/// Coerce a parsed document into a [`ParameterSet`].
///
/// Every key is required; all missing keys are reported together, in schema
/// order. Numeric strings are accepted. Unknown keys are logged and skipped.
/// The result is not validated.
pub fn parameters_from_value(doc: &Value) -> ProjectResult<ParameterSet> {
    let map = doc.as_object().ok_or(ProjectError::NotAMapping)?;

    for key in map.keys() {
        if canonical(key).is_none() {
            tracing::warn!(key = %key, "ignoring unknown parameter key");
        }
    }

    let missing: Vec<String> = ParameterSet::FIELDS
        .iter()
        .filter(|f| lookup(map, f.key).is_none())
        .map(|f| f.key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ProjectError::MissingKeys { keys: missing });
    }

    let real = |key: &str| -> ProjectResult<f64> {
        let value = lookup(map, key).ok_or_else(|| ProjectError::MissingKeys {
            keys: vec![key.to_string()],
        })?;
        as_real(key, value)
    };
    let n_points = lookup(map, "n_points").ok_or_else(|| ProjectError::MissingKeys {
        keys: vec!["n_points".to_string()],
    })?;

    Ok(ParameterSet {
        p0: real("p0")?,
        p2: real("p2")?,
        db: real("Db")?,
        dp: real("Dp")?,
        gamma: real("gamma")?,
        mass_d: real("mass_d")?,
        mass_p: real("mass_p")?,
        fric1: real("fric1")?,
        fric2: real("fric2")?,
        xso: real("xso")?,
        l0: real("L0")?,
        k: real("k")?,
        end_time: real("end_time")?,
        n_points: as_count("n_points", n_points)?,
    })
}
