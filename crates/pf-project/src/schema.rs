//! Parameter set schema.

use pf_core::units::constants::{GAMMA_AIR, P_ATM_PA};
use serde::Serialize;

/// Physical constants and run horizon of one launch, in SI units.
///
/// Serializes to a flat mapping keyed by the short names in [`ParameterSet::FIELDS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSet {
    /// Initial chamber pressure (Pa)
    pub p0: f64,
    /// Ambient pressure (Pa)
    pub p2: f64,
    /// Barrel diameter (m)
    #[serde(rename = "Db")]
    pub db: f64,
    /// Plunger diameter (m)
    #[serde(rename = "Dp")]
    pub dp: f64,
    pub gamma: f64,
    /// Dart mass (kg)
    pub mass_d: f64,
    /// Plunger mass (kg)
    pub mass_p: f64,
    /// Friction coefficients (N). Stored and validated; the dynamics ignore them.
    pub fric1: f64,
    pub fric2: f64,
    /// Spring precompression (m)
    pub xso: f64,
    /// Plunger chamber length (m)
    #[serde(rename = "L0")]
    pub l0: f64,
    /// Spring constant (N/m)
    pub k: f64,
    /// Integration horizon (s)
    pub end_time: f64,
    /// Output samples, both endpoints included
    pub n_points: usize,
}

/// Display metadata for one persisted key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
}

const fn field(key: &'static str, label: &'static str, unit: &'static str) -> FieldInfo {
    FieldInfo { key, label, unit }
}

impl ParameterSet {
    /// Persisted keys in schema order.
    pub const FIELDS: [FieldInfo; 14] = [
        field("p0", "Initial Pressure", "Pa"),
        field("p2", "Ambient Pressure", "Pa"),
        field("Db", "Barrel Diameter", "m"),
        field("Dp", "Plunger Diameter", "m"),
        field("gamma", "Gamma", "-"),
        field("mass_d", "Dart Mass", "kg"),
        field("mass_p", "Plunger Mass", "kg"),
        field("fric1", "Friction 1", "N"),
        field("fric2", "Friction 2", "N"),
        field("xso", "Spring Precompression", "m"),
        field("L0", "Initial Length", "m"),
        field("k", "Spring Constant", "N/m"),
        field("end_time", "End Time", "s"),
        field("n_points", "Number of Points", "-"),
    ];

    /// Value of a persisted key, `n_points` widened to `f64`.
    pub fn get(&self, key: &str) -> Option<f64> {
        let v = match key {
            "p0" => self.p0,
            "p2" => self.p2,
            "Db" => self.db,
            "Dp" => self.dp,
            "gamma" => self.gamma,
            "mass_d" => self.mass_d,
            "mass_p" => self.mass_p,
            "fric1" => self.fric1,
            "fric2" => self.fric2,
            "xso" => self.xso,
            "L0" => self.l0,
            "k" => self.k,
            "end_time" => self.end_time,
            "n_points" => self.n_points as f64,
            _ => return None,
        };
        Some(v)
    }

    /// `(info, value)` for every field, in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (FieldInfo, f64)> + '_ {
        Self::FIELDS
            .iter()
            .filter_map(move |info| self.get(info.key).map(|v| (*info, v)))
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            p0: P_ATM_PA,
            p2: P_ATM_PA,
            db: 0.0127,
            dp: 0.035052,
            gamma: GAMMA_AIR,
            mass_d: 0.0012,
            mass_p: 0.06,
            fric1: 0.4,
            fric2: 0.2,
            xso: 0.0254,
            l0: 0.1016,
            k: 523.0 * (11.0 / 5.0),
            end_time: 0.02,
            n_points: 1500,
        }
    }
}
