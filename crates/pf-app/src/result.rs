//! In-memory result of one launch simulation.

use std::fmt;
use std::str::FromStr;

use pf_components::{DerivedQuantities, LaunchState};
use pf_project::ParameterSet;
use pf_sim::SolverStats;

use crate::error::AppError;

/// Trajectory, derived series and the inputs that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Parameter snapshot the run used
    pub params: ParameterSet,
    /// Sample times (s), strictly increasing from 0 to `end_time`
    pub times: Vec<f64>,
    pub states: Vec<LaunchState>,
    pub derived: Vec<DerivedQuantities>,
    pub stats: SolverStats,
    pub success: bool,
}

/// One row of a result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub state: LaunchState,
    pub derived: DerivedQuantities,
}

impl SimulationResult {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn sample(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            time: *self.times.get(index)?,
            state: *self.states.get(index)?,
            derived: *self.derived.get(index)?,
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.times
            .iter()
            .zip(&self.states)
            .zip(&self.derived)
            .map(|((&time, &state), &derived)| Sample {
                time,
                state,
                derived,
            })
    }

    /// Values of one variable, one per sample.
    pub fn series(&self, variable: SeriesVariable) -> Vec<f64> {
        self.samples().map(|s| variable.value(&s)).collect()
    }
}

/// A per-sample quantity that can be plotted or exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesVariable {
    DartPosition,
    DartVelocity,
    PlungerPosition,
    PlungerVelocity,
    Pressure,
    Volume,
    SpringForce,
}

impl SeriesVariable {
    pub const ALL: [SeriesVariable; 7] = [
        SeriesVariable::DartPosition,
        SeriesVariable::DartVelocity,
        SeriesVariable::PlungerPosition,
        SeriesVariable::PlungerVelocity,
        SeriesVariable::Pressure,
        SeriesVariable::Volume,
        SeriesVariable::SpringForce,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeriesVariable::DartPosition => "dart_position",
            SeriesVariable::DartVelocity => "dart_velocity",
            SeriesVariable::PlungerPosition => "plunger_position",
            SeriesVariable::PlungerVelocity => "plunger_velocity",
            SeriesVariable::Pressure => "pressure",
            SeriesVariable::Volume => "volume",
            SeriesVariable::SpringForce => "spring_force",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SeriesVariable::DartPosition | SeriesVariable::PlungerPosition => "m",
            SeriesVariable::DartVelocity | SeriesVariable::PlungerVelocity => "m/s",
            SeriesVariable::Pressure => "Pa",
            SeriesVariable::Volume => "m^3",
            SeriesVariable::SpringForce => "N",
        }
    }

    /// Column header, e.g. `pressure_pa`.
    pub fn column(self) -> String {
        let unit = match self.unit() {
            "m/s" => "m_s",
            "m^3" => "m3",
            other => other,
        };
        format!("{}_{}", self.name(), unit.to_ascii_lowercase())
    }

    pub fn value(self, sample: &Sample) -> f64 {
        match self {
            SeriesVariable::DartPosition => sample.state.dart_position,
            SeriesVariable::DartVelocity => sample.state.dart_velocity,
            SeriesVariable::PlungerPosition => sample.state.plunger_position,
            SeriesVariable::PlungerVelocity => sample.state.plunger_velocity,
            SeriesVariable::Pressure => sample.derived.pressure,
            SeriesVariable::Volume => sample.derived.volume,
            SeriesVariable::SpringForce => sample.derived.spring_force,
        }
    }
}

impl fmt::Display for SeriesVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeriesVariable {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = match s.trim().to_ascii_lowercase().as_str() {
            "dart_position" | "d_pos" => SeriesVariable::DartPosition,
            "dart_velocity" | "d_vel" => SeriesVariable::DartVelocity,
            "plunger_position" | "p_pos" => SeriesVariable::PlungerPosition,
            "plunger_velocity" | "p_vel" => SeriesVariable::PlungerVelocity,
            "pressure" | "p_t" | "pressure_pa" => SeriesVariable::Pressure,
            "volume" => SeriesVariable::Volume,
            "spring_force" => SeriesVariable::SpringForce,
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "Unknown variable: {s} (expected one of {})",
                    SeriesVariable::ALL.map(SeriesVariable::name).join(", ")
                )));
            }
        };
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for v in SeriesVariable::ALL {
            assert_eq!(v.name().parse::<SeriesVariable>().unwrap(), v);
        }
        assert_eq!(
            "P_T".parse::<SeriesVariable>().unwrap(),
            SeriesVariable::Pressure
        );
        assert!("temperature".parse::<SeriesVariable>().is_err());
    }

    #[test]
    fn column_headers() {
        assert_eq!(SeriesVariable::Pressure.column(), "pressure_pa");
        assert_eq!(SeriesVariable::DartVelocity.column(), "dart_velocity_m_s");
        assert_eq!(SeriesVariable::Volume.column(), "volume_m3");
        assert_eq!(SeriesVariable::SpringForce.column(), "spring_force_n");
    }
}
