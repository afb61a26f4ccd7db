//! Launch state and instantaneous derived quantities.

use nalgebra::Vector4;

/// Instantaneous mechanical state of dart and plunger (SI units).
///
/// Vector layout is `(dart_position, dart_velocity, plunger_position, plunger_velocity)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LaunchState {
    /// Dart travel down the barrel (m)
    pub dart_position: f64,
    /// Dart velocity (m/s)
    pub dart_velocity: f64,
    /// Plunger travel into the chamber (m)
    pub plunger_position: f64,
    /// Plunger velocity (m/s)
    pub plunger_velocity: f64,
}

impl LaunchState {
    pub const DIM: usize = 4;

    /// Both bodies at rest in their primed positions.
    pub fn at_rest() -> Self {
        Self::default()
    }

    pub fn from_vector(x: &Vector4<f64>) -> Self {
        Self {
            dart_position: x[0],
            dart_velocity: x[1],
            plunger_position: x[2],
            plunger_velocity: x[3],
        }
    }

    pub fn to_vector(&self) -> Vector4<f64> {
        Vector4::new(
            self.dart_position,
            self.dart_velocity,
            self.plunger_position,
            self.plunger_velocity,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.dart_position.is_finite()
            && self.dart_velocity.is_finite()
            && self.plunger_position.is_finite()
            && self.plunger_velocity.is_finite()
    }
}

impl From<Vector4<f64>> for LaunchState {
    fn from(x: Vector4<f64>) -> Self {
        Self::from_vector(&x)
    }
}

impl From<LaunchState> for Vector4<f64> {
    fn from(state: LaunchState) -> Self {
        state.to_vector()
    }
}

/// Quantities evaluated from a single state; no dependence on history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedQuantities {
    /// Chamber pressure from the adiabatic closure (Pa)
    pub pressure: f64,
    /// Chamber volume, unclamped (m³)
    pub volume: f64,
    /// Spring force on the plunger (N)
    pub spring_force: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_layout() {
        let state = LaunchState {
            dart_position: 1.0,
            dart_velocity: 2.0,
            plunger_position: 3.0,
            plunger_velocity: 4.0,
        };
        let x = state.to_vector();
        assert_eq!(x, Vector4::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(LaunchState::from(x), state);
    }

    #[test]
    fn rest_state_is_zero() {
        let x: Vector4<f64> = LaunchState::at_rest().into();
        assert!(x.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn finiteness() {
        let mut state = LaunchState::at_rest();
        assert!(state.is_finite());
        state.plunger_velocity = f64::NAN;
        assert!(!state.is_finite());
    }
}
