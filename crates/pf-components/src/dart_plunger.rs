//! Spring-piston launcher: a plunger compresses the air column behind a dart.

use crate::common::{VOLUME_RATIO_FLOOR, check_finite, check_non_negative, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::state::{DerivedQuantities, LaunchState};
use crate::traits::LaunchDynamics;
use pf_core::units::{Area, Length, Mass, Pressure, Volume, circle_area};
use uom::si::area::square_meter;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::pressure::pascal;
use uom::si::volume::cubic_meter;

/// Physical description of a dart-plunger launcher.
#[derive(Clone, Copy, Debug)]
pub struct DartPlungerSpec {
    /// Chamber pressure before the plunger moves
    pub initial_pressure: Pressure,
    /// Pressure acting on the far side of plunger and dart
    pub ambient_pressure: Pressure,
    pub barrel_diameter: Length,
    pub plunger_diameter: Length,
    /// Heat capacity ratio cp/cv of the trapped gas
    pub gamma: f64,
    pub dart_mass: Mass,
    pub plunger_mass: Mass,
    /// Spring compression already present when the plunger is primed
    pub spring_precompression: Length,
    /// Plunger tube length swept by the plunger
    pub chamber_length: Length,
    /// Spring rate (N/m)
    pub spring_rate: f64,
}

/// Frictionless dart-plunger model with an adiabatic gas closure.
///
/// State derivative:
/// - dart: `m_d·a_d = (p_t - p2)·A_b`
/// - plunger: `m_p·a_p = (p2 - p_t)·A_p + k·(x_sf - x_p)`
///
/// where `p_t = p0 / max(V/V0, ε)^γ`.
#[derive(Clone, Debug)]
pub struct DartPlunger {
    name: String,
    p0: f64,
    p2: f64,
    gamma: f64,
    mass_d: f64,
    mass_p: f64,
    l0: f64,
    k: f64,
    area_b: f64,
    area_p: f64,
    /// Reference chamber volume `L0·A_p`
    v0: f64,
    /// Free length reference of the spring, `xso + L0`
    xsf: f64,
}

impl DartPlunger {
    /// Build the model, rejecting non-physical inputs.
    pub fn new(name: impl Into<String>, spec: DartPlungerSpec) -> ComponentResult<Self> {
        let p0 = check_positive(spec.initial_pressure.get::<pascal>(), "initial pressure")?;
        let p2 = check_non_negative(spec.ambient_pressure.get::<pascal>(), "ambient pressure")?;
        let db = check_positive(spec.barrel_diameter.get::<meter>(), "barrel diameter")?;
        let dp = check_positive(spec.plunger_diameter.get::<meter>(), "plunger diameter")?;
        let gamma = check_finite(spec.gamma, "adiabatic index")?;
        if gamma <= 1.0 {
            return Err(ComponentError::NonPhysical {
                what: "adiabatic index must exceed 1",
            });
        }
        let mass_d = check_positive(spec.dart_mass.get::<kilogram>(), "dart mass")?;
        let mass_p = check_positive(spec.plunger_mass.get::<kilogram>(), "plunger mass")?;
        let xso = check_non_negative(
            spec.spring_precompression.get::<meter>(),
            "spring precompression",
        )?;
        let l0 = check_positive(spec.chamber_length.get::<meter>(), "chamber length")?;
        let k = check_positive(spec.spring_rate, "spring rate")?;

        let area_b = circle_area(pf_core::units::m(db)).get::<square_meter>();
        let area_p = circle_area(pf_core::units::m(dp)).get::<square_meter>();

        Ok(Self {
            name: name.into(),
            p0,
            p2,
            gamma,
            mass_d,
            mass_p,
            l0,
            k,
            area_b,
            area_p,
            v0: l0 * area_p,
            xsf: xso + l0,
        })
    }

    pub fn barrel_area(&self) -> Area {
        Area::new::<square_meter>(self.area_b)
    }

    pub fn plunger_area(&self) -> Area {
        Area::new::<square_meter>(self.area_p)
    }

    /// Chamber volume with the plunger and dart at rest.
    pub fn reference_volume(&self) -> Volume {
        Volume::new::<cubic_meter>(self.v0)
    }

    /// Raw chamber volume (m³). Goes negative on plunger over-travel.
    #[inline]
    pub fn chamber_volume(&self, dart_position: f64, plunger_position: f64) -> f64 {
        (self.l0 - plunger_position) * self.area_p + dart_position * self.area_b
    }

    /// Chamber volume over reference volume, floored at [`VOLUME_RATIO_FLOOR`].
    #[inline]
    pub fn volume_ratio(&self, dart_position: f64, plunger_position: f64) -> f64 {
        (self.chamber_volume(dart_position, plunger_position) / self.v0).max(VOLUME_RATIO_FLOOR)
    }

    /// Adiabatic closure `p0 / ratio^gamma` (Pa).
    #[inline]
    pub fn chamber_pressure(&self, volume_ratio: f64) -> f64 {
        self.p0 / volume_ratio.powf(self.gamma)
    }

    /// Spring force pushing the plunger forward (N).
    #[inline]
    pub fn spring_force(&self, plunger_position: f64) -> f64 {
        self.k * (self.xsf - plunger_position)
    }
}

impl LaunchDynamics for DartPlunger {
    fn name(&self) -> &str {
        &self.name
    }

    fn derivative(&self, state: &LaunchState) -> LaunchState {
        let ratio = self.volume_ratio(state.dart_position, state.plunger_position);
        let p_t = self.chamber_pressure(ratio);

        let plunger_accel = ((self.p2 - p_t) * self.area_p
            + self.spring_force(state.plunger_position))
            / self.mass_p;
        let dart_accel = ((p_t - self.p2) * self.area_b) / self.mass_d;

        LaunchState {
            dart_position: state.dart_velocity,
            dart_velocity: dart_accel,
            plunger_position: state.plunger_velocity,
            plunger_velocity: plunger_accel,
        }
    }

    fn derive(&self, state: &LaunchState) -> DerivedQuantities {
        let ratio = self.volume_ratio(state.dart_position, state.plunger_position);
        DerivedQuantities {
            pressure: self.chamber_pressure(ratio),
            volume: self.chamber_volume(state.dart_position, state.plunger_position),
            spring_force: self.spring_force(state.plunger_position),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use pf_core::units::{kg, m, pa};
    use proptest::prelude::*;

    fn spec(gamma: f64, k: f64) -> DartPlungerSpec {
        DartPlungerSpec {
            initial_pressure: pa(101_325.0),
            ambient_pressure: pa(101_325.0),
            barrel_diameter: m(0.0127),
            plunger_diameter: m(0.035052),
            gamma,
            dart_mass: kg(0.0012),
            plunger_mass: kg(0.06),
            spring_precompression: m(0.0254),
            chamber_length: m(0.1016),
            spring_rate: k,
        }
    }

    proptest! {
        #[test]
        fn pressure_finite_and_positive_everywhere(
            gamma in 1.01_f64..2.0,
            k in 10.0_f64..5000.0,
            dart_position in -1.0_f64..1.0,
            plunger_position in -1.0_f64..1.0,
        ) {
            let model = DartPlunger::new("launcher", spec(gamma, k)).unwrap();
            let ratio = model.volume_ratio(dart_position, plunger_position);
            prop_assert!(ratio >= VOLUME_RATIO_FLOOR);

            let state = LaunchState {
                dart_position,
                plunger_position,
                ..LaunchState::at_rest()
            };
            let derived = model.derive(&state);
            prop_assert!(derived.pressure.is_finite());
            prop_assert!(derived.pressure > 0.0);
            prop_assert!(model.derivative(&state).is_finite());
        }

        #[test]
        fn derive_matches_derivative_pressure(
            dart_position in 0.0_f64..0.5,
            plunger_position in 0.0_f64..0.1,
        ) {
            let model = DartPlunger::new("launcher", spec(1.4, 1150.6)).unwrap();
            let state = LaunchState {
                dart_position,
                plunger_position,
                ..LaunchState::at_rest()
            };
            // Dart acceleration is linear in the chamber pressure used by the dynamics.
            let d = model.derivative(&state);
            let p_from_dynamics = d.dart_velocity * 0.0012 / model.barrel_area().get::<square_meter>()
                + 101_325.0;
            let p_reported = model.derive(&state).pressure;
            prop_assert!((p_from_dynamics - p_reported).abs() <= 1e-6 * p_reported.max(1.0));
        }
    }
}
