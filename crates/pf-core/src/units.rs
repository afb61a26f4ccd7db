// pf-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, Mass as UomMass, Pressure as UomPressure,
    Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Pressure = UomPressure;
pub type Volume = UomVolume;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

/// Cross-sectional area of a circular bore.
#[inline]
pub fn circle_area(diameter: Length) -> Area {
    diameter * diameter * std::f64::consts::PI / 4.0
}

pub mod constants {
    /// Standard atmosphere (Pa).
    pub const P_ATM_PA: f64 = 101_325.0;

    /// Heat capacity ratio of dry air.
    pub const GAMMA_AIR: f64 = 1.4;
}
