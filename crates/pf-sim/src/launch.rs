//! Adapter exposing a launcher model to the integrators.

use crate::error::SimResult;
use crate::model::TransientModel;
use nalgebra::Vector4;
use pf_components::{LaunchDynamics, LaunchState};

/// Transient view of a [`LaunchDynamics`] model, starting from rest.
pub struct LaunchModel<'a, D: LaunchDynamics> {
    dynamics: &'a D,
}

impl<'a, D: LaunchDynamics> LaunchModel<'a, D> {
    pub fn new(dynamics: &'a D) -> Self {
        Self { dynamics }
    }
}

impl<D: LaunchDynamics> TransientModel<4> for LaunchModel<'_, D> {
    fn initial_state(&self) -> Vector4<f64> {
        LaunchState::at_rest().to_vector()
    }

    fn rhs(&self, _t: f64, x: &Vector4<f64>) -> SimResult<Vector4<f64>> {
        Ok(self
            .dynamics
            .derivative(&LaunchState::from_vector(x))
            .to_vector())
    }
}
