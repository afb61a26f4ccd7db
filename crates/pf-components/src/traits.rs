//! Core traits for launcher models.

use crate::state::{DerivedQuantities, LaunchState};

/// A lumped launcher: dart and plunger coupled through a gas chamber.
///
/// Implementations are pure functions of state and parameters. They may be
/// evaluated any number of times, from any thread, including at trial states
/// an adaptive integrator later rejects.
pub trait LaunchDynamics: Send + Sync {
    /// Component name for debugging and identification.
    fn name(&self) -> &str;

    /// Time derivative of the launch state.
    ///
    /// The system is autonomous, so no time argument is taken.
    fn derivative(&self, state: &LaunchState) -> LaunchState;

    /// Pressure, volume and spring force at a single state.
    fn derive(&self, state: &LaunchState) -> DerivedQuantities;

    /// Derived quantities for every state of a trajectory, in order.
    fn derive_series(&self, states: &[LaunchState]) -> Vec<DerivedQuantities> {
        states.iter().map(|s| self.derive(s)).collect()
    }
}
