//! TransientModel trait for pluggable dynamic systems.

use crate::error::SimResult;
use nalgebra::SVector;

/// Trait for transient (dynamic) system models with an `N`-dimensional state.
///
/// A TransientModel must implement:
/// - Initial state at t=0
/// - RHS (right-hand side) computation: x_dot = f(t, x)
///
/// `rhs` takes `&self`: adaptive integrators evaluate it at trial points they
/// may later reject, so it must not carry state between calls.
pub trait TransientModel<const N: usize> {
    /// Return the initial state at t=0.
    fn initial_state(&self) -> SVector<f64, N>;

    /// Compute state derivative dxdt = f(t, x).
    fn rhs(&self, t: f64, x: &SVector<f64, N>) -> SimResult<SVector<f64, N>>;
}
