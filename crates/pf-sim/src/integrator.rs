//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::TransientModel;
use nalgebra::SVector;

/// Trait for fixed-step time integrators.
pub trait Integrator {
    /// Right-hand side evaluations per step.
    const STAGES: usize;

    /// Advance state by one time step using the transient model.
    fn step<const N: usize, M: TransientModel<N>>(
        &self,
        model: &M,
        t: f64,
        x: &SVector<f64, N>,
        dt: f64,
    ) -> SimResult<SVector<f64, N>>;
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Debug)]
pub struct RK4;

impl Integrator for RK4 {
    const STAGES: usize = 4;

    fn step<const N: usize, M: TransientModel<N>>(
        &self,
        model: &M,
        t: f64,
        x: &SVector<f64, N>,
        dt: f64,
    ) -> SimResult<SVector<f64, N>> {
        let k1 = model.rhs(t, x)?;
        let k2 = model.rhs(t + 0.5 * dt, &(x + k1 * (0.5 * dt)))?;
        let k3 = model.rhs(t + 0.5 * dt, &(x + k2 * (0.5 * dt)))?;
        let k4 = model.rhs(t + dt, &(x + k3 * dt))?;

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        Ok(x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    /// x'' = -x, starting at (1, 0).
    struct Oscillator;

    impl TransientModel<2> for Oscillator {
        fn initial_state(&self) -> Vector2<f64> {
            Vector2::new(1.0, 0.0)
        }

        fn rhs(&self, _t: f64, x: &Vector2<f64>) -> SimResult<Vector2<f64>> {
            Ok(Vector2::new(x[1], -x[0]))
        }
    }

    #[test]
    fn rk4_tracks_harmonic_oscillator() {
        let model = Oscillator;
        let dt = 1e-3;
        let steps = 1000;
        let mut x = model.initial_state();
        for i in 0..steps {
            x = RK4.step(&model, i as f64 * dt, &x, dt).unwrap();
        }
        let t = steps as f64 * dt;
        assert!((x[0] - t.cos()).abs() < 1e-10);
        assert!((x[1] + t.sin()).abs() < 1e-10);
    }

    #[test]
    fn rk4_propagates_rhs_errors() {
        struct Failing;
        impl TransientModel<1> for Failing {
            fn initial_state(&self) -> SVector<f64, 1> {
                SVector::<f64, 1>::zeros()
            }
            fn rhs(&self, _t: f64, _x: &SVector<f64, 1>) -> SimResult<SVector<f64, 1>> {
                Err(crate::error::SimError::Backend {
                    message: "boom".to_string(),
                })
            }
        }
        let x0 = Failing.initial_state();
        assert!(RK4.step(&Failing, 0.0, &x0, 0.1).is_err());
    }
}
