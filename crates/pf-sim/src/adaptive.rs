//! Dormand–Prince 5(4) integration through `ode_solvers::Dopri5`.
//!
//! The stepper's dense output fills the interior of the evenly spaced
//! output grid; both endpoints are the exact initial state and the state
//! after the final accepted step.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{SimError, SimResult};
use crate::model::TransientModel;
use nalgebra::SVector;
use ode_solvers::System;
use ode_solvers::dop_shared::{IntegrationError, OutputType};

type OdeVector<const N: usize> = ode_solvers::SVector<f64, N>;

const SAFETY: f64 = 0.9;
/// Plain `h·err^(-1/5)` control; no Lund stabilization.
const BETA: f64 = 0.0;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const STIFFNESS_CHECK_STEPS: u32 = 1000;

/// Step statistics of one integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub rhs_evals: usize,
}

impl From<ode_solvers::dop_shared::Stats> for SolverStats {
    fn from(stats: ode_solvers::dop_shared::Stats) -> Self {
        Self {
            accepted_steps: stats.accepted_steps as usize,
            rejected_steps: stats.rejected_steps as usize,
            rhs_evals: stats.num_eval as usize,
        }
    }
}

/// Dormand–Prince RK5(4) settings.
#[derive(Clone, Debug)]
pub struct DormandPrince45 {
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
    /// Step-size ceiling (s)
    pub max_step: f64,
    /// Cap on attempted steps
    pub max_steps: usize,
    /// Initial step (s); chosen automatically when `None`
    pub first_step: Option<f64>,
}

impl Default for DormandPrince45 {
    fn default() -> Self {
        Self {
            rtol: 1e-3,
            atol: 1e-6,
            max_step: f64::INFINITY,
            max_steps: 100_000,
            first_step: None,
        }
    }
}

/// Last accepted step and the first failure seen by the system callbacks.
struct Progress<const N: usize> {
    last: (f64, SVector<f64, N>),
    failure: Option<SimError>,
}

/// Exposes a [`TransientModel`] as an `ode_solvers` system.
struct OdeSystem<'a, const N: usize, M: TransientModel<N>> {
    model: &'a M,
    progress: Rc<RefCell<Progress<N>>>,
}

impl<const N: usize, M: TransientModel<N>> System<f64, OdeVector<N>> for OdeSystem<'_, N, M> {
    fn system(&self, t: f64, y: &OdeVector<N>, dy: &mut OdeVector<N>) {
        let x = SVector::<f64, N>::from_column_slice(y.as_slice());
        match self.model.rhs(t, &x) {
            Ok(d) => dy.as_mut_slice().copy_from_slice(d.as_slice()),
            Err(e) => {
                let mut progress = self.progress.borrow_mut();
                if progress.failure.is_none() {
                    progress.failure = Some(e);
                }
                dy.fill(f64::NAN);
            }
        }
    }

    fn solout(&mut self, t: f64, y: &OdeVector<N>, _dy: &OdeVector<N>) -> bool {
        let mut progress = self.progress.borrow_mut();
        if progress.failure.is_some() {
            return true;
        }
        if !y.iter().all(|v| v.is_finite()) {
            progress.failure = Some(SimError::NonFinite { t });
            return true;
        }
        progress.last = (t, SVector::<f64, N>::from_column_slice(y.as_slice()));
        false
    }
}

impl DormandPrince45 {
    fn validate(&self) -> SimResult<()> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "rtol must be finite and positive",
            });
        }
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "atol must be finite and positive",
            });
        }
        if self.max_step.is_nan() || self.max_step <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "max_step must be positive",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if let Some(h) = self.first_step {
            if !h.is_finite() || h <= 0.0 {
                return Err(SimError::InvalidArg {
                    what: "first_step must be finite and positive",
                });
            }
        }
        Ok(())
    }

    /// Integrate `model` over the evenly spaced grid `t_eval` and return
    /// one state per grid time.
    pub fn solve<const N: usize, M: TransientModel<N>>(
        &self,
        model: &M,
        t_eval: &[f64],
    ) -> SimResult<(Vec<SVector<f64, N>>, SolverStats)> {
        self.validate()?;
        let (t0, t_end) = match t_eval {
            [first, .., last] if last > first => (*first, *last),
            _ => {
                return Err(SimError::InvalidArg {
                    what: "t_eval must hold at least two increasing times",
                });
            }
        };
        if t_eval.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SimError::InvalidArg {
                what: "t_eval must be strictly increasing",
            });
        }

        let n = t_eval.len();
        let dx = (t_end - t0) / (n - 1) as f64;
        let x0 = model.initial_state();
        let progress = Rc::new(RefCell::new(Progress {
            last: (t0, x0),
            failure: None,
        }));
        let system = OdeSystem {
            model,
            progress: Rc::clone(&progress),
        };

        let max_steps = u32::try_from(self.max_steps).unwrap_or(u32::MAX);
        let mut stepper = ode_solvers::Dopri5::from_param(
            system,
            t0,
            t_end,
            dx,
            OdeVector::<N>::from_column_slice(x0.as_slice()),
            self.rtol,
            self.atol,
            SAFETY,
            BETA,
            MIN_FACTOR,
            MAX_FACTOR,
            self.max_step.min(t_end - t0),
            self.first_step.unwrap_or(0.0),
            max_steps,
            STIFFNESS_CHECK_STEPS,
            OutputType::Dense,
        );

        let outcome = stepper.integrate();
        let (last, failure) = {
            let mut progress = progress.borrow_mut();
            (progress.last, progress.failure.take())
        };
        if let Some(e) = failure {
            return Err(e);
        }
        let stats = SolverStats::from(outcome.map_err(|e| self.map_failure(e, last.0, t_end))?);

        // Dense samples drift by rounding in the stepper's accumulated output
        // time; half a spacing separates them from the endpoints.
        let mut out = Vec::with_capacity(n);
        out.push((t0, x0));
        out.extend(
            stepper
                .x_out()
                .iter()
                .zip(stepper.y_out())
                .filter(|(t, _)| **t > t0 + 0.5 * dx)
                .map(|(t, y)| (*t, SVector::<f64, N>::from_column_slice(y.as_slice()))),
        );
        let (t_last, x_last) = last;
        if (t_last - t_end).abs() <= 1e-9 * (t_end - t0) {
            out.retain(|(t, _)| *t < t_end - 0.5 * dx);
            out.push((t_end, x_last));
        }
        if out.len() != n {
            return Err(SimError::Backend {
                message: format!("dense output produced {} of {n} samples", out.len()),
            });
        }
        let out: Vec<_> = out.into_iter().map(|(_, x)| x).collect();

        tracing::debug!(
            accepted = stats.accepted_steps,
            rejected = stats.rejected_steps,
            rhs_evals = stats.rhs_evals,
            "adaptive integration finished"
        );
        Ok((out, stats))
    }

    fn map_failure(&self, e: IntegrationError, t: f64, t_end: f64) -> SimError {
        match e {
            IntegrationError::MaxNumStepReached { .. } => SimError::MaxStepsExceeded {
                max_steps: self.max_steps,
                t,
                t_end,
            },
            IntegrationError::StepSizeUnderflow { .. } => SimError::StepSizeTooSmall { t },
            IntegrationError::StiffnessDetected { .. } => SimError::StiffnessDetected { t },
            #[allow(unreachable_patterns)]
            other => SimError::Backend {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Vector1, Vector2};

    struct Decay;

    impl TransientModel<1> for Decay {
        fn initial_state(&self) -> Vector1<f64> {
            Vector1::new(1.0)
        }

        fn rhs(&self, _t: f64, x: &Vector1<f64>) -> SimResult<Vector1<f64>> {
            Ok(-x)
        }
    }

    struct Oscillator {
        omega: f64,
    }

    impl TransientModel<2> for Oscillator {
        fn initial_state(&self) -> Vector2<f64> {
            Vector2::new(1.0, 0.0)
        }

        fn rhs(&self, _t: f64, x: &Vector2<f64>) -> SimResult<Vector2<f64>> {
            Ok(Vector2::new(x[1], -self.omega * self.omega * x[0]))
        }
    }

    fn grid(t_end: f64, n: usize) -> Vec<f64> {
        pf_core::linspace(0.0, t_end, n).unwrap()
    }

    #[test]
    fn exponential_decay_matches_exact() {
        let solver = DormandPrince45 {
            rtol: 1e-8,
            atol: 1e-10,
            ..Default::default()
        };
        let t_eval = grid(2.0, 41);
        let (xs, stats) = solver.solve(&Decay, &t_eval).unwrap();
        assert_eq!(xs.len(), t_eval.len());
        assert_eq!(xs[0][0], 1.0);
        for (t, x) in t_eval.iter().zip(&xs) {
            assert!((x[0] - (-t).exp()).abs() < 1e-6, "t = {t}");
        }
        assert!(stats.accepted_steps > 0);
        assert!(stats.rhs_evals > stats.accepted_steps);
    }

    #[test]
    fn output_grid_does_not_drive_step_count() {
        let t_eval = grid(2.0, 2001);
        let (xs, stats) = DormandPrince45::default().solve(&Decay, &t_eval).unwrap();
        assert_eq!(xs.len(), 2001);
        assert!(stats.accepted_steps < 100, "{stats:?}");
        assert!((xs[2000][0] - (-2.0_f64).exp()).abs() < 1e-3);
    }

    #[test]
    fn oscillator_dense_output_is_accurate() {
        let model = Oscillator { omega: 3.0 };
        let solver = DormandPrince45 {
            rtol: 1e-9,
            atol: 1e-12,
            ..Default::default()
        };
        let t_eval = grid(4.0, 401);
        let (xs, _) = solver.solve(&model, &t_eval).unwrap();
        for (t, x) in t_eval.iter().zip(&xs) {
            assert!((x[0] - (3.0 * t).cos()).abs() < 1e-6, "t = {t}");
            assert!((x[1] + 3.0 * (3.0 * t).sin()).abs() < 2e-6, "t = {t}");
        }
    }

    #[test]
    fn repeated_solves_are_identical() {
        let model = Oscillator { omega: 1.5 };
        let solver = DormandPrince45::default();
        let t_eval = grid(10.0, 200);
        let (a, sa) = solver.solve(&model, &t_eval).unwrap();
        let (b, sb) = solver.solve(&model, &t_eval).unwrap();
        assert_eq!(a, b);
        assert_eq!(sa, sb);
    }

    #[test]
    fn blow_up_is_reported_not_truncated() {
        // x' = x², x(0) = 1 escapes to infinity at t = 1
        struct Blowup;
        impl TransientModel<1> for Blowup {
            fn initial_state(&self) -> Vector1<f64> {
                Vector1::new(1.0)
            }
            fn rhs(&self, _t: f64, x: &Vector1<f64>) -> SimResult<Vector1<f64>> {
                Ok(Vector1::new(x[0] * x[0]))
            }
        }

        let err = DormandPrince45::default()
            .solve(&Blowup, &grid(2.0, 10))
            .unwrap_err();
        assert!(err.is_integration_failure(), "{err}");
    }

    #[test]
    fn model_errors_stop_the_run() {
        struct Failing;
        impl TransientModel<1> for Failing {
            fn initial_state(&self) -> Vector1<f64> {
                Vector1::new(1.0)
            }
            fn rhs(&self, t: f64, x: &Vector1<f64>) -> SimResult<Vector1<f64>> {
                if t > 0.5 {
                    return Err(SimError::InvalidArg {
                        what: "model left its domain",
                    });
                }
                Ok(-x)
            }
        }

        let err = DormandPrince45::default()
            .solve(&Failing, &grid(1.0, 11))
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }), "{err}");
    }

    #[test]
    fn step_cap_is_enforced() {
        let solver = DormandPrince45 {
            max_steps: 3,
            rtol: 1e-10,
            atol: 1e-12,
            ..Default::default()
        };
        let err = solver
            .solve(&Oscillator { omega: 10.0 }, &grid(10.0, 5))
            .unwrap_err();
        assert!(matches!(err, SimError::MaxStepsExceeded { max_steps: 3, .. }));
    }

    #[test]
    fn rejects_bad_configuration() {
        let solver = DormandPrince45 {
            rtol: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            solver.solve(&Decay, &grid(1.0, 3)),
            Err(SimError::InvalidArg { .. })
        ));

        let solver = DormandPrince45::default();
        assert!(solver.solve(&Decay, &[0.0]).is_err());
        assert!(solver.solve(&Decay, &[0.0, 1.0, 1.0]).is_err());
    }
}
