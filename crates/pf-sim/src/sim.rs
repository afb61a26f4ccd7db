//! Simulation runner and result recording.

use crate::adaptive::{DormandPrince45, SolverStats};
use crate::error::{SimError, SimResult};
use crate::integrator::{Integrator, RK4};
use crate::model::TransientModel;
use nalgebra::SVector;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Dormand–Prince 5(4) with error control and dense output (default).
    #[default]
    DormandPrince45,
    /// Classical RK4 with a fixed number of substeps per output interval.
    Rk4,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Number of evenly spaced output samples, including both endpoints
    pub n_points: usize,
    /// Relative tolerance (adaptive only)
    pub rtol: f64,
    /// Absolute tolerance (adaptive only)
    pub atol: f64,
    /// Step-size ceiling (adaptive only)
    pub max_step: f64,
    /// Cap on attempted steps
    pub max_steps: usize,
    /// Integrator type (default: Dormand–Prince)
    pub integrator: IntegratorType,
    /// RK4 substeps per output interval
    pub rk4_substeps: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        let dp = DormandPrince45::default();
        Self {
            t_end: 0.02,
            n_points: 1500,
            rtol: dp.rtol,
            atol: dp.atol,
            max_step: dp.max_step,
            max_steps: dp.max_steps,
            integrator: IntegratorType::default(),
            rk4_substeps: 20,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !self.t_end.is_finite() || self.t_end <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be finite and positive",
            });
        }
        if self.n_points < 2 {
            return Err(SimError::InvalidArg {
                what: "n_points must be at least 2",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.integrator == IntegratorType::Rk4 && self.rk4_substeps == 0 {
            return Err(SimError::InvalidArg {
                what: "rk4_substeps must be positive",
            });
        }
        Ok(())
    }

    fn adaptive(&self) -> DormandPrince45 {
        DormandPrince45 {
            rtol: self.rtol,
            atol: self.atol,
            max_step: self.max_step,
            max_steps: self.max_steps,
            first_step: None,
        }
    }
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<const N: usize> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots, one per time point
    pub x: Vec<SVector<f64, N>>,
    /// Step statistics
    pub stats: SolverStats,
}

/// Integrate `model` from 0 to `opts.t_end`, sampling `opts.n_points`
/// evenly spaced times.
pub fn run_sim<const N: usize, M: TransientModel<N>>(
    model: &M,
    opts: &SimOptions,
) -> SimResult<SimRecord<N>> {
    opts.validate()?;
    let t = pf_core::linspace(0.0, opts.t_end, opts.n_points)?;

    let (x, stats) = match opts.integrator {
        IntegratorType::DormandPrince45 => opts.adaptive().solve(model, &t)?,
        IntegratorType::Rk4 => run_fixed(model, &t, opts)?,
    };

    Ok(SimRecord { t, x, stats })
}

fn run_fixed<const N: usize, M: TransientModel<N>>(
    model: &M,
    t_eval: &[f64],
    opts: &SimOptions,
) -> SimResult<(Vec<SVector<f64, N>>, SolverStats)> {
    let total = (t_eval.len() - 1).saturating_mul(opts.rk4_substeps);
    if total > opts.max_steps {
        return Err(SimError::MaxStepsExceeded {
            max_steps: opts.max_steps,
            t: t_eval[0],
            t_end: t_eval[t_eval.len() - 1],
        });
    }

    let mut stats = SolverStats::default();
    let mut x = model.initial_state();
    let mut out = Vec::with_capacity(t_eval.len());
    out.push(x);

    for w in t_eval.windows(2) {
        let dt = (w[1] - w[0]) / opts.rk4_substeps as f64;
        for i in 0..opts.rk4_substeps {
            let t = w[0] + i as f64 * dt;
            x = RK4.step(model, t, &x, dt)?;
            stats.accepted_steps += 1;
            stats.rhs_evals += RK4::STAGES;
            if !x.iter().all(|v| v.is_finite()) {
                return Err(SimError::NonFinite { t: t + dt });
            }
        }
        out.push(x);
    }

    tracing::debug!(
        steps = stats.accepted_steps,
        rhs_evals = stats.rhs_evals,
        "fixed-step integration finished"
    );
    Ok((out, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

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
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.t_end, 0.02);
        assert_eq!(opts.n_points, 1500);
        assert_eq!(opts.rtol, 1e-3);
        assert_eq!(opts.atol, 1e-6);
        assert_eq!(opts.max_steps, 100_000);
        assert_eq!(opts.integrator, IntegratorType::DormandPrince45);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn sim_options_invalid() {
        let bad = [
            SimOptions {
                t_end: 0.0,
                ..Default::default()
            },
            SimOptions {
                t_end: f64::NAN,
                ..Default::default()
            },
            SimOptions {
                n_points: 1,
                ..Default::default()
            },
            SimOptions {
                integrator: IntegratorType::Rk4,
                rk4_substeps: 0,
                ..Default::default()
            },
        ];
        for opts in &bad {
            assert!(matches!(
                run_sim(&Oscillator, opts),
                Err(SimError::InvalidArg { .. })
            ));
        }
    }

    #[test]
    fn grid_matches_request() {
        let opts = SimOptions {
            t_end: 2.0,
            n_points: 5,
            ..Default::default()
        };
        let rec = run_sim(&Oscillator, &opts).unwrap();
        assert_eq!(rec.t, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(rec.x.len(), 5);
        assert_eq!(rec.x[0], Vector2::new(1.0, 0.0));
    }

    #[test]
    fn rk4_counts_substeps() {
        let opts = SimOptions {
            t_end: 1.0,
            n_points: 11,
            integrator: IntegratorType::Rk4,
            rk4_substeps: 10,
            ..Default::default()
        };
        let rec = run_sim(&Oscillator, &opts).unwrap();
        assert_eq!(rec.stats.accepted_steps, 100);
        assert_eq!(rec.stats.rhs_evals, 400);
        assert_eq!(rec.stats.rejected_steps, 0);
        assert!((rec.x[10][0] - 1f64.cos()).abs() < 1e-9);
    }

    #[test]
    fn rk4_respects_step_cap() {
        let opts = SimOptions {
            n_points: 100,
            integrator: IntegratorType::Rk4,
            rk4_substeps: 10,
            max_steps: 50,
            ..Default::default()
        };
        assert!(matches!(
            run_sim(&Oscillator, &opts),
            Err(SimError::MaxStepsExceeded { .. })
        ));
    }
}
