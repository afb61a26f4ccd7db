use crate::PfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PfError::NonPositive { what, value: v })
    }
}

/// `n` evenly spaced samples over `[start, stop]`.
///
/// The first sample is exactly `start` and the last exactly `stop`.
pub fn linspace(start: Real, stop: Real, n: usize) -> Result<Vec<Real>, PfError> {
    if n < 2 {
        return Err(PfError::InvalidArg {
            what: "linspace needs at least two samples",
        });
    }
    ensure_finite(start, "linspace start")?;
    ensure_finite(stop, "linspace stop")?;

    let step = (stop - start) / (n - 1) as Real;
    let mut out: Vec<Real> = (0..n).map(|i| start + i as Real * step).collect();
    out[n - 1] = stop;
    Ok(out)
}
