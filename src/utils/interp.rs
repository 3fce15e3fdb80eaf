//! Linear interpolation and common-grid construction.

use crate::error::{EnsembleError, Result};

/// Tolerance used when comparing grid points against series bounds.
const GRID_TOLERANCE: f64 = 1e-9;

/// Linearly interpolate `fp(xp)` at `x`.
///
/// `xp` must be non-decreasing. Points outside `[xp[0], xp[n-1]]` take the
/// nearest end value. Repeated abscissae resolve to the first of the pair.
pub fn linear_interp(xp: &[f64], fp: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    let n = xp.len();
    if n == 0 {
        return f64::NAN;
    }

    let idx = xp.partition_point(|&v| v <= x);
    if idx == 0 {
        return fp[0];
    }
    if idx == n {
        return fp[n - 1];
    }

    let (x0, x1) = (xp[idx - 1], xp[idx]);
    let (f0, f1) = (fp[idx - 1], fp[idx]);
    if x1 == x0 {
        return f0;
    }
    f0 + (f1 - f0) * (x - x0) / (x1 - x0)
}

/// Interpolate `fp(xp)` at every point of `grid`.
pub fn interp_onto(xp: &[f64], fp: &[f64], grid: &[f64]) -> Vec<f64> {
    grid.iter().map(|&x| linear_interp(xp, fp, x)).collect()
}

/// Check that a coordinate vector is non-decreasing.
pub fn ensure_monotonic(name: &str, xs: &[f64]) -> Result<()> {
    if let Some(i) = xs.windows(2).position(|w| w[1] < w[0]) {
        return Err(EnsembleError::InvalidInput(format!(
            "{} must be non-decreasing (violated at index {})",
            name,
            i + 1
        )));
    }
    Ok(())
}

/// Build an evenly spaced grid from `start` to `stop` with the given `step`.
///
/// The grid starts exactly at `start` and never exceeds `stop`.
pub fn even_grid(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(EnsembleError::ComputationError(format!(
            "grid step must be positive and finite, got {}",
            step
        )));
    }
    if stop < start {
        return Err(EnsembleError::MismatchedTimeGrid(format!(
            "time spans do not overlap (start {} > stop {})",
            start, stop
        )));
    }

    let count = ((stop - start) / step + GRID_TOLERANCE).floor() as usize + 1;
    Ok((0..count)
        .map(|k| (start + k as f64 * step).min(stop))
        .collect())
}
