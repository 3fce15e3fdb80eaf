//! Synthetic time series: power-law (colored) noise and AR(1) processes.
//!
//! These generators produce the signals used in examples, benchmarks and
//! tests, and give callers a quick way to build null ensembles.

use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{EnsembleError, Result};
use crate::series::Series;
use crate::utils;

/// Model used by [`gen_series`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TsModel {
    /// Noise with spectral density proportional to `f^-alpha`
    ColoredNoise {
        /// Spectral exponent (0 = white, 1 = pink, 2 = red)
        alpha: f64,
    },
    /// AR(1) process with lag-1 coefficient `g`
    Ar1 {
        /// Lag-1 coefficient, |g| < 1
        g: f64,
    },
}

/// Colored noise on the (possibly uneven) time axis `t`, standardized to
/// zero mean and unit variance.
///
/// The series is a sum of sinusoids at frequencies `k / (n * dt)` for
/// `k = 1..=n/2`, each with amplitude `f^(-alpha/2)` and a uniform random
/// phase. `dt` is the mean spacing of `t`.
pub fn colored_noise<R: Rng + ?Sized>(alpha: f64, t: &[f64], rng: &mut R) -> Result<Vec<f64>> {
    let n = t.len();
    if n < 3 {
        return Err(EnsembleError::InvalidInput(format!(
            "colored noise needs at least 3 time points, got {}",
            n
        )));
    }
    if !alpha.is_finite() {
        return Err(EnsembleError::InvalidArgument(format!(
            "spectral exponent must be finite, got {}",
            alpha
        )));
    }
    let dt = (t[n - 1] - t[0]) / (n - 1) as f64;
    if !(dt > 0.0) {
        return Err(EnsembleError::InvalidInput(
            "time axis must span a positive interval".to_string(),
        ));
    }

    let mut y = vec![0.0; n];
    for k in 1..=n / 2 {
        let f = k as f64 / (n as f64 * dt);
        let amplitude = f.powf(-alpha / 2.0);
        let phase = rng.gen_range(0.0..2.0 * PI);
        for (yi, &ti) in y.iter_mut().zip(t) {
            *yi += amplitude * (2.0 * PI * f * ti + phase).cos();
        }
    }

    let m = utils::mean(&y);
    let s = utils::std_dev(&y, 1);
    if !s.is_finite() || s < utils::stats::VARIANCE_FLOOR {
        return Err(EnsembleError::ComputationError(format!(
            "colored noise with exponent {} has no finite, non-zero variance",
            alpha
        )));
    }
    Ok(y.into_iter().map(|v| (v - m) / s).collect())
}

/// AR(1) series of length `n` with lag-1 coefficient `g` and unit variance.
pub fn ar1_series<R: Rng + ?Sized>(g: f64, n: usize, rng: &mut R) -> Result<Vec<f64>> {
    if !(g.abs() < 1.0) {
        return Err(EnsembleError::InvalidArgument(format!(
            "AR(1) coefficient must satisfy |g| < 1, got {}",
            g
        )));
    }
    let innovation_sd = (1.0 - g * g).sqrt();
    let mut out = Vec::with_capacity(n);
    let mut prev: f64 = StandardNormal.sample(rng);
    for _ in 0..n {
        out.push(prev);
        let eps: f64 = StandardNormal.sample(rng);
        prev = g * prev + innovation_sd * eps;
    }
    Ok(out)
}

/// Generate a series of `nt` points on the time axis `1, 2, ..., nt`.
pub fn gen_series<R: Rng + ?Sized>(model: TsModel, nt: usize, rng: &mut R) -> Result<Series> {
    let time: Vec<f64> = (1..=nt).map(|i| i as f64).collect();
    let value = match model {
        TsModel::ColoredNoise { alpha } => colored_noise(alpha, &time, rng)?,
        TsModel::Ar1 { g } => ar1_series(g, nt, rng)?,
    };
    Series::new(time, value)
}
