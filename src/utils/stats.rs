//! Descriptive statistics shared by the series, correlation and quantile code.

use std::cmp::Ordering;

use crate::error::{EnsembleError, Result};

/// Variances below this are treated as zero.
pub const VARIANCE_FLOOR: f64 = 1e-300;

/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

/// Standard deviation with `ddof` delta degrees of freedom.
pub fn std_dev(x: &[f64], ddof: usize) -> f64 {
    let n = x.len();
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(x);
    let ss: f64 = x.iter().map(|&v| (v - m).powi(2)).sum();
    (ss / (n - ddof) as f64).sqrt()
}

/// Lag-1 autocorrelation coefficient.
pub fn lag1_autocorrelation(x: &[f64]) -> Result<f64> {
    if x.len() < 3 {
        return Err(EnsembleError::ComputationError(format!(
            "lag-1 autocorrelation needs at least 3 points, got {}",
            x.len()
        )));
    }
    let m = mean(x);
    let denom: f64 = x.iter().map(|&v| (v - m).powi(2)).sum();
    if denom < VARIANCE_FLOOR {
        return Err(EnsembleError::ComputationError(
            "lag-1 autocorrelation of a constant series is undefined".to_string(),
        ));
    }
    let num: f64 = x.windows(2).map(|w| (w[0] - m) * (w[1] - m)).sum();
    Ok(num / denom)
}

/// Sort a copy of `x` in ascending order.
pub fn sorted(x: &[f64]) -> Vec<f64> {
    let mut out = x.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    out
}

/// Quantile of already-sorted data using linear interpolation between
/// closest ranks (`h = (n - 1) q`).
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let h = (n - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi.min(n - 1)] - sorted[lo])
}

/// Mid-ranks (1-based); ties receive the average of the ranks they span.
pub fn rank_average(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| x[a].partial_cmp(&x[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && x[order[j + 1]] == x[order[i]] {
            j += 1;
        }
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        i = j + 1;
    }
    ranks
}
