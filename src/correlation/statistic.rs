//! Pairwise association measures and their analytic p-values.
//!
//! Every measure returns an error rather than NaN when it is undefined
//! (fewer than three points, mismatched lengths, zero variance), so an
//! undefined correlation can never be reported as significant.

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use super::config::Statistic;
use crate::error::{EnsembleError, Result};
use crate::utils::{self, stats::VARIANCE_FLOOR};

fn check_pair(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(EnsembleError::DimensionMismatch(format!(
            "paired series have {} and {} points",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 3 {
        return Err(EnsembleError::ComputationError(format!(
            "correlation needs at least 3 paired points, got {}",
            x.len()
        )));
    }
    Ok(())
}

/// Pearson product-moment correlation.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    check_pair(x, y)?;
    let mx = utils::mean(x);
    let my = utils::mean(y);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx < VARIANCE_FLOOR || syy < VARIANCE_FLOOR {
        return Err(EnsembleError::ComputationError(
            "correlation is undefined for a constant series".to_string(),
        ));
    }
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Spearman rank correlation (Pearson on mid-ranks).
pub fn spearman(x: &[f64], y: &[f64]) -> Result<f64> {
    check_pair(x, y)?;
    pearson(&utils::rank_average(x), &utils::rank_average(y))
}

/// Kendall's tau-b, corrected for ties in either variable.
pub fn kendall_tau_b(x: &[f64], y: &[f64]) -> Result<f64> {
    check_pair(x, y)?;
    let n = x.len();
    let (mut concordant, mut discordant) = (0i64, 0i64);
    let (mut ties_x, mut ties_y) = (0i64, 0i64);
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            match (dx == 0.0, dy == 0.0) {
                (true, true) => {}
                (true, false) => ties_x += 1,
                (false, true) => ties_y += 1,
                (false, false) => {
                    if (dx > 0.0) == (dy > 0.0) {
                        concordant += 1;
                    } else {
                        discordant += 1;
                    }
                }
            }
        }
    }
    let n0 = concordant + discordant;
    let denom = (((n0 + ties_x) as f64) * ((n0 + ties_y) as f64)).sqrt();
    if denom == 0.0 {
        return Err(EnsembleError::ComputationError(
            "Kendall's tau is undefined when every pair is tied".to_string(),
        ));
    }
    Ok(((concordant - discordant) as f64 / denom).clamp(-1.0, 1.0))
}

fn sign(d: f64) -> f64 {
    if d > 0.0 {
        1.0
    } else if d < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Weighted tau with one importance ranking.
///
/// Elements are ranked by decreasing `key` (rank 0 is most important) and the
/// pair (i, j) carries weight `1/(r_i + 1) + 1/(r_j + 1)`.
fn weighted_tau_ranked(x: &[f64], y: &[f64], key: &[f64]) -> Result<f64> {
    let n = x.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| key[b].total_cmp(&key[a]));
    let mut weight = vec![0.0; n];
    for (rank, &idx) in order.iter().enumerate() {
        weight[idx] = 1.0 / (rank as f64 + 1.0);
    }

    let (mut num, mut norm_x, mut norm_y) = (0.0, 0.0, 0.0);
    for i in 0..n {
        for j in (i + 1)..n {
            let w = weight[i] + weight[j];
            let sx = sign(x[i] - x[j]);
            let sy = sign(y[i] - y[j]);
            num += w * sx * sy;
            norm_x += w * sx.abs();
            norm_y += w * sy.abs();
        }
    }
    let denom = (norm_x * norm_y).sqrt();
    if denom == 0.0 {
        return Err(EnsembleError::ComputationError(
            "weighted tau is undefined for a constant series".to_string(),
        ));
    }
    Ok((num / denom).clamp(-1.0, 1.0))
}

/// Weighted Kendall's tau with additive hyperbolic weights.
///
/// The value is the average of the statistic ranked by `x` and ranked by
/// `y`, which makes it symmetric in its arguments.
pub fn weighted_tau(x: &[f64], y: &[f64]) -> Result<f64> {
    check_pair(x, y)?;
    let by_x = weighted_tau_ranked(x, y, x)?;
    let by_y = weighted_tau_ranked(x, y, y)?;
    Ok((by_x + by_y) / 2.0)
}

/// Two-sided p-value of a correlation-type coefficient `r` under a Student t
/// with `df` degrees of freedom.
pub(crate) fn t_p_value(r: f64, df: f64) -> Result<f64> {
    if r.abs() >= 1.0 {
        return Ok(0.0);
    }
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
        EnsembleError::ComputationError(format!("invalid t distribution (df = {}): {}", df, e))
    })?;
    let t = r * (df / (1.0 - r * r)).sqrt();
    Ok((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

/// Two-sided p-value of a tau-type coefficient using the large-sample normal
/// approximation with `n` effective points.
pub(crate) fn tau_p_value(tau: f64, n: f64) -> Result<f64> {
    let std_normal = Normal::new(0.0, 1.0)
        .map_err(|e| EnsembleError::ComputationError(format!("normal distribution: {}", e)))?;
    let z = 3.0 * tau * (n * (n - 1.0)).sqrt() / (2.0 * (2.0 * n + 5.0)).sqrt();
    Ok((2.0 * (1.0 - std_normal.cdf(z.abs()))).clamp(0.0, 1.0))
}

impl Statistic {
    /// Compute the association between two equally long samples.
    pub fn compute(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        match self {
            Statistic::Pearson | Statistic::PointBiserial => pearson(x, y),
            Statistic::Spearman => spearman(x, y),
            Statistic::KendallTau => kendall_tau_b(x, y),
            Statistic::WeightedTau => weighted_tau(x, y),
        }
    }

    /// Returns true for the rank-concordance (tau) family.
    pub fn is_tau(&self) -> bool {
        matches!(self, Statistic::KendallTau | Statistic::WeightedTau)
    }

    /// Analytic two-sided p-value of `value` computed from `n` points.
    ///
    /// `n` may be fractional when it is an effective sample size.
    pub fn p_value(&self, value: f64, n: f64) -> Result<f64> {
        if n <= 2.0 {
            return Err(EnsembleError::ComputationError(format!(
                "sample size {:.2} leaves no degrees of freedom",
                n
            )));
        }
        if self.is_tau() {
            tau_p_value(value, n)
        } else {
            t_p_value(value, n - 2.0)
        }
    }
}
