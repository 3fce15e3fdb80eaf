//! Significance tests for a single pair of aligned series.

use rand::Rng;
use tracing::warn;

use super::config::{CorrelationConfig, SignificanceMethod, Statistic};
use super::surrogates::Surrogate;
use crate::error::{EnsembleError, Result};
use crate::utils;

/// Upper bound on the lag-1 coefficients entering the effective sample size.
const MAX_PERSISTENCE: f64 = 0.999;

/// Effective number of independent points for two autocorrelated series:
/// `n (1 - g1 g2) / (1 + g1 g2)`, never more than `n`.
pub fn effective_sample_size(x: &[f64], y: &[f64]) -> Result<f64> {
    let g1 = utils::lag1_autocorrelation(x)?.clamp(0.0, MAX_PERSISTENCE);
    let g2 = utils::lag1_autocorrelation(y)?.clamp(0.0, MAX_PERSISTENCE);
    let n = x.len() as f64;
    let product = g1 * g2;
    Ok((n * (1.0 - product) / (1.0 + product)).min(n))
}

/// Share of surrogate statistics at least as extreme as `observed`.
///
/// Each draw contributes two null values: `x` against a surrogate of `y`,
/// and a surrogate of `x` against `y`. Null values the statistic cannot
/// compute (e.g. a constant surrogate) are left out of both the count and
/// the denominator.
fn surrogate_p_value<R: Rng + ?Sized>(
    statistic: Statistic,
    x: &[f64],
    y: &[f64],
    observed: f64,
    number: usize,
    surrogate_x: &Surrogate,
    surrogate_y: &Surrogate,
    rng: &mut R,
) -> Result<f64> {
    let threshold = observed.abs();
    let (mut exceed, mut valid) = (0usize, 0usize);
    let mut tally = |null: Result<f64>| -> Result<()> {
        match null {
            Ok(v) => {
                valid += 1;
                if v.abs() >= threshold {
                    exceed += 1;
                }
                Ok(())
            }
            Err(EnsembleError::ComputationError(_)) => Ok(()),
            Err(e) => Err(e),
        }
    };
    for _ in 0..number {
        let sy = surrogate_y.generate(rng);
        tally(statistic.compute(x, &sy))?;
        let sx = surrogate_x.generate(rng);
        tally(statistic.compute(&sx, y))?;
    }

    let skipped = 2 * number - valid;
    if valid == 0 {
        return Err(EnsembleError::ComputationError(format!(
            "{} is undefined for every surrogate draw",
            statistic
        )));
    }
    if skipped > 0 {
        warn!(skipped, valid, "skipped surrogate draws with an undefined statistic");
    }
    Ok(exceed as f64 / valid as f64)
}

/// p-value of `observed` (the statistic of `x` and `y`) under the configured method.
pub fn p_value<R: Rng + ?Sized>(
    config: &CorrelationConfig,
    x: &[f64],
    y: &[f64],
    observed: f64,
    rng: &mut R,
) -> Result<f64> {
    match config.method {
        SignificanceMethod::TTest => {
            let n_eff = effective_sample_size(x, y)?;
            config.statistic.p_value(observed, n_eff)
        }
        SignificanceMethod::BuiltIn => config.statistic.p_value(observed, x.len() as f64),
        SignificanceMethod::Ar1Sim => surrogate_p_value(
            config.statistic,
            x,
            y,
            observed,
            config.number,
            &Surrogate::ar1(x)?,
            &Surrogate::ar1(y)?,
            rng,
        ),
        SignificanceMethod::PhaseRan => surrogate_p_value(
            config.statistic,
            x,
            y,
            observed,
            config.number,
            &Surrogate::phase_randomized(x)?,
            &Surrogate::phase_randomized(y)?,
            rng,
        ),
    }
}
