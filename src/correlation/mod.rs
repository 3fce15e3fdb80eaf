//! # Ensemble Correlation
//!
//! This module correlates every member of an ensemble with a target and
//! tests each correlation for significance. It includes:
//!
//! - five association statistics (Pearson, Spearman, point-biserial,
//!   Kendall's tau-b, weighted tau)
//! - four significance methods (effective-sample-size t-test, the
//!   statistic's analytic p-value, AR(1) surrogates, phase-randomized
//!   surrogates)
//! - false discovery rate control across the ensemble
//!
//! Source members are paired with the target positionally. When the target
//! is an ensemble with `m` members, source member `i` is paired with target
//! member `i mod m`, so the result always has one entry per source member.
//! Each pair is first aligned on a common, evenly spaced time grid over the
//! overlap of the two series.

pub mod config;
pub mod fdr;
pub mod significance;
pub mod statistic;
pub mod surrogates;

pub use config::{CorrelationConfig, SignificanceMethod, Statistic};
pub use fdr::benjamini_hochberg;
pub use surrogates::{Ar1Model, PhaseRandomizer, Surrogate};

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::ensemble::EnsembleSeries;
use crate::error::{EnsembleError, Result};
use crate::series::{self, Series};
use crate::utils;

/// What the members of an ensemble are correlated with.
#[derive(Debug, Clone, Copy)]
pub enum CorrelationTarget<'a> {
    /// The first member of the source ensemble
    FirstMember,
    /// The same series for every member
    Series(&'a Series),
    /// Another ensemble, paired cyclically by index
    Ensemble(&'a EnsembleSeries),
}

impl<'a> From<&'a Series> for CorrelationTarget<'a> {
    fn from(series: &'a Series) -> Self {
        CorrelationTarget::Series(series)
    }
}

impl<'a> From<&'a EnsembleSeries> for CorrelationTarget<'a> {
    fn from(ensemble: &'a EnsembleSeries) -> Self {
        CorrelationTarget::Ensemble(ensemble)
    }
}

/// Outcome for a single pair of series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PairCorrelation {
    /// Value of the association statistic
    pub r: f64,
    /// p-value under the configured significance method
    pub p: f64,
    /// Whether p < alpha
    pub signif: bool,
}

/// Per-member correlation results, in source-member order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// Statistic value per member
    pub r: Vec<f64>,
    /// p-value per member
    pub p: Vec<f64>,
    /// Significance per member at `alpha`
    pub signif: Vec<bool>,
    /// Significance per member after Benjamini–Hochberg control at `alpha`
    pub signif_fdr: Vec<bool>,
    /// Significance level used
    pub alpha: f64,
    /// Statistic used
    pub statistic: Statistic,
    /// Significance method used
    pub method: SignificanceMethod,
}

impl CorrelationResult {
    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// Result for member `index`.
    pub fn member(&self, index: usize) -> Option<PairCorrelation> {
        Some(PairCorrelation {
            r: *self.r.get(index)?,
            p: *self.p.get(index)?,
            signif: *self.signif.get(index)?,
        })
    }

    /// Returns true if every member is significant.
    pub fn all_significant(&self) -> bool {
        self.signif.iter().all(|&s| s)
    }

    /// Number of significant members.
    pub fn n_significant(&self) -> usize {
        self.signif.iter().filter(|&&s| s).count()
    }

    /// Serialize the result as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Align two series on a common grid over their overlap, after applying the
/// optional timespan.
fn align_pair(x: &Series, y: &Series, timespan: Option<(f64, f64)>) -> Result<(Series, Series)> {
    let (x, y) = match timespan {
        Some((start, end)) => (x.slice(start, end)?, y.slice(start, end)?),
        None => (x.clone(), y.clone()),
    };
    let grid = series::common_grid([&x, &y])?;
    if grid.len() < 3 {
        return Err(EnsembleError::MismatchedTimeGrid(format!(
            "series overlap on only {} aligned point(s) between {} and {}",
            grid.len(),
            grid[0],
            grid[grid.len() - 1]
        )));
    }
    Ok((x.interp(&grid)?, y.interp(&grid)?))
}

/// Correlate one pair of series and test the correlation.
fn correlate_pair<R: Rng + ?Sized>(
    x: &Series,
    y: &Series,
    config: &CorrelationConfig,
    rng: &mut R,
) -> Result<PairCorrelation> {
    let (x, y) = align_pair(x, y, config.timespan)?;
    let r = config.statistic.compute(x.value(), y.value())?;
    let p = significance::p_value(config, x.value(), y.value(), r, rng)?;
    Ok(PairCorrelation {
        r,
        p,
        signif: p < config.alpha,
    })
}

/// Correlation engine for ensembles.
#[derive(Debug, Clone, Default)]
pub struct EnsembleCorrelation {
    config: CorrelationConfig,
}

impl EnsembleCorrelation {
    pub fn new(config: CorrelationConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Correlate two individual series.
    pub fn correlate_series(&self, x: &Series, y: &Series) -> Result<PairCorrelation> {
        self.config.validate()?;
        let mut rng = utils::member_rng(utils::resolve_seed(self.config.seed), 0);
        correlate_pair(x, y, &self.config, &mut rng)
    }

    /// Correlate every member of `source` with `target`.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` for an invalid configuration (checked before any work)
    /// * `EmptyEnsemble` if the source or a target ensemble has no members
    /// * `MismatchedTimeGrid` if a pair does not overlap on at least 3 points
    /// * `ComputationError` if a statistic is undefined (e.g. a constant series)
    pub fn correlate<'a>(
        &self,
        source: &'a EnsembleSeries,
        target: CorrelationTarget<'a>,
    ) -> Result<CorrelationResult> {
        let config = &self.config;
        config.validate()?;
        source.ensure_not_empty("correlation")?;

        let partner = |i: usize| -> &'a Series {
            match target {
                CorrelationTarget::FirstMember => &source.series_list()[0],
                CorrelationTarget::Series(s) => s,
                CorrelationTarget::Ensemble(e) => &e.series_list()[i % e.len()],
            }
        };
        if let CorrelationTarget::Ensemble(e) = target {
            e.ensure_not_empty("correlation target")?;
            if e.len() != source.len() {
                debug!(
                    source = source.len(),
                    target = e.len(),
                    "ensemble sizes differ, pairing target members cyclically"
                );
            }
        }

        let base_seed = utils::resolve_seed(config.seed);
        let pairs = utils::map_members_parallel(source.len(), |i| {
            let mut rng = utils::member_rng(base_seed, i);
            correlate_pair(&source.series_list()[i], partner(i), config, &mut rng)
        })?;

        let r: Vec<f64> = pairs.iter().map(|p| p.r).collect();
        let p: Vec<f64> = pairs.iter().map(|p| p.p).collect();
        let signif: Vec<bool> = pairs.iter().map(|p| p.signif).collect();
        let signif_fdr = fdr::benjamini_hochberg(&p, config.alpha);

        debug!(
            members = source.len(),
            statistic = %config.statistic,
            method = %config.method,
            significant = signif.iter().filter(|&&s| s).count(),
            "ensemble correlation complete"
        );

        Ok(CorrelationResult {
            r,
            p,
            signif,
            signif_fdr,
            alpha: config.alpha,
            statistic: config.statistic,
            method: config.method,
        })
    }
}

impl EnsembleSeries {
    /// Correlate every member with `target` using `config`.
    ///
    /// See [`EnsembleCorrelation::correlate`].
    pub fn correlation<'a>(
        &'a self,
        target: impl Into<CorrelationTarget<'a>>,
        config: &CorrelationConfig,
    ) -> Result<CorrelationResult> {
        EnsembleCorrelation::new(config.clone()).correlate(self, target.into())
    }
}

impl Series {
    /// Correlate this series with `target` using `config`.
    pub fn correlation(&self, target: &Series, config: &CorrelationConfig) -> Result<PairCorrelation> {
        EnsembleCorrelation::new(config.clone()).correlate_series(self, target)
    }
}
