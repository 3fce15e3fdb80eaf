//! Plot layouts for ensembles.
//!
//! Nothing here draws. Each entry point computes the data a renderer needs
//! and returns it as a serializable layout:
//!
//! - [`EnsembleSeries::histplot`]: density histogram of all member values
//! - [`EnsembleSeries::plot_envelope`]: median curve and two shaded bands
//! - [`EnsembleSeries::plot_traces`]: a random subset of members to draw

use rand::seq::index;
use serde::Serialize;
use tracing::debug;

use crate::ensemble::{Axis, EnsembleSeries};
use crate::error::{EnsembleError, Result};
use crate::series::Series;
use crate::utils;

/// Density histogram of pooled member values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges, one more than the number of bins
    pub bin_edges: Vec<f64>,
    /// Number of values per bin
    pub counts: Vec<usize>,
    /// Counts normalized so that the histogram integrates to one
    pub density: Vec<f64>,
}

/// Quantile envelope of an ensemble.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub time: Vec<f64>,
    pub median: Vec<f64>,
    /// Inner band (lower, upper)
    pub inner: (Vec<f64>, Vec<f64>),
    /// Outer band (lower, upper)
    pub outer: (Vec<f64>, Vec<f64>),
    /// Quantiles used: outer low, inner low, median, inner high, outer high
    pub quantiles: [f64; 5],
    pub curve_lw: f64,
    pub shade_alpha: f64,
}

/// Options for [`EnsembleSeries::plot_envelope`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeOptions {
    /// Default: [0.025, 0.25, 0.5, 0.75, 0.975]
    pub quantiles: [f64; 5],
    /// Default: 2.0
    pub curve_lw: f64,
    /// Default: 0.3
    pub shade_alpha: f64,
}

impl Default for EnvelopeOptions {
    fn default() -> Self {
        Self {
            quantiles: [0.025, 0.25, 0.5, 0.75, 0.975],
            curve_lw: 2.0,
            shade_alpha: 0.3,
        }
    }
}

impl EnvelopeOptions {
    pub fn with_curve_lw(mut self, curve_lw: f64) -> Self {
        self.curve_lw = curve_lw;
        self
    }
}

/// Members selected for a trace plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Traces {
    /// Indices of the selected members, in ascending order
    pub members: Vec<usize>,
    pub series: Vec<Series>,
    /// Line opacity
    pub alpha: f64,
    /// Legend label, taken from the ensemble label
    pub label: Option<String>,
}

impl EnsembleSeries {
    /// Density histogram of every member value.
    ///
    /// `bins` defaults to the square root of the number of values.
    pub fn histplot(&self, bins: Option<usize>) -> Result<Histogram> {
        self.ensure_not_empty("histplot")?;
        let values: Vec<f64> = self.iter().flat_map(|s| s.value().iter().copied()).collect();
        let n_bins = bins.unwrap_or_else(|| (values.len() as f64).sqrt().ceil() as usize);
        if n_bins == 0 {
            return Err(EnsembleError::InvalidArgument(
                "histogram needs at least one bin".to_string(),
            ));
        }

        let sorted = utils::sorted(&values);
        let (mut lo, mut hi) = (sorted[0], sorted[sorted.len() - 1]);
        if hi == lo {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / n_bins as f64;
        let bin_edges: Vec<f64> = (0..=n_bins).map(|k| lo + k as f64 * width).collect();

        let mut counts = vec![0usize; n_bins];
        for &v in &values {
            let k = (((v - lo) / width) as usize).min(n_bins - 1);
            counts[k] += 1;
        }
        let total = values.len() as f64;
        let density = counts.iter().map(|&c| c as f64 / (total * width)).collect();

        debug!(values = values.len(), bins = n_bins, "computed ensemble histogram");
        Ok(Histogram {
            bin_edges,
            counts,
            density,
        })
    }

    /// Median and shaded quantile bands on the ensemble's common time grid.
    pub fn plot_envelope(&self, options: &EnvelopeOptions) -> Result<Envelope> {
        let qs = self.quantiles_with(&options.quantiles, Axis::Value)?;
        let curves = qs.curves();
        let curve = |i: usize| -> Result<Vec<f64>> {
            curves
                .get(i)
                .map(|s| s.value().to_vec())
                .ok_or_else(|| EnsembleError::ComputationError(format!("missing quantile curve {}", i)))
        };
        let time = curves
            .get(0)
            .map(|s| s.time().to_vec())
            .unwrap_or_default();

        Ok(Envelope {
            time,
            median: curve(2)?,
            inner: (curve(1)?, curve(3)?),
            outer: (curve(0)?, curve(4)?),
            quantiles: options.quantiles,
            curve_lw: options.curve_lw,
            shade_alpha: options.shade_alpha,
        })
    }

    /// Choose `num_traces` members at random to draw with opacity `alpha`.
    ///
    /// `num_traces` is capped at the ensemble size. A `seed` makes the
    /// selection reproducible.
    pub fn plot_traces(&self, num_traces: usize, alpha: f64, seed: Option<u64>) -> Result<Traces> {
        self.ensure_not_empty("plot_traces")?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(EnsembleError::InvalidArgument(format!(
                "trace opacity must lie in [0, 1], got {}",
                alpha
            )));
        }
        let amount = num_traces.min(self.len());
        let mut rng = utils::member_rng(utils::resolve_seed(seed), 0);
        let mut members = index::sample(&mut rng, self.len(), amount).into_vec();
        members.sort_unstable();

        Ok(Traces {
            series: members.iter().map(|&i| self.series_list()[i].clone()).collect(),
            members,
            alpha,
            label: self.label().map(str::to_string),
        })
    }
}
