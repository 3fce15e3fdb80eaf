//! A single time series: paired time and value vectors.
//!
//! A [`Series`] is immutable once built. Construction validates the input
//! and sorts the pairs by ascending time, so every other routine in the crate
//! may assume a sorted, finite, non-empty time axis.

use ndarray::Array1;
use serde::Serialize;

use crate::error::{EnsembleError, Result};
use crate::utils::{self, interp};

/// A time series with an optional label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    time: Vec<f64>,
    value: Vec<f64>,
    label: Option<String>,
}

impl Series {
    /// Create a new series from time and value vectors.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` if the vectors differ in length
    /// * `InvalidInput` if the series is empty or contains non-finite entries
    pub fn new(time: Vec<f64>, value: Vec<f64>) -> Result<Self> {
        if time.len() != value.len() {
            return Err(EnsembleError::DimensionMismatch(format!(
                "time has {} points but value has {}",
                time.len(),
                value.len()
            )));
        }
        if time.is_empty() {
            return Err(EnsembleError::InvalidInput(
                "a series needs at least one point".to_string(),
            ));
        }
        if let Some(i) = time
            .iter()
            .zip(value.iter())
            .position(|(t, v)| !t.is_finite() || !v.is_finite())
        {
            return Err(EnsembleError::InvalidInput(format!(
                "non-finite entry at index {}",
                i
            )));
        }

        let (time, value) = if time.windows(2).all(|w| w[0] <= w[1]) {
            (time, value)
        } else {
            let mut pairs: Vec<(f64, f64)> = time.into_iter().zip(value).collect();
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
            pairs.into_iter().unzip()
        };

        Ok(Self {
            time,
            value,
            label: None,
        })
    }

    /// Create a new series from `ndarray` vectors.
    pub fn from_arrays(time: &Array1<f64>, value: &Array1<f64>) -> Result<Self> {
        Self::new(time.to_vec(), value.to_vec())
    }

    /// Attach a label to the series.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// First and last time coordinates.
    pub fn span(&self) -> (f64, f64) {
        (self.time[0], self.time[self.time.len() - 1])
    }

    /// Mean spacing between consecutive time points (0 for a single point).
    pub fn mean_spacing(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }
        let (start, stop) = self.span();
        (stop - start) / (self.len() - 1) as f64
    }

    /// Return a copy with zero mean and unit sample standard deviation.
    ///
    /// # Errors
    ///
    /// * `ComputationError` if the series is constant or has a single point
    pub fn standardize(&self) -> Result<Self> {
        let m = utils::mean(&self.value);
        let s = utils::std_dev(&self.value, 1);
        if !s.is_finite() || s < utils::stats::VARIANCE_FLOOR {
            return Err(EnsembleError::ComputationError(
                "cannot standardize a series with zero variance".to_string(),
            ));
        }
        Ok(Self {
            time: self.time.clone(),
            value: self.value.iter().map(|&v| (v - m) / s).collect(),
            label: self.label.clone(),
        })
    }

    /// Keep the points with `start <= time <= end`.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `start > end`
    /// * `InvalidInput` if no point falls inside the window
    pub fn slice(&self, start: f64, end: f64) -> Result<Self> {
        if start > end {
            return Err(EnsembleError::InvalidArgument(format!(
                "timespan start {} is after end {}",
                start, end
            )));
        }
        let lo = self.time.partition_point(|&t| t < start);
        let hi = self.time.partition_point(|&t| t <= end);
        if lo >= hi {
            return Err(EnsembleError::InvalidInput(format!(
                "no points within timespan [{}, {}]",
                start, end
            )));
        }
        Ok(Self {
            time: self.time[lo..hi].to_vec(),
            value: self.value[lo..hi].to_vec(),
            label: self.label.clone(),
        })
    }

    /// Linearly interpolate the series onto `grid`.
    ///
    /// Every grid point must lie within the series' time span.
    pub fn interp(&self, grid: &[f64]) -> Result<Self> {
        let (start, stop) = self.span();
        let tol = 1e-9 * (stop - start).abs().max(1.0);
        if let Some(&t) = grid.iter().find(|&&t| t < start - tol || t > stop + tol) {
            return Err(EnsembleError::MismatchedTimeGrid(format!(
                "grid point {} lies outside the series span [{}, {}]",
                t, start, stop
            )));
        }
        let value = interp::interp_onto(&self.time, &self.value, grid);
        let mut out = Self::new(grid.to_vec(), value)?;
        out.label = self.label.clone();
        Ok(out)
    }
}

/// Evenly spaced grid covering the intersection of the given series' spans.
///
/// The step is the largest mean spacing among the inputs.
pub(crate) fn common_grid<'a, I>(series: I) -> Result<Vec<f64>>
where
    I: IntoIterator<Item = &'a Series>,
{
    let mut start = f64::NEG_INFINITY;
    let mut stop = f64::INFINITY;
    let mut step: f64 = 0.0;
    let mut count = 0usize;
    for s in series {
        let (a, b) = s.span();
        start = start.max(a);
        stop = stop.min(b);
        step = step.max(s.mean_spacing());
        count += 1;
    }
    if count == 0 {
        return Err(EnsembleError::EmptyEnsemble(
            "no series to align".to_string(),
        ));
    }
    if stop < start {
        return Err(EnsembleError::MismatchedTimeGrid(format!(
            "time spans do not overlap (latest start {} > earliest end {})",
            start, stop
        )));
    }
    if step == 0.0 {
        return Ok(vec![start]);
    }
    interp::even_grid(start, stop, step)
}
