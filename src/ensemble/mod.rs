//! # Ensemble Series
//!
//! An [`EnsembleSeries`] is an ordered collection of [`Series`] that are
//! alternative realizations of the same record, typically produced by an
//! age-model ensemble or a proxy-value ensemble. Member order matters: the
//! correlation engine pairs members positionally.
//!
//! The submodules provide:
//!
//! - construction from age- and paleo-ensemble arrays ([`construct`])
//! - quantile curves across members ([`quantiles`])
//! - tabular and array exports ([`export`])

pub mod construct;
pub mod export;
pub mod quantiles;

pub use export::{ArrayExport, Table};
pub use quantiles::{Axis, QuantileEnsemble, DEFAULT_QUANTILES};

use serde::Serialize;
use tracing::debug;

use crate::error::{EnsembleError, Result};
use crate::series::{self, Series};

/// An ordered collection of series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleSeries {
    series_list: Vec<Series>,
    label: Option<String>,
}

impl EnsembleSeries {
    /// Create an ensemble from a list of series, keeping their order.
    ///
    /// An empty list is accepted; operations that need members report
    /// `EmptyEnsemble` instead.
    pub fn new(series_list: Vec<Series>) -> Self {
        Self {
            series_list,
            label: None,
        }
    }

    /// Attach a label to the ensemble.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn series_list(&self) -> &[Series] {
        &self.series_list
    }

    pub fn len(&self) -> usize {
        self.series_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series_list.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Series> {
        self.series_list.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series_list.iter()
    }

    /// Return an error if the ensemble has no members.
    pub(crate) fn ensure_not_empty(&self, context: &str) -> Result<()> {
        if self.is_empty() {
            return Err(EnsembleError::EmptyEnsemble(format!(
                "{} requires at least one member",
                context
            )));
        }
        Ok(())
    }

    /// Standardize every member.
    pub fn standardize(&self) -> Result<Self> {
        let series_list = self
            .series_list
            .iter()
            .map(Series::standardize)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            series_list,
            label: self.label.clone(),
        })
    }

    /// Restrict every member to the time window `[start, end]`.
    pub fn slice(&self, start: f64, end: f64) -> Result<Self> {
        let series_list = self
            .series_list
            .iter()
            .map(|s| s.slice(start, end))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            series_list,
            label: self.label.clone(),
        })
    }

    /// Align every member on one evenly spaced time grid.
    ///
    /// The grid spans the intersection of the member time spans, and its
    /// step is the largest member mean spacing.
    ///
    /// # Errors
    ///
    /// * `EmptyEnsemble` if there are no members
    /// * `MismatchedTimeGrid` if the member spans do not overlap
    pub fn common_time(&self) -> Result<Self> {
        self.ensure_not_empty("common_time")?;
        let grid = series::common_grid(self.series_list.iter())?;
        debug!(
            members = self.len(),
            points = grid.len(),
            start = grid[0],
            "aligned ensemble on common time grid"
        );
        let series_list = self
            .series_list
            .iter()
            .map(|s| s.interp(&grid))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            series_list,
            label: self.label.clone(),
        })
    }

    /// Member labels, falling back to the member index when unlabelled.
    pub fn member_labels(&self) -> Vec<String> {
        self.series_list
            .iter()
            .enumerate()
            .map(|(i, s)| s.label().map_or_else(|| i.to_string(), str::to_string))
            .collect()
    }
}

impl From<Vec<Series>> for EnsembleSeries {
    fn from(series_list: Vec<Series>) -> Self {
        Self::new(series_list)
    }
}

impl<'a> IntoIterator for &'a EnsembleSeries {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series_list.iter()
    }
}
