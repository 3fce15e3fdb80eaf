//! Quantile curves across ensemble members.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ArrayExport, EnsembleSeries, Table};
use crate::error::{EnsembleError, Result};
use crate::series::Series;
use crate::utils;

/// Quantiles computed when none are requested explicitly.
pub const DEFAULT_QUANTILES: [f64; 3] = [0.05, 0.5, 0.95];

/// Axis along which ensemble members vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Members differ in their time coordinates (age ensembles)
    Time,
    /// Members differ in their values (paleo ensembles)
    Value,
}

impl Default for Axis {
    fn default() -> Self {
        Axis::Value
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Time => write!(f, "time"),
            Axis::Value => write!(f, "value"),
        }
    }
}

impl FromStr for Axis {
    type Err = EnsembleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "time" => Ok(Axis::Time),
            "value" => Ok(Axis::Value),
            other => Err(EnsembleError::InvalidArgument(format!(
                "unknown axis '{}', expected 'time' or 'value'",
                other
            ))),
        }
    }
}

/// Quantile curves derived from an ensemble.
///
/// Each curve is a [`Series`] labelled with its quantile, all aligned on a
/// common index, so the curves export like any other ensemble.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantileEnsemble {
    axis: Axis,
    quantiles: Vec<f64>,
    curves: EnsembleSeries,
}

impl QuantileEnsemble {
    /// Axis the quantiles were taken along.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    /// The quantile curves as an ensemble, in the order of [`Self::quantiles`].
    pub fn curves(&self) -> &EnsembleSeries {
        &self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// The curve for quantile `q`, if it was computed.
    pub fn get(&self, q: f64) -> Option<&Series> {
        self.quantiles
            .iter()
            .position(|&v| (v - q).abs() < 1e-12)
            .and_then(|i| self.curves.get(i))
    }

    pub fn to_dataframe(&self, axis: Axis) -> Result<Table> {
        self.curves.to_dataframe(axis)
    }

    pub fn to_array(&self, axis: Axis, labels: bool) -> Result<ArrayExport> {
        self.curves.to_array(axis, labels)
    }
}

fn quantile_label(q: f64) -> String {
    format!("{}", q)
}

fn validate_quantiles(qs: &[f64]) -> Result<()> {
    if qs.is_empty() {
        return Err(EnsembleError::InvalidArgument(
            "at least one quantile must be requested".to_string(),
        ));
    }
    if let Some(q) = qs.iter().find(|q| !(0.0..=1.0).contains(*q)) {
        return Err(EnsembleError::InvalidArgument(format!(
            "quantile {} is outside [0, 1]",
            q
        )));
    }
    Ok(())
}

/// Per-index quantiles across the rows of `columns` (one vector per member).
fn quantiles_per_index(columns: &[&[f64]], qs: &[f64]) -> Vec<Vec<f64>> {
    let n_points = columns[0].len();
    let mut curves = vec![Vec::with_capacity(n_points); qs.len()];
    let mut buffer = Vec::with_capacity(columns.len());
    for i in 0..n_points {
        buffer.clear();
        buffer.extend(columns.iter().map(|c| c[i]));
        let sorted = utils::sorted(&buffer);
        for (curve, &q) in curves.iter_mut().zip(qs) {
            curve.push(utils::quantile_sorted(&sorted, q));
        }
    }
    curves
}

impl EnsembleSeries {
    /// Quantile curves at [`DEFAULT_QUANTILES`] along `axis`.
    pub fn quantiles(&self, axis: Axis) -> Result<QuantileEnsemble> {
        self.quantiles_with(&DEFAULT_QUANTILES, axis)
    }

    /// Quantile curves at the requested quantiles along `axis`.
    ///
    /// * `Axis::Value` aligns members with [`EnsembleSeries::common_time`]
    ///   and takes quantiles of member values at each grid point.
    /// * `Axis::Time` requires members of equal length and takes quantiles
    ///   of member times at each index; values come from the first member.
    pub fn quantiles_with(&self, qs: &[f64], axis: Axis) -> Result<QuantileEnsemble> {
        self.ensure_not_empty("quantiles")?;
        validate_quantiles(qs)?;

        let curves = match axis {
            Axis::Value => {
                let aligned = self.common_time()?;
                let grid = aligned.series_list[0].time().to_vec();
                let columns: Vec<&[f64]> = aligned.iter().map(Series::value).collect();
                quantiles_per_index(&columns, qs)
                    .into_iter()
                    .zip(qs)
                    .map(|(curve, &q)| {
                        Ok(Series::new(grid.clone(), curve)?.with_label(quantile_label(q)))
                    })
                    .collect::<Result<Vec<_>>>()?
            }
            Axis::Time => {
                let n_points = self.series_list[0].len();
                if let Some((i, s)) = self
                    .iter()
                    .enumerate()
                    .find(|(_, s)| s.len() != n_points)
                {
                    return Err(EnsembleError::DimensionMismatch(format!(
                        "time quantiles need members of equal length: member 0 has {} points, member {} has {}",
                        n_points,
                        i,
                        s.len()
                    )));
                }
                let values = self.series_list[0].value().to_vec();
                let columns: Vec<&[f64]> = self.iter().map(Series::time).collect();
                quantiles_per_index(&columns, qs)
                    .into_iter()
                    .zip(qs)
                    .map(|(curve, &q)| {
                        Ok(Series::new(curve, values.clone())?.with_label(quantile_label(q)))
                    })
                    .collect::<Result<Vec<_>>>()?
            }
        };

        debug!(
            members = self.len(),
            quantiles = qs.len(),
            axis = %axis,
            "computed ensemble quantiles"
        );

        Ok(QuantileEnsemble {
            axis,
            quantiles: qs.to_vec(),
            curves: EnsembleSeries::new(curves).with_label(format!("{} quantiles", axis)),
        })
    }
}
