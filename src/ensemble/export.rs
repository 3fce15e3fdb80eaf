//! Tabular and array views of an ensemble.

use ndarray::Array2;
use serde::Serialize;

use super::{Axis, EnsembleSeries};
use crate::error::{EnsembleError, Result};

/// A simple column-oriented table: a row index and one named column per
/// ensemble member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    index: Vec<usize>,
    columns: Vec<String>,
    data: Vec<Vec<f64>>,
}

impl Table {
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Values of the column called `name`.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.data[i].as_slice())
    }

    /// Value at (`row`, `column`) by position.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.data.get(column).and_then(|c| c.get(row)).copied()
    }

    /// Serialize the table as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Result of [`EnsembleSeries::to_array`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExport {
    /// Values shaped `(n_points, n_members)`
    pub values: Array2<f64>,
    /// Member identifiers, present when labels were requested
    pub headers: Option<Vec<String>>,
}

impl EnsembleSeries {
    /// Member coordinates along `axis`, checking that all members have the
    /// same length.
    fn columns_along(&self, axis: Axis) -> Result<Vec<&[f64]>> {
        self.ensure_not_empty("export")?;
        let n_points = self.series_list[0].len();
        let columns: Vec<&[f64]> = self
            .iter()
            .map(|s| match axis {
                Axis::Time => s.time(),
                Axis::Value => s.value(),
            })
            .collect();
        if let Some(i) = columns.iter().position(|c| c.len() != n_points) {
            return Err(EnsembleError::DimensionMismatch(format!(
                "export needs members of equal length: member 0 has {} points, member {} has {}",
                n_points,
                i,
                columns[i].len()
            )));
        }
        Ok(columns)
    }

    /// Tabular view of the ensemble along `axis`, one column per member.
    pub fn to_dataframe(&self, axis: Axis) -> Result<Table> {
        let columns = self.columns_along(axis)?;
        Ok(Table {
            index: (0..columns[0].len()).collect(),
            columns: self.member_labels(),
            data: columns.into_iter().map(<[f64]>::to_vec).collect(),
        })
    }

    /// Array view of the ensemble along `axis`, shaped `(n_points, n_members)`.
    ///
    /// When `labels` is true the member identifiers are returned as headers.
    pub fn to_array(&self, axis: Axis, labels: bool) -> Result<ArrayExport> {
        let columns = self.columns_along(axis)?;
        let values = Array2::from_shape_fn((columns[0].len(), columns.len()), |(i, j)| {
            columns[j][i]
        });
        Ok(ArrayExport {
            values,
            headers: labels.then(|| self.member_labels()),
        })
    }
}
