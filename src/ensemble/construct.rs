//! Construction of ensembles from age- and paleo-ensemble arrays.
//!
//! Both constructors map each column of a 2-D array (rows = samples,
//! columns = realizations) to one ensemble member. Depth vectors, when
//! given, let the array live on a different depth axis than the source
//! series; the missing coordinate is then linearly interpolated in depth.

use ndarray::{Array2, ArrayView1};
use tracing::debug;

use super::EnsembleSeries;
use crate::error::{EnsembleError, Result};
use crate::series::Series;
use crate::utils::interp;

/// Depth coordinates must come as a pair.
fn depth_pair<'a>(
    first: Option<&'a [f64]>,
    first_name: &str,
    age_depth: Option<&'a [f64]>,
) -> Result<Option<(&'a [f64], &'a [f64])>> {
    match (first, age_depth) {
        (Some(d), Some(a)) => Ok(Some((d, a))),
        (None, None) => Ok(None),
        _ => Err(EnsembleError::InvalidArgument(format!(
            "{} and age_depth must be provided together",
            first_name
        ))),
    }
}

fn check_len(name: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(EnsembleError::DimensionMismatch(format!(
            "{} has length {} but {} was expected",
            name, actual, expected
        )));
    }
    Ok(())
}

fn check_columns(name: &str, array: &Array2<f64>) -> Result<()> {
    if array.ncols() == 0 {
        return Err(EnsembleError::EmptyEnsemble(format!(
            "{} has no columns",
            name
        )));
    }
    Ok(())
}

fn labelled(series: Series, label: Option<&str>) -> Series {
    match label {
        Some(l) => series.with_label(l),
        None => series,
    }
}

impl EnsembleSeries {
    /// Build an ensemble whose members share `series`' values and take their
    /// time axis from the columns of `age_array`.
    ///
    /// # Arguments
    ///
    /// * `series` - The source series supplying the values
    /// * `age_array` - Age realizations, one column per member
    /// * `value_depth` - Depth of each value in `series`
    /// * `age_depth` - Depth of each row in `age_array`
    ///
    /// Without depths the row count of `age_array` must equal the series
    /// length. With depths, every age column is interpolated from
    /// `age_depth` onto `value_depth`.
    pub fn from_age_ensemble_array(
        series: &Series,
        age_array: &Array2<f64>,
        value_depth: Option<&[f64]>,
        age_depth: Option<&[f64]>,
    ) -> Result<Self> {
        check_columns("age_array", age_array)?;
        let depths = depth_pair(value_depth, "value_depth", age_depth)?;

        let n_rows = age_array.nrows();
        let ages_for = |column: ArrayView1<f64>| -> Vec<f64> {
            match depths {
                Some((value_depth, age_depth)) => {
                    interp::interp_onto(age_depth, &column.to_vec(), value_depth)
                }
                None => column.to_vec(),
            }
        };

        match depths {
            Some((value_depth, age_depth)) => {
                check_len("value_depth", value_depth.len(), series.len())?;
                check_len("age_depth", age_depth.len(), n_rows)?;
                interp::ensure_monotonic("age_depth", age_depth)?;
            }
            None => check_len("age_array rows", n_rows, series.len())?,
        }

        let series_list = age_array
            .columns()
            .into_iter()
            .map(|column| {
                let member = Series::new(ages_for(column), series.value().to_vec())?;
                Ok(labelled(member, series.label()))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            members = series_list.len(),
            interpolated = depths.is_some(),
            "built ensemble from age ensemble array"
        );
        Ok(Self::new(series_list))
    }

    /// Build an ensemble whose members share `series`' time axis and take
    /// their values from the columns of `paleo_array`.
    ///
    /// # Arguments
    ///
    /// * `series` - The source series supplying the time axis
    /// * `paleo_array` - Value realizations, one column per member
    /// * `paleo_depth` - Depth of each row in `paleo_array`
    /// * `age_depth` - Depth of each time point in `series`
    ///
    /// Without depths the row count of `paleo_array` must equal the series
    /// length. With depths, the series' time axis is interpolated from
    /// `age_depth` onto `paleo_depth`.
    pub fn from_paleo_ensemble_array(
        series: &Series,
        paleo_array: &Array2<f64>,
        paleo_depth: Option<&[f64]>,
        age_depth: Option<&[f64]>,
    ) -> Result<Self> {
        check_columns("paleo_array", paleo_array)?;
        let depths = depth_pair(paleo_depth, "paleo_depth", age_depth)?;

        let n_rows = paleo_array.nrows();
        let time = match depths {
            Some((paleo_depth, age_depth)) => {
                check_len("paleo_depth", paleo_depth.len(), n_rows)?;
                check_len("age_depth", age_depth.len(), series.len())?;
                interp::ensure_monotonic("age_depth", age_depth)?;
                interp::interp_onto(age_depth, series.time(), paleo_depth)
            }
            None => {
                check_len("paleo_array rows", n_rows, series.len())?;
                series.time().to_vec()
            }
        };

        let series_list = paleo_array
            .columns()
            .into_iter()
            .map(|column| {
                let member = Series::new(time.clone(), column.to_vec())?;
                Ok(labelled(member, series.label()))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            members = series_list.len(),
            interpolated = depths.is_some(),
            "built ensemble from paleo ensemble array"
        );
        Ok(Self::new(series_list))
    }
}
