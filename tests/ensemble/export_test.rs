use ensemble_ts::{Axis, EnsembleError, EnsembleSeries, Series};

use crate::test_helpers::{age_ensemble, gen_ts, noisy_ensemble};

#[test]
fn test_to_dataframe_along_both_axes() {
    let ens = age_ensemble(5, 1);
    for axis in [Axis::Time, Axis::Value] {
        let table = ens.to_dataframe(axis).unwrap();
        assert_eq!(table.n_rows(), 200);
        assert_eq!(table.n_columns(), 5);
        assert_eq!(table.index()[199], 199);
        assert_eq!(table.columns(), &["0", "1", "2", "3", "4"]);
    }

    let by_time = ens.to_dataframe(Axis::Time).unwrap();
    assert_eq!(by_time.column("3").unwrap(), ens.get(3).unwrap().time());
    let by_value = ens.to_dataframe(Axis::Value).unwrap();
    assert_eq!(by_value.get(10, 2), Some(ens.get(2).unwrap().value()[10]));
}

#[test]
fn test_to_array_matches_dataframe() {
    let ens = noisy_ensemble(&gen_ts(1.0, 40, 2), 4, 3);
    for axis in [Axis::Time, Axis::Value] {
        let table = ens.to_dataframe(axis).unwrap();

        let labelled = ens.to_array(axis, true).unwrap();
        assert_eq!(labelled.values.dim(), (40, 4));
        assert_eq!(labelled.headers.as_deref(), Some(table.columns()));

        let bare = ens.to_array(axis, false).unwrap();
        assert!(bare.headers.is_none());
        for (j, name) in table.columns().iter().enumerate() {
            let column = table.column(name).unwrap();
            for (i, &v) in column.iter().enumerate() {
                assert_eq!(bare.values[[i, j]], v);
            }
        }
    }
}

#[test]
fn test_labelled_members_name_columns() {
    let ens = EnsembleSeries::new(vec![
        Series::new(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap().with_label("a"),
        Series::new(vec![0.0, 1.0], vec![3.0, 4.0]).unwrap(),
    ]);
    let table = ens.to_dataframe(Axis::Value).unwrap();
    assert_eq!(table.columns(), &["a", "1"]);
    let json = table.to_json().unwrap();
    assert!(json.contains("\"columns\":[\"a\",\"1\"]"));
}

#[test]
fn test_export_rejects_ragged_members() {
    let ens = EnsembleSeries::new(vec![
        Series::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap(),
        Series::new(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap(),
    ]);
    assert!(matches!(
        ens.to_dataframe(Axis::Value),
        Err(EnsembleError::DimensionMismatch(_))
    ));
    assert!(matches!(
        ens.to_array(Axis::Time, true),
        Err(EnsembleError::DimensionMismatch(_))
    ));
}

#[test]
fn test_quantile_curves_export() {
    let ens = noisy_ensemble(&gen_ts(1.0, 30, 4), 10, 5);
    let table = ens.quantiles(Axis::Value).unwrap().to_dataframe(Axis::Value).unwrap();
    assert_eq!(table.columns(), &["0.05", "0.5", "0.95"]);
}

#[test]
fn test_quantile_ensemble_array_matches_dataframe() {
    let ens = age_ensemble(30, 6);
    for quantile_axis in [Axis::Time, Axis::Value] {
        let qs = ens.quantiles(quantile_axis).unwrap();
        for export_axis in [Axis::Time, Axis::Value] {
            let table = qs.to_dataframe(export_axis).unwrap();
            assert_eq!(table.columns(), &["0.05", "0.5", "0.95"]);

            for labels in [true, false] {
                let array = qs.to_array(export_axis, labels).unwrap();
                assert_eq!(array.values.dim(), (table.n_rows(), 3));
                if labels {
                    assert_eq!(array.headers.as_deref(), Some(table.columns()));
                } else {
                    assert!(array.headers.is_none());
                }
                for i in 0..table.n_rows() {
                    for j in 0..3 {
                        assert_eq!(Some(array.values[[i, j]]), table.get(i, j));
                    }
                }
            }
        }
    }

    let by_time = ens.quantiles(Axis::Time).unwrap();
    assert_eq!(by_time.to_array(Axis::Time, true).unwrap().values.dim(), (200, 3));
}
