use approx::assert_relative_eq;
use ensemble_ts::{EnsembleError, EnsembleSeries, Series};
use ndarray::Array2;

fn record(n: usize) -> Series {
    let time: Vec<f64> = (0..n).map(|i| 50.0 * i as f64).collect();
    let value: Vec<f64> = (0..n).map(|i| (i as f64 * 0.2).sin()).collect();
    Series::new(time, value).unwrap().with_label("record")
}

#[test]
fn test_from_age_ensemble_array() {
    let s = record(30);
    let age_array = Array2::from_shape_fn((30, 8), |(i, j)| 50.0 * i as f64 + j as f64);
    let ens = EnsembleSeries::from_age_ensemble_array(&s, &age_array, None, None).unwrap();

    assert_eq!(ens.len(), 8);
    for (j, member) in ens.iter().enumerate() {
        assert_eq!(member.value(), s.value());
        assert_eq!(member.time()[0], j as f64);
        assert_eq!(member.label(), Some("record"));
    }
}

#[test]
fn test_from_age_ensemble_array_with_depths() {
    let s = record(4);
    let value_depth = [1.0, 2.0, 3.0, 4.0];
    let age_depth = [0.0, 2.0, 4.0];
    let age_array = Array2::from_shape_fn((3, 2), |(i, j)| 10.0 * i as f64 + 100.0 * j as f64);
    let ens =
        EnsembleSeries::from_age_ensemble_array(&s, &age_array, Some(&value_depth), Some(&age_depth))
            .unwrap();

    assert_eq!(ens.len(), 2);
    let first = ens.get(0).unwrap();
    assert_relative_eq!(first.time()[0], 5.0);
    assert_relative_eq!(first.time()[3], 20.0);
    assert_relative_eq!(ens.get(1).unwrap().time()[1], 110.0);
}

#[test]
fn test_from_paleo_ensemble_array() {
    let s = record(20);
    let paleo_array = Array2::from_shape_fn((20, 5), |(i, j)| i as f64 * (j + 1) as f64);
    let ens = EnsembleSeries::from_paleo_ensemble_array(&s, &paleo_array, None, None).unwrap();

    assert_eq!(ens.len(), 5);
    for (j, member) in ens.iter().enumerate() {
        assert_eq!(member.time(), s.time());
        assert_eq!(member.value()[3], 3.0 * (j + 1) as f64);
    }
}

#[test]
fn test_from_paleo_ensemble_array_with_depths() {
    let s = record(5);
    let age_depth = [0.0, 1.0, 2.0, 3.0, 4.0];
    let paleo_depth = [0.5, 1.5, 2.5];
    let paleo_array = Array2::from_shape_fn((3, 3), |(i, j)| (i + j) as f64);
    let ens = EnsembleSeries::from_paleo_ensemble_array(
        &s,
        &paleo_array,
        Some(&paleo_depth),
        Some(&age_depth),
    )
    .unwrap();

    let member = ens.get(2).unwrap();
    assert_eq!(member.len(), 3);
    assert_relative_eq!(member.time()[0], 25.0);
    assert_relative_eq!(member.time()[2], 125.0);
    assert_eq!(member.value(), &[2.0, 3.0, 4.0]);
}

#[test]
fn test_construction_errors() {
    let s = record(10);
    let short = Array2::<f64>::zeros((9, 3));
    assert!(matches!(
        EnsembleSeries::from_age_ensemble_array(&s, &short, None, None),
        Err(EnsembleError::DimensionMismatch(_))
    ));
    assert!(matches!(
        EnsembleSeries::from_paleo_ensemble_array(&s, &short, None, None),
        Err(EnsembleError::DimensionMismatch(_))
    ));

    let depth = [0.0; 9];
    assert!(matches!(
        EnsembleSeries::from_paleo_ensemble_array(&s, &short, Some(&depth), None),
        Err(EnsembleError::InvalidArgument(_))
    ));

    let empty = Array2::<f64>::zeros((10, 0));
    assert!(matches!(
        EnsembleSeries::from_age_ensemble_array(&s, &empty, None, None),
        Err(EnsembleError::EmptyEnsemble(_))
    ));
}
