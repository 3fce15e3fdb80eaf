use approx::assert_relative_eq;
use ensemble_ts::{Axis, EnsembleError, EnsembleSeries, Series};

use crate::test_helpers::{age_ensemble, gen_ts, noisy_ensemble};

#[test]
fn test_value_quantiles() {
    let signal = gen_ts(1.0, 100, 1);
    let ens = noisy_ensemble(&signal, 30, 2);
    let qs = ens.quantiles(Axis::Value).unwrap();

    assert_eq!(qs.len(), 3);
    assert_eq!(qs.axis(), Axis::Value);
    assert_eq!(qs.quantiles(), &[0.05, 0.5, 0.95]);

    let low = qs.get(0.05).unwrap();
    let mid = qs.get(0.5).unwrap();
    let high = qs.get(0.95).unwrap();
    assert_eq!(mid.label(), Some("0.5"));
    for i in 0..low.len() {
        assert!(low.value()[i] <= mid.value()[i]);
        assert!(mid.value()[i] <= high.value()[i]);
    }
}

#[test]
fn test_time_quantiles() {
    let ens = age_ensemble(30, 3);
    let qs = ens.quantiles_with(&[0.25, 0.75], Axis::Time).unwrap();
    assert_eq!(qs.len(), 2);

    let low = qs.get(0.25).unwrap();
    let high = qs.get(0.75).unwrap();
    assert_eq!(low.len(), 200);
    assert_eq!(low.value(), ens.get(0).unwrap().value());
    for i in 0..low.len() {
        assert!(low.time()[i] <= high.time()[i]);
        assert!((low.time()[i] - (1.0 + 100.0 * i as f64)).abs() < 100.0);
    }
}

#[test]
fn test_quantiles_of_identical_members() {
    let s = Series::new(vec![0.0, 1.0, 2.0, 3.0], vec![4.0, 3.0, 2.0, 1.0]).unwrap();
    let ens = EnsembleSeries::new(vec![s.clone(), s.clone(), s.clone()]);
    let qs = ens.quantiles(Axis::Value).unwrap();
    for q in [0.05, 0.5, 0.95] {
        let curve = qs.get(q).unwrap();
        for (a, b) in curve.value().iter().zip(s.value()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_quantile_errors() {
    let empty = EnsembleSeries::new(vec![]);
    assert!(matches!(
        empty.quantiles(Axis::Value),
        Err(EnsembleError::EmptyEnsemble(_))
    ));

    let ens = noisy_ensemble(&gen_ts(1.0, 20, 4), 3, 5);
    assert!(matches!(
        ens.quantiles_with(&[0.5, 1.5], Axis::Value),
        Err(EnsembleError::InvalidArgument(_))
    ));

    let ragged = EnsembleSeries::new(vec![
        Series::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).unwrap(),
        Series::new(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap(),
    ]);
    assert!(matches!(
        ragged.quantiles(Axis::Time),
        Err(EnsembleError::DimensionMismatch(_))
    ));
}

#[test]
fn test_axis_parsing() {
    assert_eq!("time".parse::<Axis>().unwrap(), Axis::Time);
    assert_eq!("value".parse::<Axis>().unwrap(), Axis::Value);
    assert!("depth".parse::<Axis>().is_err());
    assert_eq!(Axis::default(), Axis::Value);
}
