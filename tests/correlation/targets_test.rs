use ensemble_ts::{CorrelationConfig, CorrelationTarget, EnsembleError, EnsembleSeries, SignificanceMethod};

use crate::test_helpers::{gen_ts, noisy_ensemble, white_noise, with_noise};

fn builtin_config() -> CorrelationConfig {
    CorrelationConfig::default()
        .with_method(SignificanceMethod::BuiltIn)
        .with_seed(7)
}

#[test]
fn test_correlation_with_series_target() {
    let v0 = gen_ts(1.0, 200, 1);
    let ts1 = with_noise(&v0, &white_noise(200, 2), 0.5);
    let ts2 = with_noise(&v0, &white_noise(200, 3), 0.5);

    let ens = EnsembleSeries::new(vec![ts1.clone(), ts2.clone(), ts1]);
    let res = ens.correlation(&v0, &builtin_config()).unwrap();

    assert_eq!(res.len(), 3);
    assert!(res.all_significant());
    assert!(res.signif_fdr.iter().all(|&s| s));
    assert!(res.r.iter().all(|&r| r > 0.6));
    assert_eq!(res.r[0], res.r[2]);
}

#[test]
fn test_correlation_with_ensemble_target_of_any_size() {
    let signal = gen_ts(1.0, 150, 10);
    let source = noisy_ensemble(&signal, 4, 11);

    for nn in [1, 4, 9] {
        let target = noisy_ensemble(&signal, nn, 12 + nn as u64);
        let res = source.correlation(&target, &builtin_config()).unwrap();
        assert_eq!(res.len(), source.len());
        assert_eq!(res.p.len(), source.len());
        assert!(res.p.iter().all(|p| (0.0..=1.0).contains(p)));
    }
}

#[test]
fn test_correlation_with_first_member() {
    let signal = gen_ts(1.0, 120, 20);
    let ens = noisy_ensemble(&signal, 5, 21);
    let res = ens
        .correlation(CorrelationTarget::FirstMember, &builtin_config())
        .unwrap();
    assert_eq!(res.len(), 5);
    assert!((res.r[0] - 1.0).abs() < 1e-12);
    assert!(res.signif[0]);
}

#[test]
fn test_correlation_on_age_ensemble() {
    let ens = crate::test_helpers::age_ensemble(6, 30);
    let target = ens.get(0).unwrap().clone();
    let res = ens.correlation(&target, &builtin_config()).unwrap();
    assert_eq!(res.len(), 6);
    assert!(res.r.iter().all(|&r| r > 0.5));
}

#[test]
fn test_non_overlapping_target_is_rejected() {
    let signal = gen_ts(1.0, 50, 40);
    let ens = noisy_ensemble(&signal, 2, 41);
    let shifted = ensemble_ts::Series::new(
        signal.time().iter().map(|t| t + 1000.0).collect(),
        signal.value().to_vec(),
    )
    .unwrap();
    assert!(matches!(
        ens.correlation(&shifted, &builtin_config()),
        Err(EnsembleError::MismatchedTimeGrid(_))
    ));
}

#[test]
fn test_result_serializes_to_json() {
    let signal = gen_ts(1.0, 80, 50);
    let ens = noisy_ensemble(&signal, 2, 51);
    let json = ens
        .correlation(&signal, &builtin_config())
        .unwrap()
        .to_json()
        .unwrap();
    assert!(json.contains("\"statistic\":\"pearsonr\""));
    assert!(json.contains("\"method\":\"built-in\""));
    assert!(json.contains("signif_fdr"));
}
