use ensemble_ts::{CorrelationConfig, EnsembleCorrelation, EnsembleSeries, SignificanceMethod, Statistic};

use crate::test_helpers::{gen_ts, white_noise, with_noise};

/// Two members sharing a pink-noise signal, and a target with the same
/// signal, each with independent white noise at 0.5 amplitude.
fn correlated_setup(nt: usize) -> (EnsembleSeries, ensemble_ts::Series) {
    let v0 = gen_ts(1.0, nt, 100);
    let ens = EnsembleSeries::new(vec![
        with_noise(&v0, &white_noise(nt, 101), 0.5),
        with_noise(&v0, &white_noise(nt, 102), 0.5),
    ]);
    let target = with_noise(&v0, &white_noise(nt, 103), 0.5);
    (ens, target)
}

#[test]
fn test_all_significance_methods() {
    let (ens, target) = correlated_setup(200);
    for method in SignificanceMethod::ALL {
        let config = CorrelationConfig::default()
            .with_method(method)
            .with_number(200)
            .with_seed(5);
        let res = ens.correlation(&target, &config).unwrap();
        assert_eq!(res.len(), 2, "method {}", method);
        assert_eq!(res.method, method);
        assert!(res.all_significant(), "method {} gave p = {:?}", method, res.p);
    }
}

#[test]
fn test_all_statistics_under_phase_randomization() {
    let (ens, target) = correlated_setup(200);
    for statistic in Statistic::ALL {
        let config = CorrelationConfig::default()
            .with_statistic(statistic)
            .with_method(SignificanceMethod::PhaseRan)
            .with_number(200)
            .with_seed(9);
        let res = ens.correlation(&target, &config).unwrap();
        assert_eq!(res.statistic, statistic);
        assert!(res.r.iter().all(|&r| r > 0.4), "statistic {} gave r = {:?}", statistic, res.r);
        assert!(res.all_significant(), "statistic {} gave p = {:?}", statistic, res.p);
    }
}

#[test]
fn test_independent_noise_is_mostly_not_significant() {
    let members: Vec<_> = (0..20).map(|k| gen_ts(0.0, 200, 300 + k)).collect();
    let ens = EnsembleSeries::new(members);
    let target = gen_ts(0.0, 200, 999);
    let config = CorrelationConfig::default()
        .with_method(SignificanceMethod::BuiltIn)
        .with_seed(3);
    let res = ens.correlation(&target, &config).unwrap();
    assert!(res.n_significant() <= 5);
    assert!(res.signif_fdr.iter().filter(|&&s| s).count() <= res.n_significant());
}

#[test]
fn test_config_from_names_and_json() {
    let config = CorrelationConfig::from_names("ar1sim", "kendalltau").unwrap();
    assert_eq!(config.method, SignificanceMethod::Ar1Sim);
    assert_eq!(config.statistic, Statistic::KendallTau);
    assert!(CorrelationConfig::from_names("bootstrap", "pearsonr").is_err());

    let config = CorrelationConfig::from_json(r#"{"method": "ttest", "number": 50, "seed": 4}"#).unwrap();
    assert_eq!(config.method, SignificanceMethod::TTest);
    assert_eq!(config.number, 50);
    assert_eq!(config.seed, Some(4));
    assert_eq!(config.statistic, Statistic::Pearson);
}

#[test]
fn test_engine_is_reproducible_with_seed() {
    let (ens, target) = correlated_setup(128);
    let engine = EnsembleCorrelation::new(
        CorrelationConfig::default()
            .with_method(SignificanceMethod::Ar1Sim)
            .with_number(100)
            .with_seed(77),
    );
    let a = engine.correlate(&ens, (&target).into()).unwrap();
    let b = engine.correlate(&ens, (&target).into()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_series_pair_correlation() {
    let (ens, target) = correlated_setup(150);
    let config = CorrelationConfig::default()
        .with_method(SignificanceMethod::TTest)
        .with_seed(1);
    let pair = ens.get(0).unwrap().correlation(&target, &config).unwrap();
    assert!(pair.r > 0.6);
    assert!(pair.signif);
}
