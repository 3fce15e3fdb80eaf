use approx::assert_relative_eq;
use ensemble_ts::plot::EnvelopeOptions;
use ensemble_ts::EnsembleSeries;

use crate::test_helpers::{age_ensemble, gen_ts, noisy_ensemble};

#[test]
fn test_histplot() {
    let ens = noisy_ensemble(&gen_ts(1.0, 100, 1), 20, 2);
    let hist = ens.histplot(Some(25)).unwrap();
    assert_eq!(hist.counts.len(), 25);
    assert_eq!(hist.bin_edges.len(), 26);
    assert_eq!(hist.counts.iter().sum::<usize>(), 2000);

    let width = hist.bin_edges[1] - hist.bin_edges[0];
    assert_relative_eq!(hist.density.iter().sum::<f64>() * width, 1.0, epsilon = 1e-9);
}

#[test]
fn test_plot_envelope() {
    let ens = age_ensemble(30, 3);
    let env = ens
        .plot_envelope(&EnvelopeOptions::default().with_curve_lw(1.5))
        .unwrap();
    assert_eq!(env.curve_lw, 1.5);
    assert_eq!(env.shade_alpha, 0.3);
    assert_eq!(env.median.len(), env.time.len());
    assert!(env.time.windows(2).all(|w| w[0] < w[1]));
    for i in 0..env.time.len() {
        assert!(env.outer.0[i] <= env.median[i]);
        assert!(env.median[i] <= env.outer.1[i]);
    }
}

#[test]
fn test_plot_traces() {
    let signal = gen_ts(1.0, 50, 4);
    for label in [Some("ensemble"), None] {
        let mut ens = noisy_ensemble(&signal, 20, 5);
        if let Some(l) = label {
            ens = ens.with_label(l);
        }
        let traces = ens.plot_traces(8, 0.2, Some(6)).unwrap();
        assert_eq!(traces.members.len(), 8);
        assert_eq!(traces.alpha, 0.2);
        assert_eq!(traces.label.as_deref(), label);
        for (&i, s) in traces.members.iter().zip(&traces.series) {
            assert_eq!(s, ens.get(i).unwrap());
        }
    }
}

#[test]
fn test_plots_reject_empty_ensemble() {
    let empty = EnsembleSeries::new(vec![]);
    assert!(empty.histplot(None).is_err());
    assert!(empty.plot_envelope(&EnvelopeOptions::default()).is_err());
    assert!(empty.plot_traces(3, 0.5, None).is_err());
}
