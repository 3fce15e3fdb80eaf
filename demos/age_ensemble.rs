//! Example of building an age ensemble and summarizing it.
//!
//! This example perturbs the age model of a record to create an ensemble,
//! computes quantile curves, exports the ensemble as a table and prepares
//! the envelope and trace layouts for plotting.

use ensemble_ts::plot::EnvelopeOptions;
use ensemble_ts::tsmodel::{gen_series, TsModel};
use ensemble_ts::{Axis, EnsembleSeries, Series};

use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Age ensemble example");
    println!("====================\n");

    let mut rng = StdRng::seed_from_u64(7);

    // A record sampled every 100 years
    let raw = gen_series(TsModel::ColoredNoise { alpha: 1.0 }, 200, &mut rng)?;
    let time: Vec<f64> = raw.time().iter().map(|t| 100.0 * t).collect();
    let record = Series::new(time, raw.value().to_vec())?.with_label("record");

    // 1. Age realizations: one column per member, each sorted
    let nn = 30;
    let jitter = Normal::new(0.0, 20.0)?;
    let mut age_array = Array2::zeros((record.len(), nn));
    for mut column in age_array.columns_mut() {
        let mut ages: Vec<f64> = record.time().iter().map(|t| t + jitter.sample(&mut rng)).collect();
        ages.sort_by(f64::total_cmp);
        for (slot, age) in column.iter_mut().zip(ages) {
            *slot = age;
        }
    }
    let ens = EnsembleSeries::from_age_ensemble_array(&record, &age_array, None, None)?
        .with_label("age ensemble");
    println!("1. Built an ensemble of {} members", ens.len());

    // 2. Quantile curves along both axes
    println!("\n2. Quantiles");
    println!("------------");
    let by_value = ens.quantiles(Axis::Value)?;
    let by_time = ens.quantiles(Axis::Time)?;
    for q in by_value.quantiles() {
        let curve = by_value.get(*q).ok_or("missing quantile")?;
        println!("  value q={:<5} first point: {:.3}", q, curve.value()[0]);
    }
    for q in by_time.quantiles() {
        let curve = by_time.get(*q).ok_or("missing quantile")?;
        println!("  time  q={:<5} first point: {:.1}", q, curve.time()[0]);
    }

    // 3. Exports
    println!("\n3. Exports");
    println!("----------");
    let table = ens.to_dataframe(Axis::Time)?;
    println!("  table: {} rows x {} columns", table.n_rows(), table.n_columns());
    let array = ens.to_array(Axis::Value, true)?;
    println!("  array shape: {:?}", array.values.dim());

    // 4. Plot layouts
    println!("\n4. Plot layouts");
    println!("---------------");
    let hist = ens.histplot(None)?;
    println!("  histogram with {} bins", hist.counts.len());
    let envelope = ens.plot_envelope(&EnvelopeOptions::default().with_curve_lw(1.5))?;
    println!("  envelope over {} grid points", envelope.time.len());
    let traces = ens.plot_traces(5, 0.3, Some(1))?;
    println!("  traces for members {:?}", traces.members);

    Ok(())
}
