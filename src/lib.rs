//! # ensemble-ts
//!
//! `ensemble-ts` analyses ensembles of paleoclimate time series: collections
//! of alternative realizations (age-model or proxy-value realizations) of the
//! same record.
//!
//! The library provides:
//! - Per-member correlation with a target series or ensemble, with t-test,
//!   analytic, AR(1) surrogate and phase-randomization significance tests
//! - Quantile curves across members along the time or value axis
//! - Table and array exports
//! - Construction from age- and paleo-ensemble arrays
//! - Plot layouts (histogram, envelope, traces) for any renderer
//!
//! ## Basic Usage
//!
//! ```
//! use ensemble_ts::correlation::{CorrelationConfig, SignificanceMethod};
//! use ensemble_ts::{EnsembleSeries, Series};
//!
//! let time: Vec<f64> = (0..50).map(|i| i as f64).collect();
//! let signal: Vec<f64> = time.iter().map(|t| (t * 0.4).sin()).collect();
//! let target = Series::new(time.clone(), signal.clone())?;
//!
//! let members = (1..4)
//!     .map(|k| {
//!         let value = signal
//!             .iter()
//!             .zip(&time)
//!             .map(|(v, t)| v + 0.1 * k as f64 * (t * 2.9).cos())
//!             .collect();
//!         Series::new(time.clone(), value)
//!     })
//!     .collect::<ensemble_ts::Result<Vec<_>>>()?;
//! let ensemble = EnsembleSeries::new(members);
//!
//! let config = CorrelationConfig::default().with_method(SignificanceMethod::BuiltIn);
//! let result = ensemble.correlation(&target, &config)?;
//! assert_eq!(result.len(), 3);
//! assert!(result.all_significant());
//! # Ok::<(), ensemble_ts::EnsembleError>(())
//! ```

// Public modules
pub mod error;

pub mod correlation;
pub mod ensemble;
pub mod plot;
pub mod series;
pub mod tsmodel;

mod utils;

// Re-exports for convenience
pub use correlation::{
    CorrelationConfig, CorrelationResult, CorrelationTarget, EnsembleCorrelation, PairCorrelation,
    SignificanceMethod, Statistic,
};
pub use ensemble::{ArrayExport, Axis, EnsembleSeries, QuantileEnsemble, Table, DEFAULT_QUANTILES};
pub use error::{EnsembleError, Result};
pub use series::Series;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
