//! Configuration options for ensemble correlation.
//!
//! This module defines the association statistics, the significance-testing
//! methods and the settings shared by every pairwise test.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EnsembleError, Result};

/// Pairwise association measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    /// Pearson product-moment correlation
    #[serde(rename = "pearsonr")]
    Pearson,

    /// Spearman rank correlation
    #[serde(rename = "spearmanr")]
    Spearman,

    /// Point-biserial correlation (Pearson with one dichotomous variable)
    #[serde(rename = "pointbiserialr")]
    PointBiserial,

    /// Kendall's tau-b
    #[serde(rename = "kendalltau")]
    KendallTau,

    /// Weighted Kendall's tau with hyperbolic weights
    #[serde(rename = "weightedtau")]
    WeightedTau,
}

impl Statistic {
    /// All supported statistics.
    pub const ALL: [Statistic; 5] = [
        Statistic::Pearson,
        Statistic::Spearman,
        Statistic::PointBiserial,
        Statistic::KendallTau,
        Statistic::WeightedTau,
    ];

    /// Name used when parsing and reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Pearson => "pearsonr",
            Statistic::Spearman => "spearmanr",
            Statistic::PointBiserial => "pointbiserialr",
            Statistic::KendallTau => "kendalltau",
            Statistic::WeightedTau => "weightedtau",
        }
    }
}

impl Default for Statistic {
    fn default() -> Self {
        Statistic::Pearson
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = EnsembleError;

    fn from_str(s: &str) -> Result<Self> {
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| {
                EnsembleError::InvalidArgument(format!(
                    "unknown statistic '{}', expected one of pearsonr, spearmanr, pointbiserialr, kendalltau, weightedtau",
                    s
                ))
            })
    }
}

/// Significance-testing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignificanceMethod {
    /// Student's t-test with an autocorrelation-adjusted sample size
    #[serde(rename = "ttest")]
    TTest,

    /// The statistic's own analytic p-value
    #[serde(rename = "built-in")]
    BuiltIn,

    /// Isopersistent null built from AR(1) surrogates
    #[serde(rename = "ar1sim")]
    Ar1Sim,

    /// Isospectral null built from phase-randomized surrogates
    #[serde(rename = "phaseran")]
    PhaseRan,
}

impl SignificanceMethod {
    /// All supported methods.
    pub const ALL: [SignificanceMethod; 4] = [
        SignificanceMethod::TTest,
        SignificanceMethod::BuiltIn,
        SignificanceMethod::Ar1Sim,
        SignificanceMethod::PhaseRan,
    ];

    /// Name used when parsing and reporting.
    pub fn name(&self) -> &'static str {
        match self {
            SignificanceMethod::TTest => "ttest",
            SignificanceMethod::BuiltIn => "built-in",
            SignificanceMethod::Ar1Sim => "ar1sim",
            SignificanceMethod::PhaseRan => "phaseran",
        }
    }

    /// Returns true if the method draws random surrogates.
    pub fn uses_surrogates(&self) -> bool {
        matches!(self, SignificanceMethod::Ar1Sim | SignificanceMethod::PhaseRan)
    }
}

impl Default for SignificanceMethod {
    fn default() -> Self {
        SignificanceMethod::PhaseRan
    }
}

impl fmt::Display for SignificanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignificanceMethod {
    type Err = EnsembleError;

    fn from_str(s: &str) -> Result<Self> {
        SignificanceMethod::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| {
                EnsembleError::InvalidArgument(format!(
                    "unknown significance method '{}', expected one of ttest, built-in, ar1sim, phaseran",
                    s
                ))
            })
    }
}

/// Configuration options for ensemble correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Association measure. Default: Pearson
    pub statistic: Statistic,

    /// Significance-testing strategy. Default: PhaseRan
    pub method: SignificanceMethod,

    /// Significance level; a member is significant when p < alpha. Default: 0.05
    pub alpha: f64,

    /// Number of surrogates drawn per series by the surrogate methods. Default: 1000
    pub number: usize,

    /// Seed for the surrogate generators. Default: None (fresh entropy)
    pub seed: Option<u64>,

    /// Optional inclusive time window applied to both series before testing. Default: None
    pub timespan: Option<(f64, f64)>,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            statistic: Statistic::default(),
            method: SignificanceMethod::default(),
            alpha: 0.05,
            number: 1000,
            seed: None,
            timespan: None,
        }
    }
}

impl CorrelationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from method and statistic names.
    ///
    /// Unknown names fail immediately with `InvalidArgument`.
    pub fn from_names(method: &str, statistic: &str) -> Result<Self> {
        Ok(Self {
            method: method.parse()?,
            statistic: statistic.parse()?,
            ..Self::default()
        })
    }

    /// Load a configuration from JSON; omitted fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_statistic(mut self, statistic: Statistic) -> Self {
        self.statistic = statistic;
        self
    }

    pub fn with_method(mut self, method: SignificanceMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_number(mut self, number: usize) -> Self {
        self.number = number;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_timespan(mut self, start: f64, end: f64) -> Self {
        self.timespan = Some((start, end));
        self
    }

    /// Check the numeric settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(EnsembleError::InvalidArgument(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.method.uses_surrogates() && self.number == 0 {
            return Err(EnsembleError::InvalidArgument(format!(
                "method '{}' needs at least one surrogate",
                self.method
            )));
        }
        if let Some((start, end)) = self.timespan {
            if !(start.is_finite() && end.is_finite()) || start > end {
                return Err(EnsembleError::InvalidArgument(format!(
                    "invalid timespan [{}, {}]",
                    start, end
                )));
            }
        }
        Ok(())
    }
}
