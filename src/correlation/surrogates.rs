//! Surrogate series for non-parametric significance tests.
//!
//! A surrogate keeps a chosen property of the original series and destroys
//! everything else:
//!
//! - [`Surrogate::Ar1`] keeps the mean, variance and lag-1 autocorrelation
//!   (isopersistent surrogates).
//! - [`Surrogate::PhaseRandomized`] keeps the amplitude spectrum and draws
//!   new Fourier phases (isospectral surrogates, Ebisuzaki 1997).

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use num_complex::Complex;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use rustfft::{Fft, FftPlanner};
use tracing::warn;

use crate::error::{EnsembleError, Result};
use crate::utils;

/// Bound on the fitted lag-1 coefficient; keeps the innovation variance positive.
const MAX_AR1_COEFFICIENT: f64 = 0.999;

/// AR(1) model fitted to a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ar1Model {
    /// Lag-1 coefficient
    pub g: f64,
    /// Process mean
    pub mean: f64,
    /// Process standard deviation
    pub sd: f64,
}

impl Ar1Model {
    /// Fit by moments: lag-1 autocorrelation, mean and population variance.
    pub fn fit(x: &[f64]) -> Result<Self> {
        let mut g = utils::lag1_autocorrelation(x)?;
        if g.abs() > MAX_AR1_COEFFICIENT {
            warn!(g, "clamping lag-1 autocorrelation for AR(1) surrogates");
            g = g.clamp(-MAX_AR1_COEFFICIENT, MAX_AR1_COEFFICIENT);
        }
        Ok(Self {
            g,
            mean: utils::mean(x),
            sd: utils::std_dev(x, 0),
        })
    }

    /// Simulate `n` points started from the stationary distribution.
    pub fn simulate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        let innovation_sd = self.sd * (1.0 - self.g * self.g).sqrt();
        let mut out = Vec::with_capacity(n);
        let z0: f64 = StandardNormal.sample(rng);
        let mut prev = self.sd * z0;
        for _ in 0..n {
            out.push(self.mean + prev);
            let eps: f64 = StandardNormal.sample(rng);
            prev = self.g * prev + innovation_sd * eps;
        }
        out
    }
}

/// Phase randomizer holding the spectrum of one series.
#[derive(Clone)]
pub struct PhaseRandomizer {
    spectrum: Vec<Complex<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for PhaseRandomizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseRandomizer")
            .field("len", &self.spectrum.len())
            .finish()
    }
}

impl PhaseRandomizer {
    /// Compute the forward FFT of `x` once so that surrogates only need the
    /// inverse transform.
    pub fn new(x: &[f64]) -> Result<Self> {
        let n = x.len();
        if n < 3 {
            return Err(EnsembleError::ComputationError(format!(
                "phase randomization needs at least 3 points, got {}",
                n
            )));
        }
        let mut planner = FftPlanner::<f64>::new();
        let forward = planner.plan_fft_forward(n);
        let inverse = planner.plan_fft_inverse(n);

        let mut spectrum: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
        forward.process(&mut spectrum);

        Ok(Self { spectrum, inverse })
    }

    /// Draw one phase-randomized surrogate.
    ///
    /// The zero-frequency term is kept so the mean is preserved. Every other
    /// positive frequency gets a uniform random phase and its negative
    /// frequency the conjugate, so the result is real. For even lengths the
    /// Nyquist term gets a random sign.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let n = self.spectrum.len();
        let mut buffer = vec![Complex::new(0.0, 0.0); n];
        buffer[0] = self.spectrum[0];

        let half = (n - 1) / 2;
        for k in 1..=half {
            let phase = rng.gen_range(0.0..2.0 * PI);
            let rotated = Complex::from_polar(self.spectrum[k].norm(), phase);
            buffer[k] = rotated;
            buffer[n - k] = rotated.conj();
        }
        if n % 2 == 0 {
            let nyquist = self.spectrum[n / 2].norm();
            buffer[n / 2] = Complex::new(if rng.gen::<bool>() { nyquist } else { -nyquist }, 0.0);
        }

        self.inverse.process(&mut buffer);
        buffer.iter().map(|c| c.re / n as f64).collect()
    }
}

/// Surrogate generator for one series.
#[derive(Debug, Clone)]
pub enum Surrogate {
    /// Isopersistent AR(1) surrogates
    Ar1 {
        /// Fitted model
        model: Ar1Model,
        /// Length of the generated series
        len: usize,
    },
    /// Isospectral phase-randomized surrogates
    PhaseRandomized(PhaseRandomizer),
}

impl Surrogate {
    pub fn ar1(x: &[f64]) -> Result<Self> {
        Ok(Surrogate::Ar1 {
            model: Ar1Model::fit(x)?,
            len: x.len(),
        })
    }

    pub fn phase_randomized(x: &[f64]) -> Result<Self> {
        Ok(Surrogate::PhaseRandomized(PhaseRandomizer::new(x)?))
    }

    /// Draw one surrogate series.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        match self {
            Surrogate::Ar1 { model, len } => model.simulate(*len, rng),
            Surrogate::PhaseRandomized(randomizer) => randomizer.generate(rng),
        }
    }
}
