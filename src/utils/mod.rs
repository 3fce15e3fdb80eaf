//! Utility functions and helpers for the ensemble-ts library.

pub mod interp;
pub mod parallel;
pub mod stats;

// Re-export commonly used utilities
pub use parallel::{map_members_parallel, member_rng, resolve_seed};
pub use stats::{lag1_autocorrelation, mean, quantile_sorted, rank_average, sorted, std_dev};
