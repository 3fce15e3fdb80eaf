//! Parallel processing utilities for per-member ensemble computations.
//!
//! Ensemble members are independent of one another, so the expensive
//! per-member work (surrogate significance tests in particular) can be
//! spread across threads with Rayon. Results are always returned in member
//! order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::Result;

/// Golden-ratio increment used to decorrelate per-member seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Evaluate `eval_member` for every index in `0..n_members` in parallel.
///
/// The first error encountered is returned; otherwise the outputs are
/// collected in index order.
///
/// # Arguments
///
/// * `n_members` - The number of members to evaluate
/// * `eval_member` - A function that computes the output for a single member
///
/// # Returns
///
/// * `Result<Vec<T>>` - The per-member outputs
pub fn map_members_parallel<T, F>(n_members: usize, eval_member: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync,
{
    (0..n_members)
        .into_par_iter()
        .map(|i| eval_member(i))
        .collect()
}

/// Build the random number generator used by a single member.
///
/// Each member draws from its own generator so that the outcome does not
/// depend on how Rayon schedules the work.
pub fn member_rng(base_seed: u64, member: usize) -> StdRng {
    StdRng::seed_from_u64(base_seed.wrapping_add(SEED_STRIDE.wrapping_mul(member as u64 + 1)))
}

/// Resolve an optional user seed into a concrete base seed.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => rand::thread_rng().gen(),
    }
}
