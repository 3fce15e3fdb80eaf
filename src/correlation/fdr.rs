//! False discovery rate control across ensemble members.

use std::cmp::Ordering;

/// Benjamini–Hochberg procedure at level `alpha`.
///
/// Returns one flag per p-value, in input order; a flag is true when the
/// corresponding null hypothesis is rejected.
pub fn benjamini_hochberg(p_values: &[f64], alpha: f64) -> Vec<bool> {
    let m = p_values.len();
    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| {
        p_values[a]
            .partial_cmp(&p_values[b])
            .unwrap_or(Ordering::Equal)
    });

    let cutoff = order
        .iter()
        .enumerate()
        .filter(|&(rank, &idx)| p_values[idx] <= (rank + 1) as f64 / m as f64 * alpha)
        .map(|(rank, _)| rank + 1)
        .last()
        .unwrap_or(0);

    let mut rejected = vec![false; m];
    for &idx in &order[..cutoff] {
        rejected[idx] = true;
    }
    rejected
}
