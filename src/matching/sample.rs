//! Recency weights and weighted draws without replacement.

use rand::Rng;

/// Sampling probabilities for `n` participants in roster order.
///
/// # Formula
/// The participant at 1-based rank `k` (1 = front, most overdue) gets weight
/// `(n - k + 1) / n`, normalized by the sum of all weights. Every rank has
/// non-zero probability, including the last.
///
/// Returns an empty vector for `n == 0`.
pub fn rank_weights(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let nf = n as f64;
    let raw: Vec<f64> = (1..=n).map(|k| (n - k + 1) as f64 / nf).collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / sum).collect()
}

/// Draws one index in proportion to `weights`.
///
/// Builds a cumulative sum and binary-searches it (`partition_point`).
/// Weights need not be normalized but must be non-negative with a positive
/// sum. `weights` must not be empty.
pub(crate) fn weighted_pick(weights: &[f64], rng: &mut impl Rng) -> usize {
    let mut cdf = Vec::with_capacity(weights.len());
    let mut acc = 0.0;
    for &w in weights {
        acc += w;
        cdf.push(acc);
    }
    // u in (0, total]: a zero-weight leading entry can never be hit.
    let u = (1.0 - rng.random::<f64>()) * acc;
    cdf.partition_point(|&c| c < u).min(weights.len() - 1)
}

/// Draws two distinct indices without replacement.
///
/// The first draw uses `weights`; the second renormalizes over the rest.
/// `weights` must hold at least two entries.
pub(crate) fn draw_two(weights: &[f64], rng: &mut impl Rng) -> (usize, usize) {
    let first = weighted_pick(weights, rng);
    let rest: Vec<f64> = weights
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != first)
        .map(|(_, &w)| w)
        .collect();
    let pick = weighted_pick(&rest, rng);
    let second = if pick >= first { pick + 1 } else { pick };
    (first, second)
}
