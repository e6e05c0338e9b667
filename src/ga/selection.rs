//! Tournament selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::index;
use rand::Rng;

use super::types::FitnessPool;

/// Picks `k` distinct positions at random and returns the fittest.
///
/// Positions are drawn without replacement, so one individual cannot enter
/// the same tournament twice. Distinctness is by position, not by tour: two
/// identical tours at different positions may both compete. `k` is capped at
/// the pool size. Ties keep the earlier draw. The pool is never modified.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `pool` is empty.
pub fn tournament_select<P, R>(pool: &P, k: usize, rng: &mut R) -> usize
where
    P: FitnessPool + ?Sized,
    R: Rng + ?Sized,
{
    assert!(!pool.is_empty(), "cannot select from empty population");

    let n = pool.len();
    let k = k.clamp(1, n);

    let mut contenders = index::sample(rng, n, k).into_iter();
    let mut best = contenders
        .next()
        .expect("tournament draws at least one contender");
    for idx in contenders {
        if pool.fitness(idx) < pool.fitness(best) {
            best = idx;
        }
    }
    best
}
