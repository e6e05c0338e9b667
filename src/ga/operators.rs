//! Permutation operators for tours.
//!
//! Tours are 1-based permutations of the city indices, so every helper
//! here addresses its masks with `city - 1`.
//!
//! # Crossover
//!
//! - [`order_crossover_into`] (OX): Davis (1985), writes into a caller-owned
//!   slice using reusable [`CrossoverScratch`] buffers
//! - [`order_crossover`]: allocating convenience wrapper
//!
//! # Mutation
//!
//! - [`adjacent_swap_mutation`]: swaps one position with its successor. It is
//!   a single neighbour exchange, not a 2-opt segment reversal.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Scratch space for one OX call.
///
/// Holds the per-city "taken" mask and the filtered parent-2 order. Each
/// worker keeps one and reuses it for every child it produces. Every call
/// resets it on entry, so stale contents from an earlier (even panicking)
/// call never leak into the next child.
#[derive(Debug, Clone, Default)]
pub struct CrossoverScratch {
    taken: Vec<bool>,
    remaining: Vec<usize>,
}

impl CrossoverScratch {
    /// Creates scratch space sized for tours of `city_count` cities.
    pub fn new(city_count: usize) -> Self {
        Self {
            taken: Vec::with_capacity(city_count),
            remaining: Vec::with_capacity(city_count),
        }
    }

    fn reset(&mut self, city_count: usize) {
        self.taken.clear();
        self.taken.resize(city_count, false);
        self.remaining.clear();
    }
}

/// Order Crossover (OX) into a caller-provided child slice.
///
/// # Algorithm
///
/// 1. If `start > end`, swap the cut indices **and** the parent roles
/// 2. Copy `parent1[start..end]` into the same positions of `child`
/// 3. Take `parent2` in order, dropping every city of the copied block
/// 4. Fill `child[..start]` with the first `start` of those cities and
///    `child[end..]` with the rest
///
/// The child is a permutation whenever both parents are permutations of the
/// same cities.
///
/// # Complexity
/// O(n) time, no allocation once `scratch` has grown to `n`
///
/// # Panics
/// Panics if the slices differ in length, a cut lies beyond the tour, or the
/// parents are not permutations of the same city set.
pub fn order_crossover_into(
    child: &mut [usize],
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
    scratch: &mut CrossoverScratch,
) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert_eq!(n, child.len(), "child must match parent length");
    assert!(
        start <= n && end <= n,
        "cut indices ({start}, {end}) out of range for {n} cities"
    );

    let (parent1, parent2, start, end) = if start > end {
        (parent2, parent1, end, start)
    } else {
        (parent1, parent2, start, end)
    };

    scratch.reset(n);
    let block = &parent1[start..end];
    for &city in block {
        let taken = &mut scratch.taken[city - 1];
        assert!(!*taken, "city {city} repeated in parent tour");
        *taken = true;
    }

    // A repeated city in parent 2 is skipped the second time, which leaves
    // the remainder short and trips the assertion below.
    for &city in parent2 {
        let taken = &mut scratch.taken[city - 1];
        if !*taken {
            *taken = true;
            scratch.remaining.push(city);
        }
    }
    assert_eq!(
        scratch.remaining.len(),
        n - block.len(),
        "parents are not permutations of the same cities"
    );

    let (head, tail) = scratch.remaining.split_at(start);
    child[..start].copy_from_slice(head);
    child[start..end].copy_from_slice(block);
    child[end..].copy_from_slice(tail);
}

/// Allocating form of [`order_crossover_into`].
///
/// # Examples
///
/// ```
/// use u_tsp::ga::operators::order_crossover;
///
/// let p1 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
/// let p2 = [8, 7, 2, 4, 1, 5, 6, 3, 10, 9];
/// let child = order_crossover(&p1, &p2, 1, 4);
/// assert_eq!(child, vec![8, 2, 3, 4, 7, 1, 5, 6, 10, 9]);
/// ```
pub fn order_crossover(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let mut child = vec![0; parent1.len()];
    let mut scratch = CrossoverScratch::new(parent1.len());
    order_crossover_into(&mut child, parent1, parent2, start, end, &mut scratch);
    child
}

/// Draws the two OX cut indices independently and uniformly from `0..n`.
///
/// The pair is returned unordered; [`order_crossover_into`] applies the
/// tie-break when `start > end`.
///
/// # Panics
/// Panics if `n == 0`.
pub fn random_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let start = rng.random_range(0..n);
    let end = rng.random_range(0..n);
    (start, end)
}

// ============================================================================
// Mutation
// ============================================================================

/// With probability `probability`, swaps a random position with its
/// successor (wrapping from the last position to the first).
///
/// The probability draw happens first; the position is drawn only when the
/// mutation fires.
///
/// # Complexity
/// O(1)
pub fn adjacent_swap_mutation<R: Rng>(tour: &mut [usize], probability: f64, rng: &mut R) {
    let n = tour.len();
    if n == 0 {
        return;
    }
    if rng.random::<f64>() >= probability {
        return;
    }
    let i = rng.random_range(0..n);
    tour.swap(i, (i + 1) % n);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::is_permutation;
    use crate::random::create_rng;
    use proptest::prelude::*;

    const P1: [usize; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    const P2: [usize; 10] = [8, 7, 2, 4, 1, 5, 6, 3, 10, 9];

    // ---- OX Crossover ----

    #[test]
    fn test_ox_section_in_the_middle() {
        let child = order_crossover(&P1, &P2, 1, 4);
        assert_eq!(child, vec![8, 2, 3, 4, 7, 1, 5, 6, 10, 9]);
    }

    #[test]
    fn test_ox_reversed_cuts_swap_parent_roles() {
        let reversed = order_crossover(&P1, &P2, 4, 1);
        let swapped = order_crossover(&P2, &P1, 1, 4);
        assert_eq!(reversed, swapped);
        // Block [7, 2, 4] comes from parent 2, the rest in parent 1's order.
        assert_eq!(reversed, vec![1, 7, 2, 4, 3, 5, 6, 8, 9, 10]);
    }

    #[test]
    fn test_ox_empty_block_copies_parent2() {
        let child = order_crossover(&P1, &P2, 3, 3);
        assert_eq!(child, P2.to_vec());
    }

    #[test]
    fn test_ox_full_block_copies_parent1() {
        let child = order_crossover(&P1, &P2, 0, 10);
        assert_eq!(child, P1.to_vec());
    }

    #[test]
    fn test_ox_single_city() {
        assert_eq!(order_crossover(&[1], &[1], 0, 0), vec![1]);
    }

    #[test]
    fn test_ox_scratch_reuse_across_sizes() {
        let mut scratch = CrossoverScratch::new(3);
        let mut big = vec![0; 10];
        order_crossover_into(&mut big, &P1, &P2, 1, 4, &mut scratch);
        assert_eq!(big, vec![8, 2, 3, 4, 7, 1, 5, 6, 10, 9]);

        let mut small = vec![0; 3];
        order_crossover_into(&mut small, &[3, 1, 2], &[2, 3, 1], 0, 1, &mut scratch);
        assert_eq!(small, vec![3, 2, 1]);
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_ox_length_mismatch_panics() {
        order_crossover(&[1, 2, 3], &[1, 2], 0, 1);
    }

    #[test]
    #[should_panic(expected = "not permutations of the same cities")]
    fn test_ox_duplicate_in_parent2_panics() {
        order_crossover(&[1, 2, 3, 4], &[1, 1, 3, 4], 2, 3);
    }

    #[test]
    #[should_panic(expected = "repeated in parent tour")]
    fn test_ox_duplicate_in_block_panics() {
        order_crossover(&[2, 2, 3, 4], &[1, 2, 3, 4], 0, 2);
    }

    #[test]
    fn test_random_cuts_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_cuts(10, &mut rng);
            assert!(start < 10 && end < 10);
        }
    }

    // ---- Adjacent swap mutation ----

    #[test]
    fn test_mutation_probability_zero_never_changes() {
        let mut rng = create_rng(42);
        let mut tour: Vec<usize> = (1..=8).collect();
        for _ in 0..1000 {
            adjacent_swap_mutation(&mut tour, 0.0, &mut rng);
        }
        assert_eq!(tour, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_mutation_swaps_neighbours_only() {
        let mut rng = create_rng(42);
        let original: Vec<usize> = (1..=6).collect();
        let mut saw_wrap = false;
        for _ in 0..500 {
            let mut tour = original.clone();
            adjacent_swap_mutation(&mut tour, 1.0, &mut rng);

            let diff: Vec<usize> = (0..6).filter(|&i| tour[i] != original[i]).collect();
            assert_eq!(diff.len(), 2, "exactly two positions change: {tour:?}");
            let (a, b) = (diff[0], diff[1]);
            assert!(b == a + 1 || (a == 0 && b == 5), "not adjacent: {a}, {b}");
            saw_wrap |= a == 0 && b == 5;
        }
        assert!(saw_wrap, "last position should wrap to the first");
    }

    #[test]
    fn test_mutation_rate_is_respected() {
        let mut rng = create_rng(3);
        let original: Vec<usize> = (1..=10).collect();
        let trials = 20000;
        let mut mutated = 0;
        for _ in 0..trials {
            let mut tour = original.clone();
            adjacent_swap_mutation(&mut tour, 0.05, &mut rng);
            if tour != original {
                mutated += 1;
            }
        }
        let rate = mutated as f64 / trials as f64;
        assert!((0.04..0.06).contains(&rate), "rate {rate}");
    }

    #[test]
    fn test_mutation_single_and_empty() {
        let mut rng = create_rng(42);
        let mut one = vec![1];
        adjacent_swap_mutation(&mut one, 1.0, &mut rng);
        assert_eq!(one, vec![1]);

        let mut none: Vec<usize> = vec![];
        adjacent_swap_mutation(&mut none, 1.0, &mut rng);
        assert!(none.is_empty());
    }

    // ---- Properties ----

    fn parents_and_cuts() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, usize, usize)> {
        (1usize..40).prop_flat_map(|n| {
            let base: Vec<usize> = (1..=n).collect();
            (
                Just(base.clone()).prop_shuffle(),
                Just(base).prop_shuffle(),
                0..n,
                0..n,
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn ox_child_is_permutation((p1, p2, start, end) in parents_and_cuts()) {
            let child = order_crossover(&p1, &p2, start, end);
            prop_assert!(is_permutation(&child), "invalid child {:?}", child);
        }

        #[test]
        fn ox_keeps_block_and_parent2_order((p1, p2, start, end) in parents_and_cuts()) {
            let (lo, hi) = (start.min(end), start.max(end));
            let (donor_block, donor_order) = if start > end { (&p2, &p1) } else { (&p1, &p2) };
            let child = order_crossover(&p1, &p2, start, end);

            prop_assert_eq!(&child[lo..hi], &donor_block[lo..hi]);

            let outside: Vec<usize> = child[..lo].iter().chain(&child[hi..]).copied().collect();
            let expected: Vec<usize> = donor_order
                .iter()
                .copied()
                .filter(|c| !donor_block[lo..hi].contains(c))
                .collect();
            prop_assert_eq!(outside, expected);
        }

        #[test]
        fn ox_reversed_cuts_equal_swapped_parents((p1, p2, start, end) in parents_and_cuts()) {
            prop_assume!(start > end);
            prop_assert_eq!(
                order_crossover(&p1, &p2, start, end),
                order_crossover(&p2, &p1, end, start)
            );
        }

        #[test]
        fn mutation_preserves_permutation(
            tour in (1usize..30).prop_flat_map(|n| Just((1..=n).collect::<Vec<usize>>()).prop_shuffle()),
            seed in any::<u64>(),
        ) {
            let mut tour = tour;
            let mut rng = create_rng(seed);
            adjacent_swap_mutation(&mut tour, 1.0, &mut rng);
            prop_assert!(is_permutation(&tour));
        }
    }
}
