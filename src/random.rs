//! Seedable random sources and the permutation utility.
//!
//! Every random draw in the solver comes from an explicit generator. The
//! loop never shares one generator between child slots: each slot of each
//! generation gets its own stream derived from the master seed, which makes
//! sequential and parallel runs consume identical random sequences.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a seeded generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derives the seed of an independent stream for one child slot.
///
/// The mapping is deterministic in `(master, generation, slot)` and mixes
/// all three through SplitMix64 so neighbouring slots get unrelated streams.
pub fn stream_seed(master: u64, generation: usize, slot: usize) -> u64 {
    let mut h = splitmix64(master);
    h = splitmix64(h ^ generation as u64);
    splitmix64(h ^ (slot as u64).rotate_left(32))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Returns a uniformly shuffled tour over cities `1..=city_count`.
pub fn random_tour<R: Rng>(city_count: usize, rng: &mut R) -> Vec<usize> {
    let mut tour = vec![0; city_count];
    shuffle_into(&mut tour, rng);
    tour
}

/// Overwrites `tour` with a uniformly shuffled permutation of `1..=tour.len()`.
pub fn shuffle_into<R: Rng>(tour: &mut [usize], rng: &mut R) {
    for (slot, city) in tour.iter_mut().zip(1..) {
        *slot = city;
    }
    tour.shuffle(rng);
}
