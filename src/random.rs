//! Random number generation for Monte Carlo trials.
//!
//! # Reproducibility
//!
//! Every trial owns its own generator, built by [`create_rng`] from
//! [`trial_seed`]. For a fixed base seed the sequence of sites each trial
//! opens does not depend on how trials are scheduled across threads.

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++). The sequence is deterministic for a
/// given seed on the same platform.
///
/// # Examples
/// ```
/// use percolation::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Draws a base seed from the operating-system-seeded thread generator.
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}

/// Derives the seed for trial `index` from a base seed: `base ^ mix(index)`.
///
/// `mix` is the SplitMix64 output function, a bijection on `u64`, so
/// distinct indices always give distinct seeds for the same base.
///
/// Reference: Steele, Lea & Flood (2014), "Fast Splittable Pseudorandom
/// Number Generators", OOPSLA.
pub fn trial_seed(base: u64, index: u64) -> u64 {
    base ^ splitmix64(index)
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Picks a site `(row, col)` uniformly from `[1, n] x [1, n]`.
///
/// # Panics
/// Panics if `n == 0`.
///
/// # Examples
/// ```
/// use percolation::random::{create_rng, random_site};
/// let mut rng = create_rng(7);
/// let (row, col) = random_site(4, &mut rng);
/// assert!((1..=4).contains(&row) && (1..=4).contains(&col));
/// ```
pub fn random_site<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    (rng.random_range(1..=n), rng.random_range(1..=n))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let vals1: Vec<f64> = (0..10).map(|_| rng1.random()).collect();
        let vals2: Vec<f64> = (0..10).map(|_| rng2.random()).collect();
        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_trial_seed_deterministic_and_distinct() {
        assert_eq!(trial_seed(9, 3), trial_seed(9, 3));
        let seeds: HashSet<u64> = (0..1000).map(|i| trial_seed(9, i)).collect();
        assert_eq!(seeds.len(), 1000);
        assert_ne!(trial_seed(0, 0), trial_seed(1, 0));
    }

    #[test]
    fn test_trial_seed_xors_base() {
        for index in [0, 1, 17, u64::MAX] {
            assert_eq!(trial_seed(0, index), splitmix64(index));
            assert_eq!(trial_seed(0xDEAD_BEEF, index), 0xDEAD_BEEF ^ splitmix64(index));
        }
        // First output of SplitMix64 seeded with 0.
        assert_eq!(splitmix64(0), 0xE220_A839_7B1D_CDAF);
    }

    #[test]
    fn test_random_site_single_cell() {
        let mut rng = create_rng(1);
        for _ in 0..20 {
            assert_eq!(random_site(1, &mut rng), (1, 1));
        }
    }

    #[test]
    fn test_random_site_covers_grid() {
        let mut rng = create_rng(5);
        let seen: HashSet<(usize, usize)> = (0..2000).map(|_| random_site(3, &mut rng)).collect();
        assert_eq!(seen.len(), 9);
        assert!(seen.iter().all(|&(r, c)| (1..=3).contains(&r) && (1..=3).contains(&c)));
    }
}
