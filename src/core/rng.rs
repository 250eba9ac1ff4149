//! Deterministic Random Number Generator
//!
//! Uses Xorshift128+ algorithm for fast, high-quality, deterministic randomness.
//! Given the same seed, produces identical sequence on all platforms.
//!
//! Gameplay code never talks to [`DeterministicRng`] directly; it draws through
//! the [`RandomSource`] trait so tests can substitute scripted sequences.

use serde::{Serialize, Deserialize};

/// Source of randomness for spawn decisions.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Uniform integer in `[min, max]` (inclusive on both ends).
    fn next_int_range(&mut self, min: i32, max: i32) -> i32;

    /// Uniform index in `[0, len)`. Returns 0 when `len` is 0.
    fn next_index(&mut self, len: usize) -> usize;

    /// Bernoulli trial with success probability `probability`.
    #[inline]
    fn chance(&mut self, probability: f32) -> bool {
        self.next_unit() < probability
    }

    /// Select a random element from a slice.
    fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if slice.is_empty() {
            None
        } else {
            Some(&slice[self.next_index(slice.len())])
        }
    }
}

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// # Example
///
/// ```
/// use superkid::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Simple modulo - slight bias for very large max, but acceptable
        (self.next_u64() % max as u64) as u32
    }

    /// Generate a random f32 in range [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // 24 mantissa bits -> every value exactly representable
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }

    /// Current internal state, for state hashing.
    pub fn state(&self) -> [u64; 2] {
        self.state
    }
}

impl RandomSource for DeterministicRng {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.next_f32()
    }

    #[inline]
    fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let range = (max - min + 1) as u32;
        min + self.next_int(range) as i32
    }

    #[inline]
    fn next_index(&mut self, len: usize) -> usize {
        self.next_int(len as u32) as usize
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(54321);

        // Very unlikely to match
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_next_int_range() {
        let mut rng = DeterministicRng::new(5678);

        for _ in 0..1000 {
            let val = rng.next_int_range(250, 420);
            assert!((250..=420).contains(&val));
        }

        // Edge case: min = max
        assert_eq!(rng.next_int_range(5, 5), 5);
    }

    #[test]
    fn test_next_unit_range() {
        let mut rng = DeterministicRng::new(999);
        for _ in 0..1000 {
            let f = rng.next_unit();
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = DeterministicRng::new(4242);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = DeterministicRng::new(31);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());

        let items = [-2, -1, 1, 2];
        for _ in 0..100 {
            let picked = rng.choose(&items).copied();
            assert!(matches!(picked, Some(-2 | -1 | 1 | 2)));
        }
    }

    #[test]
    fn test_state_tracks_draws() {
        let mut rng1 = DeterministicRng::new(5555);
        let mut rng2 = DeterministicRng::new(5555);
        assert_eq!(rng1.state(), rng2.state());

        rng1.next_u64();
        assert_ne!(rng1.state(), rng2.state());

        rng2.next_u64();
        assert_eq!(rng1.state(), rng2.state());
    }
}
