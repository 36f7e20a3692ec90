// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Seedable uniform random numbers.
//!
//! Two independent streams are provided: [`RandomGenerator`] for general
//! purpose 32-bit values and floats, and [`GuidGenerator`] for the wider
//! 64-bit identifier space. Both are plain values owned by the caller.
//!
//! For convenience each thread also owns one default instance of each, reached
//! through the free functions at the bottom of this module. Those instances are
//! never shared between threads, so no locking is involved.

use std::cell::RefCell;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A seedable generator of uniformly distributed 32-bit integers and floats.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    rng: ChaCha8Rng,
}

impl RandomGenerator {
    /// Creates a generator seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates a generator with a fixed seed. Equal seeds yield equal sequences.
    pub fn from_seed(seed: u32) -> Self {
        log::debug!("Seeding random generator with {seed}");
        Self {
            rng: ChaCha8Rng::seed_from_u64(u64::from(seed)),
        }
    }

    /// Restarts the sequence from `seed`.
    pub fn reseed(&mut self, seed: u32) {
        log::debug!("Reseeding random generator with {seed}");
        self.rng = ChaCha8Rng::seed_from_u64(u64::from(seed));
    }

    /// Returns the next raw 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    /// Returns a value uniformly distributed in `[from_incl, to_incl]`.
    ///
    /// The range must not be empty (`from_incl <= to_incl`); in release builds
    /// an empty range yields `from_incl`.
    pub fn range_u32(&mut self, from_incl: u32, to_incl: u32) -> u32 {
        debug_assert!(from_incl <= to_incl, "empty random range");
        if from_incl >= to_incl {
            return from_incl;
        }
        self.rng.gen_range(from_incl..=to_incl)
    }

    /// Returns a float uniformly distributed in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Returns a float uniformly distributed in `[from, to)`.
    ///
    /// The range must not be empty (`from < to`); in release builds an empty
    /// range yields `from`.
    pub fn range_f32(&mut self, from: f32, to: f32) -> f32 {
        debug_assert!(from <= to, "empty random range");
        if from >= to {
            return from;
        }
        self.rng.gen_range(from..to)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// A generator of 64-bit identifiers.
///
/// Kept apart from [`RandomGenerator`] so that drawing identifiers never
/// perturbs a seeded gameplay sequence.
#[derive(Debug, Clone)]
pub struct GuidGenerator {
    rng: ChaCha8Rng,
}

impl GuidGenerator {
    /// Creates a generator seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates a generator with a fixed 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        log::debug!("Seeding guid generator with {seed}");
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns the next 64-bit identifier.
    #[inline]
    pub fn next_guid(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

impl Default for GuidGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

thread_local! {
    static GENERATOR: RefCell<RandomGenerator> = RefCell::new(RandomGenerator::from_entropy());
    static GUID_GENERATOR: RefCell<GuidGenerator> = RefCell::new(GuidGenerator::from_entropy());
}

/// Reseeds the calling thread's default generator.
pub fn seed_random(seed: u32) {
    GENERATOR.with(|g| g.borrow_mut().reseed(seed));
}

/// Returns the next raw 32-bit value from the calling thread's generator.
pub fn random_u32() -> u32 {
    GENERATOR.with(|g| g.borrow_mut().next_u32())
}

/// Returns a value in `[from_incl, to_incl]` from the calling thread's generator.
pub fn random_range(from_incl: u32, to_incl: u32) -> u32 {
    GENERATOR.with(|g| g.borrow_mut().range_u32(from_incl, to_incl))
}

/// Returns a float in `[0, 1)` from the calling thread's generator.
pub fn random_f32() -> f32 {
    GENERATOR.with(|g| g.borrow_mut().next_f32())
}

/// Returns a float in `[from, to)` from the calling thread's generator.
pub fn random_f32_range(from: f32, to: f32) -> f32 {
    GENERATOR.with(|g| g.borrow_mut().range_f32(from, to))
}

/// Returns a fresh 64-bit identifier from the calling thread's guid generator.
pub fn random_guid() -> u64 {
    GUID_GENERATOR.with(|g| g.borrow_mut().next_guid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomGenerator::from_seed(7);
        let mut b = RandomGenerator::from_seed(7);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut g = RandomGenerator::from_seed(3);
        let first: Vec<u32> = (0..4).map(|_| g.next_u32()).collect();
        g.reseed(3);
        let second: Vec<u32> = (0..4).map(|_| g.next_u32()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ranges_are_respected() {
        let mut g = RandomGenerator::from_seed(11);
        for _ in 0..1000 {
            let v = g.range_u32(5, 9);
            assert!((5..=9).contains(&v));
            let f = g.range_f32(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&f));
            let u = g.next_f32();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_inclusive_upper_bound_is_reachable() {
        let mut g = RandomGenerator::from_seed(1);
        let hit_top = (0..200).any(|_| g.range_u32(0, 1) == 1);
        let hit_bottom = (0..200).any(|_| g.range_u32(0, 1) == 0);
        assert!(hit_top && hit_bottom);
    }

    #[test]
    fn test_degenerate_range() {
        let mut g = RandomGenerator::from_seed(1);
        assert_eq!(g.range_u32(4, 4), 4);
        assert_eq!(g.range_f32(2.5, 2.5), 2.5);
    }

    #[test]
    fn test_guid_stream_is_independent() {
        let mut a = GuidGenerator::from_seed(99);
        let mut b = GuidGenerator::from_seed(99);
        assert_eq!(a.next_guid(), b.next_guid());
        assert_ne!(a.next_guid(), a.next_guid());
    }

    #[test]
    fn test_thread_local_functions() {
        seed_random(42);
        let first = random_u32();
        seed_random(42);
        assert_eq!(random_u32(), first);
        assert!((10..=20).contains(&random_range(10, 20)));
        assert!((0.0..1.0).contains(&random_f32()));
        assert!((1.0..2.0).contains(&random_f32_range(1.0, 2.0)));
        let _ = random_guid();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty random range")]
    fn test_inverted_u32_range_panics_in_debug() {
        let _ = RandomGenerator::from_seed(1).range_u32(5, 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "empty random range")]
    fn test_inverted_f32_range_panics_in_debug() {
        let _ = RandomGenerator::from_seed(1).range_f32(2.0, 1.0);
    }
}
