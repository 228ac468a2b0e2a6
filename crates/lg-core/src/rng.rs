//! Seeded randomness for the layout pipeline
//!
//! A single [`LayoutRng`] is handed from stage to stage, so a layout is fully
//! determined by its configuration and seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream plus the seed it was started from
///
/// Serializes as the bare seed. Deserializing restarts the stream, so a
/// stored generator replays the layout it was created for.
#[derive(Debug, Clone)]
pub struct LayoutRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl Serialize for LayoutRng {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.seed)
    }
}

impl<'de> Deserialize<'de> for LayoutRng {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(LayoutRng::new)
    }
}

impl LayoutRng {
    pub fn new(seed: u64) -> Self {
        LayoutRng {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Pick a fresh seed from the thread rng, for unseeded runs
    pub fn from_entropy() -> Self {
        LayoutRng::new(rand::random())
    }

    /// Seed to pass to [`LayoutRng::new`] to replay this layout
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `0..bound`; an empty range yields 0
    pub fn below(&mut self, bound: u32) -> u32 {
        match bound {
            0 => 0,
            _ => self.stream.gen_range(0..bound),
        }
    }

    /// Uniform position in a collection of `len` items; 0 when empty
    pub fn index(&mut self, len: usize) -> usize {
        match len {
            0 => 0,
            _ => self.stream.gen_range(0..len),
        }
    }

    /// Uniform odd value in `lo..=hi`, used for lattice-aligned sizes and
    /// positions
    ///
    /// Bounds are pulled inward to the nearest odd values. A range with no
    /// odd value left collapses to the adjusted `lo`.
    pub fn odd_between(&mut self, lo: i32, hi: i32) -> i32 {
        let lo = lo | 1;
        let hi = if hi & 1 == 0 { hi - 1 } else { hi };
        if hi <= lo {
            return lo;
        }
        let steps = ((hi - lo) / 2) as u32;
        lo + 2 * self.below(steps + 1) as i32
    }

    /// Bernoulli draw; the probability is clamped to 0..=1 and NaN never hits
    pub fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.stream.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniformly picked element of `items`
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        match items.len() {
            0 => None,
            len => items.get(self.index(len)),
        }
    }

    /// Remove a uniformly picked element; order of the rest is not kept
    pub fn take<T>(&mut self, items: &mut Vec<T>) -> Option<T> {
        match items.len() {
            0 => None,
            len => {
                let at = self.index(len);
                Some(items.swap_remove(at))
            }
        }
    }
}

impl Default for LayoutRng {
    /// Unseeded generator, see [`LayoutRng::from_entropy`]
    fn default() -> Self {
        LayoutRng::from_entropy()
    }
}
