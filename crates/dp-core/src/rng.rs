//! Deterministic random stream derived from the game seed.
//!
//! Every randomized sub-operation (a roll phase, a group reroll, a single
//! reroll) gets a fresh generator seeded from the seed text plus a counter
//! that only ever increases. Replaying the same actions on the same seed
//! therefore reproduces every die value.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::die::DieColor;
use crate::seed::Seed;

/// Seed-derived generator factory with a monotonic draw counter.
#[derive(Debug, Clone)]
pub struct RollStream {
    seed: Seed,
    counter: u64,
}

impl RollStream {
    /// Create a stream for a seed with the counter at zero.
    pub fn new(seed: Seed) -> Self {
        Self { seed, counter: 0 }
    }

    /// The seed this stream derives from.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// How many sub-operation generators have been handed out.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Generator used to lay out the initial pool. Does not touch the counter.
    pub fn initial(&self) -> StdRng {
        StdRng::seed_from_u64(fold(self.seed.as_str().bytes()))
    }

    /// Generator for the next randomized sub-operation.
    pub fn next_rng(&mut self) -> StdRng {
        let counter = self.counter.to_string();
        let key = fold(self.seed.as_str().bytes().chain(counter.bytes()));
        self.counter += 1;
        StdRng::seed_from_u64(key)
    }
}

/// Draw a die face.
pub fn roll_value<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(1..=6)
}

/// Draw a color uniformly from the palette.
pub fn roll_color<R: Rng + ?Sized>(rng: &mut R) -> DieColor {
    DieColor::ALL[rng.random_range(0..DieColor::ALL.len())]
}

/// FNV-1a over the key bytes.
fn fold(bytes: impl Iterator<Item = u8>) -> u64 {
    bytes.fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}
