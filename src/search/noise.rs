use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::BoardState;
use crate::search::zobrist;

/// Upper bound (exclusive) of the tie-break perturbation.
pub const NOISE_SPAN: f64 = 0.1;

/// Tie-break perturbation for the noisy heuristics. Must return a value in
/// `[0, NOISE_SPAN)` and must be a pure function of the position for the
/// lifetime of one search, otherwise pruned and unpruned searches disagree.
pub trait NoiseSource: Send + Sync {
    fn sample(&self, state: &BoardState) -> f64;
}

/// Seeded noise keyed by the position's Zobrist hash.
#[derive(Debug, Clone, Copy)]
pub struct SeededNoise {
    seed: u64,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self { Self { seed } }

    /// Fresh, non-reproducible seed.
    pub fn from_entropy() -> Self { Self { seed: rand::random() } }

    pub fn seed(&self) -> u64 { self.seed }
}

impl NoiseSource for SeededNoise {
    fn sample(&self, state: &BoardState) -> f64 {
        let key = zobrist::splitmix64(zobrist::compute(state) ^ self.seed);
        let mut rng = SmallRng::seed_from_u64(key);
        rng.gen_range(0.0..NOISE_SPAN)
    }
}

/// No perturbation at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl NoiseSource for Silent {
    fn sample(&self, _state: &BoardState) -> f64 { 0.0 }
}
