use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seed of the default tie-break generator, fixed so that a single histogram's
/// trims are reproducible from one run to the next.
pub const DEFAULT_SEED: u64 = 31183;

/// Decides what happens to bins separated by exactly the trim cutoff.
///
/// A trim pass always merges the first cutoff tie it meets, so `merge_tie` is only
/// consulted from the second tie on. `tie_index` counts the cutoff ties seen so far
/// in the current pass, starting at 0. Returning `true` merges the pair, `false` keeps
/// both bins.
///
/// Merged histograms are bit-reproducible across processes only if every
/// participant uses the same strategy, the same seed and the same merge order.
pub trait TieBreaker: std::fmt::Debug {
    fn merge_tie(&mut self, tie_index: usize) -> bool;
}

/// Fair coin flip drawn from a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct CoinFlip {
    rng: StdRng,
}

impl CoinFlip {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for CoinFlip {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl TieBreaker for CoinFlip {
    fn merge_tie(&mut self, _tie_index: usize) -> bool {
        self.rng.gen_bool(0.5)
    }
}
