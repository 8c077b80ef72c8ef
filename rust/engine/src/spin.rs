use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::wheel::{pocket_at_index, Pocket, POCKET_COUNT};

/// Draw one pocket uniformly from any injected random source.
///
/// The draw picks a uniform index into the physical layout, so every pocket
/// has probability 1/37 regardless of where it sits on the wheel.
pub fn draw_pocket<R: Rng + ?Sized>(rng: &mut R) -> Pocket {
    pocket_at_index(rng.random_range(0..POCKET_COUNT))
}

/// Seeded outcome source owned by one session.
///
/// ```
/// use croupier_engine::spin::SpinGenerator;
///
/// let mut a = SpinGenerator::new_with_seed(7);
/// let mut b = SpinGenerator::new_with_seed(7);
/// assert_eq!(a.draw(), b.draw());
/// ```
#[derive(Debug, Clone)]
pub struct SpinGenerator {
    rng: ChaCha20Rng,
    seed: u64,
}

impl SpinGenerator {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy; the chosen seed is still recorded for replay.
    pub fn from_entropy() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn draw(&mut self) -> Pocket {
        draw_pocket(&mut self.rng)
    }

    /// Restart the stream from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self.seed = seed;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
