//! Seeded randomness.
//!
//! Every layer takes the random source as an explicit `&mut GameRng`
//! argument. There is no global generator, so identical seeds replay
//! identical runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The random source used for generation, combat rolls, AI choices and loot.
pub type GameRng = ChaCha8Rng;

/// Creates a generator from a 64-bit seed.
#[must_use]
pub fn seeded(seed: u64) -> GameRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Returns true with probability `percent`/100.
///
/// Values of 0 never succeed and values of 100 or more always do. Exactly one
/// number is drawn either way, so the stream position does not depend on the
/// chance.
pub fn roll_percent(rng: &mut GameRng, percent: u32) -> bool {
    rng.gen_range(0..100) < percent
}
