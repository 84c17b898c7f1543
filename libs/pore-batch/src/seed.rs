//! # Seeding
//!
//! Every model attempt samples on its own ChaCha stream. The stream seed is
//! read from a ChaCha generator keyed by the run's base seed: the model
//! ordinal selects the generator's stream and the attempt number its word
//! position, so a slot's layouts do not depend on the order slots run in.

use log::info;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaChaRng;

/// 32-bit words consumed by one derived seed.
const WORDS_PER_SEED: u128 = 2;

/// Seed of the random stream for one attempt of one model.
///
/// Ordinals are 1-based; attempts count from 0.
///
/// # Example
///
/// ```rust
/// use pore_batch::seed::derive_seed;
///
/// assert_eq!(derive_seed(42, 1, 0), derive_seed(42, 1, 0));
/// assert_ne!(derive_seed(42, 1, 0), derive_seed(42, 2, 0));
/// assert_ne!(derive_seed(42, 1, 0), derive_seed(42, 1, 1));
/// ```
pub fn derive_seed(base: u64, ordinal: usize, attempt: usize) -> u64 {
    let mut rng = ChaChaRng::seed_from_u64(base);
    rng.set_stream(ordinal as u64);
    rng.set_word_pos(attempt as u128 * WORDS_PER_SEED);
    rng.next_u64()
}

/// Returns the configured base seed, or draws and logs a fresh one.
pub fn resolve_base_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            info!("drew base seed {seed} (pass it back to reproduce this run)");
            seed
        }
    }
}
