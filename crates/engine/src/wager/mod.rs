//! Wager Engine — chance games over an injected randomness source
//!
//! Every game follows the same sequence: validate inputs, check funds,
//! draw, settle. Validation always precedes the balance check, so a
//! malformed request on a broke account reports the malformed input.

mod coinflip;
mod guess;
mod reels;

pub use coinflip::play_coin_flip;
pub use guess::play_guess;
pub use reels::{payout_multiplier, play_reels, REEL_BET};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tally_core::{Error, Result};

/// Minimum bet for the guess and coin-flip games
pub const MIN_BET: u64 = 10;

/// Uniform randomness source for the wager games.
///
/// Injected rather than global so game logic is deterministic under test.
pub trait WagerRng {
    /// Uniform draw in `[0, bound)`
    fn roll(&mut self, bound: u32) -> u32;
}

/// Production source backed by `rand::rngs::StdRng`
pub struct StdWagerRng(StdRng);

impl StdWagerRng {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Fixed seed, for reproducible sequences
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl WagerRng for StdWagerRng {
    fn roll(&mut self, bound: u32) -> u32 {
        self.0.gen_range(0..bound)
    }
}

fn ensure_min_bet(bet: u64) -> Result<()> {
    if bet < MIN_BET {
        return Err(Error::Validation(format!(
            "minimum bet is {MIN_BET} points"
        )));
    }
    Ok(())
}
