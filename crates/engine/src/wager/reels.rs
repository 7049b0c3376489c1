//! Weighted-reel slot game: fixed bet, three independent draws
//!
//! Symbols are drawn from the relative-weight table on [`ReelSymbol`],
//! normalized by the total weight. Three of a kind pays the symbol's
//! triple multiplier, exactly two of a kind pays 1.5x, anything else
//! loses the bet. The gross payout is floored before crediting.

use super::WagerRng;
use tally_core::{Account, ReelSymbol, ReelsOutcome, Result, REEL_SYMBOLS};
use tracing::debug;

/// Fixed bet for every spin
pub const REEL_BET: u64 = 30;
/// Multiplier when exactly two reels match
const TWO_MATCH_MULTIPLIER: f64 = 1.5;

/// One weighted draw: walk the cumulative weights with a single roll over
/// the total, so a scripted source can force any symbol.
fn draw_symbol<R: WagerRng>(rng: &mut R) -> ReelSymbol {
    let total: u32 = REEL_SYMBOLS.iter().map(|s| s.weight()).sum();
    let mut roll = rng.roll(total);
    for symbol in REEL_SYMBOLS {
        if roll < symbol.weight() {
            return symbol;
        }
        roll -= symbol.weight();
    }
    // roll < total by the WagerRng contract; a misbehaving source lands
    // on the rarest symbol rather than panicking mid-settlement
    ReelSymbol::Clover
}

/// Payout multiplier for a spin result
pub fn payout_multiplier(reels: [ReelSymbol; 3]) -> f64 {
    let [a, b, c] = reels;
    if a == b && b == c {
        a.triple_multiplier()
    } else if a == b || b == c || a == c {
        TWO_MATCH_MULTIPLIER
    } else {
        0.0
    }
}

pub fn play_reels<R: WagerRng>(account: &mut Account, rng: &mut R) -> Result<ReelsOutcome> {
    account.ensure_funds(REEL_BET)?;

    let reels = [draw_symbol(rng), draw_symbol(rng), draw_symbol(rng)];
    let multiplier = payout_multiplier(reels);

    let delta = if multiplier > 0.0 {
        let gross = (REEL_BET as f64 * multiplier).floor() as u64;
        // Net credit of gross minus the stake; the spent counter only
        // moves on a losing spin.
        account.credit(gross);
        account.try_withdraw(REEL_BET)?;
        gross as i64 - REEL_BET as i64
    } else {
        account.debit(REEL_BET)?;
        -(REEL_BET as i64)
    };

    debug!(
        reels = ?reels,
        multiplier,
        delta,
        "Reels settled"
    );

    Ok(ReelsOutcome {
        reels,
        multiplier,
        delta,
    })
}
