//! Coin-flip game: call the side, win 2x the bet

use super::{ensure_min_bet, WagerRng};
use tally_core::{Account, CoinFlipOutcome, CoinSide, Result};
use tracing::debug;

const WIN_MULTIPLIER: u64 = 2;

pub fn play_coin_flip<R: WagerRng>(
    account: &mut Account,
    choice: CoinSide,
    bet: u64,
    rng: &mut R,
) -> Result<CoinFlipOutcome> {
    ensure_min_bet(bet)?;
    account.ensure_funds(bet)?;

    let result = if rng.roll(2) == 0 {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    };

    let outcome = if choice == result {
        let payout = bet * WIN_MULTIPLIER;
        account.credit(payout);
        CoinFlipOutcome {
            won: true,
            result,
            delta: payout as i64,
        }
    } else {
        account.debit(bet)?;
        CoinFlipOutcome {
            won: false,
            result,
            delta: -(bet as i64),
        }
    };

    debug!(%choice, %result, bet, won = outcome.won, "Coin flip settled");
    Ok(outcome)
}
