//! Guess-a-number game: pick 1-6, win 5x the bet on a match

use super::{ensure_min_bet, WagerRng};
use tally_core::{Account, Error, GuessOutcome, Result};
use tracing::debug;

const GUESS_MIN: u8 = 1;
const GUESS_MAX: u8 = 6;
const WIN_MULTIPLIER: u64 = 5;

pub fn play_guess<R: WagerRng>(
    account: &mut Account,
    guess: u8,
    bet: u64,
    rng: &mut R,
) -> Result<GuessOutcome> {
    if !(GUESS_MIN..=GUESS_MAX).contains(&guess) {
        return Err(Error::Validation(format!(
            "guess must be between {GUESS_MIN} and {GUESS_MAX}"
        )));
    }
    ensure_min_bet(bet)?;
    account.ensure_funds(bet)?;

    let result = rng.roll(u32::from(GUESS_MAX)) as u8 + 1;
    let outcome = if guess == result {
        let payout = bet * WIN_MULTIPLIER;
        account.credit(payout);
        GuessOutcome {
            won: true,
            result,
            delta: payout as i64,
        }
    } else {
        account.debit(bet)?;
        GuessOutcome {
            won: false,
            result,
            delta: -(bet as i64),
        }
    };

    debug!(guess, result, bet, won = outcome.won, "Guess settled");
    Ok(outcome)
}
