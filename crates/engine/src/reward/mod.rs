//! Reward Engine — the daily-claim state machine
//!
//! A claim is classified purely from the elapsed time since the last one:
//! under 24h it is on cooldown, between 24h and 36h (inclusive) the streak
//! continues, past 36h the streak resets. The reward scales with the
//! streak up to a configured cap.

use chrono::{DateTime, Duration, Utc};
use tally_core::{Account, ClaimOutcome, ClaimStatus, Error, GlobalSettings, Result};
use tracing::debug;

/// Cooldown before the next claim becomes eligible
const CLAIM_COOLDOWN_HOURS: i64 = 24;
/// Upper bound of the streak continuation window
const STREAK_WINDOW_HOURS: i64 = 36;
/// Multiplier bonus per consecutive claim
const STREAK_STEP: f64 = 0.1;

/// Claim eligibility, derived from `last_claim` relative to now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimState {
    NeverClaimed,
    OnCooldown { next_claim: DateTime<Utc> },
    StreakContinues,
    StreakReset,
}

/// Classify a claim attempt. Pure function of the elapsed time.
pub fn classify(last_claim: Option<DateTime<Utc>>, now: DateTime<Utc>) -> ClaimState {
    let Some(last) = last_claim else {
        return ClaimState::NeverClaimed;
    };

    let elapsed = now - last;
    if elapsed < Duration::hours(CLAIM_COOLDOWN_HOURS) {
        ClaimState::OnCooldown {
            next_claim: last + Duration::hours(CLAIM_COOLDOWN_HOURS),
        }
    } else if elapsed <= Duration::hours(STREAK_WINDOW_HOURS) {
        ClaimState::StreakContinues
    } else {
        ClaimState::StreakReset
    }
}

/// Streak multiplier, capped by settings
pub fn multiplier(streak: u32, settings: &GlobalSettings) -> f64 {
    (1.0 + streak as f64 * STREAK_STEP).min(settings.max_streak_multiplier)
}

/// Reward for a given streak: multiplier math stays floating point, the
/// final payout is always floored to an integer.
fn reward_for(streak: u32, settings: &GlobalSettings) -> (u64, f64) {
    let multiplier = multiplier(streak, settings);
    let reward = (settings.daily_reward as f64 * multiplier).floor() as u64;
    (reward, multiplier)
}

/// Apply a daily claim.
///
/// On cooldown the account is untouched and the error carries the instant
/// the next claim becomes eligible. A successful claim mutates state on
/// every call — callers must not retry blindly.
pub fn apply_claim(
    account: &mut Account,
    settings: &GlobalSettings,
    now: DateTime<Utc>,
) -> Result<ClaimOutcome> {
    let streak = match classify(account.last_claim, now) {
        ClaimState::OnCooldown { next_claim } => {
            return Err(Error::Cooldown { next_claim });
        }
        ClaimState::StreakContinues => account.streak + 1,
        ClaimState::NeverClaimed | ClaimState::StreakReset => 1,
    };

    let (reward, multiplier) = reward_for(streak, settings);
    account.streak = streak;
    account.last_claim = Some(now);
    account.credit(reward);
    debug!(reward, streak, "Daily claim applied");

    Ok(ClaimOutcome {
        reward,
        streak,
        multiplier,
    })
}

/// Non-mutating eligibility probe for display.
///
/// `projected_reward` is what a claim would pay at the first eligible
/// instant (now, or the end of the cooldown — both continue the streak).
pub fn claim_status(account: &Account, settings: &GlobalSettings, now: DateTime<Utc>) -> ClaimStatus {
    let (can_claim, next_claim, next_streak) = match classify(account.last_claim, now) {
        ClaimState::OnCooldown { next_claim } => (false, Some(next_claim), account.streak + 1),
        ClaimState::StreakContinues => (true, None, account.streak + 1),
        ClaimState::NeverClaimed | ClaimState::StreakReset => (true, None, 1),
    };

    let seconds_remaining = next_claim
        .map(|at| (at - now).num_seconds().max(0))
        .unwrap_or(0);
    let (projected_reward, _) = reward_for(next_streak, settings);

    ClaimStatus {
        can_claim,
        streak: account.streak,
        next_claim,
        seconds_remaining,
        projected_reward,
    }
}
