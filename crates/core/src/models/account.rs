//! Account model — a user's persisted economic state

use crate::errors::{Error, Result};
use crate::models::giftcard::RedeemedCard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's economic state: balance, claim history, and redemptions.
///
/// Created zeroed on first reference to a user id and mutated only through
/// the engine operations. `total_earned` and `total_spent` are
/// display counters that only ever grow; they are not a double-entry mirror
/// of `balance` (gift-card redemption debits the balance without touching
/// `total_spent`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Current spendable points
    #[serde(default)]
    pub balance: u64,
    /// Instant of the last successful daily claim (absent = never claimed)
    #[serde(default)]
    pub last_claim: Option<DateTime<Utc>>,
    /// Consecutive daily claims within the continuation window
    #[serde(default)]
    pub streak: u32,
    /// Lifetime points credited (claims, winnings, incoming transfers, refunds)
    #[serde(default)]
    pub total_earned: u64,
    /// Lifetime points debited (lost wagers, outgoing transfers)
    #[serde(default)]
    pub total_spent: u64,
    /// One record per gift-card redemption, cleared by conversion-back
    #[serde(default)]
    pub redeemed_cards: Vec<RedeemedCard>,
}

impl Account {
    /// Credit points to the balance, tracking the lifetime earned counter.
    pub fn credit(&mut self, amount: u64) {
        self.balance += amount;
        self.total_earned += amount;
    }

    /// Debit points from the balance, tracking the lifetime spent counter.
    ///
    /// Checks funds before mutating — the account is untouched on failure.
    pub fn debit(&mut self, amount: u64) -> Result<()> {
        self.try_withdraw(amount)?;
        self.total_spent += amount;
        Ok(())
    }

    /// Withdraw points without touching `total_spent` (gift-card
    /// redemption keeps the spent counter untouched).
    pub fn try_withdraw(&mut self, amount: u64) -> Result<()> {
        if self.balance < amount {
            return Err(Error::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Check that the balance covers `amount` without mutating.
    pub fn ensure_funds(&self, amount: u64) -> Result<()> {
        if self.balance < amount {
            return Err(Error::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_tracks_earned() {
        let mut account = Account::default();
        account.credit(150);
        assert_eq!(account.balance, 150);
        assert_eq!(account.total_earned, 150);
        assert_eq!(account.total_spent, 0);
    }

    #[test]
    fn test_debit_rejects_overdraw_without_mutation() {
        let mut account = Account {
            balance: 50,
            ..Default::default()
        };
        let err = account.debit(100).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientFunds {
                required: 100,
                available: 50
            }
        ));
        assert_eq!(account.balance, 50);
        assert_eq!(account.total_spent, 0);
    }

    #[test]
    fn test_withdraw_skips_spent_counter() {
        let mut account = Account {
            balance: 500,
            ..Default::default()
        };
        account.try_withdraw(500).unwrap();
        assert_eq!(account.balance, 0);
        assert_eq!(account.total_spent, 0);
    }

    #[test]
    fn test_account_json_round_trip() {
        let account = Account {
            balance: 320,
            last_claim: Some("2026-03-01T12:00:00Z".parse().unwrap()),
            streak: 4,
            total_earned: 900,
            total_spent: 580,
            redeemed_cards: vec![],
        };
        let bytes = serde_json::to_vec(&account).unwrap();
        let restored: Account = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(restored, account);
    }

    #[test]
    fn test_account_tolerates_missing_fields() {
        // Older snapshots may predate some fields.
        let account: Account = serde_json::from_str(r#"{"balance": 10}"#).unwrap();
        assert_eq!(account.balance, 10);
        assert_eq!(account.last_claim, None);
        assert!(account.redeemed_cards.is_empty());
    }
}
