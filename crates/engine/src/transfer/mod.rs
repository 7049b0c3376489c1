//! Transfer & Conversion Engine — moving points between accounts and
//! in and out of gift cards
//!
//! Every operation validates fully before mutating anything, so a failure
//! never leaves a partial result visible.

use tally_core::{ConvertOutcome, Error, RedeemedCard, Result};
use tally_persistence::LedgerStore;
use tracing::{debug, info};

/// Refund rate for bulk conversion-back
const CONVERT_BACK_RATE: f64 = 0.8;

/// Move `amount` points from `sender` to `recipient`.
///
/// Both sides settle together or not at all: the debit is checked (and
/// fails) before either account is touched.
pub fn transfer(
    store: &mut LedgerStore,
    sender: &str,
    recipient: &str,
    amount: u64,
) -> Result<()> {
    if sender == recipient {
        return Err(Error::Validation(
            "cannot transfer points to yourself".to_string(),
        ));
    }
    if amount == 0 {
        return Err(Error::Validation(
            "transfer amount must be positive".to_string(),
        ));
    }

    store.get_or_create(sender).debit(amount)?;
    store.get_or_create(recipient).credit(amount);

    info!(sender, recipient, amount, "Transfer settled");
    Ok(())
}

/// Redeem a catalog gift card against the account balance.
///
/// The card's cost leaves the balance but deliberately does not move
/// `total_spent`; the redeemed-card entry itself records the outflow.
pub fn redeem_gift_card(store: &mut LedgerStore, user: &str, kind: &str) -> Result<RedeemedCard> {
    let cost = store
        .settings()
        .gift_card(kind)
        .ok_or_else(|| Error::UnknownCard(kind.to_string()))?
        .cost;

    let account = store.get_or_create(user);
    account.try_withdraw(cost)?;
    let card = RedeemedCard {
        kind: kind.to_string(),
        cost,
    };
    account.redeemed_cards.push(card.clone());

    info!(user, kind, cost, "Gift card redeemed");
    Ok(card)
}

/// Convert every redeemed card back to points at the haircut rate.
///
/// Bulk and all-or-nothing: either the whole list converts or (when it is
/// empty) nothing happens.
pub fn convert_back(store: &mut LedgerStore, user: &str) -> Result<ConvertOutcome> {
    let account = store.get_or_create(user);
    if account.redeemed_cards.is_empty() {
        return Err(Error::NothingToConvert);
    }

    let total: u64 = account.redeemed_cards.iter().map(|card| card.cost).sum();
    let refund = (total as f64 * CONVERT_BACK_RATE).floor() as u64;

    account.redeemed_cards.clear();
    account.credit(refund);

    debug!(user, total, refund, "Gift cards converted back");
    Ok(ConvertOutcome { refund })
}
