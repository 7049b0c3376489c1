//! Economy facade — the single entry point the dispatch layer talks to
//!
//! Owns the ledger store behind an async lock, the injected clock and
//! randomness, and the autosave handle. Every balance-mutating operation
//! releases the store lock before firing the save trigger, so persistence
//! never blocks request handling.

use crate::clock::{Clock, SystemClock};
use crate::wager::{StdWagerRng, WagerRng};
use crate::{reward, transfer, wager};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tally_core::{
    Account, ClaimOutcome, ClaimStatus, CoinFlipOutcome, CoinSide, ConvertOutcome, GlobalSettings,
    GuessOutcome, ReelsOutcome, Result, UserId,
};
use tally_persistence::{
    spawn_autosave, AutosaveHandle, FileBackend, LedgerStore, DEFAULT_SAVE_INTERVAL,
};
use tokio::sync::RwLock;
use tracing::info;

/// The economy service: one per process, passed by reference to the
/// dispatch layer. No global state — clock, randomness, and persistence
/// are all injected, so the whole surface is deterministic under test.
pub struct Economy<C: Clock = SystemClock, R: WagerRng = StdWagerRng> {
    store: Arc<RwLock<LedgerStore>>,
    clock: C,
    rng: Mutex<R>,
    autosave: Option<AutosaveHandle>,
}

impl Economy {
    /// Economy over an existing store, with the wall clock and an
    /// entropy-seeded randomness source.
    pub fn new(store: Arc<RwLock<LedgerStore>>) -> Self {
        Self::with_parts(store, SystemClock, StdWagerRng::from_entropy())
    }

    /// Restore the snapshot at `path` (or start empty) and spawn the
    /// autosave task against the same file.
    pub async fn open(path: impl Into<PathBuf>, settings: GlobalSettings) -> Self {
        let backend = FileBackend::new(path.into());
        let store = Arc::new(RwLock::new(backend.load_or_empty(settings).await));
        let autosave = spawn_autosave(store.clone(), backend, DEFAULT_SAVE_INTERVAL);

        let mut economy = Self::new(store);
        economy.autosave = Some(autosave);
        economy
    }
}

impl<C: Clock, R: WagerRng> Economy<C, R> {
    /// Economy with an injected clock and randomness source.
    pub fn with_parts(store: Arc<RwLock<LedgerStore>>, clock: C, rng: R) -> Self {
        Self {
            store,
            clock,
            rng: Mutex::new(rng),
            autosave: None,
        }
    }

    /// Hand persistence duties to an externally spawned autosave task.
    pub fn attach_autosave(&mut self, handle: AutosaveHandle) {
        self.autosave = Some(handle);
    }

    /// Stop the autosave task, flushing the final state to disk.
    pub async fn shutdown(&mut self) {
        if let Some(autosave) = self.autosave.take() {
            autosave.shutdown().await;
        }
    }

    fn request_save(&self) {
        if let Some(autosave) = &self.autosave {
            autosave.trigger();
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }

    // ─── Accounts ────────────────────────────────────────────────────

    /// Current record for `user`, created zeroed on first reference.
    pub async fn get_or_create_account(&self, user: &str) -> Account {
        self.store.write().await.get_or_create(user).clone()
    }

    /// Read-only view; `None` if the user has never been seen.
    pub async fn account(&self, user: &str) -> Option<Account> {
        self.store.read().await.account(user).cloned()
    }

    /// Top `n` balances, for the leaderboard command.
    pub async fn leaderboard(&self, n: usize) -> Vec<(UserId, u64)> {
        self.store.read().await.top_by_balance(n)
    }

    /// Copy of the economy settings (catalog rendering etc.)
    pub async fn settings(&self) -> GlobalSettings {
        self.store.read().await.settings().clone()
    }

    // ─── Daily reward ────────────────────────────────────────────────

    pub async fn claim_daily(&self, user: &str) -> Result<ClaimOutcome> {
        let now = self.clock.now();
        let outcome = {
            let mut store = self.store.write().await;
            let (account, settings) = store.account_with_settings(user);
            reward::apply_claim(account, settings, now)
        }?;

        info!(
            user,
            reward = outcome.reward,
            streak = outcome.streak,
            "Daily reward claimed"
        );
        self.request_save();
        Ok(outcome)
    }

    /// Claim eligibility for display; never mutates.
    pub async fn claim_status(&self, user: &str) -> ClaimStatus {
        let now = self.clock.now();
        let store = self.store.read().await;
        match store.account(user) {
            Some(account) => reward::claim_status(account, store.settings(), now),
            None => reward::claim_status(&Account::default(), store.settings(), now),
        }
    }

    // ─── Wagers ──────────────────────────────────────────────────────

    pub async fn play_guess(&self, user: &str, guess: u8, bet: u64) -> Result<GuessOutcome> {
        let outcome = {
            let mut store = self.store.write().await;
            let account = store.get_or_create(user);
            self.with_rng(|rng| wager::play_guess(account, guess, bet, rng))
        }?;

        info!(user, won = outcome.won, delta = outcome.delta, "Guess game");
        self.request_save();
        Ok(outcome)
    }

    pub async fn play_coin_flip(
        &self,
        user: &str,
        choice: CoinSide,
        bet: u64,
    ) -> Result<CoinFlipOutcome> {
        let outcome = {
            let mut store = self.store.write().await;
            let account = store.get_or_create(user);
            self.with_rng(|rng| wager::play_coin_flip(account, choice, bet, rng))
        }?;

        info!(user, won = outcome.won, delta = outcome.delta, "Coin flip");
        self.request_save();
        Ok(outcome)
    }

    pub async fn play_reels(&self, user: &str) -> Result<ReelsOutcome> {
        let outcome = {
            let mut store = self.store.write().await;
            let account = store.get_or_create(user);
            self.with_rng(|rng| wager::play_reels(account, rng))
        }?;

        info!(
            user,
            multiplier = outcome.multiplier,
            delta = outcome.delta,
            "Reels spun"
        );
        self.request_save();
        Ok(outcome)
    }

    // ─── Transfers & gift cards ──────────────────────────────────────

    pub async fn transfer(&self, sender: &str, recipient: &str, amount: u64) -> Result<()> {
        {
            let mut store = self.store.write().await;
            transfer::transfer(&mut store, sender, recipient, amount)
        }?;

        self.request_save();
        Ok(())
    }

    pub async fn redeem_gift_card(&self, user: &str, kind: &str) -> Result<()> {
        {
            let mut store = self.store.write().await;
            transfer::redeem_gift_card(&mut store, user, kind)
        }?;

        self.request_save();
        Ok(())
    }

    pub async fn convert_back(&self, user: &str) -> Result<ConvertOutcome> {
        let outcome = {
            let mut store = self.store.write().await;
            transfer::convert_back(&mut store, user)
        }?;

        self.request_save();
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ManualClock, ScriptedRng};
    use chrono::Duration;
    use tally_core::Error;

    fn fixture(
        rolls: impl IntoIterator<Item = u32>,
    ) -> (
        Economy<ManualClock, ScriptedRng>,
        ManualClock,
        Arc<RwLock<LedgerStore>>,
    ) {
        let store = Arc::new(RwLock::new(LedgerStore::default()));
        let clock = ManualClock::starting_at("2026-01-01T00:00:00Z".parse().unwrap());
        let economy = Economy::with_parts(store.clone(), clock.clone(), ScriptedRng::new(rolls));
        (economy, clock, store)
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let (economy, clock, _) = fixture([2, 0, 30, 55]);

        // Day one: base claim
        let claim = economy.claim_daily("alice").await.unwrap();
        assert_eq!(claim.reward, 110);

        // Day two, 25h later: streak continues
        clock.advance(Duration::hours(25));
        let claim = economy.claim_daily("alice").await.unwrap();
        assert_eq!(claim.streak, 2);
        assert_eq!(claim.reward, 120);

        // Winning guess: roll 2 -> result 3
        let guess = economy.play_guess("alice", 3, 10).await.unwrap();
        assert_eq!(guess.delta, 50);

        // Losing spin: cherry, lemon, orange
        let spin = economy.play_reels("alice").await.unwrap();
        assert_eq!(spin.delta, -30);

        economy.transfer("alice", "bob", 50).await.unwrap();

        let alice = economy.account("alice").await.unwrap();
        let bob = economy.account("bob").await.unwrap();
        assert_eq!(alice.balance, 110 + 120 + 50 - 30 - 50);
        assert_eq!(bob.balance, 50);

        let top = economy.leaderboard(2).await;
        assert_eq!(top[0].0.as_str(), "alice");
        assert_eq!(top[1].0.as_str(), "bob");
    }

    #[tokio::test]
    async fn test_claim_cooldown_through_facade() {
        let (economy, clock, _) = fixture([]);

        economy.claim_daily("alice").await.unwrap();
        let err = economy.claim_daily("alice").await.unwrap_err();
        assert!(matches!(err, Error::Cooldown { .. }));

        let status = economy.claim_status("alice").await;
        assert!(!status.can_claim);
        assert_eq!(status.seconds_remaining, 24 * 3600);

        clock.advance(Duration::hours(24));
        assert!(economy.claim_daily("alice").await.is_ok());
    }

    #[tokio::test]
    async fn test_redeem_and_convert_back() {
        let (economy, _, store) = fixture([]);
        store.write().await.get_or_create("carol").credit(600);

        economy.redeem_gift_card("carol", "amazon").await.unwrap();
        let carol = economy.account("carol").await.unwrap();
        assert_eq!(carol.balance, 100);
        assert_eq!(carol.redeemed_cards.len(), 1);

        let outcome = economy.convert_back("carol").await.unwrap();
        assert_eq!(outcome.refund, 400);
        let carol = economy.account("carol").await.unwrap();
        assert_eq!(carol.balance, 500);
        assert!(carol.redeemed_cards.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_reads() {
        let (economy, _, _) = fixture([]);
        assert!(economy.account("ghost").await.is_none());

        let status = economy.claim_status("ghost").await;
        assert!(status.can_claim);

        let created = economy.get_or_create_account("ghost").await;
        assert_eq!(created.balance, 0);
        assert!(economy.account("ghost").await.is_some());
    }

    #[tokio::test]
    async fn test_open_persists_across_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.json");

        let mut economy = Economy::open(&path, GlobalSettings::default()).await;
        let claimed = economy.claim_daily("dana").await.unwrap().reward;
        economy.shutdown().await;

        let mut economy = Economy::open(&path, GlobalSettings::default()).await;
        let dana = economy.account("dana").await.unwrap();
        assert_eq!(dana.balance, claimed);
        assert_eq!(dana.streak, 1);
        economy.shutdown().await;
    }
}
