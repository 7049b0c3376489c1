//! Tally Engine - Reward, wager, and transfer logic over the ledger store

pub mod clock;
pub mod economy;
pub mod reward;
pub mod transfer;
pub mod wager;

#[cfg(test)]
pub(crate) mod testutil;

pub use clock::{Clock, SystemClock};
pub use economy::Economy;
pub use wager::{StdWagerRng, WagerRng};
