//! Wager game models — coin-flip sides, reel symbols, and outcomes

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of the coin-flip wager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl FromStr for CoinSide {
    type Err = Error;

    /// Case-insensitive, accepts the single-letter aliases `h`/`t`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heads" | "h" => Ok(CoinSide::Heads),
            "tails" | "t" => Ok(CoinSide::Tails),
            other => Err(Error::Validation(format!(
                "expected heads or tails, got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => f.write_str("heads"),
            CoinSide::Tails => f.write_str("tails"),
        }
    }
}

/// Slot-reel symbol.
///
/// Weights are relative, not percentages; the wager engine normalizes by
/// the total when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReelSymbol {
    Cherry,
    Lemon,
    Orange,
    Diamond,
    Star,
    Clover,
}

/// All symbols in draw order, matched with [`ReelSymbol::weight`].
pub const REEL_SYMBOLS: [ReelSymbol; 6] = [
    ReelSymbol::Cherry,
    ReelSymbol::Lemon,
    ReelSymbol::Orange,
    ReelSymbol::Diamond,
    ReelSymbol::Star,
    ReelSymbol::Clover,
];

impl ReelSymbol {
    /// Relative draw weight
    pub fn weight(self) -> u32 {
        match self {
            ReelSymbol::Cherry => 30,
            ReelSymbol::Lemon => 25,
            ReelSymbol::Orange => 20,
            ReelSymbol::Diamond => 15,
            ReelSymbol::Star => 8,
            ReelSymbol::Clover => 2,
        }
    }

    /// Payout multiplier when all three reels show this symbol
    pub fn triple_multiplier(self) -> f64 {
        match self {
            ReelSymbol::Diamond => 10.0,
            ReelSymbol::Star => 8.0,
            ReelSymbol::Clover => 12.0,
            _ => 3.0,
        }
    }
}

impl fmt::Display for ReelSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReelSymbol::Cherry => "cherry",
            ReelSymbol::Lemon => "lemon",
            ReelSymbol::Orange => "orange",
            ReelSymbol::Diamond => "diamond",
            ReelSymbol::Star => "star",
            ReelSymbol::Clover => "clover",
        };
        f.write_str(name)
    }
}

/// Result of a guess-a-number wager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    pub won: bool,
    /// Number the house drew (1-6)
    pub result: u8,
    /// Net balance change (positive on win, negative on loss)
    pub delta: i64,
}

/// Result of a coin-flip wager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinFlipOutcome {
    pub won: bool,
    /// Side the coin landed on
    pub result: CoinSide,
    pub delta: i64,
}

/// Result of a reel spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelsOutcome {
    pub reels: [ReelSymbol; 3],
    /// Payout multiplier applied to the fixed bet (0.0 on a miss)
    pub multiplier: f64,
    pub delta: i64,
}
