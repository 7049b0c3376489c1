//! Daily-reward models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a successful daily claim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimOutcome {
    /// Points credited by this claim
    pub reward: u64,
    /// Streak after the claim
    pub streak: u32,
    /// Multiplier applied to the base reward (already capped)
    pub multiplier: f64,
}

/// Eligibility view of the daily claim, for display without mutation.
///
/// Lets the dispatch layer render a countdown or a "claim now" prompt
/// before committing to the claim itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStatus {
    /// Whether a claim right now would succeed
    pub can_claim: bool,
    /// Current streak (before any claim)
    pub streak: u32,
    /// Instant the next claim becomes eligible (None if eligible now or
    /// never claimed)
    pub next_claim: Option<DateTime<Utc>>,
    /// Seconds until eligible (0 if claimable now)
    pub seconds_remaining: i64,
    /// Points a claim right now would pay
    pub projected_reward: u64,
}
