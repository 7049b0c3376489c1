//! Gift-card redemption records and conversion outcomes

use serde::{Deserialize, Serialize};

/// A redeemed gift card held by an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemedCard {
    /// Catalog kind this card was redeemed as
    pub kind: String,
    /// Points paid at redemption time (the catalog may change later)
    pub cost: u64,
}

/// Result of converting all redeemed cards back to points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOutcome {
    /// Points credited back (80% of the summed card costs, floored)
    pub refund: u64,
}
