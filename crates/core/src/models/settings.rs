//! Global economy settings — immutable configuration loaded at process start

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Economy-wide configuration.
///
/// Loaded once at startup (or restored from the snapshot) and never mutated
/// by user commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    /// Base daily reward before the streak multiplier
    pub daily_reward: u64,
    /// Cap on the streak multiplier (>= 1.0)
    pub max_streak_multiplier: f64,
    /// Redeemable gift cards, keyed by kind
    pub gift_card_catalog: HashMap<String, GiftCardSpec>,
}

/// A redeemable gift card in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardSpec {
    /// Name shown to users
    pub display_name: String,
    /// Redemption cost in points
    pub cost: u64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        let mut catalog = HashMap::new();
        catalog.insert(
            "amazon".to_string(),
            GiftCardSpec {
                display_name: "Amazon".to_string(),
                cost: 500,
            },
        );
        catalog.insert(
            "steam".to_string(),
            GiftCardSpec {
                display_name: "Steam".to_string(),
                cost: 750,
            },
        );
        catalog.insert(
            "spotify".to_string(),
            GiftCardSpec {
                display_name: "Spotify".to_string(),
                cost: 1000,
            },
        );
        catalog.insert(
            "netflix".to_string(),
            GiftCardSpec {
                display_name: "Netflix".to_string(),
                cost: 1500,
            },
        );

        Self {
            daily_reward: 100,
            max_streak_multiplier: 2.0,
            gift_card_catalog: catalog,
        }
    }
}

impl GlobalSettings {
    /// Look up a gift card by kind
    pub fn gift_card(&self, kind: &str) -> Option<&GiftCardSpec> {
        self.gift_card_catalog.get(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.daily_reward, 100);
        assert!(settings.max_streak_multiplier >= 1.0);
        assert_eq!(settings.gift_card("amazon").unwrap().cost, 500);
        assert!(settings.gift_card("visa").is_none());
    }

    #[test]
    fn test_settings_json_round_trip() {
        let settings = GlobalSettings::default();
        let bytes = serde_json::to_vec(&settings).unwrap();
        let restored: GlobalSettings = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(restored, settings);
    }
}
