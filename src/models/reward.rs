// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Collectible reward catalog and ownership records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Catalog identifier of a collectible.
pub type RewardId = u32;

/// Name reported for ids that are not in the catalog.
pub const UNKNOWN_REWARD_NAME: &str = "謎のゆっちん";

/// Rarity class of a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Tier {
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "RARE")]
    Rare,
    #[serde(rename = "SR")]
    SuperRare,
    #[serde(rename = "UR")]
    UltraRare,
    #[serde(rename = "SECRET")]
    Secret,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Rare => "RARE",
            Self::SuperRare => "SR",
            Self::UltraRare => "UR",
            Self::Secret => "SECRET",
        }
    }

    /// Randomized tiers draw from their unowned pool; the rest are fixed grants.
    pub fn is_randomized(&self) -> bool {
        matches!(self, Self::Normal | Self::Rare)
    }
}

/// One row of the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CatalogEntry {
    pub id: RewardId,
    pub name: &'static str,
    pub tier: Tier,
}

const fn entry(id: RewardId, name: &'static str, tier: Tier) -> CatalogEntry {
    CatalogEntry { id, name, tier }
}

/// Every collectible, ordered by id.
pub const CATALOG: &[CatalogEntry] = &[
    // ─── Normal ──────────────────────────────────────────────────
    entry(1, "ねこゆっちん", Tier::Normal),
    entry(2, "かぶとゆっちん", Tier::Normal),
    entry(3, "ティールゆっちんブーケ", Tier::Normal),
    entry(4, "ブルーゆっちんブーケ", Tier::Normal),
    entry(5, "ブルーゆっちん", Tier::Normal),
    entry(6, "青鬼ゆっちん", Tier::Normal),
    entry(7, "パープルゆっちん", Tier::Normal),
    entry(8, "紫鬼ゆっちん", Tier::Normal),
    entry(9, "デビルマンゆっちん", Tier::Normal),
    entry(10, "花火ゆっちん", Tier::Normal),
    // ─── Rare ────────────────────────────────────────────────────
    entry(101, "しかゆっちん", Tier::Rare),
    entry(102, "トリケラトユチン", Tier::Rare),
    entry(103, "カラフルゆっちんブーケ", Tier::Rare),
    entry(104, "ウマゆっちん", Tier::Rare),
    entry(105, "愛の伝道師ゆっちん", Tier::Rare),
    // ─── SR ──────────────────────────────────────────────────────
    entry(201, "リスカゆっちん", Tier::SuperRare),
    entry(202, "たまごゆっちん", Tier::SuperRare),
    entry(203, "しかゆっちん【神鹿】", Tier::SuperRare),
    // ─── UR / Secret ─────────────────────────────────────────────
    entry(301, "エンジェルゆっちん", Tier::UltraRare),
    entry(401, "レントゲンゆっちん", Tier::Secret),
];

/// Fixed grant for crossing 300 squats.
pub const SR_SQUAT: RewardId = 201;
/// Fixed grant for crossing 300 push-ups.
pub const SR_PUSHUP: RewardId = 202;
/// Fixed grant for crossing 300 seconds of plank.
pub const SR_PLANK: RewardId = 203;
pub const UR_GRAND_TOTAL: RewardId = 301;
pub const SECRET_GRAND_TOTAL: RewardId = 401;

/// Look up a catalog row by id.
pub fn lookup(id: RewardId) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.id == id)
}

/// Display name for `id`, falling back to [`UNKNOWN_REWARD_NAME`].
pub fn display_name(id: RewardId) -> &'static str {
    lookup(id).map(|e| e.name).unwrap_or(UNKNOWN_REWARD_NAME)
}

/// All catalog ids belonging to `tier`, in ascending order.
pub fn ids_in_tier(tier: Tier) -> impl Iterator<Item = RewardId> {
    CATALOG.iter().filter(move |e| e.tier == tier).map(|e| e.id)
}

/// Reward owned by a user. Stored in the `user_rewards` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedReward {
    pub user_id: u64,
    pub reward_id: RewardId,
    pub display_name: String,
    pub obtained_at: DateTime<Utc>,
}

impl OwnedReward {
    /// Build the ownership record for a freshly granted catalog id.
    pub fn grant(user_id: u64, reward_id: RewardId, obtained_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            reward_id,
            display_name: display_name(reward_id).to_string(),
            obtained_at,
        }
    }

    /// Document ID: one document per (user, reward) pair.
    pub fn document_id(&self) -> String {
        format!("{}_{}", self.user_id, self.reward_id)
    }

    pub fn tier(&self) -> Option<Tier> {
        lookup(self.reward_id).map(|e| e.tier)
    }
}
