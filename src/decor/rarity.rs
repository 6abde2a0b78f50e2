//! Collectible-style rarity tiers.
//!
//! A track earns a tier only when BOTH conditions hold: its receipt
//! position falls inside the tier's slice of the list, and its play
//! count clears the tier's absolute floor. Tiers are checked from
//! legendary down and the first match wins.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }

    /// Bonus experience granted on top of the per-play base.
    pub fn xp_bonus(self) -> u64 {
        match self {
            Self::Common => 0,
            Self::Uncommon => 100,
            Self::Rare => 250,
            Self::Epic => 500,
            Self::Legendary => 1000,
        }
    }
}

/// Absolute play-count floors per tier.
const LEGENDARY_FLOOR: u32 = 200;
const EPIC_FLOOR: u32 = 150;
const RARE_FLOOR: u32 = 80;
const UNCOMMON_FLOOR: u32 = 40;

/// Cumulative position cutoffs derived from the list size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierLimits {
    legendary_end: usize,
    epic_end: usize,
    rare_end: usize,
    uncommon_end: usize,
}

impl TierLimits {
    /// Legendary covers the top 10% (clamped 1..=4), epic the next 15%
    /// (clamped 1..=6), rare and uncommon the next 25% each.
    pub fn for_track_count(count: usize) -> Self {
        let legendary = (count / 10).clamp(1, 4);
        let epic = (count * 15 / 100).clamp(1, 6);
        let rare = count * 25 / 100;
        let uncommon = count * 25 / 100;
        Self {
            legendary_end: legendary,
            epic_end: legendary + epic,
            rare_end: legendary + epic + rare,
            uncommon_end: legendary + epic + rare + uncommon,
        }
    }
}

/// Classify a track at 0-based receipt position `index`.
pub fn classify(index: usize, play_count: u32, limits: TierLimits) -> Tier {
    if index < limits.legendary_end && play_count > LEGENDARY_FLOOR {
        Tier::Legendary
    } else if index < limits.epic_end && play_count > EPIC_FLOOR {
        Tier::Epic
    } else if index < limits.rare_end && play_count > RARE_FLOOR {
        Tier::Rare
    } else if index < limits.uncommon_end && play_count > UNCOMMON_FLOOR {
        Tier::Uncommon
    } else {
        Tier::Common
    }
}

/// In-game level shown next to the item, capped at 99.
pub fn level(play_count: u32) -> u8 {
    (play_count / 3).min(99) as u8
}

/// Per-play base XP plus the tier bonus.
pub fn xp(play_count: u32, tier: Tier) -> u64 {
    u64::from(play_count) * 50 + tier.xp_bonus()
}
