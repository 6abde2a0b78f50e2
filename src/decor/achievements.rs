//! Achievement unlocks.
//!
//! Rules are grouped into families, each family keyed to one aggregate
//! figure. Within a family only the highest cleared threshold fires;
//! across families every matching family contributes. That contract is
//! fixed — templates may rely on at most one achievement per family.

use serde::Serialize;

use super::rarity::Tier;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub name: &'static str,
    pub icon: &'static str,
    pub tier: Tier,
    pub description: &'static str,
}

/// The aggregate figures the rule families read.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatSnapshot {
    pub total_plays: u64,
    pub max_plays: u32,
    pub average_plays: u32,
    pub track_count: usize,
    pub total_listening_ms: u64,
}

const TOTAL_PLAYS_FAMILY: [(u64, Achievement); 3] = [
    (
        2000,
        Achievement {
            name: "No Life Mode",
            icon: "💀",
            tier: Tier::Legendary,
            description: "Played tracks over 2000 times total",
        },
    ),
    (
        1000,
        Achievement {
            name: "Audiophile Elite",
            icon: "🎧",
            tier: Tier::Epic,
            description: "Played tracks over 1000 times total",
        },
    ),
    (
        500,
        Achievement {
            name: "Music Enthusiast",
            icon: "🎵",
            tier: Tier::Rare,
            description: "Played tracks over 500 times total",
        },
    ),
];

const MAX_PLAYS_FAMILY: [(u32, Achievement); 3] = [
    (
        300,
        Achievement {
            name: "Obsession Level 999",
            icon: "🔁",
            tier: Tier::Legendary,
            description: "Played a single track over 300 times",
        },
    ),
    (
        200,
        Achievement {
            name: "One Track Mind",
            icon: "🎯",
            tier: Tier::Epic,
            description: "Played a single track over 200 times",
        },
    ),
    (
        100,
        Achievement {
            name: "Repeat Offender",
            icon: "🔄",
            tier: Tier::Rare,
            description: "Played a single track over 100 times",
        },
    ),
];

const AVERAGE_PLAYS_FAMILY: [(u32, Achievement); 2] = [
    (
        100,
        Achievement {
            name: "Dedication Master",
            icon: "🏆",
            tier: Tier::Epic,
            description: "Average of 100+ plays per track",
        },
    ),
    (
        50,
        Achievement {
            name: "Loyal Listener",
            icon: "⭐",
            tier: Tier::Rare,
            description: "Average of 50+ plays per track",
        },
    ),
];

const COLLECTOR: Achievement = Achievement {
    name: "Collector's Edition",
    icon: "📀",
    tier: Tier::Rare,
    description: "Collected 25 favorite tracks",
};

const TIME_SINK: Achievement = Achievement {
    name: "Time Sink Champion",
    icon: "⏰",
    tier: Tier::Legendary,
    description: "Over 3 hours of total listening time",
};

const COLLECTOR_TRACKS: usize = 25;
const TIME_SINK_MS: u64 = 10_800_000;

/// Evaluate every family against the snapshot, in family order.
pub fn unlock(stats: &StatSnapshot) -> Vec<Achievement> {
    let mut earned = Vec::new();

    if let Some((_, a)) = TOTAL_PLAYS_FAMILY
        .iter()
        .find(|(threshold, _)| stats.total_plays > *threshold)
    {
        earned.push(*a);
    }
    if let Some((_, a)) = MAX_PLAYS_FAMILY
        .iter()
        .find(|(threshold, _)| stats.max_plays > *threshold)
    {
        earned.push(*a);
    }
    if let Some((_, a)) = AVERAGE_PLAYS_FAMILY
        .iter()
        .find(|(threshold, _)| stats.average_plays > *threshold)
    {
        earned.push(*a);
    }
    if stats.track_count >= COLLECTOR_TRACKS {
        earned.push(COLLECTOR);
    }
    if stats.total_listening_ms > TIME_SINK_MS {
        earned.push(TIME_SINK);
    }

    earned
}
