//! Deterministic decoration.
//!
//! Every template dresses the same receipt differently: rarity badges,
//! slot spins, batch codes, achievement toasts. All of it must survive
//! a re-render byte for byte, because receipts are shared as images.
//! So decoration is computed once by the assembler from a seed (the
//! captured generation timestamp) plus track identity, and templates
//! read the bundle — they never roll their own numbers.

pub mod achievements;
pub mod codes;
pub mod rarity;
pub mod slots;

use serde::Serialize;

use crate::model::PlayCountedTrack;

use achievements::{Achievement, StatSnapshot};
use codes::CommitKind;
use rarity::{Tier, TierLimits};
use slots::SpinResult;

/// Seed every decorative derivation starts from. Taken from the
/// receipt's captured generation timestamp, never from a fresh clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DecorSeed(u64);

impl DecorSeed {
    pub fn from_timestamp_millis(millis: i64) -> Self {
        Self(millis.max(0) as u64)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// Per-track hash: seed + character sum of the title + index term.
    pub fn track_hash(self, title: &str, index: usize) -> u64 {
        let char_sum: u64 = title.chars().map(|c| c as u64).sum();
        self.0
            .wrapping_add(char_sum)
            .wrapping_add((index as u64).wrapping_mul(137))
    }
}

/// Decoration attached to one receipt line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemDecor {
    pub tier: Tier,
    pub level: u8,
    pub xp: u64,
    pub edition: &'static str,
    pub spin: SpinResult,
    pub batch_code: String,
    pub purity: f64,
    pub commit_kind: CommitKind,
}

/// The full per-receipt decoration bundle.
///
/// Deliberately excludes the activity heatmap — that field is the one
/// sanctioned non-deterministic decoration and is drawn at template
/// time via [`codes::ActivityGrid`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReceiptDecor {
    pub seed: DecorSeed,
    pub items: Vec<ItemDecor>,
    pub achievements: Vec<Achievement>,
    pub total_xp: u64,
    pub player_level: u8,
    pub order_number: String,
    pub player_id: String,
    pub lab_id: String,
    pub machine_code: String,
    pub register_code: String,
    pub quote_index: usize,
    pub lucky_numbers: [u16; 6],
}

/// Number of quotes templates may index with `quote_index`.
pub const QUOTE_TABLE_LEN: usize = 5;

/// Build the bundle for a sorted track list.
pub fn decorate(seed: DecorSeed, tracks: &[PlayCountedTrack], stats: &StatSnapshot) -> ReceiptDecor {
    let limits = TierLimits::for_track_count(tracks.len());
    let max_plays = tracks.iter().map(|t| t.play_count).max().unwrap_or(0);

    let items: Vec<ItemDecor> = tracks
        .iter()
        .enumerate()
        .map(|(index, t)| {
            let hash = seed.track_hash(&t.track.title, index);
            let tier = rarity::classify(index, t.play_count, limits);
            ItemDecor {
                tier,
                level: rarity::level(t.play_count),
                xp: rarity::xp(t.play_count, tier),
                edition: codes::EDITIONS[(hash % codes::EDITIONS.len() as u64) as usize],
                spin: slots::spin(hash, index, t.play_count, max_plays),
                batch_code: codes::batch_number(index),
                purity: codes::purity(t.play_count, max_plays, &t.track.title),
                commit_kind: codes::commit_kind(t.play_count),
            }
        })
        .collect();

    let total_xp: u64 = items.iter().map(|i| i.xp).sum();
    let player_level = (total_xp / 10_000).min(100) as u8;

    ReceiptDecor {
        seed,
        items,
        achievements: achievements::unlock(stats),
        total_xp,
        player_level,
        order_number: codes::order_number(seed.value()),
        player_id: codes::player_id(seed.value()),
        lab_id: codes::lab_id(seed.value()),
        machine_code: codes::machine_code(seed.value()),
        register_code: codes::register_code(seed.value()),
        quote_index: codes::quote_index(seed.value(), QUOTE_TABLE_LEN),
        lucky_numbers: codes::LUCKY_NUMBERS,
    }
}
