//! Cosmetic codes: batch numbers, purity grades, order/player ids,
//! quote picks, commit kinds, and the activity heatmap.
//!
//! Everything here except [`ActivityGrid::random`] derives from the
//! receipt seed and the track identity, so re-rendering a receipt
//! reprints the exact same codes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const BATCH_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const EDITIONS: [&str; 5] = [
    "Base Game",
    "Season Pass",
    "DLC",
    "Expansion Pack",
    "Deluxe Edition",
];

pub const LUCKY_NUMBERS: [u16; 6] = [7, 7, 7, 21, 69, 420];

/// `AB-1234` style lab batch code for the track at 0-based `index`.
pub fn batch_number(index: usize) -> String {
    let prefix_a = BATCH_LETTERS[index % 26] as char;
    let prefix_b = BATCH_LETTERS[(index * 3) % 26] as char;
    let num = (index * 137 + 2008) % 9999;
    format!("{prefix_a}{prefix_b}-{num:04}")
}

/// Lab purity grade: 70.0..=99.1, scaled by the play-count ratio with
/// a +-2% variance seeded from the track title.
pub fn purity(play_count: u32, max_plays: u32, title: &str) -> f64 {
    if max_plays == 0 {
        return 75.0;
    }
    let ratio = f64::from(play_count) / f64::from(max_plays);
    let base = 70.0 + ratio * 29.1;
    let char_sum: u64 = title.chars().map(|c| c as u64).sum();
    let variance = ((char_sum % 200) as f64 / 100.0 - 1.0) * 2.0;
    (base + variance).clamp(70.0, 99.1)
}

/// Commit classification for the code-repository skin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitKind {
    Feat,
    Fix,
    Refactor,
    Docs,
    Chore,
}

impl CommitKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Refactor => "refactor",
            Self::Docs => "docs",
            Self::Chore => "chore",
        }
    }
}

pub fn commit_kind(play_count: u32) -> CommitKind {
    if play_count > 100 {
        CommitKind::Feat
    } else if play_count > 75 {
        CommitKind::Fix
    } else if play_count > 50 {
        CommitKind::Refactor
    } else if play_count > 25 {
        CommitKind::Docs
    } else {
        CommitKind::Chore
    }
}

/// Upper-case base-36 rendering, used by player ids and receipt ids.
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Four-digit order number for the counter-service skins.
pub fn order_number(seed: u64) -> String {
    format!("{:04}", seed % 9999)
}

/// Seven-character casino player id.
pub fn player_id(seed: u64) -> String {
    let code = to_base36(seed.wrapping_mul(999));
    code.chars().take(7).collect()
}

/// `RV-123` mobile lab id.
pub fn lab_id(seed: u64) -> String {
    format!("RV-{}", seed.wrapping_mul(13) % 999)
}

/// `SPOT-777-123` machine code.
pub fn machine_code(seed: u64) -> String {
    format!("SPOT-777-{}", seed.wrapping_mul(17) % 999)
}

/// Four-digit register transaction code.
pub fn register_code(seed: u64) -> String {
    format!("{:04}", seed.wrapping_mul(3) % 9999)
}

/// Stable pick into a quote table of length `len`.
pub fn quote_index(seed: u64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (seed % len as u64) as usize
}

/// 12x7 contribution-style intensity grid, cells 0..=4.
///
/// This is the one decoration allowed to be non-reproducible:
/// [`ActivityGrid::random`] draws fresh noise on every call and exists
/// purely for visual novelty. Use [`ActivityGrid::seeded`] anywhere
/// output stability matters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityGrid {
    pub weeks: usize,
    pub days: usize,
    pub cells: Vec<u8>,
}

impl ActivityGrid {
    pub const WEEKS: usize = 12;
    pub const DAYS: usize = 7;

    /// Fresh noise on every call — the sole non-deterministic field.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self::fill(|| rng.random::<f64>())
    }

    /// Reproducible grid for tests and stable exports.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::fill(|| rng.random::<f64>())
    }

    fn fill(mut draw: impl FnMut() -> f64) -> Self {
        let cells = (0..Self::WEEKS * Self::DAYS)
            .map(|_| {
                let r = draw();
                if r < 0.30 {
                    0
                } else if r < 0.55 {
                    1
                } else if r < 0.75 {
                    2
                } else if r < 0.90 {
                    3
                } else {
                    4
                }
            })
            .collect();
        Self {
            weeks: Self::WEEKS,
            days: Self::DAYS,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_numbers_are_stable_and_unique_enough() {
        assert_eq!(batch_number(0), batch_number(0));
        assert_ne!(batch_number(0), batch_number(1));
        assert!(batch_number(3).len() >= 7);
    }

    #[test]
    fn purity_stays_in_range() {
        for plays in [0u32, 10, 50, 100] {
            let p = purity(plays, 100, "Some Track");
            assert!((70.0..=99.1).contains(&p), "{p} out of range");
        }
        assert_eq!(purity(50, 0, "x"), 75.0);
    }

    #[test]
    fn purity_is_seeded_by_title() {
        assert_eq!(purity(80, 100, "Song A"), purity(80, 100, "Song A"));
    }

    #[test]
    fn commit_kinds_follow_the_ladder() {
        assert_eq!(commit_kind(150), CommitKind::Feat);
        assert_eq!(commit_kind(80), CommitKind::Fix);
        assert_eq!(commit_kind(60), CommitKind::Refactor);
        assert_eq!(commit_kind(30), CommitKind::Docs);
        assert_eq!(commit_kind(5), CommitKind::Chore);
    }

    #[test]
    fn base36_round_numbers() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn seeded_grid_is_reproducible() {
        let a = ActivityGrid::seeded(42);
        let b = ActivityGrid::seeded(42);
        assert_eq!(a, b);
        assert_eq!(a.cells.len(), ActivityGrid::WEEKS * ActivityGrid::DAYS);
        assert!(a.cells.iter().all(|&c| c <= 4));
    }

    #[test]
    fn codes_derive_from_the_seed() {
        let seed = 1_722_000_000_000u64; // epoch-millis scale
        assert_eq!(order_number(seed), order_number(seed));
        assert_eq!(player_id(seed), player_id(seed));
        assert_eq!(player_id(seed).chars().count(), 7);
    }
}
