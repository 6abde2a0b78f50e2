//! Slot-machine spin results for the casino skin.
//!
//! The podium positions always land their fixed jackpots; everything
//! below rides a ladder keyed to the track's play-count ratio against
//! the list maximum. Symbol picks come off the seeded wheel, so a spin
//! never changes between renders of the same receipt.

use serde::Serialize;

pub const SYMBOLS: [&str; 10] = ["🎵", "🎶", "🎤", "🎸", "🎹", "🥁", "🎺", "🎷", "💎", "⭐"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpinResult {
    pub symbols: [&'static str; 3],
    pub outcome: &'static str,
    pub message: String,
}

fn seeded_symbol(hash: u64, slot: u64) -> &'static str {
    SYMBOLS[((hash.wrapping_add(slot.wrapping_mul(137))) % SYMBOLS.len() as u64) as usize]
}

/// Spin for the track at 0-based `index` with the given track hash.
pub fn spin(hash: u64, index: usize, play_count: u32, max_plays: u32) -> SpinResult {
    let ratio = if max_plays > 0 {
        f64::from(play_count) / f64::from(max_plays)
    } else {
        0.0
    };

    match index {
        0 => SpinResult {
            symbols: ["💎", "💎", "💎"],
            outcome: "MEGA JACKPOT!",
            message: "#1 ADDICTION!".to_string(),
        },
        1 => SpinResult {
            symbols: ["🎵", "🎵", "🎵"],
            outcome: "JACKPOT!",
            message: "#2 OBSESSION!".to_string(),
        },
        2 => SpinResult {
            symbols: ["⭐", "⭐", "⭐"],
            outcome: "BIG WIN!",
            message: "#3 ON REPEAT!".to_string(),
        },
        _ if ratio > 0.8 => SpinResult {
            symbols: ["🎸", "🎸", "🎸"],
            outcome: "HUGE WIN!",
            message: format!("{play_count} plays!"),
        },
        _ if ratio > 0.6 => SpinResult {
            symbols: ["🎹", "🎹", "🎹"],
            outcome: "BIG WIN!",
            message: "Heavy rotation!".to_string(),
        },
        _ if ratio > 0.4 => SpinResult {
            symbols: ["🎺", "🎺", seeded_symbol(hash, 1)],
            outcome: "WIN!",
            message: "Regular player".to_string(),
        },
        _ if ratio > 0.25 => SpinResult {
            symbols: ["🎵", "🎶", seeded_symbol(hash, 0)],
            outcome: "SMALL WIN",
            message: "In the mix".to_string(),
        },
        _ if ratio > 0.1 => SpinResult {
            symbols: [
                seeded_symbol(hash, 0),
                seeded_symbol(hash, 0),
                seeded_symbol(hash, 1),
            ],
            outcome: "ALMOST",
            message: "Sometimes...".to_string(),
        },
        _ => SpinResult {
            symbols: [
                seeded_symbol(hash, 0),
                seeded_symbol(hash, 1),
                seeded_symbol(hash, 2),
            ],
            outcome: "LOSS",
            message: "Barely played".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn podium_positions_are_fixed() {
        assert_eq!(spin(99, 0, 1, 100).outcome, "MEGA JACKPOT!");
        assert_eq!(spin(99, 1, 1, 100).outcome, "JACKPOT!");
        assert_eq!(spin(99, 2, 1, 100).outcome, "BIG WIN!");
    }

    #[test]
    fn ladder_follows_the_ratio() {
        assert_eq!(spin(7, 5, 90, 100).outcome, "HUGE WIN!");
        assert_eq!(spin(7, 5, 50, 100).outcome, "WIN!");
        assert_eq!(spin(7, 5, 30, 100).outcome, "SMALL WIN");
        assert_eq!(spin(7, 5, 5, 100).outcome, "LOSS");
    }

    #[test]
    fn same_hash_spins_the_same_reels() {
        assert_eq!(spin(12345, 9, 12, 100), spin(12345, 9, 12, 100));
    }

    #[test]
    fn zero_max_plays_is_a_loss_not_a_panic() {
        assert_eq!(spin(1, 5, 0, 0).outcome, "LOSS");
    }
}
