//! Synthetic play counts.
//!
//! The catalog never reports real play counts, only a 0-100 popularity
//! score. The estimate below maps that score through a banded curve
//! (steep at the top, near 1:1 at the bottom) and weights it by chart
//! rank, so a rank-1 track earns the full band value and deep cuts tail
//! off. The function is fully deterministic: the same
//! (popularity, rank) pair always produces the same count, which every
//! seeded decoration downstream depends on.

/// Ranks past this depth all share the minimum weight.
const RANK_WINDOW: u32 = 25;

/// Estimated play count for a track with the given popularity score at
/// the given 1-based catalog rank. Always at least 1.
///
/// Monotonic: non-decreasing in `popularity` at fixed `rank`,
/// non-increasing in `rank` at fixed `popularity`.
pub fn estimate(popularity: u8, rank: u32) -> u32 {
    let base = popularity_band(popularity.min(100));
    let weight = RANK_WINDOW
        .saturating_sub(rank.saturating_sub(1))
        .max(1) as f64;
    let count = (base * weight / RANK_WINDOW as f64).floor();
    (count as u32).max(1)
}

/// Banded base curve: ~500 plays at popularity 100 down to ~1 at 0,
/// with diminishing per-point increments in the lower bands.
fn popularity_band(popularity: u8) -> f64 {
    let p = f64::from(popularity);
    if popularity >= 90 {
        300.0 + (p - 90.0) * 20.0
    } else if popularity >= 70 {
        150.0 + (p - 70.0) * 7.5
    } else if popularity >= 50 {
        75.0 + (p - 50.0) * 3.75
    } else if popularity >= 30 {
        30.0 + (p - 30.0) * 2.25
    } else if popularity >= 10 {
        10.0 + (p - 10.0)
    } else {
        p.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_at_least_one_play() {
        assert_eq!(estimate(0, 1), 1);
        assert!(estimate(0, 50) >= 1);
        assert!(estimate(3, 40) >= 1);
    }

    #[test]
    fn top_of_chart_tops_the_curve() {
        assert_eq!(estimate(100, 1), 500);
    }

    #[test]
    fn deterministic_for_same_inputs() {
        assert_eq!(estimate(73, 4), estimate(73, 4));
    }

    #[test]
    fn higher_popularity_never_loses_plays() {
        for rank in [1, 5, 25, 50] {
            for p in 0u8..100 {
                assert!(
                    estimate(p, rank) <= estimate(p + 1, rank),
                    "popularity {p} -> {} beat {} at rank {rank}",
                    estimate(p, rank),
                    estimate(p + 1, rank)
                );
            }
        }
    }

    #[test]
    fn deeper_rank_never_gains_plays() {
        for p in [0u8, 10, 45, 80, 100] {
            for rank in 1u32..50 {
                assert!(estimate(p, rank) >= estimate(p, rank + 1));
            }
        }
    }

    #[test]
    fn band_boundaries_do_not_dip() {
        for boundary in [10u8, 30, 50, 70, 90] {
            assert!(popularity_band(boundary) >= popularity_band(boundary - 1));
        }
    }
}
