//! Aggregate listening statistics.
//!
//! Tolerant by contract: malformed-but-present data (zero durations,
//! empty titles) degrades to documented defaults and an empty list
//! yields the "N/A" sentinel — aggregation never fails.

use crate::decor::DecorSeed;
use crate::model::{ms_to_hours, GuiltyPleasure, PlayCountedTrack, ReceiptStats, UNKNOWN_ARTIST};

/// Compute the stats block for a receipt.
pub fn aggregate(tracks: &[PlayCountedTrack], seed: DecorSeed, cashier: &str) -> ReceiptStats {
    let total_ms: u64 = tracks.iter().map(PlayCountedTrack::listening_ms).sum();
    let total_plays: u64 = tracks.iter().map(|t| u64::from(t.play_count)).sum();

    let average_plays = if tracks.is_empty() {
        0
    } else {
        (total_plays as f64 / tracks.len() as f64).round() as u32
    };

    // Strictly-greater comparison keeps the first-encountered track on ties.
    let guilty_pleasure = tracks
        .iter()
        .fold(None::<&PlayCountedTrack>, |best, t| match best {
            Some(b) if t.play_count > b.play_count => Some(t),
            None => Some(t),
            _ => best,
        })
        .map(|t| GuiltyPleasure {
            track: if t.track.title.is_empty() {
                UNKNOWN_ARTIST.to_string()
            } else {
                t.track.title.clone()
            },
            hours: ms_to_hours(t.listening_ms()),
            play_count: t.play_count,
        })
        .unwrap_or_else(GuiltyPleasure::none);

    ReceiptStats {
        total_hours: ms_to_hours(total_ms),
        guilty_pleasure,
        total_plays,
        average_plays,
        receipt_number: receipt_number(seed),
        cashier: cashier.to_string(),
        transaction_id: transaction_id(seed),
    }
}

/// Four-digit receipt number in 1000..=9999, derived from the seed.
fn receipt_number(seed: DecorSeed) -> String {
    format!("{}", 1000 + seed.value() % 9000)
}

/// `TXN<millis><3 digits>`, derived from the seed.
fn transaction_id(seed: DecorSeed) -> String {
    format!("TXN{}{:03}", seed.value(), seed.value() % 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrackRecord;

    fn counted(title: &str, plays: u32, duration_ms: u64) -> PlayCountedTrack {
        PlayCountedTrack {
            track: TrackRecord {
                id: title.to_ascii_lowercase(),
                title: title.into(),
                artists: vec!["A".into()],
                album_art: None,
                duration_ms,
                popularity: 40,
            },
            play_count: plays,
            rank: 1,
        }
    }

    fn seed() -> DecorSeed {
        DecorSeed::from_timestamp_millis(1_722_000_000_000)
    }

    #[test]
    fn guilty_pleasure_is_the_argmax() {
        let tracks = vec![
            counted("Low", 5, 100_000),
            counted("Top", 50, 100_000),
            counted("Mid", 20, 100_000),
        ];
        let stats = aggregate(&tracks, seed(), "DJ-BOT");
        assert_eq!(stats.guilty_pleasure.play_count, 50);
        assert_eq!(stats.guilty_pleasure.track, "Top");
    }

    #[test]
    fn ties_keep_the_first_encountered_track() {
        let tracks = vec![
            counted("First", 40, 100_000),
            counted("Second", 40, 100_000),
        ];
        let stats = aggregate(&tracks, seed(), "DJ-BOT");
        assert_eq!(stats.guilty_pleasure.track, "First");
    }

    #[test]
    fn empty_input_yields_the_sentinel() {
        let stats = aggregate(&[], seed(), "DJ-BOT");
        assert_eq!(stats.guilty_pleasure.track, "N/A");
        assert_eq!(stats.guilty_pleasure.play_count, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.average_plays, 0);
    }

    #[test]
    fn hours_sum_play_weighted_durations() {
        // 2 tracks x 30 min x 2 plays = 2.0 hours
        let tracks = vec![
            counted("A", 2, 1_800_000),
            counted("B", 2, 1_800_000),
        ];
        let stats = aggregate(&tracks, seed(), "DJ-BOT");
        assert_eq!(stats.total_hours, 2.0);
    }

    #[test]
    fn ids_are_reproducible_per_seed() {
        let tracks = vec![counted("A", 3, 100_000)];
        let a = aggregate(&tracks, seed(), "DJ-BOT");
        let b = aggregate(&tracks, seed(), "DJ-BOT");
        assert_eq!(a.receipt_number, b.receipt_number);
        assert_eq!(a.transaction_id, b.transaction_id);
        assert!(a.receipt_number.len() == 4);
    }

    #[test]
    fn zero_duration_tracks_do_not_break_aggregation() {
        let tracks = vec![counted("Silent", 10, 0)];
        let stats = aggregate(&tracks, seed(), "DJ-BOT");
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.guilty_pleasure.hours, 0.0);
    }
}
