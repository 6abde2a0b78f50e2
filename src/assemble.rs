//! Receipt assembly.
//!
//! The assembler is the only writer in the pipeline: it ranks, prices,
//! aggregates and decorates in one pass under a single captured
//! timestamp, and hands back an immutable [`Receipt`]. Templates and
//! the renderer are pure readers of that value. Two entry points exist
//! because live catalog data arrives without play counts while
//! synthetic data carries them already.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::decor::{self, achievements::StatSnapshot, codes, DecorSeed};
use crate::estimate;
use crate::model::{
    PlayCountedTrack, Receipt, ReceiptMetadata, TimeRange, TrackRecord,
};
use crate::pricing;
use crate::stats;
use crate::theme::{self, ThemeId};

pub const DEFAULT_TRACK_LIMIT: usize = 25;
pub const MAX_TRACK_LIMIT: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// The caller handed over zero tracks; recoverable by showing an
    /// empty state.
    #[error("no tracks available")]
    EmptyInput,
}

#[derive(Clone, Copy, Debug)]
pub struct Assembler {
    track_limit: usize,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            track_limit: DEFAULT_TRACK_LIMIT,
        }
    }

    pub fn with_track_limit(limit: usize) -> Self {
        Self {
            track_limit: limit.clamp(1, MAX_TRACK_LIMIT),
        }
    }

    pub fn track_limit(&self) -> usize {
        self.track_limit
    }

    /// Live entry point: play counts are estimated from popularity and
    /// catalog rank (input order).
    pub fn assemble(
        &self,
        tracks: Vec<TrackRecord>,
        theme_id: ThemeId,
        time_range: TimeRange,
    ) -> Result<Receipt, AssembleError> {
        if tracks.is_empty() {
            return Err(AssembleError::EmptyInput);
        }
        let counted = tracks
            .into_iter()
            .enumerate()
            .map(|(i, track)| {
                let rank = i as u32 + 1;
                let play_count = estimate::estimate(track.popularity, rank);
                PlayCountedTrack {
                    track,
                    play_count,
                    rank,
                }
            })
            .collect();
        Ok(self.build(counted, theme_id, time_range, Utc::now()))
    }

    /// Synthetic entry point: play counts are already present and the
    /// estimator is not consulted.
    pub fn assemble_counted(
        &self,
        tracks: Vec<PlayCountedTrack>,
        theme_id: ThemeId,
        time_range: TimeRange,
    ) -> Result<Receipt, AssembleError> {
        if tracks.is_empty() {
            return Err(AssembleError::EmptyInput);
        }
        Ok(self.build(tracks, theme_id, time_range, Utc::now()))
    }

    /// Shared tail. `generated_at` is captured exactly once by the
    /// callers above; everything downstream reuses it.
    fn build(
        &self,
        mut counted: Vec<PlayCountedTrack>,
        theme_id: ThemeId,
        time_range: TimeRange,
        generated_at: DateTime<Utc>,
    ) -> Receipt {
        // Stable: tied play counts keep their input order.
        counted.sort_by(|a, b| b.play_count.cmp(&a.play_count));
        counted.truncate(self.track_limit);
        for (i, t) in counted.iter_mut().enumerate() {
            t.rank = i as u32 + 1;
        }

        let theme = theme::get(theme_id);
        let seed = DecorSeed::from_timestamp_millis(generated_at.timestamp_millis());
        let card = theme.rate_card();

        let items: Vec<_> = counted
            .iter()
            .map(|t| pricing::price_item(t, card))
            .collect();
        let totals = pricing::price(&items, card);
        let receipt_stats = stats::aggregate(&counted, seed, theme.terminology.cashier);

        let snapshot = StatSnapshot {
            total_plays: receipt_stats.total_plays,
            max_plays: counted.iter().map(|t| t.play_count).max().unwrap_or(0),
            average_plays: receipt_stats.average_plays,
            track_count: counted.len(),
            total_listening_ms: counted.iter().map(PlayCountedTrack::listening_ms).sum(),
        };
        let decor = decor::decorate(seed, &counted, &snapshot);

        let metadata = ReceiptMetadata {
            generated_date: generated_at.format("%d/%m/%Y").to_string(),
            generated_time: generated_at.format("%H:%M").to_string(),
            time_range_label: time_range.label(),
            track_count: counted.len(),
        };

        debug!(
            theme = theme.id.as_str(),
            tracks = counted.len(),
            total = %totals.total,
            "assembled receipt"
        );

        Receipt {
            id: format!(
                "RCP-{}-{}",
                generated_at.timestamp_millis(),
                codes::to_base36(seed.value().wrapping_mul(0x9E37_79B9))
                    .chars()
                    .take(7)
                    .collect::<String>()
            ),
            generated_at,
            time_range,
            theme,
            items,
            tracks: counted,
            totals,
            stats: receipt_stats,
            metadata,
            decor,
        }
    }

    /// Test- and tooling-facing variant of [`assemble_counted`] that
    /// pins the captured timestamp, so two calls produce identical
    /// receipts end to end.
    pub fn assemble_counted_at(
        &self,
        tracks: Vec<PlayCountedTrack>,
        theme_id: ThemeId,
        time_range: TimeRange,
        generated_at: DateTime<Utc>,
    ) -> Result<Receipt, AssembleError> {
        if tracks.is_empty() {
            return Err(AssembleError::EmptyInput);
        }
        Ok(self.build(tracks, theme_id, time_range, generated_at))
    }
}

/// Last-write-wins supersession for generation requests.
///
/// A UI flow bumps the generation before kicking off a fetch+assemble
/// and only applies the result if its ticket is still current. Stale
/// in-flight work is simply dropped — no cancellation plumbing.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: AtomicU64,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding all prior tickets.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a ticket is still the latest request.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.current.load(Ordering::SeqCst) == ticket
    }
}
