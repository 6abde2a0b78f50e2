use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decor::ReceiptDecor;
use crate::theme::Theme;

/// Fixed column width for item display names on every template.
pub const DISPLAY_NAME_WIDTH: usize = 40;

pub const UNKNOWN_ARTIST: &str = "Unknown";

/// A single catalog track as fetched from the data source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub title: String,
    pub artists: Vec<String>,
    pub album_art: Option<String>,
    pub duration_ms: u64,
    /// Opaque catalog popularity score, 0-100.
    pub popularity: u8,
}

impl TrackRecord {
    pub fn primary_artist(&self) -> &str {
        self.artists
            .iter()
            .map(String::as_str)
            .find(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_ARTIST)
    }

    pub fn artist_line(&self) -> String {
        if self.artists.iter().all(|a| a.is_empty()) {
            return UNKNOWN_ARTIST.to_string();
        }
        self.artists.join(", ")
    }

    /// "TITLE - ARTISTS", uppercased and clipped to [`DISPLAY_NAME_WIDTH`].
    pub fn display_name(&self) -> String {
        let title = if self.title.is_empty() {
            UNKNOWN_ARTIST
        } else {
            self.title.as_str()
        };
        let combined = format!("{} - {}", title, self.artist_line());
        truncate_with_ellipsis(combined, DISPLAY_NAME_WIDTH).to_uppercase()
    }
}

/// A track with its synthetic play count and receipt position attached.
#[derive(Clone, Debug, Serialize)]
pub struct PlayCountedTrack {
    pub track: TrackRecord,
    /// Always >= 1; a deterministic function of (popularity, rank).
    pub play_count: u32,
    /// 1-based position on the receipt after sorting.
    pub rank: u32,
}

impl PlayCountedTrack {
    /// Total milliseconds attributed to this track.
    pub fn listening_ms(&self) -> u64 {
        self.track.duration_ms.saturating_mul(u64::from(self.play_count))
    }
}

/// Catalog query window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    Short,
    Medium,
    Long,
}

impl TimeRange {
    pub fn label(self) -> &'static str {
        match self {
            Self::Short => "Last 4 Weeks",
            Self::Medium => "Last 6 Months",
            Self::Long => "All Time",
        }
    }

    /// Query-parameter form expected by the catalog API.
    pub fn api_param(self) -> &'static str {
        match self {
            Self::Short => "short_term",
            Self::Medium => "medium_term",
            Self::Long => "long_term",
        }
    }
}

/// One priced line entry on the receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReceiptItem {
    pub track_id: String,
    pub display_name: String,
    /// Play count.
    pub quantity: u32,
    pub unit_price: Decimal,
    /// round2(quantity * unit_price), fixed at construction.
    pub line_total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReceiptTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GuiltyPleasure {
    pub track: String,
    pub hours: f64,
    pub play_count: u32,
}

impl GuiltyPleasure {
    /// Sentinel used when a receipt somehow carries no tracks.
    pub fn none() -> Self {
        Self {
            track: "N/A".to_string(),
            hours: 0.0,
            play_count: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReceiptStats {
    /// Total listening time in hours, one decimal, half-up.
    pub total_hours: f64,
    pub guilty_pleasure: GuiltyPleasure,
    pub total_plays: u64,
    pub average_plays: u32,
    pub receipt_number: String,
    pub cashier: String,
    pub transaction_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReceiptMetadata {
    pub generated_date: String,
    pub generated_time: String,
    pub time_range_label: &'static str,
    pub track_count: usize,
}

/// The immutable aggregate every template and the renderer read from.
///
/// Built once per (track list, theme, time range, track limit) by the
/// assembler; a changed input produces a new `Receipt`, never an edit.
#[derive(Clone, Debug, Serialize)]
pub struct Receipt {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub time_range: TimeRange,
    pub theme: &'static Theme,
    pub items: Vec<ReceiptItem>,
    pub tracks: Vec<PlayCountedTrack>,
    pub totals: ReceiptTotals,
    pub stats: ReceiptStats,
    pub metadata: ReceiptMetadata,
    pub decor: ReceiptDecor,
}

/// Clip `s` to `max_len` characters, ending in `...` when clipped.
pub fn truncate_with_ellipsis(s: String, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s;
    }
    if max_len <= 3 {
        return "...".to_string();
    }
    let mut clipped: String = s.chars().take(max_len - 3).collect();
    clipped.push_str("...");
    clipped
}

/// `m:ss` form used by the duration columns.
pub fn format_duration(duration_ms: u64) -> String {
    let seconds = duration_ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Milliseconds to hours at one decimal, rounded half-up.
pub fn ms_to_hours(ms: u64) -> f64 {
    (ms as f64 / 3_600_000.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, artists: &[&str]) -> TrackRecord {
        TrackRecord {
            id: "t1".into(),
            title: title.into(),
            artists: artists.iter().map(|a| a.to_string()).collect(),
            album_art: None,
            duration_ms: 200_000,
            popularity: 50,
        }
    }

    #[test]
    fn display_name_is_uppercased_and_bounded() {
        let t = track("Some Extremely Long Track Title Indeed", &["An Artist"]);
        let name = t.display_name();
        assert!(name.chars().count() <= DISPLAY_NAME_WIDTH);
        assert!(name.ends_with("..."));
        assert_eq!(name, name.to_uppercase());
    }

    #[test]
    fn missing_artist_falls_back_to_unknown() {
        let t = track("Song", &[]);
        assert_eq!(t.primary_artist(), UNKNOWN_ARTIST);
        assert_eq!(t.artist_line(), UNKNOWN_ARTIST);
    }

    #[test]
    fn truncation_is_char_safe() {
        let s = "héllo wörld this is a fairly long líne of text".to_string();
        let out = truncate_with_ellipsis(s, 20);
        assert_eq!(out.chars().count(), 20);
    }

    #[test]
    fn duration_formats_as_minutes_seconds() {
        assert_eq!(format_duration(200_000), "3:20");
        assert_eq!(format_duration(59_000), "0:59");
    }

    #[test]
    fn hours_round_half_up_to_one_decimal() {
        // 0.25h rounds up to 0.3
        assert_eq!(ms_to_hours(900_000), 0.3);
        assert_eq!(ms_to_hours(3_600_000), 1.0);
    }
}
