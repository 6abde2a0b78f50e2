use std::sync::Once;

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;

use playslip::assemble::{AssembleError, Assembler};
use playslip::layout;
use playslip::model::{PlayCountedTrack, TimeRange, TrackRecord};
use playslip::pricing::{self, RateCard, STREAM_RATE};
use playslip::render;
use playslip::theme::ThemeId;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

fn counted(title: &str, artist: &str, plays: u32) -> PlayCountedTrack {
    PlayCountedTrack {
        track: TrackRecord {
            id: title.to_ascii_lowercase(),
            title: title.into(),
            artists: vec![artist.into()],
            album_art: None,
            duration_ms: 210_000,
            popularity: 0,
        },
        play_count: plays,
        rank: 0,
    }
}

fn fixed_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-07-01T12:34:56Z")
        .expect("timestamp")
        .with_timezone(&Utc)
}

#[test]
fn assembling_twice_reproduces_every_derived_field() {
    init_tracing();
    let make = || {
        Assembler::new()
            .assemble_counted_at(
                vec![
                    counted("Alpha", "Band A", 300),
                    counted("Beta", "Band B", 120),
                    counted("Gamma", "Band C", 15),
                ],
                ThemeId::GameStore,
                TimeRange::Medium,
                fixed_time(),
            )
            .expect("receipt")
    };

    let (r1, r2) = (make(), make());
    assert_eq!(r1.items, r2.items);
    assert_eq!(r1.totals, r2.totals);
    assert_eq!(r1.decor, r2.decor);
    assert_eq!(r1.stats, r2.stats);
    assert_eq!(r1.metadata, r2.metadata);
}

#[test]
fn rounding_stays_consistent_across_every_item() {
    let tracks: Vec<_> = (1..40).map(|i| counted(&format!("T{i}"), "A", i * 7)).collect();
    let receipt = Assembler::with_track_limit(50)
        .assemble_counted(tracks, ThemeId::Casino, TimeRange::Long)
        .expect("receipt");

    for item in &receipt.items {
        let expected = pricing::round2(rust_decimal::Decimal::from(item.quantity) * item.unit_price);
        assert!((item.line_total - expected).abs() < dec!(0.01));
    }
    let t = &receipt.totals;
    assert!((t.total - (t.subtotal + t.tax)).abs() < dec!(0.01));
}

#[test]
fn tied_play_counts_preserve_input_order() {
    let receipt = Assembler::new()
        .assemble_counted(
            vec![
                counted("One", "A", 30),
                counted("Two", "A", 30),
                counted("Three", "A", 30),
                counted("Four", "A", 99),
            ],
            ThemeId::Market,
            TimeRange::Short,
        )
        .expect("receipt");

    let titles: Vec<_> = receipt.tracks.iter().map(|t| t.track.title.as_str()).collect();
    assert_eq!(titles, vec!["Four", "One", "Two", "Three"]);
}

#[test]
fn guilty_pleasure_references_the_most_played_track() {
    let receipt = Assembler::new()
        .assemble_counted(
            vec![
                counted("Low", "A", 5),
                counted("Top", "A", 50),
                counted("Mid", "A", 20),
            ],
            ThemeId::Market,
            TimeRange::Short,
        )
        .expect("receipt");

    assert_eq!(receipt.stats.guilty_pleasure.play_count, 50);
    assert_eq!(receipt.stats.guilty_pleasure.track, "Top");
}

#[test]
fn empty_input_raises_and_produces_nothing() {
    let result = Assembler::new().assemble(vec![], ThemeId::Pharmacy, TimeRange::Short);
    assert!(matches!(result, Err(AssembleError::EmptyInput)));
}

#[test]
fn thousand_track_receipts_stay_inside_the_height_cap() {
    let tracks: Vec<_> = (0..1000u32)
        .map(|i| counted(&format!("Track {i}"), "Artist", 1000 - i))
        .collect();
    let receipt = Assembler::with_track_limit(50)
        .assemble_counted(tracks, ThemeId::Terminal, TimeRange::Long)
        .expect("receipt");
    let formatted = layout::format_receipt(&receipt);

    // Even feeding the raw line count of a 1000-track layout through
    // sizing cannot exceed the cap.
    let (_, h) = render::canvas_size(formatted.line_count() * 20, 1.0);
    assert!(h <= render::MAX_HEIGHT);
    let (_, h3) = render::canvas_size(100_000, 3.0);
    assert_eq!(h3, render::MAX_HEIGHT * 3);
}

#[test]
fn reference_receipt_totals_match_the_worked_example() {
    // Tracks ("A","X",100) and ("B","Y",50) at 0.003/play with 15% tax.
    let card = RateCard {
        unit_rate: STREAM_RATE,
        tax_rate: dec!(0.15),
    };
    let items = vec![
        pricing::price_item(&counted("A", "X", 100), card),
        pricing::price_item(&counted("B", "Y", 50), card),
    ];
    let totals = pricing::price(&items, card);
    assert_eq!(totals.subtotal, dec!(0.45));
    assert_eq!(totals.tax, dec!(0.07));
    assert_eq!(totals.total, dec!(0.52));
}

#[test]
fn receipts_are_readable_by_every_theme() {
    let tracks = playslip::demo::preset_tracks(25);
    for id in ThemeId::ALL {
        let receipt = Assembler::new()
            .assemble_counted(tracks.clone(), id, TimeRange::Short)
            .expect("receipt");
        let formatted = layout::format_receipt(&receipt);
        assert!(formatted.line_count() > 20, "theme {id:?} produced no layout");
        assert_eq!(receipt.decor.items.len(), receipt.items.len());
    }
}
