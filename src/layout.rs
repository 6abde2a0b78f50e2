//! Textual receipt layout.
//!
//! Turns a [`Receipt`] into the four line sections every surface
//! consumes: header, items, totals, footer. Lines are plain strings;
//! alignment decisions (centering, right-anchored prices) happen in
//! the renderer, keyed off the currency marker and the separator
//! sentinel produced here.

use crate::model::Receipt;

/// Character width of dot-leader and label/value lines.
pub const LINE_WIDTH: usize = 50;

/// Sentinel the renderer replaces with a dashed rule.
pub const SEPARATOR: &str = "------------------------";

pub const CURRENCY: &str = "€";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedReceipt {
    pub header: Vec<String>,
    pub items: Vec<String>,
    pub totals: Vec<String>,
    pub footer: Vec<String>,
}

impl FormattedReceipt {
    pub fn line_count(&self) -> usize {
        self.header.len() + self.items.len() + self.totals.len() + self.footer.len()
    }
}

pub fn format_receipt(receipt: &Receipt) -> FormattedReceipt {
    FormattedReceipt {
        header: format_header(receipt),
        items: format_items(receipt),
        totals: format_totals(receipt),
        footer: format_footer(receipt),
    }
}

fn format_header(receipt: &Receipt) -> Vec<String> {
    let t = &receipt.theme.terminology;
    vec![
        t.store_name.to_string(),
        t.store_address.to_string(),
        t.store_phone.to_string(),
        SEPARATOR.to_string(),
        format!("CASHIER: {}     #{}", t.cashier, receipt.stats.receipt_number),
        format!(
            "DATE: {}  {}",
            receipt.metadata.generated_date, receipt.metadata.generated_time
        ),
        SEPARATOR.to_string(),
    ]
}

fn format_items(receipt: &Receipt) -> Vec<String> {
    let mut lines = Vec::with_capacity(receipt.items.len() * 3);
    for (index, item) in receipt.items.iter().enumerate() {
        lines.push(item.display_name.clone());

        let quantity = format!("{} plays", item.quantity);
        let price = format!("{CURRENCY}{:.2}", item.line_total);
        let used = quantity.chars().count() + price.chars().count();
        let dots = ".".repeat(LINE_WIDTH.saturating_sub(used).max(1));
        lines.push(format!("{quantity}{dots}{price}"));

        if index + 1 < receipt.items.len() {
            lines.push(String::new());
        }
    }
    lines
}

fn format_totals(receipt: &Receipt) -> Vec<String> {
    let t = &receipt.theme.terminology;
    vec![
        SEPARATOR.to_string(),
        label_value_line(t.subtotal_label, &format!("{CURRENCY}{:.2}", receipt.totals.subtotal)),
        label_value_line(t.tax_label, &format!("{CURRENCY}{:.2}", receipt.totals.tax)),
        label_value_line(t.total_label, &format!("{CURRENCY}{:.2}", receipt.totals.total)),
        SEPARATOR.to_string(),
    ]
}

fn format_footer(receipt: &Receipt) -> Vec<String> {
    let t = &receipt.theme.terminology;
    let wasted = t
        .wasted_time
        .replace("{hours}", &format_hours(receipt.stats.total_hours));

    let mut lines = vec![t.payment_method.to_string(), String::new()];
    lines.extend(t.thank_you.split('\n').map(str::to_string));
    lines.push(wasted);
    lines.push(SEPARATOR.to_string());
    lines
}

/// `LABEL:<spaces>VALUE` padded toward [`LINE_WIDTH`].
fn label_value_line(label: &str, value: &str) -> String {
    let used = label.chars().count() + 1 + value.chars().count();
    let spaces = " ".repeat(LINE_WIDTH.saturating_sub(used).max(1));
    format!("{label}:{spaces}{value}")
}

/// Hours the way the footer prints them: `3` for whole values,
/// `3.5` otherwise.
fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as u64)
    } else {
        format!("{hours:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::Assembler;
    use crate::model::{PlayCountedTrack, TimeRange, TrackRecord};
    use crate::theme::ThemeId;

    fn receipt() -> Receipt {
        let tracks = vec![
            PlayCountedTrack {
                track: TrackRecord {
                    id: "a".into(),
                    title: "Alpha".into(),
                    artists: vec!["Band".into()],
                    album_art: None,
                    duration_ms: 180_000,
                    popularity: 70,
                },
                play_count: 100,
                rank: 1,
            },
            PlayCountedTrack {
                track: TrackRecord {
                    id: "b".into(),
                    title: "Beta".into(),
                    artists: vec!["Band".into()],
                    album_art: None,
                    duration_ms: 240_000,
                    popularity: 40,
                },
                play_count: 50,
                rank: 2,
            },
        ];
        Assembler::new()
            .assemble_counted(tracks, ThemeId::Market, TimeRange::Short)
            .expect("receipt")
    }

    #[test]
    fn sections_carry_the_expected_shape() {
        let formatted = format_receipt(&receipt());
        assert_eq!(formatted.header.len(), 7);
        // Two items: name + price line each, one blank spacer between.
        assert_eq!(formatted.items.len(), 5);
        assert_eq!(formatted.totals.len(), 5);
        assert!(formatted.line_count() > 0);
    }

    #[test]
    fn price_lines_fill_the_full_width() {
        let formatted = format_receipt(&receipt());
        let price_line = &formatted.items[1];
        assert!(price_line.contains(CURRENCY));
        assert!(price_line.contains('.'));
        assert_eq!(price_line.chars().count(), LINE_WIDTH);
    }

    #[test]
    fn totals_are_label_value_lines() {
        let formatted = format_receipt(&receipt());
        let subtotal_line = &formatted.totals[1];
        assert!(subtotal_line.starts_with("SUBTOTAL:"));
        // 100 plays + 50 plays at the retail rate of 0.10.
        assert!(subtotal_line.ends_with("€15.00"));
    }

    #[test]
    fn footer_substitutes_hours() {
        let formatted = format_receipt(&receipt());
        assert!(!formatted.footer.iter().any(|l| l.contains("{hours}")));
    }

    #[test]
    fn hours_format_drops_trailing_zero() {
        assert_eq!(format_hours(3.0), "3");
        assert_eq!(format_hours(3.5), "3.5");
    }
}
