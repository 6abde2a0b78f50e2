//! Valuation of play counts.
//!
//! Two rate families exist on purpose: the streaming payout rate used
//! by the parody-of-a-statement templates, and the retail rate used by
//! the shop-counter templates. Both ride on the same rounding rule:
//! half-up to two decimals, applied per line before summation, so the
//! printed lines always reconcile with the printed totals to the cent.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::model::{PlayCountedTrack, ReceiptItem, ReceiptTotals};

/// Streaming payout per play.
pub const STREAM_RATE: Decimal = dec!(0.003);
/// Retail-parody price per play.
pub const RETAIL_RATE: Decimal = dec!(0.10);
/// Tax applied by the streaming-rate templates.
pub const STREAM_TAX: Decimal = dec!(0.20);
/// The "addiction tax" applied by the retail-rate templates.
pub const RETAIL_TAX: Decimal = dec!(0.15);

/// Unit rate plus tax rate, selected by theme category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateCard {
    pub unit_rate: Decimal,
    pub tax_rate: Decimal,
}

impl RateCard {
    pub const STREAMING: RateCard = RateCard {
        unit_rate: STREAM_RATE,
        tax_rate: STREAM_TAX,
    };

    pub const RETAIL: RateCard = RateCard {
        unit_rate: RETAIL_RATE,
        tax_rate: RETAIL_TAX,
    };
}

/// Half-up to two decimal places.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price one track at the card's unit rate.
pub fn price_item(track: &PlayCountedTrack, card: RateCard) -> ReceiptItem {
    let quantity = track.play_count;
    ReceiptItem {
        track_id: track.track.id.clone(),
        display_name: track.track.display_name(),
        quantity,
        unit_price: card.unit_rate,
        line_total: round2(Decimal::from(quantity) * card.unit_rate),
    }
}

/// Totals over already-rounded line totals.
pub fn price(items: &[ReceiptItem], card: RateCard) -> ReceiptTotals {
    let subtotal: Decimal = items.iter().map(|i| i.line_total).sum();
    let tax = round2(subtotal * card.tax_rate);
    ReceiptTotals {
        subtotal,
        tax,
        total: round2(subtotal + tax),
    }
}
