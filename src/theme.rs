//! Receipt themes.
//!
//! A theme is a named skin: palette, typeface, and the terminology a
//! template prints (store name, tax label, sign-off). The set is closed
//! and lives in a static table; lookups never fail because unknown ids
//! fall back to the default market skin. Theme values are immutable and
//! shared by reference.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::pricing::RateCard;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    Pharmacy,
    Casino,
    CrimeLab,
    SpaceAgency,
    Market,
    Terminal,
    FastFood,
    GameStore,
    InstantPhoto,
    CodeRepository,
}

impl ThemeId {
    pub const ALL: [ThemeId; 10] = [
        ThemeId::Pharmacy,
        ThemeId::Casino,
        ThemeId::CrimeLab,
        ThemeId::SpaceAgency,
        ThemeId::Market,
        ThemeId::Terminal,
        ThemeId::FastFood,
        ThemeId::GameStore,
        ThemeId::InstantPhoto,
        ThemeId::CodeRepository,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pharmacy => "pharmacy",
            Self::Casino => "casino",
            Self::CrimeLab => "crime-lab",
            Self::SpaceAgency => "space-agency",
            Self::Market => "market",
            Self::Terminal => "terminal",
            Self::FastFood => "fast-food",
            Self::GameStore => "game-store",
            Self::InstantPhoto => "instant-photo",
            Self::CodeRepository => "code-repository",
        }
    }

    pub fn parse(s: &str) -> Option<ThemeId> {
        Self::ALL.iter().copied().find(|id| id.as_str() == s)
    }
}

/// Which rate family a theme bills at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ThemeCategory {
    /// Shop-counter parodies: retail price per play, addiction tax.
    Retail,
    /// Statement parodies: real streaming payout rate.
    Streaming,
}

impl ThemeCategory {
    pub fn rate_card(self) -> RateCard {
        match self {
            Self::Retail => RateCard::RETAIL,
            Self::Streaming => RateCard::STREAMING,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ThemeColors {
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub paper: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct FontSpec {
    /// File name resolved against the fonts directory.
    pub file: &'static str,
    pub header_px: f32,
    pub body_px: f32,
    pub footer_px: f32,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Terminology {
    pub store_name: &'static str,
    pub store_address: &'static str,
    pub store_phone: &'static str,
    pub cashier: &'static str,
    pub subtotal_label: &'static str,
    pub tax_label: &'static str,
    pub total_label: &'static str,
    pub payment_method: &'static str,
    pub thank_you: &'static str,
    /// Contains a `{hours}` placeholder substituted at layout time.
    pub wasted_time: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Theme {
    pub id: ThemeId,
    pub name: &'static str,
    pub category: ThemeCategory,
    pub colors: ThemeColors,
    pub font: FontSpec,
    pub terminology: Terminology,
}

impl Theme {
    pub fn rate_card(&self) -> RateCard {
        self.category.rate_card()
    }
}

/// `#rrggbb` to an opaque pixel.
pub fn parse_hex(s: &str) -> Option<Rgba<u8>> {
    let s = s.trim().trim_start_matches('#');
    if s.len() != 6 {
        return None;
    }
    let b = hex::decode(s).ok()?;
    Some(Rgba([b[0], b[1], b[2], 255]))
}

pub fn get(id: ThemeId) -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.id == id)
        .unwrap_or_else(|| default_theme())
}

/// Loose lookup by id string; unknown ids get the default skin.
pub fn lookup(id: &str) -> &'static Theme {
    ThemeId::parse(id).map(get).unwrap_or_else(default_theme)
}

pub fn default_theme() -> &'static Theme {
    &THEMES[4] // Market
}

pub fn all() -> &'static [Theme] {
    &THEMES
}

static THEMES: [Theme; 10] = [
    Theme {
        id: ThemeId::Pharmacy,
        name: "Pharmacy",
        category: ThemeCategory::Retail,
        colors: ThemeColors {
            background: "#ffffff",
            text: "#005500",
            accent: "#00aa00",
            paper: "#f5fff5",
        },
        font: FontSpec {
            file: "CourierPrime-Regular.ttf",
            header_px: 13.0,
            body_px: 11.0,
            footer_px: 9.0,
        },
        terminology: Terminology {
            store_name: "TRACK PHARMACY #4269",
            store_address: "789 Rhythm Road",
            store_phone: "RX: 555-MEDS-04",
            cashier: "RPh: DR. BEAT",
            subtotal_label: "PRESCRIPTION TOTAL",
            tax_label: "DISPENSING FEE",
            total_label: "TOTAL",
            payment_method: "INSURANCE + COPAY",
            thank_you: "Be well!\nCOME BACK FOR A REFILL",
            wasted_time: "Dosage: {hours}hrs daily",
        },
    },
    Theme {
        id: ThemeId::Casino,
        name: "Casino",
        category: ThemeCategory::Streaming,
        colors: ThemeColors {
            background: "#1a0a0a",
            text: "#ffd700",
            accent: "#ff3333",
            paper: "#241111",
        },
        font: FontSpec {
            file: "VT323-Regular.ttf",
            header_px: 15.0,
            body_px: 12.0,
            footer_px: 10.0,
        },
        terminology: Terminology {
            store_name: "GOLDEN NUGGET CASINO",
            store_address: "Las Vegas, NV 89109",
            store_phone: "SLOT MACHINE #777",
            cashier: "PIT BOSS: LUCKY",
            subtotal_label: "TOTAL PLAYS BET",
            tax_label: "HOUSE EDGE",
            total_label: "TOTAL VALUE",
            payment_method: "CHIPS ****7777",
            thank_you: "The house always wins\nCome back tomorrow!",
            wasted_time: "Time at the tables: {hours}hrs",
        },
    },
    Theme {
        id: ThemeId::CrimeLab,
        name: "Crime Lab",
        category: ThemeCategory::Streaming,
        colors: ThemeColors {
            background: "#0d1a0d",
            text: "#9fe2bf",
            accent: "#3cb371",
            paper: "#122412",
        },
        font: FontSpec {
            file: "SpaceMono-Regular.ttf",
            header_px: 14.0,
            body_px: 11.0,
            footer_px: 9.0,
        },
        terminology: Terminology {
            store_name: "LOS HERMANOS DISTRIBUTION CO.",
            store_address: "Albuquerque, NM 87101",
            store_phone: "Lab Location: UNDISCLOSED",
            cashier: "COOK: HEISENBERG",
            subtotal_label: "BATCH VALUE",
            tax_label: "TERRITORY CUT",
            total_label: "STREET VALUE",
            payment_method: "CASH, UNMARKED",
            thank_you: "The purest product on the market\n99.1% customer satisfaction",
            wasted_time: "Cook time: {hours}hrs",
        },
    },
    Theme {
        id: ThemeId::SpaceAgency,
        name: "Space Agency",
        category: ThemeCategory::Streaming,
        colors: ThemeColors {
            background: "#050a1e",
            text: "#e8ecff",
            accent: "#fc3d21",
            paper: "#0a1230",
        },
        font: FontSpec {
            file: "SpaceMono-Regular.ttf",
            header_px: 14.0,
            body_px: 11.0,
            footer_px: 9.0,
        },
        terminology: Terminology {
            store_name: "MISSION CONTROL AUDIO LAB",
            store_address: "Kennedy Sound Center, FL",
            store_phone: "Transmission: DEEP SPACE",
            cashier: "FLIGHT DIRECTOR: HOUSTON",
            subtotal_label: "MISSION COST",
            tax_label: "LAUNCH SURCHARGE",
            total_label: "TOTAL BUDGET",
            payment_method: "FEDERAL GRANT ****1969",
            thank_you: "That's one small play for man\nGodspeed, listener",
            wasted_time: "Mission elapsed time: {hours}hrs",
        },
    },
    Theme {
        id: ThemeId::Market,
        name: "Supermarket",
        category: ThemeCategory::Retail,
        colors: ThemeColors {
            background: "#ffffff",
            text: "#000000",
            accent: "#ff0000",
            paper: "#f8f8f8",
        },
        font: FontSpec {
            file: "CourierPrime-Regular.ttf",
            header_px: 14.0,
            body_px: 12.0,
            footer_px: 10.0,
        },
        terminology: Terminology {
            store_name: "TRACK SUPERMARKET",
            store_address: "123 Music Street",
            store_phone: "Tel: 555-MUSIC-01",
            cashier: "DJ-BOT",
            subtotal_label: "SUBTOTAL",
            tax_label: "ADDICTION TAX",
            total_label: "TOTAL",
            payment_method: "CARD ****4242 APPROVED",
            thank_you: "Thank you for shopping at\nTRACK MARKET",
            wasted_time: "You wasted {hours}hrs this month",
        },
    },
    Theme {
        id: ThemeId::Terminal,
        name: "Terminal",
        category: ThemeCategory::Streaming,
        colors: ThemeColors {
            background: "#000000",
            text: "#00ff41",
            accent: "#008f11",
            paper: "#001a00",
        },
        font: FontSpec {
            file: "VT323-Regular.ttf",
            header_px: 14.0,
            body_px: 12.0,
            footer_px: 10.0,
        },
        terminology: Terminology {
            store_name: "THE CONSTRUCT",
            store_address: "Sector 7, The Grid",
            store_phone: "Operator: TANK",
            cashier: "AGENT: SM1TH",
            subtotal_label: "SIGNAL COST",
            tax_label: "SYSTEM OVERHEAD",
            total_label: "TOTAL EXTRACTED",
            payment_method: "DIGITAL CREDITS",
            thank_you: "There is no spoon\nWake up, listener",
            wasted_time: "Time in the simulation: {hours}hrs",
        },
    },
    Theme {
        id: ThemeId::FastFood,
        name: "Fast Food",
        category: ThemeCategory::Retail,
        colors: ThemeColors {
            background: "#fffbe8",
            text: "#2d1600",
            accent: "#da291c",
            paper: "#fff3cc",
        },
        font: FontSpec {
            file: "CourierPrime-Regular.ttf",
            header_px: 14.0,
            body_px: 12.0,
            footer_px: 10.0,
        },
        terminology: Terminology {
            store_name: "McTRACK'S DRIVE-THRU",
            store_address: "Combo Meal Boulevard",
            store_phone: "Order ahead: 555-FRIES",
            cashier: "CREW: RONALD",
            subtotal_label: "MEAL TOTAL",
            tax_label: "SUPERSIZE TAX",
            total_label: "AMOUNT DUE",
            payment_method: "CONTACTLESS ****4242",
            thank_you: "Thank you, drive through!\nHave a nice day",
            wasted_time: "Time in line: {hours}hrs",
        },
    },
    Theme {
        id: ThemeId::GameStore,
        name: "Game Store",
        category: ThemeCategory::Streaming,
        colors: ThemeColors {
            background: "#171a21",
            text: "#c7d5e0",
            accent: "#66c0f4",
            paper: "#1b2838",
        },
        font: FontSpec {
            file: "VT323-Regular.ttf",
            header_px: 14.0,
            body_px: 12.0,
            footer_px: 10.0,
        },
        terminology: Terminology {
            store_name: "VAPOR MUSIC STORE",
            store_address: "Library -> Your Collection",
            store_phone: "Support: GL HF",
            cashier: "ACCOUNT: Player",
            subtotal_label: "CART SUBTOTAL",
            tax_label: "PLATFORM CUT",
            total_label: "TOTAL VALUE",
            payment_method: "WALLET CREDITS",
            thank_you: "Thanks for your purchase!\nDOWNLOAD COMPLETE",
            wasted_time: "Time played: {hours}hrs",
        },
    },
    Theme {
        id: ThemeId::InstantPhoto,
        name: "Instant Photo",
        category: ThemeCategory::Streaming,
        colors: ThemeColors {
            background: "#f4efe6",
            text: "#3a3a3a",
            accent: "#b0653a",
            paper: "#faf7f0",
        },
        font: FontSpec {
            file: "CourierPrime-Regular.ttf",
            header_px: 13.0,
            body_px: 11.0,
            footer_px: 9.0,
        },
        terminology: Terminology {
            store_name: "ONE-HOUR SOUND PHOTO",
            store_address: "Darkroom 3, Memory Lane",
            store_phone: "Develops while you wait",
            cashier: "DEVELOPED BY: RAY",
            subtotal_label: "PRINTS TOTAL",
            tax_label: "DEVELOPING FEE",
            total_label: "TOTAL",
            payment_method: "EXACT CHANGE ONLY",
            thank_you: "Shake it like a\npolaroid picture",
            wasted_time: "Exposure time: {hours}hrs",
        },
    },
    Theme {
        id: ThemeId::CodeRepository,
        name: "Code Repository",
        category: ThemeCategory::Streaming,
        colors: ThemeColors {
            background: "#0d1117",
            text: "#c9d1d9",
            accent: "#39d353",
            paper: "#161b22",
        },
        font: FontSpec {
            file: "SpaceMono-Regular.ttf",
            header_px: 13.0,
            body_px: 11.0,
            footer_px: 9.0,
        },
        terminology: Terminology {
            store_name: "hub.example/you/music-addiction",
            store_address: "main branch, force-pushed",
            store_phone: "CI: passing (somehow)",
            cashier: "MAINTAINER: you",
            subtotal_label: "COMPUTE COST",
            tax_label: "MERGE OVERHEAD",
            total_label: "TOTAL SPEND",
            payment_method: "FREE TIER (ABUSED)",
            thank_you: "LGTM\nSquash and merge",
            wasted_time: "CI minutes burned: {hours}hrs",
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_resolves_to_its_theme() {
        for id in ThemeId::ALL {
            assert_eq!(get(id).id, id);
            assert_eq!(lookup(id.as_str()).id, id);
        }
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        assert_eq!(lookup("laundromat").id, ThemeId::Market);
        assert_eq!(default_theme().id, ThemeId::Market);
    }

    #[test]
    fn palettes_parse() {
        for theme in all() {
            for value in [
                theme.colors.background,
                theme.colors.text,
                theme.colors.accent,
                theme.colors.paper,
            ] {
                assert!(parse_hex(value).is_some(), "bad palette entry {value}");
            }
        }
    }

    #[test]
    fn hex_parsing_rejects_junk() {
        assert!(parse_hex("#12345").is_none());
        assert!(parse_hex("nope!!").is_none());
        assert_eq!(parse_hex("#ff0000"), Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn wasted_time_lines_carry_the_placeholder() {
        for theme in all() {
            assert!(theme.terminology.wasted_time.contains("{hours}"));
        }
    }
}
