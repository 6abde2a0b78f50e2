//! Canvas rendering.
//!
//! Lays the formatted line sections out on an RGBA surface with the
//! theme's typeface and palette, then finishes with the paper effects.
//! The whole pass is atomic: the buffer is built locally and only
//! returned on success, so a failed render never exposes a half-drawn
//! surface. Texture and tear noise draw from the receipt seed, keeping
//! repeated exports of the same receipt byte-identical.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use image::{ImageBuffer, Rgba, RgbaImage};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusttype::{point, Font, Scale};
use thiserror::Error;
use tracing::debug;

use crate::barcode;
use crate::decor::DecorSeed;
use crate::layout::{FormattedReceipt, CURRENCY, SEPARATOR};
use crate::theme::{parse_hex, Theme};

/// Fixed receipt width at scale 1.
pub const RECEIPT_WIDTH: u32 = 400;
/// Sizing unit per text line at scale 1.
pub const BASE_LINE_HEIGHT: u32 = 18;
/// Extra sizing lines reserved for inter-section spacing.
pub const SECTION_SPACING_LINES: u32 = 8;
/// Top and bottom page margin at scale 1.
pub const PAGE_MARGIN: u32 = 40;
/// Vertical room reserved for the QR and barcode block at scale 1.
pub const CODE_BLOCK_HEIGHT: u32 = 110;
/// Height cap at scale 1; pathological inputs clip instead of growing.
pub const MAX_HEIGHT: u32 = 1200;

const TEXT_MARGIN: u32 = 20;
const TEAR_HEIGHT: f32 = 15.0;
const TEAR_STEP: f32 = 10.0;
const NOISE_SPAN: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStage {
    Sizing,
    Background,
    Sections,
    PostEffects,
}

impl std::fmt::Display for RenderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Sizing => "sizing",
            Self::Background => "background",
            Self::Sections => "sections",
            Self::PostEffects => "post-effects",
        })
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{stage} stage: failed to load font {name}: {reason}")]
    Font {
        stage: RenderStage,
        name: String,
        reason: String,
    },
    #[error("{stage} stage: invalid palette color {value}")]
    Palette { stage: RenderStage, value: String },
    #[error("sections stage: {0}")]
    Code(#[from] barcode::CodeError),
}

static FONT_CACHE: Lazy<Mutex<HashMap<String, Arc<Font<'static>>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn fonts_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PLAYSLIP_FONTS_DIR") {
        return PathBuf::from(dir);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("fonts")
}

fn load_font_cached(name: &str) -> Result<Arc<Font<'static>>, RenderError> {
    if let Some(f) = FONT_CACHE.lock().get(name) {
        return Ok(Arc::clone(f));
    }

    let bytes = std::fs::read(fonts_dir().join(name)).map_err(|e| RenderError::Font {
        stage: RenderStage::Sections,
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    let font = Font::try_from_vec(bytes).ok_or_else(|| RenderError::Font {
        stage: RenderStage::Sections,
        name: name.to_string(),
        reason: "not a parseable font file".to_string(),
    })?;

    let font = Arc::new(font);
    FONT_CACHE
        .lock()
        .insert(name.to_string(), Arc::clone(&font));
    Ok(font)
}

/// Surface dimensions for a receipt with `line_count` text lines.
/// Height is line-driven and capped at [`MAX_HEIGHT`]; both axes scale
/// linearly, so a given receipt always sizes the same at scale 1.
pub fn canvas_size(line_count: usize, scale: f32) -> (u32, u32) {
    let height = (line_count as u32)
        .saturating_mul(BASE_LINE_HEIGHT)
        .saturating_add(SECTION_SPACING_LINES * BASE_LINE_HEIGHT)
        .saturating_add(PAGE_MARGIN * 2)
        .saturating_add(CODE_BLOCK_HEIGHT)
        .min(MAX_HEIGHT);
    (
        (RECEIPT_WIDTH as f32 * scale).round() as u32,
        (height as f32 * scale).round() as u32,
    )
}

/// Render the formatted sections onto a fresh surface.
pub fn render(
    formatted: &FormattedReceipt,
    theme: &Theme,
    seed: DecorSeed,
    scale: f32,
) -> Result<RgbaImage, RenderError> {
    let scale = scale.clamp(0.5, 4.0);

    // Sizing
    let (width, height) = canvas_size(formatted.line_count(), scale);

    // Background
    let background = palette(theme.colors.background, RenderStage::Background)?;
    let text_color = palette(theme.colors.text, RenderStage::Background)?;
    let mut img = ImageBuffer::from_pixel(width, height, background);
    paper_texture(&mut img, seed);

    // Sections
    let font = load_font_cached(theme.font.file)?;
    let margin = (TEXT_MARGIN as f32 * scale).round() as i32;
    let mut y = margin as f32;

    let header_px = theme.font.header_px * scale;
    let body_px = theme.font.body_px * scale;
    let footer_px = theme.font.footer_px * scale;

    let header_lh = theme.font.header_px * 1.5 * scale;
    let body_lh = theme.font.body_px * 1.5 * scale;
    let footer_lh = theme.font.footer_px * 1.5 * scale;

    for (i, line) in formatted.header.iter().enumerate() {
        if line == SEPARATOR {
            dashed_line(&mut img, margin, y + header_lh / 2.0, text_color);
        } else if i == 0 {
            // Store name sits centered at the top.
            draw_centered(&mut img, &font, header_px, y, text_color, line);
        } else {
            draw_text(&mut img, &font, header_px, margin, y, text_color, line);
        }
        y += header_lh;
    }

    y += body_lh / 2.0;
    for line in &formatted.items {
        if line.is_empty() {
            y += body_lh / 2.0;
            continue;
        }
        if let Some(idx) = line.find(CURRENCY) {
            let (text, price) = line.split_at(idx);
            draw_text(&mut img, &font, body_px, margin, y, text_color, text);
            draw_right_aligned(&mut img, &font, body_px, y, text_color, price);
        } else {
            draw_text(&mut img, &font, body_px, margin, y, text_color, line);
        }
        y += body_lh;
    }

    y += body_lh / 2.0;
    for line in &formatted.totals {
        if line == SEPARATOR {
            dashed_line(&mut img, margin, y + body_lh / 2.0, text_color);
        } else if let Some(idx) = line.find(':') {
            let label = &line[..=idx];
            let value = line[idx + 1..].trim();
            draw_text(&mut img, &font, body_px, margin, y, text_color, label);
            draw_right_aligned(&mut img, &font, body_px, y, text_color, value);
        } else {
            draw_text(&mut img, &font, body_px, margin, y, text_color, line);
        }
        y += body_lh;
    }

    y += footer_lh / 2.0;
    for line in &formatted.footer {
        if line == SEPARATOR {
            dashed_line(&mut img, margin, y + footer_lh / 2.0, text_color);
        } else {
            draw_centered(&mut img, &font, footer_px, y, text_color, line);
        }
        y += footer_lh;
    }

    draw_code_block(&mut img, y, scale, text_color, background)?;

    // Post effects
    tear_edge(&mut img, seed, scale);

    debug!(width, height, theme = theme.id.as_str(), "rendered receipt");
    Ok(img)
}

fn palette(value: &str, stage: RenderStage) -> Result<Rgba<u8>, RenderError> {
    parse_hex(value).ok_or_else(|| RenderError::Palette {
        stage,
        value: value.to_string(),
    })
}

/// QR square and barcode strip, centered under the footer.
fn draw_code_block(
    img: &mut RgbaImage,
    y: f32,
    scale: f32,
    dark: Rgba<u8>,
    light: Rgba<u8>,
) -> Result<(), RenderError> {
    let width = img.width();

    let qr_size = (70.0 * scale).round() as u32;
    let qr = barcode::qr_image(qr_size, 1, dark, light)?;
    let qr_x = width.saturating_sub(qr.width()) / 2;
    let qr_y = y.max(0.0).round() as u32;
    overlay(img, &qr, qr_x, qr_y);

    let bar_width = (200.0 * scale).round() as u32;
    let bar_height = (25.0 * scale).round() as u32;
    let pattern = barcode::barcode_pattern(barcode::BARCODE_PAYLOAD);
    let bar_x = width.saturating_sub(bar_width) / 2;
    let bar_y = qr_y.saturating_add(qr.height()).saturating_add((6.0 * scale) as u32);
    barcode::draw_barcode(img, &pattern, bar_x, bar_y, bar_width, bar_height, dark);
    Ok(())
}

fn overlay(base: &mut RgbaImage, over: &RgbaImage, x: u32, y: u32) {
    for oy in 0..over.height() {
        for ox in 0..over.width() {
            let bx = x + ox;
            let by = y + oy;
            if bx >= base.width() || by >= base.height() {
                continue;
            }
            base.put_pixel(bx, by, *over.get_pixel(ox, oy));
        }
    }
}

/// Advance-width sum for one line at the given pixel size.
fn text_width(font: &Font<'_>, px: f32, text: &str) -> f32 {
    let scale = Scale::uniform(px);
    text.chars()
        .map(|ch| font.glyph(ch).scaled(scale).h_metrics().advance_width)
        .sum()
}

/// Alpha-blended glyph rasterization; anything outside the buffer is
/// clipped silently.
fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    x: i32,
    y: f32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let baseline_y = y + v_metrics.ascent;
    let mut caret_x = x as f32;

    for ch in text.chars() {
        let glyph = font
            .glyph(ch)
            .scaled(scale)
            .positioned(point(caret_x, baseline_y));
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= img.width() || py >= img.height() {
                    return;
                }
                let a = v.clamp(0.0, 1.0);
                if a <= 0.0 {
                    return;
                }
                let dst = img.get_pixel_mut(px, py);
                let inv = 1.0 - a;
                dst.0[0] = (color.0[0] as f32 * a + dst.0[0] as f32 * inv) as u8;
                dst.0[1] = (color.0[1] as f32 * a + dst.0[1] as f32 * inv) as u8;
                dst.0[2] = (color.0[2] as f32 * a + dst.0[2] as f32 * inv) as u8;
                dst.0[3] = 255;
            });
        }
        caret_x += glyph.unpositioned().h_metrics().advance_width;
    }
}

fn draw_centered(img: &mut RgbaImage, font: &Font<'_>, px: f32, y: f32, color: Rgba<u8>, text: &str) {
    let w = text_width(font, px, text);
    let x = (img.width() as f32 / 2.0 - w / 2.0).round() as i32;
    draw_text(img, font, px, x, y, color, text);
}

fn draw_right_aligned(
    img: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    y: f32,
    color: Rgba<u8>,
    text: &str,
) {
    let w = text_width(font, px, text);
    let margin = img.width() as f32 * TEXT_MARGIN as f32 / RECEIPT_WIDTH as f32;
    let x = (img.width() as f32 - margin - w).round() as i32;
    draw_text(img, font, px, x, y, color, text);
}

/// 5-on / 3-off horizontal rule, one pixel tall per scale unit.
fn dashed_line(img: &mut RgbaImage, margin: i32, y: f32, color: Rgba<u8>) {
    let y = y.round() as i64;
    if y < 0 || y as u32 >= img.height() {
        return;
    }
    let x_end = img.width() as i64 - margin as i64;
    let mut x = margin as i64;
    while x < x_end {
        for dx in 0..5 {
            let px = x + dx;
            if px >= 0 && (px as u32) < img.width() && px < x_end {
                img.put_pixel(px as u32, y as u32, color);
            }
        }
        x += 8;
    }
}

/// Per-pixel noise plus a vertical paper gradient, both seeded.
pub fn paper_texture(img: &mut RgbaImage, seed: DecorSeed) {
    let mut rng = StdRng::seed_from_u64(seed.value());
    let height = img.height();

    for (_, py, pixel) in img.enumerate_pixels_mut() {
        let noise: f32 = rng.random_range(-NOISE_SPAN..NOISE_SPAN);
        for c in 0..3 {
            pixel.0[c] = (pixel.0[c] as f32 + noise).clamp(0.0, 255.0) as u8;
        }

        // White-to-black gradient overlay, 5% at the extremes.
        let t = py as f32 / height.max(1) as f32;
        let (tint, alpha) = if t < 0.5 {
            (255.0, 0.05 * (1.0 - 2.0 * t))
        } else {
            (0.0, 0.05 * (2.0 * t - 1.0))
        };
        for c in 0..3 {
            pixel.0[c] = (pixel.0[c] as f32 * (1.0 - alpha) + tint * alpha) as u8;
        }
    }
}

/// Seeded zigzag cut along the bottom edge; pixels below the cut go
/// transparent.
pub fn tear_edge(img: &mut RgbaImage, seed: DecorSeed, scale: f32) {
    let width = img.width();
    let height = img.height();
    let tear_height = TEAR_HEIGHT * scale;
    let step = (TEAR_STEP * scale).max(1.0);
    if height as f32 <= tear_height {
        return;
    }
    let tear_y = height as f32 - tear_height;

    // Mix the tear stream away from the texture stream.
    let mut rng = StdRng::seed_from_u64(seed.value() ^ 0x7EA2);
    let mut points = Vec::new();
    let mut x = 0.0;
    while x <= width as f32 + step {
        points.push((x, tear_y + rng.random_range(0.0..tear_height)));
        x += step;
    }
    if points.len() < 2 {
        return;
    }

    for px in 0..width {
        let fx = px as f32;
        let i = ((fx / step) as usize).min(points.len().saturating_sub(2));
        let (x0, y0) = points[i];
        let (x1, y1) = points[i + 1];
        let t = if x1 > x0 { (fx - x0) / (x1 - x0) } else { 0.0 };
        let cut = y0 + (y1 - y0) * t.clamp(0.0, 1.0);
        for py in (cut.max(0.0) as u32)..height {
            img.get_pixel_mut(px, py).0[3] = 0;
        }
    }
}
