//! Decorative machine-readable codes.
//!
//! Receipts print a barcode strip and a QR square. Neither claims
//! standards compliance — the barcode is a bit pattern derived from the
//! payload's character codes, convincing at arm's length, and the QR is
//! a real code but always carries the one fixed payload below.

use image::{ImageBuffer, Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;

/// Number every printed barcode encodes.
pub const BARCODE_PAYLOAD: &str = "9780393356250";

/// Where every scanned QR lands.
pub const QR_PAYLOAD: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

#[derive(Debug, Error)]
pub enum CodeError {
    #[error("failed to build qr code")]
    QrBuild,
}

/// Guard bars, six data bits per character, a separator bit between
/// characters, closing guard. `true` prints dark.
pub fn barcode_pattern(value: &str) -> Vec<bool> {
    let mut pattern = vec![true, false, true];

    for ch in value.chars() {
        let code = ch as u32;
        pattern.extend([
            code & 1 != 0,
            code & 2 == 0,
            code & 4 != 0,
            code & 8 != 0,
            code & 16 == 0,
            code & 32 != 0,
            false,
        ]);
    }

    pattern.extend([true, false, true]);
    pattern
}

/// Draw a barcode strip with its top-left corner at `(x, y)`.
/// Bars outside the buffer are clipped, never panicked on.
pub fn draw_barcode(
    img: &mut RgbaImage,
    pattern: &[bool],
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    dark: Rgba<u8>,
) {
    if pattern.is_empty() || width == 0 {
        return;
    }
    let bar_width = (width as f32 / pattern.len() as f32).max(1.0);
    for (i, &bar) in pattern.iter().enumerate() {
        if !bar {
            continue;
        }
        let x0 = x + (i as f32 * bar_width).round() as u32;
        let x1 = x + ((i + 1) as f32 * bar_width).round() as u32;
        for px in x0..x1 {
            for py in y..y.saturating_add(height) {
                if px < img.width() && py < img.height() {
                    img.put_pixel(px, py, dark);
                }
            }
        }
    }
}

/// Rasterize the fixed-payload QR as square modules on a quiet margin.
pub fn qr_image(
    size: u32,
    margin: u32,
    dark: Rgba<u8>,
    light: Rgba<u8>,
) -> Result<RgbaImage, CodeError> {
    let code = QrCode::with_error_correction_level(QR_PAYLOAD.as_bytes(), EcLevel::M)
        .map_err(|_| CodeError::QrBuild)?;

    let width_modules = code.width() as u32;
    let total_modules = width_modules + 2 * margin;
    let module_px = (size / total_modules).max(1);
    let actual_size = total_modules * module_px;

    let mut img = ImageBuffer::from_pixel(actual_size, actual_size, light);
    for y in 0..width_modules {
        for x in 0..width_modules {
            if !matches!(code[(x as usize, y as usize)], Color::Dark) {
                continue;
            }
            let px0 = (x + margin) * module_px;
            let py0 = (y + margin) * module_px;
            for py in py0..(py0 + module_px) {
                for px in px0..(px0 + module_px) {
                    img.put_pixel(px, py, dark);
                }
            }
        }
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_is_guarded_on_both_ends() {
        let p = barcode_pattern(BARCODE_PAYLOAD);
        assert_eq!(&p[..3], &[true, false, true]);
        assert_eq!(&p[p.len() - 3..], &[true, false, true]);
        assert_eq!(p.len(), 3 + BARCODE_PAYLOAD.len() * 7 + 3);
    }

    #[test]
    fn pattern_is_deterministic() {
        assert_eq!(barcode_pattern("123"), barcode_pattern("123"));
        assert_ne!(barcode_pattern("123"), barcode_pattern("124"));
    }

    #[test]
    fn qr_renders_at_a_stable_size() {
        let dark = Rgba([0, 0, 0, 255]);
        let light = Rgba([255, 255, 255, 255]);
        let a = qr_image(120, 2, dark, light).expect("qr");
        let b = qr_image(120, 2, dark, light).expect("qr");
        assert_eq!(a.dimensions(), b.dimensions());
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn barcode_clips_at_buffer_edges() {
        let mut img = ImageBuffer::from_pixel(30, 10, Rgba([255u8, 255, 255, 255]));
        let p = barcode_pattern("42");
        // Deliberately wider than the buffer.
        draw_barcode(&mut img, &p, 5, 2, 100, 50, Rgba([0, 0, 0, 255]));
        assert_eq!(img.dimensions(), (30, 10));
    }
}
