//! Rasterization and export.
//!
//! Encodes a rendered surface into one of the shareable formats. The
//! encoder result is checked for emptiness because a zero-byte export
//! must surface as an error with the attempted format attached, never
//! as a silently "saved" file.

use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::layout;
use crate::model::Receipt;
use crate::render::{self, RenderError};

pub const PRODUCT_NAME: &str = "playslip";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
        }
    }

    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Raster scale steps offered by the export dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportScale {
    X1,
    X1_5,
    X2,
    X3,
}

impl ExportScale {
    pub fn factor(self) -> f32 {
        match self {
            Self::X1 => 1.0,
            Self::X1_5 => 1.5,
            Self::X2 => 2.0,
            Self::X3 => 3.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode {format} image: {reason}")]
    Encode { format: ImageFormat, reason: String },
    #[error("{format} encoder produced no data")]
    EmptyOutput { format: ImageFormat },
}

/// Render + encode errors for the one-call pipeline entry point.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Encode a rendered surface. `quality` applies to lossy formats only
/// and is clamped into `[0, 1]`.
pub fn encode(img: &RgbaImage, format: ImageFormat, quality: f32) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();

    let result = match format {
        ImageFormat::Png => PngEncoder::new(&mut out).write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgba8,
        ),
        ImageFormat::Jpeg => {
            // Jpeg carries no alpha channel; flatten first.
            let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            let q = (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8;
            JpegEncoder::new_with_quality(&mut out, q).write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )
        }
        ImageFormat::Webp => WebPEncoder::new_lossless(&mut out).write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgba8,
        ),
    };

    result.map_err(|e| ExportError::Encode {
        format,
        reason: e.to_string(),
    })?;

    if out.is_empty() {
        return Err(ExportError::EmptyOutput { format });
    }

    debug!(%format, bytes = out.len(), "encoded receipt image");
    Ok(out)
}

/// Full surface pipeline: lay out, render at the requested scale, and
/// encode. The receipt's own seed drives the paper effects, so the same
/// receipt exports the same bytes.
pub fn rasterize(
    receipt: &Receipt,
    scale: ExportScale,
    format: ImageFormat,
    quality: f32,
) -> Result<Vec<u8>, PipelineError> {
    let formatted = layout::format_receipt(receipt);
    let surface = render::render(&formatted, receipt.theme, receipt.decor.seed, scale.factor())?;
    Ok(encode(&surface, format, quality)?)
}

/// `playslip-receipt-<YYYY-MM-DD-HH-MM-SS>.<ext>`
pub fn export_filename(format: ImageFormat, at: DateTime<Utc>) -> String {
    format!(
        "{PRODUCT_NAME}-receipt-{}.{}",
        at.format("%Y-%m-%d-%H-%M-%S"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn surface() -> RgbaImage {
        ImageBuffer::from_pixel(32, 48, Rgba([240u8, 240, 240, 255]))
    }

    #[test]
    fn png_round_trips_through_the_decoder() {
        let bytes = encode(&surface(), ImageFormat::Png, 1.0).expect("png");
        let decoded = image::load_from_memory(&bytes).expect("decode");
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn jpeg_honors_the_quality_knob() {
        let img = surface();
        let low = encode(&img, ImageFormat::Jpeg, 0.1).expect("jpeg");
        let high = encode(&img, ImageFormat::Jpeg, 1.0).expect("jpeg");
        assert!(!low.is_empty());
        assert!(!high.is_empty());
    }

    #[test]
    fn webp_encodes_without_quality() {
        let bytes = encode(&surface(), ImageFormat::Webp, 0.0).expect("webp");
        assert!(!bytes.is_empty());
    }

    #[test]
    fn filename_follows_the_convention() {
        let at = DateTime::parse_from_rfc3339("2024-07-01T09:30:05Z")
            .expect("ts")
            .with_timezone(&Utc);
        assert_eq!(
            export_filename(ImageFormat::Png, at),
            "playslip-receipt-2024-07-01-09-30-05.png"
        );
    }

    #[test]
    fn scales_map_to_factors() {
        assert_eq!(ExportScale::X1.factor(), 1.0);
        assert_eq!(ExportScale::X3.factor(), 3.0);
    }
}
