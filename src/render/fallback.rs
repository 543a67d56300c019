//! Placeholder icon generator.
//!
//! When no usable icon can be produced, a brand-neutral placeholder is served
//! instead: a solid background with a centered white disc. The output depends
//! only on the requested size, so every failed lookup at a given size yields
//! byte-identical PNGs.

use bytes::Bytes;
use image::{Rgba, RgbaImage};
use tracing::error;

use super::scaler::encode_png;
use crate::error::RenderError;

/// Placeholder background color (#b480de).
pub const PLACEHOLDER_BACKGROUND: Rgba<u8> = Rgba([180, 128, 222, 255]);

/// Placeholder disc color.
pub const PLACEHOLDER_FOREGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Minimum inset of the disc from each edge.
pub const MIN_PLACEHOLDER_PADDING: u32 = 8;

/// Sub-samples per axis used to anti-alias the disc edge.
const SUPERSAMPLE: i64 = 4;

/// Inset of the disc's bounding box from each edge: `max(8, size / 10)`.
pub fn placeholder_padding(size: u32) -> u32 {
    MIN_PLACEHOLDER_PADDING.max(size / 10)
}

/// Generates placeholder icons.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderGenerator {}

impl PlaceholderGenerator {
    pub fn new() -> Self {
        Self {}
    }

    /// Generate the placeholder PNG for `size`.
    ///
    /// Never fails. If PNG encoding itself fails the result is an empty
    /// buffer.
    pub fn generate(&self, size: u32) -> Bytes {
        match self.try_generate(size) {
            Ok(png) => png,
            Err(e) => {
                error!(size, error = %e, "Failed to encode placeholder icon");
                Bytes::new()
            }
        }
    }

    /// Generate the placeholder PNG, reporting encoder failures.
    pub fn try_generate(&self, size: u32) -> Result<Bytes, RenderError> {
        encode_png(&self.draw(size))
    }

    /// Draw the placeholder raster.
    ///
    /// Coverage of the disc edge is computed on a 4×4 sub-pixel grid in
    /// integer arithmetic (units of 1/8 pixel), so the result is identical on
    /// every platform.
    pub fn draw(&self, size: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(size, size, PLACEHOLDER_BACKGROUND);

        let pad = placeholder_padding(size);
        if size <= pad * 2 {
            return img;
        }

        // Disc centre is size/2 in both axes, radius (size - 2*pad)/2.
        let unit = SUPERSAMPLE * 2;
        let center = size as i64 * unit / 2;
        let radius = (size - 2 * pad) as i64 * unit / 2;
        let radius_sq = radius * radius;
        let samples = SUPERSAMPLE * SUPERSAMPLE;

        for y in pad..size - pad {
            for x in pad..size - pad {
                let mut inside = 0i64;
                for sy in 0..SUPERSAMPLE {
                    let dy = y as i64 * unit + 2 * sy + 1 - center;
                    for sx in 0..SUPERSAMPLE {
                        let dx = x as i64 * unit + 2 * sx + 1 - center;
                        if dx * dx + dy * dy <= radius_sq {
                            inside += 1;
                        }
                    }
                }

                if inside > 0 {
                    img.put_pixel(x, y, blend(inside, samples));
                }
            }
        }

        img
    }
}

/// Mix foreground over background by `covered / total`.
fn blend(covered: i64, total: i64) -> Rgba<u8> {
    let mut out = PLACEHOLDER_BACKGROUND;
    for c in 0..3 {
        let bg = PLACEHOLDER_BACKGROUND[c] as i64;
        let fg = PLACEHOLDER_FOREGROUND[c] as i64;
        out[c] = ((bg * (total - covered) + fg * covered + total / 2) / total) as u8;
    }
    out
}
