//! Icon scaler.
//!
//! Decodes an arbitrary raster image and renders it into a square,
//! transparent PNG canvas.
//!
//! # Design Decisions
//!
//! - **Contain-fit**: The whole source image is always visible. It is scaled
//!   by `min(N / width, N / height)` and centered, leaving transparent bands
//!   when the aspect ratio is not 1:1. Nothing is cropped.
//!
//! - **Always re-encode**: Even a source that already is an `N×N` PNG is
//!   decoded and re-encoded, so output is uniform RGBA PNG.
//!
//! - **Format sniffing**: The format is guessed from the leading bytes, never
//!   from a declared media type, since icon references are untrusted.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, GenericImageView, ImageEncoder, ImageReader, Rgba, RgbaImage};

use crate::error::RenderError;

/// Resampling filter used for scaling (bicubic).
pub const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Fully transparent pixel used for the canvas background.
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

// =============================================================================
// Placement
// =============================================================================

/// Where a scaled image lands on the square canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left offset in pixels
    pub x: u32,

    /// Top offset in pixels
    pub y: u32,

    /// Scaled width in pixels
    pub width: u32,

    /// Scaled height in pixels
    pub height: u32,
}

/// Compute the contain-fit placement of a `src_width × src_height` image on a
/// `target × target` canvas.
///
/// Scaled dimensions are rounded to the nearest pixel and kept within
/// `1..=target`; offsets use integer division and may truncate.
pub fn contain_fit(src_width: u32, src_height: u32, target: u32) -> Placement {
    let scale = f64::min(
        target as f64 / src_width.max(1) as f64,
        target as f64 / src_height.max(1) as f64,
    );

    let width = ((src_width as f64 * scale).round() as u32).clamp(1, target.max(1));
    let height = ((src_height as f64 * scale).round() as u32).clamp(1, target.max(1));

    Placement {
        x: target.saturating_sub(width) / 2,
        y: target.saturating_sub(height) / 2,
        width,
        height,
    }
}

// =============================================================================
// Icon Scaler
// =============================================================================

/// Decodes source bytes and renders them as a square PNG.
///
/// # Example
///
/// ```ignore
/// use app_icon_server::render::IconScaler;
///
/// let scaler = IconScaler::new();
/// let png = scaler.render(&source_bytes, 192)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct IconScaler {}

impl IconScaler {
    /// Create a new icon scaler.
    pub fn new() -> Self {
        Self {}
    }

    /// Decode `source`, contain-fit it into a `size × size` transparent
    /// canvas, and encode the result as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source format is not recognised or the stream is corrupt
    /// - The decoded image has a zero dimension
    /// - PNG encoding fails
    pub fn render(&self, source: &[u8], size: u32) -> Result<Bytes, RenderError> {
        let canvas = self.compose(source, size)?;
        encode_png(&canvas)
    }

    /// Decode and place the image without encoding.
    pub fn compose(&self, source: &[u8], size: u32) -> Result<RgbaImage, RenderError> {
        let reader = ImageReader::new(Cursor::new(source))
            .with_guessed_format()
            .map_err(|e| RenderError::DecodeError {
                message: e.to_string(),
            })?;

        let img = reader.decode().map_err(|e| RenderError::DecodeError {
            message: e.to_string(),
        })?;

        let (width, height) = img.dimensions();
        if width == 0 || height == 0 || size == 0 {
            return Err(RenderError::EmptyImage { width, height });
        }

        let placement = contain_fit(width, height, size);
        let scaled = imageops::resize(
            &img.to_rgba8(),
            placement.width,
            placement.height,
            RESAMPLE_FILTER,
        );

        let mut canvas = RgbaImage::from_pixel(size, size, TRANSPARENT);
        imageops::replace(
            &mut canvas,
            &scaled,
            placement.x as i64,
            placement.y as i64,
        );

        Ok(canvas)
    }

    /// Get image dimensions without fully decoding.
    pub fn dimensions(&self, source: &[u8]) -> Result<(u32, u32), RenderError> {
        ImageReader::new(Cursor::new(source))
            .with_guessed_format()
            .map_err(|e| RenderError::DecodeError {
                message: e.to_string(),
            })?
            .into_dimensions()
            .map_err(|e| RenderError::DecodeError {
                message: e.to_string(),
            })
    }
}

/// Encode an RGBA canvas as PNG.
pub fn encode_png(canvas: &RgbaImage) -> Result<Bytes, RenderError> {
    let mut output = Vec::new();
    PngEncoder::new(&mut output)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| RenderError::EncodeError {
            message: e.to_string(),
        })?;

    Ok(Bytes::from(output))
}

// =============================================================================
// Tests
// =============================================================================
