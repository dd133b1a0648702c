//! Canonical skin pixel buffer.

use crate::error::{ImageError, Result, SkinError};
use image::ImageEncoder;

/// Width and height of a normalized skin.
pub const SKIN_SIZE: u32 = 64;

/// Height of a legacy (pre-1.8) skin.
pub const LEGACY_HEIGHT: u32 = 32;

/// A normalized 64x64 RGBA skin.
///
/// Legacy 64x32 skins only define rows `0..32`. Rows `32..64` of such a
/// buffer are the unspecified legacy region and are left fully transparent;
/// arms and legs are not mirrored into the modern layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    legacy: bool,
}

impl PixelBuffer {
    /// A fully transparent 64x64 buffer.
    pub fn transparent() -> Self {
        Self {
            pixels: vec![0u8; (SKIN_SIZE * SKIN_SIZE * 4) as usize],
            legacy: false,
        }
    }

    /// A 64x64 buffer filled with a single colour.
    pub fn filled(color: [u8; 4]) -> Self {
        let pixels = (0..SKIN_SIZE * SKIN_SIZE)
            .flat_map(|_| color.iter().copied())
            .collect();
        Self {
            pixels,
            legacy: false,
        }
    }

    /// Build a skin from already decoded RGBA8 data.
    ///
    /// Applies the same size gate as [`load_skin`](super::load_skin).
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> std::result::Result<Self, ImageError> {
        check_dimensions(width, height)?;
        let image = image::RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            ImageError::DecodeFailed(image::ImageError::Parameter(
                image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ),
            ))
        })?;
        Ok(Self::normalize(&image))
    }

    /// Copy a validated image into a canonical 64x64 buffer at (0, 0).
    pub(crate) fn normalize(image: &image::RgbaImage) -> Self {
        let mut buffer = Self::transparent();
        let (width, height) = image.dimensions();
        let copy_width = width.min(SKIN_SIZE) as usize * 4;
        let src = image.as_raw();

        for y in 0..height.min(SKIN_SIZE) as usize {
            let src_row = y * width as usize * 4;
            let dst_row = y * SKIN_SIZE as usize * 4;
            buffer.pixels[dst_row..dst_row + copy_width]
                .copy_from_slice(&src[src_row..src_row + copy_width]);
        }

        buffer.legacy = height == LEGACY_HEIGHT;
        buffer
    }

    /// Buffer width in pixels. Always [`SKIN_SIZE`].
    pub fn width(&self) -> u32 {
        SKIN_SIZE
    }

    /// Buffer height in pixels. Always [`SKIN_SIZE`].
    pub fn height(&self) -> u32 {
        SKIN_SIZE
    }

    /// Whether the source image was a legacy 64x32 skin.
    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    /// RGBA8 pixel data, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Get a pixel at (x, y). Panics if out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * SKIN_SIZE + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Get a pixel, or transparent black when (x, y) lies outside the buffer.
    pub fn sample(&self, x: u32, y: u32) -> [u8; 4] {
        if x < SKIN_SIZE && y < SKIN_SIZE {
            self.get_pixel(x, y)
        } else {
            [0, 0, 0, 0]
        }
    }

    /// Check if any pixel is not fully opaque.
    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks(4).any(|pixel| pixel[3] < 255)
    }

    /// Encode the normalized skin as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.pixels, SKIN_SIZE, SKIN_SIZE)
    }
}

/// The single input-validation gate: width 64, height 64 or 32.
pub(crate) fn check_dimensions(width: u32, height: u32) -> std::result::Result<(), ImageError> {
    if width == SKIN_SIZE && (height == SKIN_SIZE || height == LEGACY_HEIGHT) {
        Ok(())
    } else {
        Err(ImageError::InvalidDimensions { width, height })
    }
}

/// Encode RGBA8 pixels as PNG bytes.
pub(crate) fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let cursor = std::io::Cursor::new(&mut bytes);
    let encoder = image::codecs::png::PngEncoder::new(cursor);

    encoder
        .write_image(pixels, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| SkinError::Encode(format!("Failed to encode PNG: {}", e)))?;

    Ok(bytes)
}
