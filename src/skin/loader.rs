//! Skin decoding from bytes and files.

use super::texture::{check_dimensions, PixelBuffer};
use crate::error::{ImageError, Result};
use image::ImageReader;
use std::io::Cursor;
use std::path::Path;

/// Decode, validate and normalize a skin image.
///
/// Accepts 64x64 and legacy 64x32 images. Anything else fails with
/// [`ImageError::InvalidDimensions`]; undecodable input fails with
/// [`ImageError::DecodeFailed`]. The size is read from the image header,
/// so a wrongly sized image is rejected before its pixels are decoded.
pub fn load_skin(data: &[u8]) -> std::result::Result<PixelBuffer, ImageError> {
    let (width, height) = read_dimensions(data)?;
    check_dimensions(width, height)?;

    let img = image::load_from_memory(data).map_err(ImageError::DecodeFailed)?;

    let buffer = PixelBuffer::normalize(&img.to_rgba8());
    if buffer.is_legacy() {
        log::debug!("loaded legacy 64x32 skin; rows 32..64 left transparent");
    }
    Ok(buffer)
}

fn read_dimensions(data: &[u8]) -> std::result::Result<(u32, u32), ImageError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::DecodeFailed(image::ImageError::IoError(e)))?
        .into_dimensions()
        .map_err(ImageError::DecodeFailed)
}

/// Load a skin from a PNG file on disk.
pub fn load_skin_from_path<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let data = std::fs::read(path.as_ref())?;
    Ok(load_skin(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skin::texture::encode_png;

    /// Encode a solid-colour PNG of the given size.
    fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let pixels: Vec<u8> = (0..width * height)
            .flat_map(|_| color.iter().copied())
            .collect();
        encode_png(&pixels, width, height).unwrap()
    }

    #[test]
    fn test_load_modern_skin() {
        let buffer = load_skin(&solid_png(64, 64, [255, 0, 255, 255])).unwrap();
        assert!(!buffer.is_legacy());
        assert_eq!(buffer.get_pixel(0, 0), [255, 0, 255, 255]);
        assert_eq!(buffer.get_pixel(63, 63), [255, 0, 255, 255]);
    }

    #[test]
    fn test_load_legacy_skin() {
        let buffer = load_skin(&solid_png(64, 32, [1, 2, 3, 255])).unwrap();
        assert!(buffer.is_legacy());
        assert_eq!(buffer.width(), 64);
        assert_eq!(buffer.height(), 64);
        assert_eq!(buffer.get_pixel(0, 31), [1, 2, 3, 255]);
        assert_eq!(buffer.get_pixel(0, 32), [0, 0, 0, 0]);
    }

    #[test]
    fn test_load_rejects_wrong_size() {
        let err = load_skin(&solid_png(30, 30, [0, 0, 0, 255])).unwrap_err();
        assert!(matches!(err, ImageError::InvalidDimensions { width: 30, height: 30 }));

        let err = load_skin(&solid_png(64, 48, [0, 0, 0, 255])).unwrap_err();
        assert!(matches!(err, ImageError::InvalidDimensions { .. }));

        let err = load_skin(&solid_png(128, 128, [0, 0, 0, 255])).unwrap_err();
        assert!(matches!(err, ImageError::InvalidDimensions { width: 128, .. }));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let err = load_skin(b"definitely not a png").unwrap_err();
        assert!(matches!(err, ImageError::DecodeFailed(_)));
    }

    /// Cut a PNG off a few bytes into its first image data chunk.
    fn truncate_after_header(png: &[u8]) -> Vec<u8> {
        let idat = png.windows(4).position(|w| w == b"IDAT").unwrap();
        png[..idat + 6].to_vec()
    }

    #[test]
    fn test_size_checked_before_pixel_decode() {
        let truncated = truncate_after_header(&solid_png(30, 30, [0, 0, 0, 255]));
        let err = load_skin(&truncated).unwrap_err();
        assert!(matches!(err, ImageError::InvalidDimensions { width: 30, height: 30 }));

        let truncated = truncate_after_header(&solid_png(64, 64, [0, 0, 0, 255]));
        let err = load_skin(&truncated).unwrap_err();
        assert!(matches!(err, ImageError::DecodeFailed(_)));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skin.png");
        std::fs::write(&path, solid_png(64, 64, [9, 9, 9, 255])).unwrap();

        let buffer = load_skin_from_path(&path).unwrap();
        assert_eq!(buffer.get_pixel(32, 32), [9, 9, 9, 255]);

        let missing = load_skin_from_path(dir.path().join("missing.png"));
        assert!(matches!(missing, Err(crate::SkinError::Io(_))));
    }
}
