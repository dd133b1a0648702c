//! Face texture extraction.
//!
//! Every face is a straight pixel copy out of the skin. There is no
//! resampling of any kind, which keeps the blocky look of the skin intact.

use crate::catalog::FaceSpec;
use crate::error::Result;
use crate::skin::PixelBuffer;

/// An independent RGBA8 texture for one cuboid face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceTexture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FaceTexture {
    /// Wrap RGBA8 data. Returns `None` unless `pixels` holds exactly
    /// `width * height` pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A texture of one flat colour.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: color.repeat((width * height) as usize),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixel data, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Check if this texture has transparency.
    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks(4).any(|pixel| pixel[3] < 255)
    }

    /// True when every pixel has alpha 0, i.e. the face renders invisible.
    pub fn is_fully_transparent(&self) -> bool {
        self.pixels.chunks(4).all(|pixel| pixel[3] == 0)
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        crate::skin::encode_png(&self.pixels, self.width, self.height)
    }
}

/// Copy the `spec.width x spec.height` rectangle at `spec.uv_origin`.
///
/// Source pixels outside the buffer come back as transparent black, so a
/// bad rectangle yields an invisible face instead of an error.
pub fn extract_face(buffer: &PixelBuffer, spec: &FaceSpec) -> FaceTexture {
    let mut pixels = Vec::with_capacity((spec.width * spec.height * 4) as usize);
    let origin = spec.uv_origin;

    for y in 0..spec.height {
        for x in 0..spec.width {
            let px = buffer.sample(origin.x.saturating_add(x), origin.y.saturating_add(y));
            pixels.extend_from_slice(&px);
        }
    }

    FaceTexture {
        width: spec.width,
        height: spec.height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UvPoint;

    /// A skin where every pixel encodes its own coordinates.
    fn coordinate_skin() -> PixelBuffer {
        let mut pixels = Vec::with_capacity(64 * 64 * 4);
        for y in 0..64u8 {
            for x in 0..64u8 {
                pixels.extend_from_slice(&[x, y, 0, 255]);
            }
        }
        PixelBuffer::from_rgba(64, 64, pixels).unwrap()
    }

    fn spec(x: u32, y: u32, width: u32, height: u32) -> FaceSpec {
        FaceSpec {
            uv_origin: UvPoint::new(x, y),
            width,
            height,
        }
    }

    #[test]
    fn test_extract_copies_exact_rectangle() {
        let skin = coordinate_skin();
        let face = extract_face(&skin, &spec(8, 8, 8, 8));

        assert_eq!(face.width(), 8);
        assert_eq!(face.height(), 8);
        assert_eq!(face.as_raw().len(), 8 * 8 * 4);
        assert_eq!(face.get_pixel(0, 0), [8, 8, 0, 255]);
        assert_eq!(face.get_pixel(7, 0), [15, 8, 0, 255]);
        assert_eq!(face.get_pixel(7, 7), [15, 15, 0, 255]);
    }

    #[test]
    fn test_extract_non_square_face() {
        let skin = coordinate_skin();
        let face = extract_face(&skin, &spec(44, 20, 3, 12));
        assert_eq!((face.width(), face.height()), (3, 12));
        assert_eq!(face.get_pixel(2, 11), [46, 31, 0, 255]);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let skin = coordinate_skin();
        let a = extract_face(&skin, &spec(20, 20, 8, 12));
        let b = extract_face(&skin, &spec(20, 20, 8, 12));
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_extract_out_of_bounds_is_transparent() {
        let skin = PixelBuffer::filled([255, 0, 0, 255]);
        let face = extract_face(&skin, &spec(60, 60, 8, 8));

        // Inside the buffer
        assert_eq!(face.get_pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(face.get_pixel(3, 3), [255, 0, 0, 255]);
        // Past the right and bottom edges
        assert_eq!(face.get_pixel(4, 0), [0, 0, 0, 0]);
        assert_eq!(face.get_pixel(0, 4), [0, 0, 0, 0]);
        assert!(face.has_transparency());

        let far = extract_face(&skin, &spec(u32::MAX - 2, 100, 4, 4));
        assert!(far.is_fully_transparent());
    }

    #[test]
    fn test_extract_preserves_alpha() {
        let skin = PixelBuffer::transparent();
        let face = extract_face(&skin, &spec(40, 8, 8, 8));
        assert!(face.is_fully_transparent());
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(FaceTexture::new(2, 2, vec![0; 15]).is_none());
        assert!(FaceTexture::new(2, 2, vec![0; 20]).is_none());

        let face = FaceTexture::new(2, 2, vec![7; 16]).unwrap();
        assert_eq!(face.get_pixel(1, 1), [7, 7, 7, 7]);
    }

    #[test]
    fn test_solid_texture() {
        let face = FaceTexture::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(face.as_raw().len(), 24);
        assert_eq!(face.get_pixel(2, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn test_face_png_roundtrip_header() {
        let face = extract_face(&PixelBuffer::filled([1, 1, 1, 255]), &spec(0, 0, 4, 4));
        let png = face.to_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
