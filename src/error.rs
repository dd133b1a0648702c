//! Error types for skin loading, mapping and export.

use thiserror::Error;

/// Result type alias using SkinError.
pub type Result<T> = std::result::Result<T, SkinError>;

/// Errors raised while turning uploaded bytes into a skin buffer.
///
/// These are the only failures a user can trigger. Both are recoverable:
/// the caller reports them and keeps whatever skin was displayed before.
#[derive(Error, Debug)]
pub enum ImageError {
    /// The bytes are not a decodable image.
    #[error("failed to decode skin image: {0}")]
    DecodeFailed(#[source] image::ImageError),

    /// The image decoded but is not 64x64 or 64x32.
    #[error("skin must be 64x64 or 64x32, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum SkinError {
    /// The uploaded skin was rejected.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON configuration.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to encode a texture as PNG.
    #[error("PNG encode error: {0}")]
    Encode(String),

    /// Failed to build the face texture atlas.
    #[error("Atlas building error: {0}")]
    AtlasBuild(String),

    /// Failed to export the character.
    #[error("Export error: {0}")]
    Export(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions_message() {
        let err = ImageError::InvalidDimensions { width: 30, height: 30 };
        assert_eq!(err.to_string(), "skin must be 64x64 or 64x32, got 30x30");
    }

    #[test]
    fn test_image_error_converts_transparently() {
        let err: SkinError = ImageError::InvalidDimensions { width: 64, height: 48 }.into();
        assert!(matches!(err, SkinError::Image(ImageError::InvalidDimensions { .. })));
        assert_eq!(err.to_string(), "skin must be 64x64 or 64x32, got 64x48");
    }
}
