//! Skin texture source.
//!
//! Decodes an uploaded skin, applies the size gate and normalizes it into a
//! canonical 64x64 [`PixelBuffer`]. Nothing downstream re-validates.

mod loader;
mod texture;

pub use loader::{load_skin, load_skin_from_path};
pub use texture::{PixelBuffer, LEGACY_HEIGHT, SKIN_SIZE};
pub(crate) use texture::encode_png;
