//! Face texture atlas.
//!
//! Packs every face texture of a character into a single image and
//! records the UV region of each face, for exporters that want one texture.

mod builder;

pub use builder::{AtlasBuilder, AtlasKey, AtlasRegion, TextureAtlas};
