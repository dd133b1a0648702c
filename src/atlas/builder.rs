//! Face atlas builder.
//!
//! Faces are laid out on a fixed grid: one row per (part, layer) and one
//! column per [`CuboidFace`], in [`BodyPart::ALL`] x inner/outer x
//! [`CuboidFace::ALL`] order. Flat placeholder colours follow the faces. Every
//! cell is sized for the largest face, so the atlas size is known before
//! anything is copied.

use crate::error::{Result, SkinError};
use crate::mesher::FaceTexture;
use crate::types::{BodyPart, CuboidFace, Layer};
use std::collections::BTreeMap;

/// Cells per atlas row.
const COLUMNS: u32 = CuboidFace::ALL.len() as u32;

/// What an atlas region holds.
///
/// The derived order is the packing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AtlasKey {
    /// A face texture cut from the skin.
    Face {
        part: BodyPart,
        layer: Layer,
        face: CuboidFace,
    },
    /// A flat colour shared by every face that uses it.
    Flat([u8; 4]),
}

/// A region within the texture atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasRegion {
    /// U coordinate of the left edge (0-1).
    pub u_min: f32,
    /// V coordinate of the top edge (0-1).
    pub v_min: f32,
    /// U coordinate of the right edge (0-1).
    pub u_max: f32,
    /// V coordinate of the bottom edge (0-1).
    pub v_max: f32,
}

impl AtlasRegion {
    pub fn width(&self) -> f32 {
        self.u_max - self.u_min
    }

    pub fn height(&self) -> f32 {
        self.v_max - self.v_min
    }

    /// Map a face-local UV (0-1, origin top-left) into the atlas.
    pub fn transform_uv(&self, u: f32, v: f32) -> [f32; 2] {
        [
            self.u_min + u * self.width(),
            self.v_min + v * self.height(),
        ]
    }
}

/// A built texture atlas.
#[derive(Debug, Clone)]
pub struct TextureAtlas {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixel data, row-major.
    pub pixels: Vec<u8>,
    pub regions: BTreeMap<AtlasKey, AtlasRegion>,
}

impl TextureAtlas {
    pub fn get_region(&self, key: &AtlasKey) -> Option<&AtlasRegion> {
        self.regions.get(key)
    }

    /// A 1x1 transparent atlas with no regions.
    pub fn empty() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![0; 4],
            regions: BTreeMap::new(),
        }
    }

    /// Export the atlas as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        crate::skin::encode_png(&self.pixels, self.width, self.height)
            .map_err(|e| SkinError::AtlasBuild(e.to_string()))
    }
}

/// Collects face textures and lays them out on the grid.
pub struct AtlasBuilder {
    max_size: u32,
    padding: u32,
    textures: BTreeMap<AtlasKey, FaceTexture>,
}

impl AtlasBuilder {
    pub fn new(max_size: u32, padding: u32) -> Self {
        Self {
            max_size,
            padding,
            textures: BTreeMap::new(),
        }
    }

    /// Add a texture under `key`. Re-adding a key replaces it.
    pub fn add_texture(&mut self, key: AtlasKey, texture: FaceTexture) {
        self.textures.insert(key, texture);
    }

    pub fn build(self) -> Result<TextureAtlas> {
        if self.textures.is_empty() {
            return Ok(TextureAtlas::empty());
        }

        let padding = self.padding;
        let cell_width = self.textures.values().map(|t| t.width()).max().unwrap_or(0) + padding * 2;
        let cell_height = self.textures.values().map(|t| t.height()).max().unwrap_or(0) + padding * 2;

        let count = self.textures.len() as u32;
        let columns = count.min(COLUMNS);
        let rows = count.div_ceil(COLUMNS);
        let width = columns * cell_width;
        let height = rows * cell_height;

        if width > self.max_size || height > self.max_size {
            return Err(SkinError::AtlasBuild(format!(
                "{} faces need a {}x{} atlas, limit is {}",
                count, width, height, self.max_size
            )));
        }

        let mut pixels = vec![0u8; (width * height * 4) as usize];
        let mut regions = BTreeMap::new();

        for (slot, (key, texture)) in self.textures.iter().enumerate() {
            let slot = slot as u32;
            let cell_x = (slot % COLUMNS) * cell_width;
            let cell_y = (slot / COLUMNS) * cell_height;
            blit_padded(&mut pixels, width, texture, cell_x, cell_y, padding);

            let x = cell_x + padding;
            let y = cell_y + padding;
            regions.insert(
                *key,
                AtlasRegion {
                    u_min: x as f32 / width as f32,
                    v_min: y as f32 / height as f32,
                    u_max: (x + texture.width()) as f32 / width as f32,
                    v_max: (y + texture.height()) as f32 / height as f32,
                },
            );
        }

        Ok(TextureAtlas {
            width,
            height,
            pixels,
            regions,
        })
    }
}

/// Copy `texture` into its cell, repeating its edge pixels into the padding
/// so neighbouring faces never bleed into each other.
fn blit_padded(atlas: &mut [u8], atlas_width: u32, texture: &FaceTexture, cell_x: u32, cell_y: u32, padding: u32) {
    let (width, height) = (texture.width(), texture.height());
    if width == 0 || height == 0 {
        return;
    }

    for py in 0..height + padding * 2 {
        let sy = py.saturating_sub(padding).min(height - 1);
        for px in 0..width + padding * 2 {
            let sx = px.saturating_sub(padding).min(width - 1);
            let dst = (((cell_y + py) * atlas_width + cell_x + px) * 4) as usize;
            atlas[dst..dst + 4].copy_from_slice(&texture.get_pixel(sx, sy));
        }
    }
}
