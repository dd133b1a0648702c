//! Mesh generation from skins.
//!
//! This module cuts face textures out of a skin, assembles the six body-part
//! cuboids and, for export, triangulates them against a packed atlas.

pub mod character;
pub mod face;
pub mod geometry;
pub mod part;

pub use character::{build_character, build_character_with_config, Character};
pub use face::{extract_face, FaceTexture};
pub use geometry::{Mesh, Vertex};
pub use part::{
    build_part, CuboidMesh, Material, PartVisual, TextureFilter, TextureSampling, FACE_SAMPLING,
    OUTER_LAYER_SCALE, PLACEHOLDER_COLOR,
};

use crate::atlas::{AtlasBuilder, AtlasKey, TextureAtlas};
use crate::error::{Result, SkinError};
use crate::skin::PixelBuffer;
use crate::types::{BodyPart, BoundingBox, CuboidFace, Layer, ModelVariant};
use serde::{Deserialize, Serialize};

/// Viewer and export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Arm geometry variant.
    pub variant: ModelVariant,
    /// Render the overlay layer (hat, jacket, sleeves, pants).
    pub show_outer: bool,
    /// Face colour used when no skin is loaded.
    pub placeholder_color: [u8; 4],
    /// World units per skin pixel in exported meshes.
    pub unit_scale: f32,
    /// Maximum face atlas dimension.
    pub atlas_max_size: u32,
    /// Padding between faces in the atlas.
    pub atlas_padding: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            variant: ModelVariant::Classic,
            show_outer: true,
            placeholder_color: PLACEHOLDER_COLOR,
            unit_scale: 1.0,
            atlas_max_size: 1024,
            atlas_padding: 1,
        }
    }
}

impl ViewerConfig {
    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_variant(mut self, variant: ModelVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_show_outer(mut self, show_outer: bool) -> Self {
        self.show_outer = show_outer;
        self
    }

    /// Export in block units (16 skin pixels per block).
    pub fn with_block_units(mut self) -> Self {
        self.unit_scale = 1.0 / 16.0;
        self
    }
}

/// Triangulated character ready for export.
#[derive(Debug)]
pub struct MeshedCharacter {
    /// Base-layer cuboids.
    pub inner_mesh: Mesh,
    /// Overlay cuboids (empty when the outer layer is hidden).
    pub outer_mesh: Mesh,
    /// Every face texture packed into one image.
    pub atlas: TextureAtlas,
    /// Bounding box of the mesh.
    pub bounds: BoundingBox,
}

impl MeshedCharacter {
    /// Get a combined mesh.
    pub fn mesh(&self) -> Mesh {
        let mut combined = self.inner_mesh.clone();
        combined.merge(&self.outer_mesh);
        combined
    }

    pub fn total_vertices(&self) -> usize {
        self.inner_mesh.vertex_count() + self.outer_mesh.vertex_count()
    }

    pub fn total_triangles(&self) -> usize {
        self.inner_mesh.triangle_count() + self.outer_mesh.triangle_count()
    }
}

/// The main skin mesher.
pub struct SkinMesher {
    config: ViewerConfig,
}

impl SkinMesher {
    /// Create a new mesher with default configuration.
    pub fn new() -> Self {
        Self {
            config: ViewerConfig::default(),
        }
    }

    /// Create a new mesher with custom configuration.
    pub fn with_config(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Assemble the character without triangulating it.
    pub fn character(&self, buffer: Option<&PixelBuffer>) -> Character {
        build_character_with_config(buffer, &self.config)
    }

    /// Assemble and triangulate the character.
    pub fn mesh(&self, buffer: Option<&PixelBuffer>) -> Result<MeshedCharacter> {
        mesh_character(&self.character(buffer), &self.config)
    }
}

impl Default for SkinMesher {
    fn default() -> Self {
        Self::new()
    }
}

/// Atlas key for one face material. Flat faces of one colour share a region.
fn atlas_key(part: BodyPart, layer: Layer, face: CuboidFace, material: &Material) -> AtlasKey {
    match material {
        Material::Textured(_) => AtlasKey::Face { part, layer, face },
        Material::Flat(color) => AtlasKey::Flat(*color),
    }
}

/// Pack every face of `character` into an atlas and triangulate the cuboids.
pub fn mesh_character(character: &Character, config: &ViewerConfig) -> Result<MeshedCharacter> {
    let mut builder = AtlasBuilder::new(config.atlas_max_size, config.atlas_padding);

    for (part, cuboid) in character.cuboids() {
        for face in CuboidFace::ALL {
            let material = cuboid.material(face);
            let key = atlas_key(part, cuboid.layer, face, material);
            match material {
                Material::Textured(texture) => builder.add_texture(key, texture.clone()),
                Material::Flat(color) => builder.add_texture(key, FaceTexture::solid(1, 1, *color)),
            }
        }
    }

    let atlas = builder.build()?;

    let mut inner_mesh = Mesh::new();
    let mut outer_mesh = Mesh::new();

    for (part, cuboid) in character.cuboids() {
        let mesh = match cuboid.layer {
            Layer::Inner => &mut inner_mesh,
            Layer::Outer => &mut outer_mesh,
        };
        for face in CuboidFace::ALL {
            let key = atlas_key(part, cuboid.layer, face, cuboid.material(face));
            let region = atlas
                .get_region(&key)
                .ok_or_else(|| SkinError::AtlasBuild(format!("Missing atlas region: {:?}", key)))?;
            let uvs = [
                region.transform_uv(0.0, 0.0),
                region.transform_uv(1.0, 0.0),
                region.transform_uv(1.0, 1.0),
                region.transform_uv(0.0, 1.0),
            ];
            mesh.add_face(cuboid.face_corners(face), face.normal(), uvs);
        }
    }

    inner_mesh.scale(config.unit_scale);
    outer_mesh.scale(config.unit_scale);

    let bounds = BoundingBox::from_points(
        inner_mesh
            .vertices
            .iter()
            .chain(outer_mesh.vertices.iter())
            .map(|v| v.position),
    )
    .unwrap_or(BoundingBox::new([0.0; 3], [0.0; 3]));

    log::debug!(
        "meshed character: {} vertices, {} triangles, {}x{} atlas",
        inner_mesh.vertex_count() + outer_mesh.vertex_count(),
        inner_mesh.triangle_count() + outer_mesh.triangle_count(),
        atlas.width,
        atlas.height
    );

    Ok(MeshedCharacter {
        inner_mesh,
        outer_mesh,
        atlas,
        bounds,
    })
}
