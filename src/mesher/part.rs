//! Per-part cuboid assembly.

use super::face::{extract_face, FaceTexture};
use super::ViewerConfig;
use crate::catalog::{self, FaceSpec, FaceUvs, PartGeometry};
use crate::skin::PixelBuffer;
use crate::types::{BodyPart, BoundingBox, CuboidFace, Layer, ModelVariant};
use glam::{Mat4, Vec3};

/// Uniform scale of the outer layer around the inner cuboid.
pub const OUTER_LAYER_SCALE: f32 = 1.08;

/// Flat colour used for every face when no skin is loaded (#334155).
pub const PLACEHOLDER_COLOR: [u8; 4] = [0x33, 0x41, 0x55, 0xFF];

/// Texture filtering for face textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
}

/// How a renderer must sample face textures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSampling {
    pub mag_filter: TextureFilter,
    pub min_filter: TextureFilter,
    /// Fragments with alpha below this are discarded.
    pub alpha_cutoff: f32,
    pub double_sided: bool,
}

/// Sampling shared by all face textures.
pub const FACE_SAMPLING: TextureSampling = TextureSampling {
    mag_filter: TextureFilter::Nearest,
    min_filter: TextureFilter::Nearest,
    alpha_cutoff: 0.1,
    double_sided: true,
};

/// Material of one cuboid face.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Face texture cut from the skin, sampled with [`FACE_SAMPLING`].
    Textured(FaceTexture),
    /// Untextured placeholder colour.
    Flat([u8; 4]),
}

impl Material {
    pub fn texture(&self) -> Option<&FaceTexture> {
        match self {
            Material::Textured(texture) => Some(texture),
            Material::Flat(_) => None,
        }
    }
}

/// A textured cuboid positioned relative to the character root.
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidMesh {
    pub layer: Layer,
    /// Unscaled width, height, depth.
    pub dimensions: [f32; 3],
    /// Centre of the cuboid.
    pub position: [f32; 3],
    /// Uniform scale about the centre.
    pub scale: f32,
    /// One material per face, in [`CuboidFace::ALL`] order.
    pub materials: [Material; 6],
}

impl CuboidMesh {
    pub fn material(&self, face: CuboidFace) -> &Material {
        &self.materials[face.index()]
    }

    /// Local-to-root transform: translate, then scale about the centre.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::from(self.position)) * Mat4::from_scale(Vec3::splat(self.scale))
    }

    /// Half extents before scaling.
    pub fn half_extents(&self) -> [f32; 3] {
        self.dimensions.map(|v| v / 2.0)
    }

    /// Corners of `face` in root space, ordered as [`CuboidFace::corners`].
    pub fn face_corners(&self, face: CuboidFace) -> [[f32; 3]; 4] {
        let transform = self.transform();
        face.corners(self.half_extents())
            .map(|c| transform.transform_point3(Vec3::from(c)).to_array())
    }

    /// Axis-aligned bounds in root space.
    pub fn bounds(&self) -> BoundingBox {
        let half = self.half_extents().map(|v| v * self.scale);
        BoundingBox::new(
            [
                self.position[0] - half[0],
                self.position[1] - half[1],
                self.position[2] - half[2],
            ],
            [
                self.position[0] + half[0],
                self.position[1] + half[1],
                self.position[2] + half[2],
            ],
        )
    }

    /// Number of textured faces.
    pub fn texture_count(&self) -> usize {
        self.materials.iter().filter(|m| m.texture().is_some()).count()
    }
}

/// The renderable output for one body part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartVisual {
    pub part: BodyPart,
    pub geometry: PartGeometry,
    pub inner: CuboidMesh,
    pub outer: Option<CuboidMesh>,
}

impl PartVisual {
    /// Inner cuboid first, then the outer one if present.
    pub fn cuboids(&self) -> impl Iterator<Item = &CuboidMesh> {
        std::iter::once(&self.inner).chain(self.outer.as_ref())
    }
}

/// Build the inner and (optionally) outer cuboid for one body part.
///
/// With no skin loaded every face gets [`PLACEHOLDER_COLOR`], so an idle
/// figure can still be drawn.
pub fn build_part(
    part: BodyPart,
    variant: ModelVariant,
    buffer: Option<&PixelBuffer>,
    show_outer: bool,
) -> PartVisual {
    let config = ViewerConfig::default()
        .with_variant(variant)
        .with_show_outer(show_outer);
    assemble_part(part, buffer, &config)
}

/// Build a part using every setting in `config`.
pub(crate) fn assemble_part(part: BodyPart, buffer: Option<&PixelBuffer>, config: &ViewerConfig) -> PartVisual {
    let geometry = catalog::geometry(part, config.variant);
    let mapping = catalog::uv_mapping(part);

    let inner = build_cuboid(Layer::Inner, &mapping.inner, &geometry, buffer, config);
    let outer = match mapping.outer {
        Some(ref uvs) if config.show_outer => {
            Some(build_cuboid(Layer::Outer, uvs, &geometry, buffer, config))
        }
        _ => None,
    };

    PartVisual {
        part,
        geometry,
        inner,
        outer,
    }
}

fn build_cuboid(
    layer: Layer,
    uvs: &FaceUvs,
    geometry: &PartGeometry,
    buffer: Option<&PixelBuffer>,
    config: &ViewerConfig,
) -> CuboidMesh {
    let materials = CuboidFace::ALL.map(|face| match buffer {
        Some(buffer) => {
            let spec = FaceSpec::for_face(uvs, face, geometry.dimensions);
            Material::Textured(extract_face(buffer, &spec))
        }
        None => Material::Flat(config.placeholder_color),
    });

    CuboidMesh {
        layer,
        dimensions: geometry.dimensions,
        position: geometry.offset,
        scale: match layer {
            Layer::Inner => 1.0,
            Layer::Outer => OUTER_LAYER_SCALE,
        },
        materials,
    }
}
