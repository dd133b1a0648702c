//! Static body-part catalog.
//!
//! Geometry (size and offset in skin pixels) is keyed by part and model
//! variant; UV origins are keyed by part alone. The tables follow the fixed
//! Minecraft skin layout and are transcribed, not derived.

mod parts;

use crate::types::{BodyPart, CuboidFace, Layer, ModelVariant, UvPoint};

pub use parts::{geometry, uv_mapping};

/// Cuboid size and placement of one body part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartGeometry {
    /// Width, height, depth in skin pixels.
    pub dimensions: [f32; 3],
    /// Centre of the cuboid relative to the character root.
    pub offset: [f32; 3],
}

/// UV origins for the six faces of one layer.
///
/// `right` and `left` are the character's anatomical sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceUvs {
    pub top: UvPoint,
    pub bottom: UvPoint,
    pub right: UvPoint,
    pub front: UvPoint,
    pub left: UvPoint,
    pub back: UvPoint,
}

impl FaceUvs {
    /// UV origin sampled for a cuboid face.
    pub fn for_face(&self, face: CuboidFace) -> UvPoint {
        match face {
            CuboidFace::CharacterLeft => self.left,
            CuboidFace::CharacterRight => self.right,
            CuboidFace::Top => self.top,
            CuboidFace::Bottom => self.bottom,
            CuboidFace::Front => self.front,
            CuboidFace::Back => self.back,
        }
    }
}

/// UV mapping of one body part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartUvMapping {
    pub inner: FaceUvs,
    pub outer: Option<FaceUvs>,
}

impl PartUvMapping {
    pub fn layer(&self, layer: Layer) -> Option<&FaceUvs> {
        match layer {
            Layer::Inner => Some(&self.inner),
            Layer::Outer => self.outer.as_ref(),
        }
    }
}

/// Pixel rectangle sampled for one cuboid face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceSpec {
    pub uv_origin: UvPoint,
    pub width: u32,
    pub height: u32,
}

impl FaceSpec {
    /// Join a UV origin with the face size implied by the cuboid dimensions.
    pub fn for_face(uvs: &FaceUvs, face: CuboidFace, dimensions: [f32; 3]) -> Self {
        let (width, height) = face.pixel_size(dimensions);
        Self {
            uv_origin: uvs.for_face(face),
            width,
            height,
        }
    }
}

/// Look up the sample rectangle for a single face of a part's layer.
///
/// Returns `None` only when the part has no mapping for `layer`.
pub fn face_spec(
    part: BodyPart,
    variant: ModelVariant,
    layer: Layer,
    face: CuboidFace,
) -> Option<FaceSpec> {
    let mapping = uv_mapping(part);
    let uvs = mapping.layer(layer)?;
    Some(FaceSpec::for_face(uvs, face, geometry(part, variant).dimensions))
}
