//! Whole-character assembly.

use super::part::{assemble_part, CuboidMesh, PartVisual};
use super::ViewerConfig;
use crate::skin::PixelBuffer;
use crate::types::{BodyPart, BoundingBox, ModelVariant};

/// The six assembled body parts under one root transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub variant: ModelVariant,
    pub show_outer: bool,
    /// One entry per part, in [`BodyPart::ALL`] order.
    pub parts: Vec<PartVisual>,
}

impl Character {
    /// Look up an assembled part.
    pub fn part(&self, part: BodyPart) -> &PartVisual {
        &self.parts[part.index()]
    }

    /// All cuboids, inner before outer for each part.
    pub fn cuboids(&self) -> impl Iterator<Item = (BodyPart, &CuboidMesh)> {
        self.parts
            .iter()
            .flat_map(|visual| visual.cuboids().map(move |c| (visual.part, c)))
    }

    /// Whether the faces carry skin textures rather than the placeholder.
    pub fn is_textured(&self) -> bool {
        self.cuboids().any(|(_, c)| c.texture_count() > 0)
    }

    /// Number of outer-layer cuboids.
    pub fn outer_count(&self) -> usize {
        self.parts.iter().filter(|p| p.outer.is_some()).count()
    }

    /// Total number of face textures across all cuboids.
    pub fn face_texture_count(&self) -> usize {
        self.cuboids().map(|(_, c)| c.texture_count()).sum()
    }

    /// Bounds of the whole figure in root space.
    pub fn bounds(&self) -> BoundingBox {
        let boxes: Vec<BoundingBox> = self.cuboids().map(|(_, c)| c.bounds()).collect();
        BoundingBox::from_points(boxes.iter().flat_map(|b| [b.min, b.max]))
            .unwrap_or(BoundingBox::new([0.0; 3], [0.0; 3]))
    }
}

/// Assemble the full six-part character.
///
/// Parts are independent of each other; each gets its own freshly extracted
/// face textures.
pub fn build_character(
    variant: ModelVariant,
    buffer: Option<&PixelBuffer>,
    show_outer: bool,
) -> Character {
    let config = ViewerConfig::default()
        .with_variant(variant)
        .with_show_outer(show_outer);
    build_character_with_config(buffer, &config)
}

/// Assemble the character using every setting in `config`.
pub fn build_character_with_config(buffer: Option<&PixelBuffer>, config: &ViewerConfig) -> Character {
    let parts: Vec<PartVisual> = BodyPart::ALL
        .iter()
        .map(|&part| assemble_part(part, buffer, config))
        .collect();

    log::debug!(
        "built {} character ({} parts, outer layer {}, skin {})",
        config.variant,
        parts.len(),
        if config.show_outer { "on" } else { "off" },
        if buffer.is_some() { "loaded" } else { "placeholder" },
    );

    Character {
        variant: config.variant,
        show_outer: config.show_outer,
        parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::part::{Material, OUTER_LAYER_SCALE, PLACEHOLDER_COLOR};
    use crate::skin::{load_skin, PixelBuffer};
    use crate::types::CuboidFace;

    const MAGENTA: [u8; 4] = [255, 0, 255, 255];

    #[test]
    fn test_six_parts_with_outer() {
        let skin = PixelBuffer::filled(MAGENTA);
        let character = build_character(ModelVariant::Classic, Some(&skin), true);

        assert_eq!(character.parts.len(), 6);
        for (visual, part) in character.parts.iter().zip(BodyPart::ALL) {
            assert_eq!(visual.part, part);
            let outer = visual.outer.as_ref().expect("outer layer");
            assert_eq!(outer.scale, visual.inner.scale * OUTER_LAYER_SCALE);
        }
        assert_eq!(character.outer_count(), 6);
        assert_eq!(character.face_texture_count(), 72);
    }

    #[test]
    fn test_all_magenta_faces() {
        let skin = PixelBuffer::filled(MAGENTA);
        let character = build_character(ModelVariant::Slim, Some(&skin), true);

        for (part, cuboid) in character.cuboids() {
            for face in CuboidFace::ALL {
                let texture = cuboid.material(face).texture().unwrap();
                assert!(
                    texture.as_raw().chunks(4).all(|p| p == MAGENTA),
                    "{} {} {} not magenta",
                    part,
                    cuboid.layer,
                    face
                );
            }
        }
    }

    #[test]
    fn test_fully_transparent_skin_keeps_geometry() {
        let skin = PixelBuffer::transparent();
        let character = build_character(ModelVariant::Classic, Some(&skin), true);

        assert_eq!(character.parts.len(), 6);
        for (_, cuboid) in character.cuboids() {
            for material in &cuboid.materials {
                assert!(material.texture().unwrap().is_fully_transparent());
            }
        }
        let bounds = character.bounds();
        assert!(bounds.dimensions()[1] > 30.0);
    }

    #[test]
    fn test_toggle_outer_keeps_inner() {
        let mut pixels = Vec::with_capacity(64 * 64 * 4);
        for i in 0..64 * 64u32 {
            pixels.extend_from_slice(&[(i % 251) as u8, (i % 13) as u8, 7, 255]);
        }
        let skin = PixelBuffer::from_rgba(64, 64, pixels).unwrap();

        let shown = build_character(ModelVariant::Classic, Some(&skin), true);
        let hidden = build_character(ModelVariant::Classic, Some(&skin), false);

        assert_eq!(hidden.outer_count(), 0);
        assert_eq!(hidden.face_texture_count(), 36);
        for (a, b) in shown.parts.iter().zip(&hidden.parts) {
            assert_eq!(a.inner, b.inner);
        }
    }

    #[test]
    fn test_legacy_skin_outer_faces_transparent() {
        let pixels: Vec<u8> = (0..64 * 32).flat_map(|_| [200u8, 100, 50, 255]).collect();
        let png = crate::skin::encode_png(&pixels, 64, 32).unwrap();
        let skin = load_skin(&png).unwrap();
        let character = build_character(ModelVariant::Classic, Some(&skin), true);

        for visual in &character.parts {
            let outer = visual.outer.as_ref().unwrap();
            for face in CuboidFace::ALL {
                let texture = outer.material(face).texture().unwrap();
                // The hat lives in the top half; every other overlay lies below row 32
                if visual.part == BodyPart::Head {
                    assert!(!texture.has_transparency());
                } else {
                    assert!(texture.is_fully_transparent(), "{} {}", visual.part, face);
                }
            }
        }

        // Left limbs have no data in a legacy skin either
        let left_arm = character.part(BodyPart::LeftArm);
        assert!(left_arm.inner.material(CuboidFace::Front).texture().unwrap().is_fully_transparent());
        let right_arm = character.part(BodyPart::RightArm);
        assert!(!right_arm.inner.material(CuboidFace::Front).texture().unwrap().has_transparency());
    }

    #[test]
    fn test_placeholder_character() {
        let character = build_character(ModelVariant::Classic, None, false);
        assert!(!character.is_textured());
        assert_eq!(character.parts.len(), 6);
        for (_, cuboid) in character.cuboids() {
            assert_eq!(*cuboid.material(CuboidFace::Front), Material::Flat(PLACEHOLDER_COLOR));
        }
    }

    #[test]
    fn test_variant_changes_only_arms() {
        let skin = PixelBuffer::filled(MAGENTA);
        let classic = build_character(ModelVariant::Classic, Some(&skin), true);
        let slim = build_character(ModelVariant::Slim, Some(&skin), true);

        for part in BodyPart::ALL {
            let a = classic.part(part);
            let b = slim.part(part);
            if part.is_arm() {
                assert_eq!(b.inner.dimensions[0], 3.0);
                assert_ne!(a.inner.position, b.inner.position);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_character_bounds() {
        let character = build_character(ModelVariant::Classic, None, false);
        let bounds = character.bounds();
        assert_eq!(bounds.min, [-8.0, -16.0, -4.0]);
        assert_eq!(bounds.max, [8.0, 16.0, 4.0]);
    }
}
