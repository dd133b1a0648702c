//! Player model tables for the 64x64 skin layout.

use super::{FaceUvs, PartGeometry, PartUvMapping};
use crate::types::{BodyPart, ModelVariant, UvPoint};

const fn uvs(
    top: (u32, u32),
    bottom: (u32, u32),
    right: (u32, u32),
    front: (u32, u32),
    left: (u32, u32),
    back: (u32, u32),
) -> FaceUvs {
    FaceUvs {
        top: UvPoint::new(top.0, top.1),
        bottom: UvPoint::new(bottom.0, bottom.1),
        right: UvPoint::new(right.0, right.1),
        front: UvPoint::new(front.0, front.1),
        left: UvPoint::new(left.0, left.1),
        back: UvPoint::new(back.0, back.1),
    }
}

// ── Head + Hat ──
const HEAD: PartUvMapping = PartUvMapping {
    inner: uvs((8, 0), (16, 0), (0, 8), (8, 8), (16, 8), (24, 8)),
    outer: Some(uvs((40, 0), (48, 0), (32, 8), (40, 8), (48, 8), (56, 8))),
};

// ── Body + Jacket ──
const BODY: PartUvMapping = PartUvMapping {
    inner: uvs((20, 16), (28, 16), (16, 20), (20, 20), (28, 20), (32, 20)),
    outer: Some(uvs((20, 32), (28, 32), (16, 36), (20, 36), (28, 36), (32, 36))),
};

// ── Right Arm + Right Sleeve ──
const RIGHT_ARM: PartUvMapping = PartUvMapping {
    inner: uvs((44, 16), (48, 16), (40, 20), (44, 20), (48, 20), (52, 20)),
    outer: Some(uvs((44, 32), (48, 32), (40, 36), (44, 36), (48, 36), (52, 36))),
};

// ── Left Arm + Left Sleeve ──
// Own UVs in the lower half, not mirrored from the right arm
const LEFT_ARM: PartUvMapping = PartUvMapping {
    inner: uvs((36, 48), (40, 48), (32, 52), (36, 52), (40, 52), (44, 52)),
    outer: Some(uvs((52, 48), (56, 48), (48, 52), (52, 52), (56, 52), (60, 52))),
};

// ── Right Leg + Right Pants ──
const RIGHT_LEG: PartUvMapping = PartUvMapping {
    inner: uvs((4, 16), (8, 16), (0, 20), (4, 20), (8, 20), (12, 20)),
    outer: Some(uvs((4, 32), (8, 32), (0, 36), (4, 36), (8, 36), (12, 36))),
};

// ── Left Leg + Left Pants ──
const LEFT_LEG: PartUvMapping = PartUvMapping {
    inner: uvs((20, 48), (24, 48), (16, 52), (20, 52), (24, 52), (28, 52)),
    outer: Some(uvs((4, 48), (8, 48), (0, 52), (4, 52), (8, 52), (12, 52))),
};

/// Cuboid geometry for a part. Only the arms depend on `variant`.
pub fn geometry(part: BodyPart, variant: ModelVariant) -> PartGeometry {
    // Slim arms lose a pixel of width and move half a pixel inward so they
    // stay flush with the body.
    let slim = variant.is_slim();
    let arm_width = if slim { 3.0 } else { 4.0 };
    let arm_x = if slim { 5.5 } else { 6.0 };

    match part {
        BodyPart::Head => PartGeometry {
            dimensions: [8.0, 8.0, 8.0],
            offset: [0.0, 12.0, 0.0],
        },
        BodyPart::Body => PartGeometry {
            dimensions: [8.0, 12.0, 4.0],
            offset: [0.0, 2.0, 0.0],
        },
        BodyPart::RightArm => PartGeometry {
            dimensions: [arm_width, 12.0, 4.0],
            offset: [-arm_x, 2.0, 0.0],
        },
        BodyPart::LeftArm => PartGeometry {
            dimensions: [arm_width, 12.0, 4.0],
            offset: [arm_x, 2.0, 0.0],
        },
        BodyPart::RightLeg => PartGeometry {
            dimensions: [4.0, 12.0, 4.0],
            offset: [-2.0, -10.0, 0.0],
        },
        BodyPart::LeftLeg => PartGeometry {
            dimensions: [4.0, 12.0, 4.0],
            offset: [2.0, -10.0, 0.0],
        },
    }
}

/// UV mapping for a part. Identical for both model variants.
pub fn uv_mapping(part: BodyPart) -> PartUvMapping {
    match part {
        BodyPart::Head => HEAD,
        BodyPart::Body => BODY,
        BodyPart::RightArm => RIGHT_ARM,
        BodyPart::LeftArm => LEFT_ARM,
        BodyPart::RightLeg => RIGHT_LEG,
        BodyPart::LeftLeg => LEFT_LEG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (top, bottom, right, front, left, back) for one layer.
    type Uvs = [(u32, u32); 6];

    fn assert_uvs(part: BodyPart, layer: &str, actual: &FaceUvs, expected: Uvs) {
        let actual = [
            actual.top,
            actual.bottom,
            actual.right,
            actual.front,
            actual.left,
            actual.back,
        ];
        let names = ["top", "bottom", "right", "front", "left", "back"];
        for ((got, (x, y)), name) in actual.iter().zip(expected).zip(names) {
            assert_eq!(*got, UvPoint::new(x, y), "{} {} {}", part, layer, name);
        }
    }

    #[test]
    fn test_uv_table_is_exact() {
        let expected: [(BodyPart, Uvs, Uvs); 6] = [
            (
                BodyPart::Head,
                [(8, 0), (16, 0), (0, 8), (8, 8), (16, 8), (24, 8)],
                [(40, 0), (48, 0), (32, 8), (40, 8), (48, 8), (56, 8)],
            ),
            (
                BodyPart::Body,
                [(20, 16), (28, 16), (16, 20), (20, 20), (28, 20), (32, 20)],
                [(20, 32), (28, 32), (16, 36), (20, 36), (28, 36), (32, 36)],
            ),
            (
                BodyPart::RightArm,
                [(44, 16), (48, 16), (40, 20), (44, 20), (48, 20), (52, 20)],
                [(44, 32), (48, 32), (40, 36), (44, 36), (48, 36), (52, 36)],
            ),
            (
                BodyPart::LeftArm,
                [(36, 48), (40, 48), (32, 52), (36, 52), (40, 52), (44, 52)],
                [(52, 48), (56, 48), (48, 52), (52, 52), (56, 52), (60, 52)],
            ),
            (
                BodyPart::RightLeg,
                [(4, 16), (8, 16), (0, 20), (4, 20), (8, 20), (12, 20)],
                [(4, 32), (8, 32), (0, 36), (4, 36), (8, 36), (12, 36)],
            ),
            (
                BodyPart::LeftLeg,
                [(20, 48), (24, 48), (16, 52), (20, 52), (24, 52), (28, 52)],
                [(4, 48), (8, 48), (0, 52), (4, 52), (8, 52), (12, 52)],
            ),
        ];

        for (part, inner, outer) in expected {
            let mapping = uv_mapping(part);
            assert_uvs(part, "inner", &mapping.inner, inner);
            let actual_outer = mapping.outer.expect("outer layer");
            assert_uvs(part, "outer", &actual_outer, outer);
        }
    }

    #[test]
    fn test_classic_geometry_table() {
        let expected = [
            (BodyPart::Head, [8.0, 8.0, 8.0], [0.0, 12.0, 0.0]),
            (BodyPart::Body, [8.0, 12.0, 4.0], [0.0, 2.0, 0.0]),
            (BodyPart::RightArm, [4.0, 12.0, 4.0], [-6.0, 2.0, 0.0]),
            (BodyPart::LeftArm, [4.0, 12.0, 4.0], [6.0, 2.0, 0.0]),
            (BodyPart::RightLeg, [4.0, 12.0, 4.0], [-2.0, -10.0, 0.0]),
            (BodyPart::LeftLeg, [4.0, 12.0, 4.0], [2.0, -10.0, 0.0]),
        ];
        for (part, dims, offset) in expected {
            let geo = geometry(part, ModelVariant::Classic);
            assert_eq!(geo.dimensions, dims, "{} dimensions", part);
            assert_eq!(geo.offset, offset, "{} offset", part);
        }
    }

    #[test]
    fn test_slim_only_changes_arms() {
        for part in BodyPart::ALL {
            let classic = geometry(part, ModelVariant::Classic);
            let slim = geometry(part, ModelVariant::Slim);
            if part.is_arm() {
                assert_eq!(classic.dimensions[0], 4.0);
                assert_eq!(slim.dimensions[0], 3.0);
                assert_eq!(slim.dimensions[1..], classic.dimensions[1..]);
                // Shifted exactly half a pixel toward the body centre
                assert_eq!(classic.offset[0].abs() - slim.offset[0].abs(), 0.5);
                assert_eq!(classic.offset[0].signum(), slim.offset[0].signum());
                assert_eq!(slim.offset[1..], classic.offset[1..]);
            } else {
                assert_eq!(classic, slim);
            }
        }
    }

    #[test]
    fn test_slim_arm_stays_flush_with_body() {
        for variant in [ModelVariant::Classic, ModelVariant::Slim] {
            let body = geometry(BodyPart::Body, variant);
            let arm = geometry(BodyPart::LeftArm, variant);
            let body_edge = body.offset[0] + body.dimensions[0] / 2.0;
            let arm_edge = arm.offset[0] - arm.dimensions[0] / 2.0;
            assert_eq!(body_edge, arm_edge);
        }
    }

    #[test]
    fn test_every_part_has_outer_layer() {
        for part in BodyPart::ALL {
            assert!(uv_mapping(part).outer.is_some(), "{} missing outer", part);
        }
    }
}
