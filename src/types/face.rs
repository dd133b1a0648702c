//! Cuboid face naming and the face-order convention.
//!
//! The character faces +Z. Its anatomical left side is therefore at +X, which
//! is the viewer's right. Face materials are always stored in
//! [`CuboidFace::ALL`] order; getting this backwards mirrors the figure.

use serde::{Deserialize, Serialize};

/// One face of a body-part cuboid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuboidFace {
    /// +X, the character's left (viewer's right).
    CharacterLeft,
    /// -X, the character's right (viewer's left).
    CharacterRight,
    /// +Y
    Top,
    /// -Y
    Bottom,
    /// +Z
    Front,
    /// -Z
    Back,
}

impl CuboidFace {
    /// All six faces in material order.
    pub const ALL: [CuboidFace; 6] = [
        CuboidFace::CharacterLeft,
        CuboidFace::CharacterRight,
        CuboidFace::Top,
        CuboidFace::Bottom,
        CuboidFace::Front,
        CuboidFace::Back,
    ];

    /// Position of this face in [`CuboidFace::ALL`].
    pub fn index(&self) -> usize {
        match self {
            CuboidFace::CharacterLeft => 0,
            CuboidFace::CharacterRight => 1,
            CuboidFace::Top => 2,
            CuboidFace::Bottom => 3,
            CuboidFace::Front => 4,
            CuboidFace::Back => 5,
        }
    }

    /// Get the outward normal vector for this face.
    pub fn normal(&self) -> [f32; 3] {
        match self {
            CuboidFace::CharacterLeft => [1.0, 0.0, 0.0],
            CuboidFace::CharacterRight => [-1.0, 0.0, 0.0],
            CuboidFace::Top => [0.0, 1.0, 0.0],
            CuboidFace::Bottom => [0.0, -1.0, 0.0],
            CuboidFace::Front => [0.0, 0.0, 1.0],
            CuboidFace::Back => [0.0, 0.0, -1.0],
        }
    }

    /// Texture size in pixels of this face on a cuboid of `(w, h, d)`.
    ///
    /// Sides are `d x h`, top/bottom are `w x d`, front/back are `w x h`.
    pub fn pixel_size(&self, dimensions: [f32; 3]) -> (u32, u32) {
        let [w, h, d] = dimensions.map(|v| v.round().max(0.0) as u32);
        match self {
            CuboidFace::CharacterLeft | CuboidFace::CharacterRight => (d, h),
            CuboidFace::Top | CuboidFace::Bottom => (w, d),
            CuboidFace::Front | CuboidFace::Back => (w, h),
        }
    }

    /// Corners of this face on a cuboid centred at the origin.
    ///
    /// Returned as (top-left, top-right, bottom-right, bottom-left) of the
    /// face texture as seen from outside the cuboid. Top and bottom faces
    /// have their texture top edge toward the back and front respectively.
    pub fn corners(&self, half: [f32; 3]) -> [[f32; 3]; 4] {
        let [x, y, z] = half;
        match self {
            CuboidFace::CharacterLeft => [[x, y, z], [x, y, -z], [x, -y, -z], [x, -y, z]],
            CuboidFace::CharacterRight => [[-x, y, -z], [-x, y, z], [-x, -y, z], [-x, -y, -z]],
            CuboidFace::Top => [[-x, y, -z], [x, y, -z], [x, y, z], [-x, y, z]],
            CuboidFace::Bottom => [[-x, -y, z], [x, -y, z], [x, -y, -z], [-x, -y, -z]],
            CuboidFace::Front => [[-x, y, z], [x, y, z], [x, -y, z], [-x, -y, z]],
            CuboidFace::Back => [[x, y, -z], [-x, y, -z], [-x, -y, -z], [x, -y, -z]],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CuboidFace::CharacterLeft => "left",
            CuboidFace::CharacterRight => "right",
            CuboidFace::Top => "top",
            CuboidFace::Bottom => "bottom",
            CuboidFace::Front => "front",
            CuboidFace::Back => "back",
        }
    }

}

impl std::fmt::Display for CuboidFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
