//! Shared types used throughout the library.

mod face;

pub use face::CuboidFace;

use serde::{Deserialize, Serialize};

/// The six fixed body parts of a player character, in assembly order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Head,
    Body,
    RightArm,
    LeftArm,
    RightLeg,
    LeftLeg,
}

impl BodyPart {
    /// All six parts in assembly order.
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Head,
        BodyPart::Body,
        BodyPart::RightArm,
        BodyPart::LeftArm,
        BodyPart::RightLeg,
        BodyPart::LeftLeg,
    ];

    /// Position of this part in [`BodyPart::ALL`].
    pub fn index(&self) -> usize {
        match self {
            BodyPart::Head => 0,
            BodyPart::Body => 1,
            BodyPart::RightArm => 2,
            BodyPart::LeftArm => 3,
            BodyPart::RightLeg => 4,
            BodyPart::LeftLeg => 5,
        }
    }

    /// Stable snake_case name, used for texture and node names.
    pub fn name(&self) -> &'static str {
        match self {
            BodyPart::Head => "head",
            BodyPart::Body => "body",
            BodyPart::RightArm => "right_arm",
            BodyPart::LeftArm => "left_arm",
            BodyPart::RightLeg => "right_leg",
            BodyPart::LeftLeg => "left_leg",
        }
    }

    /// Whether this part's geometry depends on the model variant.
    pub fn is_arm(&self) -> bool {
        matches!(self, BodyPart::RightArm | BodyPart::LeftArm)
    }

    /// Parse from string (case-insensitive, accepts `right_arm` or `rightarm`).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "head" => Some(BodyPart::Head),
            "body" => Some(BodyPart::Body),
            "rightarm" => Some(BodyPart::RightArm),
            "leftarm" => Some(BodyPart::LeftArm),
            "rightleg" => Some(BodyPart::RightLeg),
            "leftleg" => Some(BodyPart::LeftLeg),
            _ => None,
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Arm geometry variant of the player model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    /// 4px wide arms (Steve).
    #[default]
    Classic,
    /// 3px wide arms (Alex).
    Slim,
}

impl ModelVariant {
    pub fn is_slim(&self) -> bool {
        matches!(self, ModelVariant::Slim)
    }

    /// Parse from string. Accepts the Steve/Alex aliases and "wide".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "wide" | "steve" => Some(ModelVariant::Classic),
            "slim" | "alex" => Some(ModelVariant::Slim),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelVariant::Classic => write!(f, "classic"),
            ModelVariant::Slim => write!(f, "slim"),
        }
    }
}

/// Skin layer: the base skin or the overlay (hat, jacket, sleeves, pants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Inner,
    Outer,
}

impl Layer {
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Inner => "inner",
            Layer::Outer => "outer",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pixel-space origin of a face's sample rectangle on the skin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UvPoint {
    pub x: u32,
    pub y: u32,
}

impl UvPoint {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl Iterator<Item = [f32; 3]>) -> Option<Self> {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        let mut has_points = false;

        for p in points {
            has_points = true;
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        if has_points {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub fn dimensions(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}
