//! # Skin Mesher
//!
//! A Rust library for turning Minecraft player skins into textured 3D
//! characters.
//!
//! ## Overview
//!
//! A skin is a 64x64 (or legacy 64x32) PNG. This library cuts it into the
//! face textures of six cuboids (head, body, two arms, two legs), for the
//! base layer and the overlay layer, in the classic (4px arms) or slim
//! (3px arms) variant. The assembled [`Character`] can be handed to a
//! renderer directly, or triangulated and exported as GLB or OBJ.
//!
//! ## Quick Start
//!
//! ```ignore
//! use skin_mesher::{build_character, export_glb, load_skin, BodyPart, CuboidFace, ModelVariant, SkinMesher};
//!
//! let skin = load_skin(&std::fs::read("steve.png")?)?;
//!
//! // Per-face textures for an external scene graph
//! let character = build_character(ModelVariant::Classic, Some(&skin), true);
//! let head_front = character.part(BodyPart::Head).inner.material(CuboidFace::Front);
//!
//! // Or a ready-to-load GLB
//! let output = SkinMesher::new().mesh(Some(&skin))?;
//! let glb_bytes = export_glb(&output)?;
//! ```
//!
//! ## Interactive use
//!
//! [`SkinSession`] tracks the current skin and viewer toggles, discards
//! uploads that were overtaken by a newer one, and only rebuilds the
//! character when something changed.

pub mod error;
pub mod types;
pub mod skin;
pub mod catalog;
pub mod mesher;
pub mod atlas;
pub mod export;
pub mod session;

// Re-export main types for convenience
pub use error::{ImageError, Result, SkinError};
pub use types::{BodyPart, BoundingBox, CuboidFace, Layer, ModelVariant, UvPoint};
pub use skin::{load_skin, load_skin_from_path, PixelBuffer};
pub use catalog::{face_spec, geometry, uv_mapping, FaceSpec, FaceUvs, PartGeometry, PartUvMapping};
pub use mesher::{
    build_character, build_part, extract_face, mesh_character, Character, CuboidMesh, FaceTexture,
    Material, Mesh, MeshedCharacter, PartVisual, SkinMesher, Vertex, ViewerConfig,
};
pub use atlas::TextureAtlas;
pub use export::{export_faces_zip, export_glb, export_obj, ObjExport};
pub use session::{SkinSession, UploadOutcome, UploadTicket};

#[cfg(feature = "wasm")]
pub mod wasm;
