//! Character export formats.
//!
//! GLB and OBJ take a triangulated [`MeshedCharacter`](crate::mesher::MeshedCharacter);
//! the face archive works straight from the assembled character.

pub mod faces;
pub mod gltf;
pub mod obj;

pub use faces::{export_faces_zip, face_entry_name};
pub use gltf::export_glb;
pub use obj::{export_obj, ObjExport};
