//! Wavefront OBJ export.
//!
//! Writes the inner and outer layers as two groups sharing one atlas
//! material. OBJ puts the texture origin bottom-left, so V is flipped.

use crate::error::{Result, SkinError};
use crate::mesher::geometry::Mesh;
use crate::mesher::MeshedCharacter;
use std::fmt::Write;

/// Export a character to OBJ format.
/// Returns (obj_content, mtl_content) as strings.
pub fn export_obj(output: &MeshedCharacter, name: &str) -> Result<(String, String)> {
    let total_verts = output.total_vertices();
    let total_tris = output.total_triangles();

    // ~60 bytes per vertex line (v/vt/vn) x 3 + ~40 per face
    let mut obj = String::with_capacity(256 + total_verts * 180 + total_tris * 40);
    let mut mtl = String::with_capacity(256);

    write_obj(&mut obj, output, name)
        .and_then(|_| write_mtl(&mut mtl, name))
        .map_err(|e| SkinError::Export(format!("Failed to write OBJ: {}", e)))?;

    Ok((obj, mtl))
}

fn write_obj(obj: &mut String, output: &MeshedCharacter, name: &str) -> std::fmt::Result {
    writeln!(obj, "# skin-mesher OBJ export")?;
    writeln!(obj, "# Vertices: {}", output.total_vertices())?;
    writeln!(obj, "# Triangles: {}", output.total_triangles())?;
    writeln!(obj)?;
    writeln!(obj, "mtllib {}.mtl", name)?;
    writeln!(obj, "o {}", name)?;
    writeln!(obj)?;

    let groups = [("inner", &output.inner_mesh), ("outer", &output.outer_mesh)];

    // OBJ indices are global and 1-based
    for (_, mesh) in groups {
        for v in &mesh.vertices {
            writeln!(obj, "v {} {} {}", v.position[0], v.position[1], v.position[2])?;
        }
    }
    for (_, mesh) in groups {
        for v in &mesh.vertices {
            writeln!(obj, "vt {} {}", v.uv[0], 1.0 - v.uv[1])?;
        }
    }
    for (_, mesh) in groups {
        for v in &mesh.vertices {
            writeln!(obj, "vn {} {} {}", v.normal[0], v.normal[1], v.normal[2])?;
        }
    }
    writeln!(obj)?;

    writeln!(obj, "usemtl {}_material", name)?;
    let mut vertex_offset = 0usize;
    for (group, mesh) in groups {
        if mesh.is_empty() {
            continue;
        }
        writeln!(obj, "g {}", group)?;
        write_faces(obj, mesh, vertex_offset)?;
        vertex_offset += mesh.vertex_count();
    }

    Ok(())
}

fn write_faces(obj: &mut String, mesh: &Mesh, vertex_offset: usize) -> std::fmt::Result {
    for tri in mesh.indices.chunks(3) {
        let [i0, i1, i2] = [tri[0], tri[1], tri[2]].map(|i| i as usize + vertex_offset + 1);
        writeln!(obj, "f {0}/{0}/{0} {1}/{1}/{1} {2}/{2}/{2}", i0, i1, i2)?;
    }
    Ok(())
}

fn write_mtl(mtl: &mut String, name: &str) -> std::fmt::Result {
    writeln!(mtl, "# skin-mesher material")?;
    writeln!(mtl)?;
    writeln!(mtl, "newmtl {}_material", name)?;
    writeln!(mtl, "Ka 1.0 1.0 1.0")?;
    writeln!(mtl, "Kd 1.0 1.0 1.0")?;
    writeln!(mtl, "Ks 0.0 0.0 0.0")?;
    writeln!(mtl, "Ns 10.0")?;
    writeln!(mtl, "d 1.0")?;
    writeln!(mtl, "illum 1")?;
    writeln!(mtl, "map_Kd {}_atlas.png", name)?;
    writeln!(mtl, "map_d {}_atlas.png", name)?;
    Ok(())
}

/// OBJ, MTL and atlas bytes ready to be written side by side.
pub struct ObjExport {
    pub obj: String,
    pub mtl: String,
    pub texture_png: Vec<u8>,
}

impl ObjExport {
    pub fn from_output(output: &MeshedCharacter, name: &str) -> Result<Self> {
        let (obj, mtl) = export_obj(output, name)?;
        let texture_png = output.atlas.to_png()?;
        Ok(Self {
            obj,
            mtl,
            texture_png,
        })
    }

    /// File names for the three outputs, in (obj, mtl, png) order.
    pub fn file_names(name: &str) -> (String, String, String) {
        (
            format!("{}.obj", name),
            format!("{}.mtl", name),
            format!("{}_atlas.png", name),
        )
    }
}
