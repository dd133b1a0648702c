//! glTF/GLB export.

use crate::error::{Result, SkinError};
use crate::mesher::geometry::Mesh;
use crate::mesher::{MeshedCharacter, TextureFilter, FACE_SAMPLING};
use crate::types::BoundingBox;
use gltf_json as json;
use json::validation::Checked::Valid;
use json::validation::USize64;

/// Byte ranges of one mesh inside the binary chunk.
struct MeshOffsets {
    pos_offset: usize,
    pos_bytes: usize,
    norm_offset: usize,
    norm_bytes: usize,
    uv_offset: usize,
    uv_bytes: usize,
    idx_offset: usize,
    idx_bytes: usize,
    vertex_count: usize,
    index_count: usize,
    /// Position extremes of this mesh alone.
    bounds: BoundingBox,
}

/// Export a character to GLB format (binary glTF) with the atlas embedded.
///
/// The inner and outer layers become separate primitives of one mesh. Both
/// share a single alpha-masked, double-sided material sampled with nearest
/// filtering, so transparent overlay pixels are cut out rather than blended.
pub fn export_glb(output: &MeshedCharacter) -> Result<Vec<u8>> {
    if output.inner_mesh.is_empty() && output.outer_mesh.is_empty() {
        return Err(SkinError::Export("Cannot export empty mesh".to_string()));
    }

    let texture_png = output.atlas.to_png()?;

    let mut buffer_data: Vec<u8> = Vec::new();
    let inner_offsets = write_mesh(&mut buffer_data, &output.inner_mesh);
    let outer_offsets = write_mesh(&mut buffer_data, &output.outer_mesh);

    // Image data must start on a 4-byte boundary
    pad_to_four(&mut buffer_data, 0);
    let texture_offset = buffer_data.len();
    buffer_data.extend_from_slice(&texture_png);

    let mut accessors = Vec::new();
    let mut buffer_views = Vec::new();
    let mut primitives = Vec::new();

    for offsets in [&inner_offsets, &outer_offsets].into_iter().flatten() {
        add_mesh_primitive(offsets, &mut buffer_views, &mut accessors, &mut primitives);
    }

    let image_view = buffer_views.len() as u32;
    buffer_views.push(create_buffer_view(texture_offset, texture_png.len(), None));

    let root = json::Root {
        accessors,
        buffers: vec![json::Buffer {
            byte_length: USize64(buffer_data.len() as u64),
            extensions: Default::default(),
            extras: Default::default(),
            uri: None,
        }],
        buffer_views,
        images: vec![json::Image {
            buffer_view: Some(json::Index::new(image_view)),
            mime_type: Some(json::image::MimeType("image/png".to_string())),
            uri: None,
            extensions: Default::default(),
            extras: Default::default(),
        }],
        samplers: vec![create_sampler()],
        textures: vec![json::Texture {
            sampler: Some(json::Index::new(0)),
            source: json::Index::new(0),
            extensions: Default::default(),
            extras: Default::default(),
        }],
        materials: vec![create_skin_material()],
        meshes: vec![json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            primitives,
            weights: None,
        }],
        nodes: vec![json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: Some(json::Index::new(0)),
            rotation: None,
            scale: None,
            translation: None,
            skin: None,
            weights: None,
        }],
        scenes: vec![json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            nodes: vec![json::Index::new(0)],
        }],
        scene: Some(json::Index::new(0)),
        ..Default::default()
    };

    let json_string = json::serialize::to_string(&root)
        .map_err(|e| SkinError::Export(format!("Failed to serialize glTF JSON: {}", e)))?;
    let mut json_bytes = json_string.into_bytes();
    pad_to_four(&mut json_bytes, 0x20);
    pad_to_four(&mut buffer_data, 0);

    let total_size = 12 + 8 + json_bytes.len() + 8 + buffer_data.len();
    let mut glb = Vec::with_capacity(total_size);

    // Header
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total_size as u32).to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes());
    glb.extend_from_slice(&json_bytes);

    // BIN chunk
    glb.extend_from_slice(&(buffer_data.len() as u32).to_le_bytes());
    glb.extend_from_slice(&0x004E4942u32.to_le_bytes());
    glb.extend_from_slice(&buffer_data);

    log::debug!("exported GLB: {} bytes, {} primitives", glb.len(), root.meshes[0].primitives.len());

    Ok(glb)
}

fn pad_to_four(bytes: &mut Vec<u8>, fill: u8) {
    let padding = (4 - (bytes.len() % 4)) % 4;
    bytes.extend(std::iter::repeat(fill).take(padding));
}

fn extend_f32(buffer: &mut Vec<u8>, values: &[f32]) {
    for value in values {
        buffer.extend_from_slice(&value.to_le_bytes());
    }
}

/// Append positions, normals, UVs and indices of `mesh` to `buffer`.
fn write_mesh(buffer: &mut Vec<u8>, mesh: &Mesh) -> Option<MeshOffsets> {
    let bounds = BoundingBox::from_points(mesh.vertices.iter().map(|v| v.position))?;

    let pos_offset = buffer.len();
    extend_f32(buffer, &mesh.positions_flat());
    let norm_offset = buffer.len();
    extend_f32(buffer, &mesh.normals_flat());
    let uv_offset = buffer.len();
    extend_f32(buffer, &mesh.uvs_flat());
    let idx_offset = buffer.len();
    for index in &mesh.indices {
        buffer.extend_from_slice(&index.to_le_bytes());
    }
    let end = buffer.len();

    Some(MeshOffsets {
        pos_offset,
        pos_bytes: norm_offset - pos_offset,
        norm_offset,
        norm_bytes: uv_offset - norm_offset,
        uv_offset,
        uv_bytes: idx_offset - uv_offset,
        idx_offset,
        idx_bytes: end - idx_offset,
        vertex_count: mesh.vertex_count(),
        index_count: mesh.indices.len(),
        bounds,
    })
}

/// Add buffer views, accessors and a primitive for one mesh.
fn add_mesh_primitive(
    offsets: &MeshOffsets,
    buffer_views: &mut Vec<json::buffer::View>,
    accessors: &mut Vec<json::Accessor>,
    primitives: &mut Vec<json::mesh::Primitive>,
) {
    use json::accessor::{ComponentType, Type};
    use json::buffer::Target;

    let first_view = buffer_views.len() as u32;
    buffer_views.push(create_buffer_view(offsets.pos_offset, offsets.pos_bytes, Some(Target::ArrayBuffer)));
    buffer_views.push(create_buffer_view(offsets.norm_offset, offsets.norm_bytes, Some(Target::ArrayBuffer)));
    buffer_views.push(create_buffer_view(offsets.uv_offset, offsets.uv_bytes, Some(Target::ArrayBuffer)));
    buffer_views.push(create_buffer_view(offsets.idx_offset, offsets.idx_bytes, Some(Target::ElementArrayBuffer)));

    let accessor_start = accessors.len() as u32;
    accessors.push(create_accessor(first_view, offsets.vertex_count, Type::Vec3, ComponentType::F32, Some(offsets.bounds.min), Some(offsets.bounds.max)));
    accessors.push(create_accessor(first_view + 1, offsets.vertex_count, Type::Vec3, ComponentType::F32, None, None));
    accessors.push(create_accessor(first_view + 2, offsets.vertex_count, Type::Vec2, ComponentType::F32, None, None));
    accessors.push(create_accessor(first_view + 3, offsets.index_count, Type::Scalar, ComponentType::U32, None, None));

    primitives.push(create_primitive(accessor_start, accessor_start + 3));
}

fn create_buffer_view(
    offset: usize,
    size: usize,
    target: Option<json::buffer::Target>,
) -> json::buffer::View {
    json::buffer::View {
        buffer: json::Index::new(0),
        byte_length: USize64(size as u64),
        byte_offset: Some(USize64(offset as u64)),
        byte_stride: None,
        extensions: Default::default(),
        extras: Default::default(),
        target: target.map(Valid),
    }
}

fn create_accessor(
    buffer_view: u32,
    count: usize,
    type_: json::accessor::Type,
    component_type: json::accessor::ComponentType,
    min: Option<[f32; 3]>,
    max: Option<[f32; 3]>,
) -> json::Accessor {
    json::Accessor {
        buffer_view: Some(json::Index::new(buffer_view)),
        byte_offset: Some(USize64(0)),
        count: USize64(count as u64),
        component_type: Valid(json::accessor::GenericComponentType(component_type)),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Valid(type_),
        min: min.map(|m| json::Value::from(m.to_vec())),
        max: max.map(|m| json::Value::from(m.to_vec())),
        normalized: false,
        sparse: None,
    }
}

fn create_primitive(positions_accessor: u32, indices_accessor: u32) -> json::mesh::Primitive {
    let mut attributes = std::collections::BTreeMap::new();
    attributes.insert(
        Valid(json::mesh::Semantic::Positions),
        json::Index::new(positions_accessor),
    );
    attributes.insert(
        Valid(json::mesh::Semantic::Normals),
        json::Index::new(positions_accessor + 1),
    );
    attributes.insert(
        Valid(json::mesh::Semantic::TexCoords(0)),
        json::Index::new(positions_accessor + 2),
    );

    json::mesh::Primitive {
        attributes,
        extensions: Default::default(),
        extras: Default::default(),
        indices: Some(json::Index::new(indices_accessor)),
        material: Some(json::Index::new(0)),
        mode: Valid(json::mesh::Mode::Triangles),
        targets: None,
    }
}

fn create_sampler() -> json::texture::Sampler {
    let mag_filter = match FACE_SAMPLING.mag_filter {
        TextureFilter::Nearest => json::texture::MagFilter::Nearest,
    };
    let min_filter = match FACE_SAMPLING.min_filter {
        TextureFilter::Nearest => json::texture::MinFilter::Nearest,
    };

    json::texture::Sampler {
        mag_filter: Some(Valid(mag_filter)),
        min_filter: Some(Valid(min_filter)),
        wrap_s: Valid(json::texture::WrappingMode::ClampToEdge),
        wrap_t: Valid(json::texture::WrappingMode::ClampToEdge),
        extensions: Default::default(),
        extras: Default::default(),
    }
}

/// Alpha-tested, double-sided material over the atlas.
fn create_skin_material() -> json::Material {
    json::Material {
        pbr_metallic_roughness: json::material::PbrMetallicRoughness {
            base_color_texture: Some(json::texture::Info {
                index: json::Index::new(0),
                tex_coord: 0,
                extensions: Default::default(),
                extras: Default::default(),
            }),
            base_color_factor: json::material::PbrBaseColorFactor([1.0, 1.0, 1.0, 1.0]),
            metallic_factor: json::material::StrengthFactor(0.0),
            roughness_factor: json::material::StrengthFactor(1.0),
            metallic_roughness_texture: None,
            extensions: Default::default(),
            extras: Default::default(),
        },
        alpha_mode: Valid(json::material::AlphaMode::Mask),
        alpha_cutoff: Some(json::material::AlphaCutoff(FACE_SAMPLING.alpha_cutoff)),
        double_sided: FACE_SAMPLING.double_sided,
        normal_texture: None,
        occlusion_texture: None,
        emissive_texture: None,
        emissive_factor: json::material::EmissiveFactor([0.0, 0.0, 0.0]),
        extensions: Default::default(),
        extras: Default::default(),
    }
}
