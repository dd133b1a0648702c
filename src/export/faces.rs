//! Face texture archive.
//!
//! Dumps every extracted face texture of a character into a ZIP of PNGs,
//! one entry per `{part}/{layer}/{face}.png`.

use crate::error::Result;
use crate::mesher::Character;
use crate::types::{BodyPart, CuboidFace, Layer};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive path of one face texture.
pub fn face_entry_name(part: BodyPart, layer: Layer, face: CuboidFace) -> String {
    format!("{}/{}/{}.png", part, layer, face)
}

/// Write all textured faces of `character` into a ZIP archive.
///
/// Placeholder faces carry no texture and are skipped, so a character built
/// without a skin yields an empty archive.
pub fn export_faces_zip(character: &Character) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0usize;
    for (part, cuboid) in character.cuboids() {
        for face in CuboidFace::ALL {
            let Some(texture) = cuboid.material(face).texture() else {
                continue;
            };
            writer.start_file(face_entry_name(part, cuboid.layer, face), options)?;
            writer.write_all(&texture.to_png()?)?;
            count += 1;
        }
    }

    let archive = writer.finish()?.into_inner();
    log::debug!("wrote {} face textures ({} bytes)", count, archive.len());
    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesher::build_character;
    use crate::skin::PixelBuffer;
    use crate::types::ModelVariant;
    use std::io::Read;

    #[test]
    fn test_face_archive_entries() {
        let skin = PixelBuffer::filled([255, 0, 255, 255]);
        let character = build_character(ModelVariant::Classic, Some(&skin), true);
        let bytes = export_faces_zip(&character).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 72);

        let name = face_entry_name(BodyPart::Head, Layer::Outer, CuboidFace::Front);
        assert_eq!(name, "head/outer/front.png");

        let mut png = Vec::new();
        archive.by_name(&name).unwrap().read_to_end(&mut png).unwrap();
        let image = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(image.get_pixel(3, 3).0, [255, 0, 255, 255]);
    }

    #[test]
    fn test_slim_arm_entries_are_three_wide() {
        let skin = PixelBuffer::filled([0, 0, 0, 255]);
        let character = build_character(ModelVariant::Slim, Some(&skin), false);
        let bytes = export_faces_zip(&character).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 36);

        let mut png = Vec::new();
        archive
            .by_name("left_arm/inner/top.png")
            .unwrap()
            .read_to_end(&mut png)
            .unwrap();
        let image = image::load_from_memory(&png).unwrap();
        assert_eq!((image.width(), image.height()), (3, 4));
    }

    #[test]
    fn test_placeholder_character_has_no_faces() {
        let character = build_character(ModelVariant::Classic, None, true);
        let bytes = export_faces_zip(&character).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
