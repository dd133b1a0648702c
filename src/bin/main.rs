//! Skin Mesher CLI
//!
//! Turn Minecraft skins into textured 3D characters.

use clap::{Args, Parser, Subcommand, ValueEnum};
use skin_mesher::{
    build_character, export_faces_zip, export_glb, face_spec, load_skin_from_path, BodyPart,
    CuboidFace, Layer, ModelVariant, ObjExport, SkinMesher, ViewerConfig,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skin-mesher")]
#[command(author, version, about = "Turn Minecraft skins into textured 3D characters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the assembled character as GLB or OBJ
    Render {
        /// Skin PNG (64x64 or legacy 64x32)
        #[arg(short, long)]
        skin: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "glb")]
        format: OutputFormat,

        #[command(flatten)]
        view: ViewArgs,

        /// Scale to block units (16 skin pixels per block)
        #[arg(long)]
        block_units: bool,

        /// Maximum atlas size
        #[arg(long)]
        atlas_size: Option<u32>,
    },

    /// Write every face texture into a ZIP of PNGs
    Faces {
        /// Skin PNG (64x64 or legacy 64x32)
        #[arg(short, long)]
        skin: PathBuf,

        /// Output ZIP path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show information about a skin
    Info {
        /// Skin PNG (64x64 or legacy 64x32)
        #[arg(short, long)]
        skin: PathBuf,

        /// Model variant used for the face report
        #[arg(long, value_parser = parse_variant)]
        variant: Option<ModelVariant>,
    },
}

/// Options shared by the commands that build a character.
#[derive(Args)]
struct ViewArgs {
    /// JSON viewer config; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model variant: classic or slim
    #[arg(long, value_parser = parse_variant)]
    variant: Option<ModelVariant>,

    /// Hide the overlay layer
    #[arg(long)]
    no_outer: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Binary glTF format
    Glb,
    /// Wavefront OBJ format
    Obj,
}

fn parse_variant(s: &str) -> Result<ModelVariant, String> {
    ModelVariant::from_str(s)
        .ok_or_else(|| format!("Invalid variant: '{}'. Use classic or slim", s))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            skin,
            output,
            format,
            view,
            block_units,
            atlas_size,
        } => {
            let mut config = load_config(&view)?;
            if block_units {
                config = config.with_block_units();
            }
            if let Some(size) = atlas_size {
                config.atlas_max_size = size;
            }
            render(&skin, &output, format, config)?;
        }
        Commands::Faces { skin, output, view } => {
            let config = load_config(&view)?;
            dump_faces(&skin, &output, &config)?;
        }
        Commands::Info { skin, variant } => {
            show_skin_info(&skin, variant.unwrap_or_default())?;
        }
    }

    Ok(())
}

fn load_config(view: &ViewArgs) -> Result<ViewerConfig, Box<dyn std::error::Error>> {
    let mut config = match &view.config {
        Some(path) => {
            log::info!("loading config from {:?}", path);
            ViewerConfig::from_json(&fs::read_to_string(path)?)?
        }
        None => ViewerConfig::default(),
    };

    if let Some(variant) = view.variant {
        config = config.with_variant(variant);
    }
    if view.no_outer {
        config = config.with_show_outer(false);
    }

    Ok(config)
}

fn render(
    skin_path: &Path,
    output_path: &Path,
    format: OutputFormat,
    config: ViewerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading skin from {:?}...", skin_path);
    let skin = load_skin_from_path(skin_path)?;

    println!("Meshing with config:");
    println!("  - Variant: {}", config.variant);
    println!("  - Outer layer: {}", config.show_outer);
    println!("  - Unit scale: {}", config.unit_scale);

    let output = SkinMesher::with_config(config).mesh(Some(&skin))?;

    println!(
        "  Generated {} vertices ({} inner, {} outer), {} triangles",
        output.total_vertices(),
        output.inner_mesh.vertex_count(),
        output.outer_mesh.vertex_count(),
        output.total_triangles()
    );
    println!(
        "  Atlas: {}x{} with {} regions",
        output.atlas.width,
        output.atlas.height,
        output.atlas.regions.len()
    );

    let name = output_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("skin");

    match format {
        OutputFormat::Glb => {
            let glb_path = with_default_extension(output_path, "glb");
            let glb_data = export_glb(&output)?;
            fs::write(&glb_path, &glb_data)?;
            println!("Exported GLB ({} bytes) to {:?}", glb_data.len(), glb_path);
        }
        OutputFormat::Obj => {
            let obj_export = ObjExport::from_output(&output, name)?;
            let (_, _, png_name) = ObjExport::file_names(name);

            let obj_path = with_default_extension(output_path, "obj");
            let mtl_path = obj_path.with_extension("mtl");
            let png_path = obj_path.with_file_name(png_name);

            fs::write(&obj_path, &obj_export.obj)?;
            fs::write(&mtl_path, &obj_export.mtl)?;
            fs::write(&png_path, &obj_export.texture_png)?;

            println!("Exported OBJ to {:?}", obj_path);
            println!("  Material: {:?}", mtl_path);
            println!("  Texture: {:?}", png_path);
        }
    }

    Ok(())
}

fn dump_faces(
    skin_path: &Path,
    output_path: &Path,
    config: &ViewerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading skin from {:?}...", skin_path);
    let skin = load_skin_from_path(skin_path)?;

    let character = build_character(config.variant, Some(&skin), config.show_outer);
    let archive = export_faces_zip(&character)?;

    let zip_path = with_default_extension(output_path, "zip");
    fs::write(&zip_path, &archive)?;
    println!(
        "Exported {} face textures ({} bytes) to {:?}",
        character.face_texture_count(),
        archive.len(),
        zip_path
    );

    Ok(())
}

fn show_skin_info(skin_path: &Path, variant: ModelVariant) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading skin from {:?}...", skin_path);
    let skin = load_skin_from_path(skin_path)?;

    println!("\nSkin Info:");
    println!(
        "  Format: {}",
        if skin.is_legacy() { "legacy 64x32" } else { "64x64" }
    );
    println!("  Has transparency: {}", skin.has_transparency());

    let character = build_character(variant, Some(&skin), true);

    println!("\nOverlay faces ({}):", variant);
    for part in BodyPart::ALL {
        let Some(outer) = &character.part(part).outer else {
            continue;
        };
        let empty = CuboidFace::ALL
            .iter()
            .filter(|&&face| {
                outer
                    .material(face)
                    .texture()
                    .map_or(true, |texture| texture.is_fully_transparent())
            })
            .count();
        let front = face_spec(part, variant, Layer::Outer, CuboidFace::Front);
        let origin = front
            .map(|spec| format!("({}, {})", spec.uv_origin.x, spec.uv_origin.y))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<10} front at {:<9} {} of 6 faces empty", part.name(), origin, empty);
    }

    Ok(())
}

fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}
