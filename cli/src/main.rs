use anyhow::Result;
use clap::{Parser, Subcommand};
use glb_scenegen::prelude::{Config, Layout};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "glb-scenegen")]
#[command(about = "Generates binary glTF scenes of instanced obj meshes for the raytracer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a .glb scene from an obj mesh
    Generate {
        /// Input .obj file
        #[arg(short, long)]
        input: PathBuf,

        /// Output .glb file
        #[arg(short, long, default_value = "scene.glb")]
        output: PathBuf,

        /// Scene config (toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Layout name with default parameters, overrides the config
        /// (grid, random-cube, split-x, corner, long-interval)
        #[arg(short, long)]
        layout: Option<String>,

        /// Seed of the random layouts, overrides the config
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate a .glb file and print what it contains
    Inspect {
        /// Input .glb file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output, config, layout, seed } => {
            generate(&input, &output, config.as_deref(), layout.as_deref(), seed)
        }
        Commands::Inspect { input } => inspect(&input),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

fn generate(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    layout: Option<&str>,
    seed: Option<u64>,
) -> Result<()> {
    if extension(input) != "obj" {
        anyhow::bail!("Input file must be a .obj file");
    }
    if extension(output) != "glb" {
        anyhow::bail!("Output file must be a .glb file");
    }

    let mut cfg = match config {
        Some(path) => Config::from_toml_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {:?}: {}", path, e))?,
        None => Config::default(),
    };
    if let Some(name) = layout {
        cfg.layout = name.parse::<Layout>()?;
    }
    if let Some(seed) = seed {
        cfg.seed = seed;
    }

    let mesh = glb_scenegen::io::obj::load_obj(input)
        .map_err(|e| anyhow::anyhow!("Failed to load OBJ file: {}", e))?;

    tracing::info!("Generating {:?} -> {:?} with layout {:?}", input, output, cfg.layout);
    glb_scenegen::encode::write_scene_file(&mesh, &cfg, output)
        .map_err(|e| anyhow::anyhow!("Failed to write scene: {}", e))?;
    tracing::info!("Done!");
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let summary = glb_scenegen::io::glb::inspect::inspect_file(input)
        .map_err(|e| anyhow::anyhow!("Failed to inspect {:?}: {}", input, e))?;
    println!("{}", summary);
    Ok(())
}
