pub mod buffer;
pub mod document;

use crate::core::document::Document;
use crate::core::layout::{Layout, HALF_TURN_Y};
use crate::core::mesh::Mesh;
use crate::io::glb::Container;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[remain::sorted]
#[derive(Error, Debug)]
pub enum Err {
    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),
    #[error("Container error: {0}")]
    ContainerError(#[from] crate::io::glb::Err),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Layout error: {0}")]
    LayoutError(#[from] crate::core::layout::Err),
}

/// Everything that shapes a generated scene besides the mesh itself. Missing
/// keys in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Written to `asset.generator`.
    pub generator: String,
    /// Seed of the random layouts. The same seed yields the same file.
    pub seed: u64,
    pub layout: Layout,
    /// Base color of the single material, RGBA.
    pub base_color: [f32; 4],
    pub camera: CameraConfig,
    pub light: LightConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: "glb-scenegen".to_string(),
            seed: 0,
            layout: Layout::default(),
            base_color: [1.0, 1.0, 1.0, 1.0],
            camera: CameraConfig::default(),
            light: LightConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, Err> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, Err> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub aspect_ratio: f32,
    /// Vertical field of view in radians.
    pub yfov: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            translation: [0.5, 0.5, -3.0],
            rotation: HALF_TURN_Y,
            aspect_ratio: 1.0,
            yfov: 0.4,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub intensity: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            translation: [0.5, 0.5, -3.0],
            rotation: HALF_TURN_Y,
            intensity: 100.0,
        }
    }
}


/// Lays out the instances, then builds the document and the binary buffer of
/// the scene.
pub fn build_scene(mesh: &Mesh, cfg: &Config) -> Result<(Document, Vec<u8>), Err> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let instances = cfg.layout.generate(&mut rng)?;
    let packed = buffer::pack_mesh(mesh, 0);
    let document = document::build_document(&packed, &instances, cfg);

    tracing::info!(
        "Built scene: {} instances, {} accessors, {} byte buffer",
        instances.len(),
        document.accessors.len(),
        packed.data.len(),
    );
    Ok((document, packed.data))
}

/// Builds the scene and wraps it into a glTF-Binary container.
pub fn build_container(mesh: &Mesh, cfg: &Config) -> Result<Container, Err> {
    let (document, data) = build_scene(mesh, cfg)?;
    let json = document.to_json_bytes()?;
    Ok(Container::new(json, data))
}

/// Encodes the scene into the bytes of a `.glb` file.
pub fn encode_scene(mesh: &Mesh, cfg: &Config) -> Result<Vec<u8>, Err> {
    Ok(build_container(mesh, cfg)?.to_bytes()?)
}

/// Encodes the scene and writes it to `path`, replacing any existing file.
pub fn write_scene_file<P: AsRef<Path>>(mesh: &Mesh, cfg: &Config, path: P) -> Result<(), Err> {
    let container = build_container(mesh, cfg)?;
    container.write_to_file(path.as_ref())?;
    tracing::info!("Wrote {:?} ({} bytes)", path.as_ref(), container.total_len());
    Ok(())
}
