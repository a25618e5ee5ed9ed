use std::fmt;
use std::path::Path;

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("glTF Error: {0}")]
    GltfError(#[from] gltf::Error),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Object counts of a glTF-Binary file, after validation by the `gltf` crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub generator: Option<String>,
    pub nodes: usize,
    pub meshes: usize,
    pub materials: usize,
    pub cameras: usize,
    pub accessors: usize,
    pub buffer_views: usize,
    /// Length of the BIN chunk, padding included.
    pub blob_len: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "generator:    {}", self.generator.as_deref().unwrap_or("-"))?;
        writeln!(f, "nodes:        {}", self.nodes)?;
        writeln!(f, "meshes:       {}", self.meshes)?;
        writeln!(f, "materials:    {}", self.materials)?;
        writeln!(f, "cameras:      {}", self.cameras)?;
        writeln!(f, "accessors:    {}", self.accessors)?;
        writeln!(f, "buffer views: {}", self.buffer_views)?;
        write!(f, "binary chunk: {} bytes", self.blob_len)
    }
}

pub fn inspect_bytes(bytes: &[u8]) -> Result<Summary, Err> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    Ok(Summary {
        generator: gltf.document.as_json().asset.generator.clone(),
        nodes: gltf.nodes().count(),
        meshes: gltf.meshes().count(),
        materials: gltf.materials().count(),
        cameras: gltf.cameras().count(),
        accessors: gltf.accessors().count(),
        buffer_views: gltf.views().count(),
        blob_len: gltf.blob.as_ref().map_or(0, |blob| blob.len()),
    })
}

pub fn inspect_file<P: AsRef<Path>>(path: P) -> Result<Summary, Err> {
    let bytes = std::fs::read(path)?;
    inspect_bytes(&bytes)
}
