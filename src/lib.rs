// lib.rs

/// Contains the in-memory mesh, scene layouts and the glTF document model.
pub mod core;

/// Contains the interface between `Mesh` and files on disk: obj input and
/// the binary glTF container.
pub mod io;

/// Turns a mesh and a scene configuration into a binary glTF file.
pub mod encode;


/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::mesh::Mesh;
    pub use crate::core::layout::{Layout, NodeTransform};
    pub use crate::core::document::Document;
    pub use crate::io::glb::{Container, chunk::{Chunk, ChunkType}};
    pub use crate::io::obj::load_obj;
    pub use crate::encode::{self, Config, encode_scene, write_scene_file};
}
