/// Flat vertex/index arrays loaded from a mesh file.
pub mod mesh;

/// Procedural placement of mesh instances.
pub mod layout;

/// Typed glTF 2.0 document written into the JSON chunk.
pub mod document;
