/// Binary glTF container: chunk encoding, writing, reading and inspection.
pub mod glb;

/// Wavefront obj input.
pub mod obj;
