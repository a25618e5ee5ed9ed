/// A triangle mesh stored as flat arrays, the way it is laid out in the
/// binary buffer. Positions and normals hold three floats per vertex, texture
/// coordinates two, and indices one `u32` per triangle corner.
///
/// No consistency checks are made between the arrays: a mesh with fewer
/// normals than positions is written as-is and left for the consumer to reject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_vertices(&self) -> usize {
        self.positions.len() / AttributeType::Position.num_components()
    }

    pub fn num_faces(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the arrays written into the binary buffer, in buffer order:
    /// positions, normals, texture coordinates, indices. Empty geometry arrays
    /// are skipped; the index array is always present and always last.
    pub fn arrays(&self) -> Vec<MeshArray<'_>> {
        let geometry = [
            (AttributeType::Position, &self.positions),
            (AttributeType::Normal, &self.normals),
            (AttributeType::TextureCoordinate, &self.tex_coords),
        ];

        let mut out = geometry.into_iter()
            .filter(|(_, data)| !data.is_empty())
            .map(|(att_type, data)| MeshArray { att_type, data: ArrayData::Float(data) })
            .collect::<Vec<_>>();

        out.push(MeshArray { att_type: AttributeType::Index, data: ArrayData::UnsignedInt(&self.indices) });
        out
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Position,
    Normal,
    TextureCoordinate,
    Index,
}

impl AttributeType {
    /// Number of scalar values per element.
    pub fn num_components(self) -> usize {
        match self {
            Self::Position | Self::Normal => 3,
            Self::TextureCoordinate => 2,
            Self::Index => 1,
        }
    }

    /// Name of the primitive attribute in glTF, `None` for the index array.
    pub fn gltf_semantic(self) -> Option<&'static str> {
        match self {
            Self::Position => Some("POSITION"),
            Self::Normal => Some("NORMAL"),
            Self::TextureCoordinate => Some("TEXCOORD_0"),
            Self::Index => None,
        }
    }
}


/// Borrowed view of one of the mesh arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrayData<'a> {
    Float(&'a [f32]),
    UnsignedInt(&'a [u32]),
}

impl ArrayData<'_> {
    /// Number of scalar values.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(data) => data.len(),
            Self::UnsignedInt(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size in bytes once written. Every scalar is four bytes wide.
    pub fn byte_len(&self) -> usize {
        self.len() * 4
    }

    /// Appends the values as little-endian bytes.
    pub fn write_le(&self, out: &mut Vec<u8>) {
        out.reserve(self.byte_len());
        match self {
            Self::Float(data) => data.iter().for_each(|v| out.extend_from_slice(&v.to_le_bytes())),
            Self::UnsignedInt(data) => data.iter().for_each(|v| out.extend_from_slice(&v.to_le_bytes())),
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshArray<'a> {
    pub att_type: AttributeType,
    pub data: ArrayData<'a>,
}

impl MeshArray<'_> {
    /// Number of elements, i.e. scalars divided by components per element.
    pub fn count(&self) -> usize {
        self.data.len() / self.att_type.num_components()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn textured_triangle() -> Mesh {
        Mesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            tex_coords: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn arrays_in_buffer_order() {
        let mesh = textured_triangle();
        let types = mesh.arrays().iter().map(|a| a.att_type).collect::<Vec<_>>();
        assert_eq!(types, vec![
            AttributeType::Position,
            AttributeType::Normal,
            AttributeType::TextureCoordinate,
            AttributeType::Index,
        ]);
        let counts = mesh.arrays().iter().map(|a| a.count()).collect::<Vec<_>>();
        assert_eq!(counts, vec![3, 3, 3, 3]);
    }

    #[test]
    fn empty_geometry_is_skipped_but_indices_kept() {
        let mesh = Mesh {
            positions: vec![0.0; 9],
            ..Mesh::default()
        };
        let arrays = mesh.arrays();
        assert_eq!(arrays.len(), 2);
        assert_eq!(arrays[0].att_type, AttributeType::Position);
        assert_eq!(arrays[1].att_type, AttributeType::Index);
        assert!(arrays[1].data.is_empty());
    }

    #[test]
    fn little_endian_bytes() {
        let mut out = Vec::new();
        ArrayData::UnsignedInt(&[1, 0x01020304]).write_le(&mut out);
        assert_eq!(out, vec![1, 0, 0, 0, 4, 3, 2, 1]);

        out.clear();
        ArrayData::Float(&[1.0]).write_le(&mut out);
        assert_eq!(out, 1.0f32.to_le_bytes().to_vec());
    }

    #[test]
    fn counts() {
        let mesh = textured_triangle();
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
    }
}
