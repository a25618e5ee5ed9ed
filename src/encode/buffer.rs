use crate::core::document::{
    AccessorType, ComponentType, GltfAccessor, GltfBuffer, GltfBufferView, GltfPrimitive,
};
use crate::core::mesh::{ArrayData, AttributeType, Mesh, MeshArray};

/// The binary buffer of a mesh together with the descriptors pointing into it.
/// Both sides come out of the same pass over [`Mesh::arrays`], so the order of
/// the buffer views always matches the order of the bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedMesh {
    pub data: Vec<u8>,
    pub buffer: GltfBuffer,
    pub buffer_views: Vec<GltfBufferView>,
    pub accessors: Vec<GltfAccessor>,
    pub primitive: GltfPrimitive,
}

/// Packs the mesh arrays back to back, one buffer view and one accessor per
/// array. `material` is the material index of the primitive.
pub fn pack_mesh(mesh: &Mesh, material: u32) -> PackedMesh {
    let mut builder = BufferBuilder::default();
    for array in mesh.arrays() {
        builder.push(&array);
    }
    builder.build(material)
}

#[derive(Debug, Default)]
struct BufferBuilder {
    data: Vec<u8>,
    buffer_views: Vec<GltfBufferView>,
    accessors: Vec<GltfAccessor>,
    primitive: GltfPrimitive,
}

impl BufferBuilder {
    fn push(&mut self, array: &MeshArray) {
        let byte_offset = self.data.len();
        array.data.write_le(&mut self.data);

        let view_index = self.buffer_views.len() as u32;
        self.buffer_views.push(GltfBufferView {
            buffer: 0,
            byte_offset,
            byte_length: array.data.byte_len(),
        });

        let (min, max) = match (array.att_type, array.data) {
            (AttributeType::Position, ArrayData::Float(values)) if !values.is_empty() => {
                let (min, max) = compute_vec3_bounds(values);
                (Some(min), Some(max))
            }
            _ => (None, None),
        };

        let accessor_index = self.accessors.len() as u32;
        self.accessors.push(GltfAccessor {
            buffer_view: view_index,
            component_type: component_type(array.att_type),
            count: array.count(),
            accessor_type: accessor_type(array.att_type),
            min,
            max,
        });

        match array.att_type.gltf_semantic() {
            Some(name) => {
                self.primitive.attributes.insert(name.to_string(), accessor_index);
            }
            None => self.primitive.indices = accessor_index,
        }
    }

    fn build(mut self, material: u32) -> PackedMesh {
        self.primitive.material = material;
        PackedMesh {
            buffer: GltfBuffer { byte_length: self.data.len() },
            data: self.data,
            buffer_views: self.buffer_views,
            accessors: self.accessors,
            primitive: self.primitive,
        }
    }
}

fn component_type(att_type: AttributeType) -> ComponentType {
    match att_type {
        AttributeType::Index => ComponentType::UnsignedInt,
        _ => ComponentType::Float,
    }
}

fn accessor_type(att_type: AttributeType) -> AccessorType {
    match att_type {
        AttributeType::Position | AttributeType::Normal => AccessorType::Vec3,
        AttributeType::TextureCoordinate => AccessorType::Vec2,
        AttributeType::Index => AccessorType::Scalar,
    }
}

/// Component-wise bounds of a flat xyz array.
fn compute_vec3_bounds(values: &[f32]) -> (Vec<f32>, Vec<f32>) {
    let mut min = vec![f32::MAX; 3];
    let mut max = vec![f32::MIN; 3];
    for v in values.chunks_exact(3) {
        for i in 0..3 {
            min[i] = min[i].min(v[i]);
            max[i] = max[i].max(v[i]);
        }
    }
    (min, max)
}
