//! glTF 2.0 JSON structure. Only the subset written by this crate is modeled;
//! field names serialize to the camelCase names of the glTF schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Top-level glTF object. Every array the generator emits is a named field, so
/// the JSON chunk is produced from one value instead of merging partial maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub asset: GltfAsset,
    pub scene: u32,
    pub scenes: Vec<GltfScene>,
    pub nodes: Vec<GltfNode>,
    pub cameras: Vec<GltfCamera>,
    pub meshes: Vec<GltfMesh>,
    pub materials: Vec<GltfMaterial>,
    pub accessors: Vec<GltfAccessor>,
    pub buffer_views: Vec<GltfBufferView>,
    pub buffers: Vec<GltfBuffer>,
}

impl Document {
    /// Compact JSON text of the document, as stored in the JSON chunk.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GltfAsset {
    pub generator: String,
    pub version: String,
}

impl GltfAsset {
    pub fn new(generator: impl Into<String>) -> Self {
        Self {
            generator: generator.into(),
            version: "2.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GltfScene {
    pub nodes: Vec<u32>,
}

/// A scene node. A node references either the mesh, the camera, or neither
/// (the point light, which the raytracer recognizes by its `extras`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GltfNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<u32>,
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub translation: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<LightExtras>,
}

/// Application data marking a node as a point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LightExtras {
    pub is_point_light: f32,
    pub light_intensity: f32,
}

impl LightExtras {
    pub fn point_light(intensity: f32) -> Self {
        Self {
            is_point_light: 1.0,
            light_intensity: intensity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraType {
    Perspective,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GltfCamera {
    #[serde(rename = "type")]
    pub camera_type: CameraType,
    pub perspective: Perspective,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perspective {
    pub aspect_ratio: f32,
    pub yfov: f32,
    pub zfar: f32,
    pub znear: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GltfMesh {
    pub primitives: Vec<GltfPrimitive>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GltfPrimitive {
    /// Maps attribute semantics (`POSITION`, ...) to accessor indices, in
    /// buffer order.
    pub attributes: IndexMap<String, u32>,
    pub indices: u32,
    pub material: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfMaterial {
    pub pbr_metallic_roughness: PbrMetallicRoughness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    pub base_color_factor: [f32; 4],
}

/// Struct to hold glTF Accessor data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfAccessor {
    pub buffer_view: u32,
    pub component_type: ComponentType,
    pub count: usize,
    #[serde(rename = "type")]
    pub accessor_type: AccessorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec<f32>>,
}

/// Struct to hold glTF BufferView data. There is only one buffer, so `buffer`
/// is always zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfBufferView {
    pub buffer: u32,
    pub byte_offset: usize,
    pub byte_length: usize,
}

/// The binary chunk of the container. In a GLB the buffer has no `uri`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfBuffer {
    pub byte_length: usize,
}

/// glTF value types and values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum ComponentType {
    UnsignedInt = 5125,
    Float = 5126,
}

impl From<ComponentType> for u32 {
    fn from(ty: ComponentType) -> u32 {
        ty as u32
    }
}

impl TryFrom<u32> for ComponentType {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5125 => Ok(ComponentType::UnsignedInt),
            5126 => Ok(ComponentType::Float),
            _ => Err(format!("unsupported componentType {}", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessorType {
    Scalar,
    Vec2,
    Vec3,
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessor_json_names() {
        let accessor = GltfAccessor {
            buffer_view: 3,
            component_type: ComponentType::UnsignedInt,
            count: 36,
            accessor_type: AccessorType::Scalar,
            min: None,
            max: None,
        };
        assert_eq!(
            serde_json::to_value(&accessor).unwrap(),
            json!({ "bufferView": 3, "componentType": 5125, "count": 36, "type": "SCALAR" })
        );
    }

    #[test]
    fn accessor_types_are_uppercase() {
        assert_eq!(serde_json::to_value(AccessorType::Vec2).unwrap(), json!("VEC2"));
        assert_eq!(serde_json::to_value(AccessorType::Vec3).unwrap(), json!("VEC3"));
    }

    #[test]
    fn unknown_component_type_is_rejected() {
        let parsed = serde_json::from_value::<ComponentType>(json!(5121));
        assert!(parsed.is_err());
        let parsed = serde_json::from_value::<ComponentType>(json!(5126)).unwrap();
        assert_eq!(parsed, ComponentType::Float);
    }

    #[test]
    fn light_node_carries_extras_only() {
        let node = GltfNode {
            mesh: None,
            camera: None,
            rotation: [0.0, 1.0, 0.0, 0.0],
            scale: [1.0; 3],
            translation: [0.5, 0.5, -3.0],
            extras: Some(LightExtras::point_light(100.0)),
        };
        let value = serde_json::to_value(&node).unwrap();
        assert!(value.get("mesh").is_none());
        assert!(value.get("camera").is_none());
        assert_eq!(value["extras"], json!({ "IsPointLight": 1.0, "LightIntensity": 100.0 }));
    }

    #[test]
    fn camera_json_names() {
        let camera = GltfCamera {
            camera_type: CameraType::Perspective,
            perspective: Perspective { aspect_ratio: 1.0, yfov: 0.5, zfar: 100.0, znear: 0.25 },
        };
        assert_eq!(
            serde_json::to_value(&camera).unwrap(),
            json!({
                "type": "perspective",
                "perspective": { "aspectRatio": 1.0, "yfov": 0.5, "zfar": 100.0, "znear": 0.25 }
            })
        );
    }
}
