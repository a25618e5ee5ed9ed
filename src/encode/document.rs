use crate::core::document::{
    CameraType, Document, GltfAsset, GltfCamera, GltfMaterial, GltfMesh, GltfNode, GltfScene,
    LightExtras, PbrMetallicRoughness, Perspective,
};
use crate::core::layout::NodeTransform;
use super::buffer::PackedMesh;
use super::Config;

/// Assembles the glTF document for one packed mesh instanced at `instances`.
/// Nodes are ordered as the mesh instances, then the camera, then the light;
/// the single scene lists all of them.
pub fn build_document(packed: &PackedMesh, instances: &[NodeTransform], cfg: &Config) -> Document {
    let mut nodes = instances.iter()
        .map(|t| GltfNode {
            mesh: Some(0),
            camera: None,
            rotation: t.rotation,
            scale: t.scale,
            translation: t.translation,
            extras: None,
        })
        .collect::<Vec<_>>();

    nodes.push(GltfNode {
        mesh: None,
        camera: Some(0),
        rotation: cfg.camera.rotation,
        scale: [1.0; 3],
        translation: cfg.camera.translation,
        extras: None,
    });

    nodes.push(GltfNode {
        mesh: None,
        camera: None,
        rotation: cfg.light.rotation,
        scale: [1.0; 3],
        translation: cfg.light.translation,
        extras: Some(LightExtras::point_light(cfg.light.intensity)),
    });

    let scene = GltfScene {
        nodes: (0..nodes.len() as u32).collect(),
    };

    Document {
        asset: GltfAsset::new(cfg.generator.clone()),
        scene: 0,
        scenes: vec![scene],
        nodes,
        cameras: vec![GltfCamera {
            camera_type: CameraType::Perspective,
            perspective: Perspective {
                aspect_ratio: cfg.camera.aspect_ratio,
                yfov: cfg.camera.yfov,
                zfar: cfg.camera.zfar,
                znear: cfg.camera.znear,
            },
        }],
        meshes: vec![GltfMesh {
            primitives: vec![packed.primitive.clone()],
        }],
        materials: vec![GltfMaterial {
            pbr_metallic_roughness: PbrMetallicRoughness {
                base_color_factor: cfg.base_color,
            },
        }],
        accessors: packed.accessors.clone(),
        buffer_views: packed.buffer_views.clone(),
        buffers: vec![packed.buffer.clone()],
    }
}
