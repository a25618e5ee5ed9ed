// use tobj to load the obj file and convert it to our flat mesh representation
use crate::core::mesh::Mesh;
use std::fmt::Debug;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Obj Load Error: {0}")]
    LoadError(#[from] tobj::LoadError),
}

/// Loads every model of an obj file into one triangulated, single-indexed
/// mesh. Normals and texture coordinates are kept only when all models have
/// them, so that every array stays aligned with the positions.
pub fn load_obj<P: AsRef<Path> + Debug>(path: P) -> Result<Mesh, Err> {
    let op = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path.as_ref(), &op)?;
    let mesh = merge_models(&models);

    tracing::info!(
        "Loaded {:?}: {} models, {} vertices, {} triangles, normals: {}, tex coords: {}",
        path,
        models.len(),
        mesh.num_vertices(),
        mesh.num_faces(),
        !mesh.normals.is_empty(),
        !mesh.tex_coords.is_empty(),
    );
    Ok(mesh)
}

fn merge_models(models: &[tobj::Model]) -> Mesh {
    let all_have_normals = models.iter().all(|m| !m.mesh.normals.is_empty());
    let any_has_normals = models.iter().any(|m| !m.mesh.normals.is_empty());
    let all_have_tex_coords = models.iter().all(|m| !m.mesh.texcoords.is_empty());
    let any_has_tex_coords = models.iter().any(|m| !m.mesh.texcoords.is_empty());

    if any_has_normals && !all_have_normals {
        tracing::warn!("Only some models have normals, dropping normals");
    }
    if any_has_tex_coords && !all_have_tex_coords {
        tracing::warn!("Only some models have texture coordinates, dropping texture coordinates");
    }

    let mut mesh = Mesh::new();
    for model in models {
        let base = mesh.num_vertices() as u32;
        mesh.positions.extend_from_slice(&model.mesh.positions);
        if all_have_normals {
            mesh.normals.extend_from_slice(&model.mesh.normals);
        }
        if all_have_tex_coords {
            mesh.tex_coords.extend_from_slice(&model.mesh.texcoords);
        }
        mesh.indices.extend(model.mesh.indices.iter().map(|i| i + base));
    }
    mesh
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_obj(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn quad_is_triangulated() {
        let file = write_obj(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n"
        );
        let mesh = load_obj(file.path()).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert!(mesh.normals.is_empty());
        assert!(mesh.tex_coords.is_empty());
        assert!(mesh.indices.iter().all(|&i| i < 4));
    }

    #[test]
    fn normals_and_tex_coords_are_per_vertex() {
        let file = write_obj(concat!(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n",
            "vt 0 0\nvt 1 0\nvt 0 1\n",
            "vn 0 0 1\n",
            "f 1/1/1 2/2/1 3/3/1\n",
        ));
        let mesh = load_obj(file.path()).unwrap();
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(mesh.tex_coords.len(), 6);
        assert_eq!(&mesh.normals[0..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn models_are_merged_with_rebased_indices() {
        let file = write_obj(concat!(
            "o first\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
            "o second\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n",
        ));
        let mesh = load_obj(file.path()).unwrap();
        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.num_faces(), 2);
        let mut indices = mesh.indices.clone();
        indices.sort();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        // the second triangle refers to the second model's vertices
        assert!(mesh.indices[3..].iter().all(|&i| i >= 3));
    }

    #[test]
    fn partial_normals_are_dropped() {
        let file = write_obj(concat!(
            "vn 0 0 1\n",
            "o lit\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1//1 2//1 3//1\n",
            "o plain\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n",
        ));
        let mesh = load_obj(file.path()).unwrap();
        assert_eq!(mesh.num_vertices(), 6);
        assert!(mesh.normals.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_obj("does/not/exist.obj").is_err());
    }
}
