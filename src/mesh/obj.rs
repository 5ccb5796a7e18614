//! Plain-text OBJ output for triangle meshes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::isosurface::TriangleMesh;
use super::MeshError;

/// Write `mesh` to `path` as Wavefront OBJ: one `v x y z` line per
/// vertex, then one `f a b c` line per triangle with 1-based indices.
pub fn write_obj(mesh: &TriangleMesh, path: impl AsRef<Path>) -> Result<(), MeshError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v[0], v[1], v[2])?;
    }
    for t in &mesh.triangles {
        writeln!(writer, "f {} {} {}", t[0] + 1, t[1] + 1, t[2] + 1)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_obj_layout() {
        let mut mesh = TriangleMesh::default();
        mesh.vertices.push([0.0, 0.0, 0.0]);
        mesh.vertices.push([1.0, 0.0, 0.0]);
        mesh.vertices.push([0.0, 1.0, 0.5]);
        mesh.triangles.push([0, 1, 2]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("mesh.obj");
        write_obj(&mesh, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "v 0 0 0");
        assert_eq!(lines[2], "v 0 1 0.5");
        // Face indices are 1-based.
        assert_eq!(lines[3], "f 1 2 3");
    }

    #[test]
    fn test_empty_mesh_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.obj");
        write_obj(&TriangleMesh::default(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
