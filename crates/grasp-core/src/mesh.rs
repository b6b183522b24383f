//! OBJ loading for the showcase mesh.

use std::io::{BufRead, Cursor};
use std::path::Path;

use glam::Vec3;

/// Mesh loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Mesh contains no geometry")]
    EmptyMesh,
}

/// Triangle mesh data ready for upload to the renderer.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Axis-aligned bounds of the positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from_array(*self.positions.first()?);
        let mut min = first;
        let mut max = first;
        for p in &self.positions {
            let p = Vec3::from_array(*p);
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}

/// Load an OBJ file into mesh data
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, MeshError> {
    let path = path.as_ref();
    let content = std::fs::read(path).map_err(|e| MeshError::Io(e.to_string()))?;
    load_obj_from_bytes(&content)
}

/// Load an OBJ from bytes (for WASM support)
pub fn load_obj_from_bytes(data: &[u8]) -> Result<MeshData, MeshError> {
    let mut cursor = Cursor::new(data);
    load_obj_from_reader(&mut cursor)
}

fn load_obj_from_reader(reader: &mut impl BufRead) -> Result<MeshData, MeshError> {
    let (models, _materials) = tobj::load_obj_buf(
        reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Ok(Default::default()),
    )
    .map_err(|e| MeshError::Parse(e.to_string()))?;

    if models.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    // Combine all models into one mesh
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let vertex_offset = positions.len() as u32;

        for chunk in mesh.positions.chunks(3) {
            if chunk.len() == 3 {
                positions.push([chunk[0], chunk[1], chunk[2]]);
            }
        }
        for chunk in mesh.normals.chunks(3) {
            if chunk.len() == 3 {
                normals.push([chunk[0], chunk[1], chunk[2]]);
            }
        }
        for &idx in &mesh.indices {
            indices.push(vertex_offset + idx);
        }
    }

    if positions.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    // Files without normals get smooth vertex normals accumulated from
    // their faces.
    if normals.len() != positions.len() {
        normals = calculate_vertex_normals(&positions, &indices);
    }

    Ok(MeshData {
        positions,
        normals,
        indices,
    })
}

/// Per-vertex normals averaged over the adjacent face normals.
///
/// A trailing partial triangle or an index past the position count is
/// skipped rather than panicking; the affected vertices keep their
/// accumulated (or fallback) normal.
pub fn calculate_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(&p0), Some(&p1), Some(&p2)) =
            (positions.get(i0), positions.get(i1), positions.get(i2))
        else {
            continue;
        };
        let v0 = Vec3::from_array(p0);
        let v1 = Vec3::from_array(p1);
        let v2 = Vec3::from_array(p2);
        // Area-weighted: the cross product length scales with triangle size.
        let face = (v1 - v0).cross(v2 - v0);
        normals[i0] += face;
        normals[i1] += face;
        normals[i2] += face;
    }

    normals
        .into_iter()
        .map(|n| n.normalize_or(Vec3::Y).to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_OBJ: &[u8] = b"\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";

    #[test]
    fn test_load_obj_without_normals_generates_them() {
        let mesh = load_obj_from_bytes(TRIANGLE_OBJ).unwrap();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.indices.len(), 3);
        assert_eq!(mesh.normals.len(), 3);

        // The triangle lies in the XY plane wound counter-clockwise.
        for n in &mesh.normals {
            assert!((Vec3::from_array(*n) - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_load_empty_obj_fails() {
        assert!(matches!(
            load_obj_from_bytes(b"# nothing here\n"),
            Err(MeshError::Parse(_) | MeshError::EmptyMesh)
        ));
    }

    #[test]
    fn test_bounds() {
        let mesh = load_obj_from_bytes(TRIANGLE_OBJ).unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_vertex_normals_tolerate_malformed_indices() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

        // A trailing partial triangle and an out-of-range index are both
        // ignored; the valid triangle still contributes its normal.
        let indices = [0, 1, 2, 0, 9, 1, 0, 1];
        let normals = calculate_vertex_normals(&positions, &indices);

        assert_eq!(normals.len(), 3);
        for n in &normals {
            assert!((Vec3::from_array(*n) - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        assert!(matches!(
            load_obj("/nonexistent/showcase.obj"),
            Err(MeshError::Io(_) | MeshError::Parse(_))
        ));
    }
}
