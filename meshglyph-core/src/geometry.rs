/// Geometry primitives for the render pipeline
use nalgebra::Vector3;

use crate::error::LoadError;

/// An object-space vertex position
pub type Vertex = Vector3<f32>;

/// A triangle face referencing three entries of the mesh vertex list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }

    /// Resolve the three corner positions against a vertex list
    pub fn corners(&self, vertices: &[Vertex]) -> [Vertex; 3] {
        self.indices.map(|index| vertices[index])
    }
}

/// An immutable triangulated mesh
///
/// Vertex and triangle counts are fixed once built, and every triangle index
/// is guaranteed to be in range of the vertex list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Build a mesh, rejecting empty geometry and dangling indices
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<Triangle>) -> Result<Self, LoadError> {
        if vertices.is_empty() || triangles.is_empty() {
            return Err(LoadError::Corrupt {
                vertices: vertices.len(),
                triangles: triangles.len(),
            });
        }

        if let Some((face, index)) = triangles.iter().enumerate().find_map(|(face, triangle)| {
            triangle
                .indices
                .iter()
                .find(|&&index| index >= vertices.len())
                .map(|&index| (face, index))
        }) {
            return Err(LoadError::IndexOutOfRange {
                face,
                index,
                vertex_count: vertices.len(),
            });
        }

        Ok(Self {
            vertices,
            triangles,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Create an axis-aligned cube centered on the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Vertex::new(-half, -half, -half),
            Vertex::new(half, -half, -half),
            Vertex::new(half, half, -half),
            Vertex::new(-half, half, -half),
            Vertex::new(-half, -half, half),
            Vertex::new(half, -half, half),
            Vertex::new(half, half, half),
            Vertex::new(-half, half, half),
        ];

        let triangles = vec![
            // Front face
            Triangle::new(4, 5, 6),
            Triangle::new(4, 6, 7),
            // Back face
            Triangle::new(0, 3, 2),
            Triangle::new(0, 2, 1),
            // Top face
            Triangle::new(3, 7, 6),
            Triangle::new(3, 6, 2),
            // Bottom face
            Triangle::new(0, 1, 5),
            Triangle::new(0, 5, 4),
            // Right face
            Triangle::new(1, 2, 6),
            Triangle::new(1, 6, 5),
            // Left face
            Triangle::new(0, 4, 7),
            Triangle::new(0, 7, 3),
        ];

        Self {
            vertices,
            triangles,
        }
    }
}

/// Face normal of a camera-space triangle, `None` when the triangle is degenerate
pub fn face_normal(corners: &[Vertex; 3]) -> Option<Vector3<f32>> {
    let edge0 = corners[0] - corners[2];
    let edge1 = corners[1] - corners[2];
    edge0.cross(&edge1).try_normalize(f32::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_counts() {
        let cube = Mesh::cube(1.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube
            .vertices()
            .iter()
            .all(|v| v.x.abs() == 0.5 && v.y.abs() == 0.5 && v.z.abs() == 0.5));
    }

    #[test]
    fn test_cube_faces_are_axis_aligned() {
        let cube = Mesh::cube(2.0);
        for triangle in cube.triangles() {
            let normal = face_normal(&triangle.corners(cube.vertices())).unwrap();
            let axis_components = [normal.x, normal.y, normal.z]
                .iter()
                .filter(|c| (c.abs() - 1.0).abs() < 1e-6)
                .count();
            assert_eq!(axis_components, 1);
        }
    }

    #[test]
    fn test_rejects_empty_geometry() {
        let result = Mesh::new(vec![Vertex::new(0.0, 0.0, 0.0)], Vec::new());
        assert!(matches!(
            result,
            Err(LoadError::Corrupt {
                vertices: 1,
                triangles: 0
            })
        ));
    }

    #[test]
    fn test_rejects_dangling_index() {
        let vertices = vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        ];
        let result = Mesh::new(vertices, vec![Triangle::new(0, 1, 3)]);
        assert!(matches!(
            result,
            Err(LoadError::IndexOutOfRange { face: 0, index: 3, .. })
        ));
    }

    #[test]
    fn test_degenerate_normal() {
        let line = [
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(1.0, 1.0, 1.0),
            Vertex::new(2.0, 2.0, 1.0),
        ];
        assert!(face_normal(&line).is_none());
    }
}
