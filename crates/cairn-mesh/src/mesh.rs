//! Flat vertex and triangle-index buffers handed to rendering and collision.

use glam::Vec3;

use crate::error::MeshError;

/// Vertex positions plus a triangle list (3 indices per triangle).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockMesh {
    /// Vertex buffer.
    pub vertices: Vec<Vec3>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub triangles: Vec<u32>,
}

impl BlockMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the mesh has no triangles and no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// Returns the number of whole triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Returns the three corner positions of triangle `triangle_index`.
    ///
    /// Used to outline the triangle under the cursor. `None` if the triangle
    /// does not exist or references a missing vertex.
    pub fn triangle(&self, triangle_index: usize) -> Option<[Vec3; 3]> {
        let start = triangle_index.checked_mul(3)?;
        let indices = self.triangles.get(start..start.checked_add(3)?)?;
        Some([
            *self.vertices.get(indices[0] as usize)?,
            *self.vertices.get(indices[1] as usize)?,
            *self.vertices.get(indices[2] as usize)?,
        ])
    }

    /// Checks that the index buffer holds whole triangles and only valid offsets.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.triangles.len() % 3 != 0 {
            return Err(MeshError::InvariantViolation(format!(
                "triangle buffer length {} is not a multiple of 3",
                self.triangles.len()
            )));
        }
        let vertex_count = self.vertices.len();
        if let Some((offset, index)) = self
            .triangles
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertex_count)
        {
            return Err(MeshError::InvariantViolation(format!(
                "triangle offset {offset} references vertex {index} of {vertex_count}"
            )));
        }
        Ok(())
    }
}

/// Converts a vertex-buffer offset to a `u32` index-buffer entry.
pub(crate) fn vertex_index(offset: usize) -> Result<u32, MeshError> {
    u32::try_from(offset).map_err(|_| {
        MeshError::InvariantViolation(format!(
            "vertex offset {offset} does not fit a 32-bit index buffer"
        ))
    })
}
