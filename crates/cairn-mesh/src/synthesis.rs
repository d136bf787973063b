//! Full mesh synthesis for a block grid.
//!
//! Every block contributes all six faces, two triangles each, whatever its
//! neighbours are. Corners are welded only against earlier faces of the same
//! block, so two adjacent blocks never share a vertex.

use cairn_voxel::{Block, BlockGrid};
use glam::Vec3;

use crate::attribution::MeshAttribution;
use crate::error::MeshError;
use crate::face::{BlockFace, FaceBasis};
use crate::mesh::{BlockMesh, vertex_index};
use crate::mutation::{RemovedBlock, remove_block};

/// Triangle-buffer entries emitted for one face (two triangles).
pub const INDICES_PER_FACE: usize = 6;

/// Triangle-buffer entries emitted for one block (six faces).
pub const INDICES_PER_BLOCK: usize = INDICES_PER_FACE * 6;

/// A mesh together with the tables that attribute its geometry to blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SynthesizedMesh {
    /// The generated buffers.
    pub mesh: BlockMesh,
    /// Offset → block tables for both buffers.
    pub attribution: MeshAttribution,
}

impl SynthesizedMesh {
    /// Creates an empty mesh with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the block owning `triangle_offset`. See [`remove_block`].
    pub fn remove_block(&mut self, triangle_offset: usize) -> Result<RemovedBlock, MeshError> {
        remove_block(&mut self.mesh, &mut self.attribution, triangle_offset)
    }
}

/// Builds the complete mesh for `grid`.
///
/// Blocks are visited z-outer, then y, then x. The result replaces any earlier
/// mesh for the grid; it is never merged with one.
///
/// # Errors
///
/// [`MeshError::InvariantViolation`] if the vertex buffer would outgrow
/// 32-bit indices.
pub fn synthesize(grid: &BlockGrid) -> Result<SynthesizedMesh, MeshError> {
    let unit_length = grid.unit_length();
    let mut out = SynthesizedMesh {
        mesh: BlockMesh {
            vertices: Vec::with_capacity(grid.len() * 8),
            triangles: Vec::with_capacity(grid.len() * INDICES_PER_BLOCK),
        },
        attribution: MeshAttribution::new(),
    };

    for block in grid.iter() {
        emit_block(block, unit_length, &mut out)?;
    }

    tracing::debug!(
        blocks = grid.len(),
        vertices = out.mesh.vertices.len(),
        triangles = out.mesh.triangle_count(),
        "synthesized block mesh"
    );
    Ok(out)
}

/// Appends the six faces of `block` and its welded corner list.
fn emit_block(
    block: &Block,
    unit_length: f32,
    out: &mut SynthesizedMesh,
) -> Result<(), MeshError> {
    let vertex_base = out.mesh.vertices.len();
    let cell_center = block.center(unit_length);
    // Corners already emitted for this block only.
    let mut local: Vec<Vec3> = Vec::with_capacity(8);

    for face in BlockFace::ALL {
        let face_center = face.center(block.position, unit_length);
        let basis = FaceBasis::classify(face_center, block.position, unit_length);

        let mut quad = [0u32; 4];
        for (slot, corner) in quad.iter_mut().zip(basis.corners(face_center)) {
            *slot = vertex_index(vertex_base + local_index(&mut local, corner))?;
        }
        let [tl, tr, bl, br] = quad;

        let mut indices = [tl, tr, bl, tr, br, bl];

        // Reversal keeps every normal pointing away from the cell centre.
        let toward_center = cell_center - face_center;
        if toward_center.x > 0.0 || toward_center.y < 0.0 || toward_center.z < 0.0 {
            indices.reverse();
        }

        out.mesh.triangles.extend_from_slice(&indices);
        out.attribution.triangles.push_run(*block, INDICES_PER_FACE);
    }

    out.attribution.vertices.push_run(*block, local.len());
    out.mesh.vertices.extend_from_slice(&local);
    Ok(())
}

/// Returns the block-local index of `corner`, appending it if unseen.
fn local_index(local: &mut Vec<Vec3>, corner: Vec3) -> usize {
    match local.iter().position(|&existing| existing == corner) {
        Some(found) => found,
        None => {
            local.push(corner);
            local.len() - 1
        }
    }
}
