//! A chunk: one block grid plus the mesh synthesized from it.
//!
//! [`VoxelChunk`] is the sole owner of its grid, mesh buffers and attribution
//! tables. Grid replacement bumps a version counter; the mesh records the
//! version it was built from, so a stale mesh is detectable without events.

use cairn_mesh::{BlockMesh, MeshAttribution, MeshError, RemovedBlock, SynthesizedMesh, synthesize};
use cairn_voxel::{Block, BlockColor, BlockGrid, ChunkId, GridError, GridEventBuffer};
use glam::Vec3;

/// One chunk's grid and mesh state.
#[derive(Clone, Debug)]
pub struct VoxelChunk {
    id: ChunkId,
    grid: BlockGrid,
    mesh: SynthesizedMesh,
    /// Incremented on every grid replacement.
    grid_version: u64,
    /// Grid version the current mesh was synthesized from.
    meshed_version: u64,
}

impl VoxelChunk {
    /// Creates a chunk with an empty grid and an empty mesh.
    pub fn new(id: ChunkId, dimension: usize, unit_length: f32) -> Self {
        Self {
            id,
            grid: BlockGrid::new(dimension, unit_length),
            mesh: SynthesizedMesh::new(),
            grid_version: 0,
            meshed_version: 0,
        }
    }

    /// Returns this chunk's id.
    pub fn id(&self) -> ChunkId {
        self.id
    }

    /// Returns the block grid.
    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    /// Returns the current mesh buffers.
    pub fn mesh(&self) -> &BlockMesh {
        &self.mesh.mesh
    }

    /// Returns the attribution tables of the current mesh.
    pub fn attribution(&self) -> &MeshAttribution {
        &self.mesh.attribution
    }

    /// Returns the block at `(x, y, z)`.
    pub fn block(&self, x: usize, y: usize, z: usize) -> Result<Block, GridError> {
        self.grid.get(x, y, z)
    }

    /// Replaces the grid and queues a rebuild notification.
    pub fn fill(
        &mut self,
        replacement: BlockGrid,
        events: &mut GridEventBuffer,
    ) -> Result<(), GridError> {
        self.grid.fill(replacement, self.id, events)?;
        self.grid_version += 1;
        Ok(())
    }

    /// Generates a grid of `color` blocks at the current dimension and unit
    /// length and fills the chunk with it.
    pub fn populate(
        &mut self,
        color: BlockColor,
        events: &mut GridEventBuffer,
    ) -> Result<(), GridError> {
        let generated =
            BlockGrid::generate(self.grid.dimension(), self.grid.unit_length(), color);
        self.fill(generated, events)
    }

    /// Returns `true` if the grid changed since the mesh was last synthesized.
    pub fn needs_rebuild(&self) -> bool {
        self.meshed_version != self.grid_version
    }

    /// Re-synthesizes the mesh from the grid, discarding every earlier edit.
    ///
    /// On error the previous mesh is kept and the chunk stays stale.
    pub fn rebuild(&mut self) -> Result<&BlockMesh, MeshError> {
        self.mesh = synthesize(&self.grid)?;
        self.meshed_version = self.grid_version;
        Ok(&self.mesh.mesh)
    }

    /// Removes the block owning the triangle reported by a ray cast.
    pub fn remove_picked(&mut self, triangle_index: usize) -> Result<RemovedBlock, MeshError> {
        cairn_mesh::remove_picked_triangle(
            &mut self.mesh.mesh,
            &mut self.mesh.attribution,
            triangle_index,
        )
    }

    /// Returns the corners of a picked triangle, for highlighting.
    pub fn picked_triangle(&self, triangle_index: usize) -> Option<[Vec3; 3]> {
        self.mesh.mesh.triangle(triangle_index)
    }
}
