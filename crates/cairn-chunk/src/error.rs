//! Chunk runtime error types.

use cairn_mesh::MeshError;
use cairn_voxel::{ChunkId, GridError};

/// Errors surfaced by chunk-level operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChunkError {
    /// No chunk with this id is loaded.
    #[error("{0} is not loaded")]
    UnknownChunk(ChunkId),

    /// A grid access or replacement failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A mesh edit failed; the mesh is unchanged.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
