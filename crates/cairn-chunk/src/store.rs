//! Owner of all live chunks, keyed by [`ChunkId`].

use rustc_hash::FxHashMap;

use cairn_voxel::ChunkId;

use crate::chunk::VoxelChunk;

/// Owns every live chunk and provides O(1) access by id.
///
/// Chunks share no state, so each one can be edited independently; the store
/// only hands out one `&mut` at a time.
pub struct ChunkStore {
    chunks: FxHashMap<ChunkId, VoxelChunk>,
}

impl ChunkStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            chunks: FxHashMap::default(),
        }
    }

    /// Inserts `chunk` under its own id, returning any chunk it replaced.
    pub fn insert(&mut self, chunk: VoxelChunk) -> Option<VoxelChunk> {
        self.chunks.insert(chunk.id(), chunk)
    }

    /// Removes and returns the chunk with this id.
    pub fn remove(&mut self, id: ChunkId) -> Option<VoxelChunk> {
        self.chunks.remove(&id)
    }

    /// Immutable access to a chunk.
    pub fn get(&self, id: ChunkId) -> Option<&VoxelChunk> {
        self.chunks.get(&id)
    }

    /// Mutable access to a chunk.
    pub fn get_mut(&mut self, id: ChunkId) -> Option<&mut VoxelChunk> {
        self.chunks.get_mut(&id)
    }

    /// Number of live chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if no chunk is live.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates ids of chunks whose mesh is older than their grid.
    pub fn iter_stale(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.chunks
            .values()
            .filter(|chunk| chunk.needs_rebuild())
            .map(VoxelChunk::id)
    }
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new()
    }
}
