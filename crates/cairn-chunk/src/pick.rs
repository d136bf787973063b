//! Applying a ray-cast hit to a chunk's mesh.

use cairn_mesh::RemovedBlock;
use cairn_voxel::ChunkId;

use crate::consumer::MeshConsumer;
use crate::error::ChunkError;
use crate::store::ChunkStore;

/// A ray-cast result: which chunk mesh was hit and which triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickHit {
    /// Chunk whose mesh the ray hit.
    pub chunk: ChunkId,
    /// Triangle number as reported by the physics query, not an index-buffer
    /// offset.
    pub triangle_index: usize,
}

/// Removes the block under `hit` and pushes the edited buffers to consumers.
///
/// On error the chunk's mesh is left unchanged and no consumer is called.
pub fn apply_pick(
    store: &mut ChunkStore,
    hit: PickHit,
    consumers: &mut [&mut dyn MeshConsumer],
) -> Result<RemovedBlock, ChunkError> {
    let chunk = store
        .get_mut(hit.chunk)
        .ok_or(ChunkError::UnknownChunk(hit.chunk))?;

    let removed = chunk.remove_picked(hit.triangle_index)?;
    for consumer in consumers.iter_mut() {
        consumer.mesh_edited(hit.chunk, chunk.mesh(), &removed);
    }
    tracing::info!(
        chunk = %hit.chunk,
        block = %removed.block.index,
        triangles = chunk.mesh().triangle_count(),
        "block removed"
    );
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use cairn_mesh::MeshError;
    use cairn_voxel::{BlockColor, BlockIndex, GridEventBuffer};

    use super::*;
    use crate::chunk::VoxelChunk;
    use crate::consumer::RecordingConsumer;
    use crate::rebuild::RebuildCoordinator;

    fn meshed_store(dimension: usize) -> ChunkStore {
        let mut store = ChunkStore::new();
        let mut events = GridEventBuffer::new();
        let mut chunk = VoxelChunk::new(ChunkId(0), dimension, 1.0);
        chunk.populate(BlockColor::GREEN, &mut events).unwrap();
        store.insert(chunk);
        RebuildCoordinator::new().run(&mut store, &mut events, &mut []);
        store
    }

    #[test]
    fn test_pick_removes_block_and_notifies() {
        let mut store = meshed_store(2);
        let mut collision = RecordingConsumer::new();
        let hit = PickHit {
            chunk: ChunkId(0),
            triangle_index: 12,
        };

        let removed = apply_pick(&mut store, hit, &mut [&mut collision]).unwrap();

        assert_eq!(removed.block.index, BlockIndex::new(1, 0, 0));
        let stats = collision.stats(ChunkId(0)).unwrap();
        assert_eq!(stats.edits, 1);
        assert_eq!(stats.triangles, 12 * 7);
        assert_eq!(stats.vertices, 8 * 7);
    }

    #[test]
    fn test_pick_unknown_chunk() {
        let mut store = meshed_store(1);
        let hit = PickHit {
            chunk: ChunkId(5),
            triangle_index: 0,
        };
        let err = apply_pick(&mut store, hit, &mut []).unwrap_err();
        assert_eq!(err, ChunkError::UnknownChunk(ChunkId(5)));
    }

    #[test]
    fn test_pick_past_end_leaves_mesh_untouched() {
        let mut store = meshed_store(1);
        let before = store.get(ChunkId(0)).unwrap().mesh().clone();
        let mut collision = RecordingConsumer::new();
        let hit = PickHit {
            chunk: ChunkId(0),
            triangle_index: 12,
        };

        let err = apply_pick(&mut store, hit, &mut [&mut collision]).unwrap_err();

        assert_eq!(err, ChunkError::Mesh(MeshError::NotFound { offset: 36 }));
        assert_eq!(store.get(ChunkId(0)).unwrap().mesh(), &before);
        assert!(collision.stats(ChunkId(0)).is_none());
    }

    #[test]
    fn test_repeated_picks_empty_the_chunk() {
        let mut store = meshed_store(2);
        for _ in 0..8 {
            let hit = PickHit {
                chunk: ChunkId(0),
                triangle_index: 0,
            };
            apply_pick(&mut store, hit, &mut []).unwrap();
        }
        assert!(store.get(ChunkId(0)).unwrap().mesh().is_empty());
    }
}
