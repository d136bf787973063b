//! Downstream receivers of chunk meshes (rendering, collision).

use std::collections::BTreeMap;

use cairn_mesh::{BlockMesh, RemovedBlock};
use cairn_voxel::ChunkId;

/// Receives a chunk's buffers after every rebuild or edit.
///
/// Implementations upload the buffers to a renderer or register them as a
/// collision shape. The buffers are only borrowed for the duration of the call.
pub trait MeshConsumer {
    /// Called after a full re-synthesis of `chunk`.
    fn mesh_rebuilt(&mut self, chunk: ChunkId, mesh: &BlockMesh);

    /// Called after one block's geometry was removed from `chunk`.
    fn mesh_edited(&mut self, chunk: ChunkId, mesh: &BlockMesh, removed: &RemovedBlock);
}

/// Per-chunk counters collected by [`RecordingConsumer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Vertex count after the last update.
    pub vertices: usize,
    /// Triangle count after the last update.
    pub triangles: usize,
    /// Number of full rebuilds received.
    pub rebuilds: u32,
    /// Number of block removals received.
    pub edits: u32,
}

/// A consumer that only records buffer sizes and call counts.
#[derive(Debug, Default)]
pub struct RecordingConsumer {
    stats: BTreeMap<ChunkId, MeshStats>,
}

impl RecordingConsumer {
    /// Creates a consumer with no recorded chunks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the counters for `chunk`, if it was ever updated.
    pub fn stats(&self, chunk: ChunkId) -> Option<MeshStats> {
        self.stats.get(&chunk).copied()
    }

    /// Iterates all recorded chunks in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkId, &MeshStats)> {
        self.stats.iter()
    }

    fn record(&mut self, chunk: ChunkId, mesh: &BlockMesh) -> &mut MeshStats {
        let entry = self.stats.entry(chunk).or_default();
        entry.vertices = mesh.vertices.len();
        entry.triangles = mesh.triangle_count();
        entry
    }
}

impl MeshConsumer for RecordingConsumer {
    fn mesh_rebuilt(&mut self, chunk: ChunkId, mesh: &BlockMesh) {
        self.record(chunk, mesh).rebuilds += 1;
    }

    fn mesh_edited(&mut self, chunk: ChunkId, mesh: &BlockMesh, _removed: &RemovedBlock) {
        self.record(chunk, mesh).edits += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_latest_sizes() {
        let mut consumer = RecordingConsumer::new();
        let mesh = BlockMesh {
            vertices: vec![glam::Vec3::ZERO; 4],
            triangles: vec![0, 1, 2, 1, 3, 2],
        };
        consumer.mesh_rebuilt(ChunkId(1), &mesh);
        consumer.mesh_rebuilt(ChunkId(1), &BlockMesh::new());

        let stats = consumer.stats(ChunkId(1)).unwrap();
        assert_eq!(stats.vertices, 0);
        assert_eq!(stats.triangles, 0);
        assert_eq!(stats.rebuilds, 2);
        assert_eq!(stats.edits, 0);
        assert!(consumer.stats(ChunkId(2)).is_none());
    }
}
