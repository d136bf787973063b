//! Event-driven mesh rebuilds.
//!
//! Grid replacement only enqueues a [`GridFilled`](cairn_voxel::GridFilled);
//! [`RebuildCoordinator::run`] later drains the queue, re-synthesizes each
//! addressed chunk once, and hands the buffers to every consumer.

use std::collections::BTreeSet;

use cairn_voxel::{ChunkId, GridEventBuffer};

use crate::consumer::MeshConsumer;
use crate::store::ChunkStore;

/// Turns grid replacement events into full mesh rebuilds.
#[derive(Debug, Default)]
pub struct RebuildCoordinator {
    /// Total rebuilds performed.
    rebuilt: u64,
    /// Events dropped because their chunk was not loaded.
    skipped: u64,
    /// Rebuilds that failed; the chunk keeps its previous mesh.
    failed: u64,
}

impl RebuildCoordinator {
    /// Creates a coordinator with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains `events` and rebuilds every addressed chunk.
    ///
    /// Several events for the same chunk collapse into one rebuild. Events for
    /// chunks missing from `store` are logged and dropped, as are chunks whose
    /// synthesis fails. Returns the number of chunks rebuilt.
    pub fn run(
        &mut self,
        store: &mut ChunkStore,
        events: &mut GridEventBuffer,
        consumers: &mut [&mut dyn MeshConsumer],
    ) -> usize {
        let pending: BTreeSet<ChunkId> = events.drain().into_iter().map(|e| e.chunk).collect();

        let mut rebuilt = 0;
        for id in pending {
            let Some(chunk) = store.get_mut(id) else {
                tracing::warn!(chunk = %id, "grid filled for a chunk that is not loaded");
                self.skipped += 1;
                continue;
            };
            let mesh = match chunk.rebuild() {
                Ok(mesh) => mesh,
                Err(e) => {
                    tracing::warn!(chunk = %id, error = %e, "chunk mesh synthesis failed");
                    self.failed += 1;
                    continue;
                }
            };
            for consumer in consumers.iter_mut() {
                consumer.mesh_rebuilt(id, mesh);
            }
            tracing::debug!(
                chunk = %id,
                vertices = mesh.vertices.len(),
                triangles = mesh.triangle_count(),
                "chunk mesh rebuilt"
            );
            rebuilt += 1;
        }

        self.rebuilt += rebuilt as u64;
        rebuilt
    }

    /// Total rebuilds performed so far.
    pub fn rebuilt(&self) -> u64 {
        self.rebuilt
    }

    /// Total events dropped for unknown chunks.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Total rebuilds that failed.
    pub fn failed(&self) -> u64 {
        self.failed
    }
}
