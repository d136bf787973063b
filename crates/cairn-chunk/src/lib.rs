//! Chunk runtime: owns each chunk's grid and mesh, rebuilds meshes when a
//! grid is replaced, and applies pick-driven block removals.
//!
//! Rendering and collision are reached only through [`MeshConsumer`].

pub mod chunk;
pub mod consumer;
pub mod error;
pub mod pick;
pub mod rebuild;
pub mod store;

pub use chunk::VoxelChunk;
pub use consumer::{MeshConsumer, MeshStats, RecordingConsumer};
pub use error::ChunkError;
pub use pick::{PickHit, apply_pick};
pub use rebuild::RebuildCoordinator;
pub use store::ChunkStore;
