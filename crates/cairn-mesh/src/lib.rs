//! Block meshing: full synthesis of a chunk's six-faces-per-block surface,
//! the offset → block attribution side tables, and incremental block removal.

pub mod attribution;
pub mod error;
pub mod face;
pub mod mesh;
pub mod mutation;
pub mod synthesis;

#[cfg(test)]
mod mutation_tests;

pub use attribution::{AttributionMap, MeshAttribution};
pub use error::MeshError;
pub use face::{BlockFace, FaceBasis};
pub use mesh::BlockMesh;
pub use mutation::{RemovedBlock, remove_block, remove_picked_triangle};
pub use synthesis::{INDICES_PER_BLOCK, INDICES_PER_FACE, SynthesizedMesh, synthesize};
