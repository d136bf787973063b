//! Voxel storage: block records, the cubic block grid owned by a chunk, and
//! grid replacement events.

pub mod block;
pub mod events;
pub mod grid;

pub use block::{Block, BlockColor, BlockIndex, ChunkId};
pub use events::{GridEventBuffer, GridFilled};
pub use grid::{BlockGrid, GridError};
