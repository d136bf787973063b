//! Cubic block grid owned by a chunk.
//!
//! A [`BlockGrid`] holds exactly `N³` blocks in x-fastest order. The grid is
//! never edited cell by cell: it is generated once and afterwards replaced
//! wholesale through [`BlockGrid::fill`], which announces the replacement with
//! a [`GridFilled`] event.

use thiserror::Error;

use crate::block::{Block, BlockColor, BlockIndex, ChunkId};
use crate::events::{GridEventBuffer, GridFilled};

/// Errors raised by grid access and replacement.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    /// A coordinate lies outside `[0, dimension)`.
    #[error("block coordinate ({x}, {y}, {z}) outside grid of dimension {dimension}")]
    OutOfRange {
        /// Requested x.
        x: usize,
        /// Requested y.
        y: usize,
        /// Requested z.
        z: usize,
        /// Cells per axis.
        dimension: usize,
    },
    /// A replacement grid has a different dimension than the grid it replaces.
    #[error("replacement grid has dimension {found}, expected {expected}")]
    DimensionMismatch {
        /// Dimension of the grid being replaced.
        expected: usize,
        /// Dimension of the replacement.
        found: usize,
    },
    /// Block storage does not satisfy the grid invariants.
    #[error("grid invariant violated: {0}")]
    InvariantViolation(String),
}

/// A cubic `N×N×N` array of blocks with a uniform cell length.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockGrid {
    /// Cells per axis.
    dimension: usize,
    /// World-space edge length of one cell.
    unit_length: f32,
    /// Flat storage, `x + y·N + z·N²`.
    blocks: Vec<Block>,
}

impl BlockGrid {
    /// Allocates an empty grid: every cell sits on the lattice with its own
    /// coordinates and the [`BlockColor::CLEAR`] colour.
    pub fn new(dimension: usize, unit_length: f32) -> Self {
        Self::generate(dimension, unit_length, BlockColor::CLEAR)
    }

    /// Generates a fully populated grid with every block coloured `color`.
    ///
    /// # Panics
    ///
    /// If `dimension³` blocks cannot be allocated.
    pub fn generate(dimension: usize, unit_length: f32, color: BlockColor) -> Self {
        let mut blocks = Vec::with_capacity(dimension.pow(3));
        for z in 0..dimension {
            for y in 0..dimension {
                for x in 0..dimension {
                    blocks.push(Block::on_lattice(
                        BlockIndex::new(x, y, z),
                        unit_length,
                        color,
                    ));
                }
            }
        }
        Self {
            dimension,
            unit_length,
            blocks,
        }
    }

    /// Builds a grid from explicit block records in x-fastest order.
    ///
    /// Fails when the block count is not `dimension³`, when `dimension³`
    /// overflows, or when a block's stored coordinates disagree with its
    /// array position.
    pub fn from_blocks(
        dimension: usize,
        unit_length: f32,
        blocks: Vec<Block>,
    ) -> Result<Self, GridError> {
        let volume = dimension.checked_pow(3).ok_or_else(|| {
            GridError::InvariantViolation(format!(
                "dimension {dimension} overflows the block count"
            ))
        })?;
        if blocks.len() != volume {
            return Err(GridError::InvariantViolation(format!(
                "expected {volume} blocks, got {}",
                blocks.len()
            )));
        }
        for (linear, block) in blocks.iter().enumerate() {
            let expected = Self::coords_of(linear, dimension);
            if block.index != expected {
                return Err(GridError::InvariantViolation(format!(
                    "block at slot {expected} records coordinates {}",
                    block.index
                )));
            }
        }
        Ok(Self {
            dimension,
            unit_length,
            blocks,
        })
    }

    /// Returns the number of cells per axis.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the world-space edge length of one cell.
    pub fn unit_length(&self) -> f32 {
        self.unit_length
    }

    /// Returns the total number of blocks (`N³`).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` for a zero-dimension grid.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the block at `(x, y, z)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<Block, GridError> {
        if !self.in_bounds(x, y, z) {
            return Err(GridError::OutOfRange {
                x,
                y,
                z,
                dimension: self.dimension,
            });
        }
        Ok(self.blocks[self.linear_index(x, y, z)])
    }

    /// Iterates blocks in synthesis order: z outermost, then y, then x.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Replaces the whole grid and announces it with a [`GridFilled`] event.
    ///
    /// The replacement must have the same dimension. The unit length is taken
    /// from the replacement. Nothing is modified and no event is sent on error.
    pub fn fill(
        &mut self,
        replacement: BlockGrid,
        chunk: ChunkId,
        events: &mut GridEventBuffer,
    ) -> Result<(), GridError> {
        if replacement.dimension != self.dimension {
            return Err(GridError::DimensionMismatch {
                expected: self.dimension,
                found: replacement.dimension,
            });
        }
        *self = replacement;
        tracing::debug!(%chunk, blocks = self.blocks.len(), "grid filled");
        events.send(GridFilled { chunk });
        Ok(())
    }

    fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.dimension && y < self.dimension && z < self.dimension
    }

    fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.dimension + z * self.dimension * self.dimension
    }

    fn coords_of(linear: usize, dimension: usize) -> BlockIndex {
        BlockIndex::new(
            linear % dimension,
            (linear / dimension) % dimension,
            linear / (dimension * dimension),
        )
    }
}
