//! Offset → block side tables kept next to a mesh.
//!
//! Each [`AttributionMap`] is dense: entry `i` names the block that produced
//! buffer offset `i`. Removing a run therefore shifts every later offset down
//! by the run length, which keeps the table keyed consistently with a buffer
//! that had the same run drained.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use cairn_voxel::{Block, BlockIndex};

use crate::error::MeshError;
use crate::mesh::BlockMesh;

/// Maps buffer offsets to the block that generated them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributionMap {
    owners: Vec<Block>,
}

impl AttributionMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of attributed offsets.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns `true` if nothing is attributed.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Returns the owner of `offset`.
    pub fn get(&self, offset: usize) -> Option<&Block> {
        self.owners.get(offset)
    }

    /// Attributes the next `count` offsets to `block`.
    pub fn push_run(&mut self, block: Block, count: usize) {
        self.owners.extend(std::iter::repeat_n(block, count));
    }

    /// Returns every offset owned by a block equal to `block`, ascending.
    pub fn offsets_of(&self, block: &Block) -> BTreeSet<usize> {
        self.owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| *owner == block)
            .map(|(offset, _)| offset)
            .collect()
    }

    /// Returns how many offsets are owned by a block equal to `block`.
    pub fn count_of(&self, block: &Block) -> usize {
        self.owners.iter().filter(|owner| *owner == block).count()
    }

    /// Returns how many offsets each block owns, keyed by grid coordinate.
    pub fn per_block_counts(&self) -> BTreeMap<BlockIndex, usize> {
        let mut counts = BTreeMap::new();
        for owner in &self.owners {
            *counts.entry(owner.index).or_insert(0) += 1;
        }
        counts
    }

    /// Drops the entries in `run`; later offsets move down by `run.len()`.
    pub fn remove_run(&mut self, run: Range<usize>) {
        self.owners.drain(run);
    }
}

/// The triangle and vertex attribution tables of one mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshAttribution {
    /// Triangle-buffer offset → owning block.
    pub triangles: AttributionMap,
    /// Vertex-buffer offset → owning block.
    pub vertices: AttributionMap,
}

impl MeshAttribution {
    /// Creates empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the block that produced triangle `triangle_index`.
    pub fn block_at_triangle(&self, triangle_index: usize) -> Option<&Block> {
        self.triangles.get(triangle_index.checked_mul(3)?)
    }

    /// Checks that both tables cover their buffers exactly.
    pub fn check_coverage(&self, mesh: &BlockMesh) -> Result<(), MeshError> {
        if self.triangles.len() != mesh.triangles.len() {
            return Err(MeshError::InvariantViolation(format!(
                "{} triangle attributions for {} triangle entries",
                self.triangles.len(),
                mesh.triangles.len()
            )));
        }
        if self.vertices.len() != mesh.vertices.len() {
            return Err(MeshError::InvariantViolation(format!(
                "{} vertex attributions for {} vertices",
                self.vertices.len(),
                mesh.vertices.len()
            )));
        }
        Ok(())
    }
}
