//! Incremental removal of one block's geometry from a synthesized mesh.
//!
//! A removal drains the block's triangle run and vertex run, re-indexes the
//! triangles that referenced vertices past the removed run, and drops the
//! block's attribution entries. The edit is staged on copies and committed
//! only after the result validates, so a failed removal changes nothing.

use std::collections::BTreeSet;
use std::ops::Range;

use cairn_voxel::Block;

use crate::attribution::MeshAttribution;
use crate::error::MeshError;
use crate::mesh::{BlockMesh, vertex_index};

/// Describes a completed removal.
#[derive(Clone, Debug, PartialEq)]
pub struct RemovedBlock {
    /// The block whose geometry was removed.
    pub block: Block,
    /// Triangle-buffer offsets removed, in pre-removal coordinates.
    pub triangle_run: Range<usize>,
    /// Vertex-buffer offsets removed, in pre-removal coordinates.
    pub vertex_run: Range<usize>,
}

impl RemovedBlock {
    /// Number of vertices the block contributed.
    pub fn vertex_count(&self) -> usize {
        self.vertex_run.len()
    }
}

/// Removes every triangle and vertex attributed to the block owning
/// `triangle_offset`.
///
/// # Errors
///
/// - [`MeshError::NotFound`] if no block is attributed to `triangle_offset`.
/// - [`MeshError::InvariantViolation`] if the tables do not cover the buffers
///   exactly, if the block's offsets do not form one contiguous run per
///   buffer, if a surviving triangle references a removed vertex, or if the
///   edited buffers fail validation.
///
/// On error `mesh` and `attribution` are left untouched.
pub fn remove_block(
    mesh: &mut BlockMesh,
    attribution: &mut MeshAttribution,
    triangle_offset: usize,
) -> Result<RemovedBlock, MeshError> {
    let block = *attribution
        .triangles
        .get(triangle_offset)
        .ok_or(MeshError::NotFound {
            offset: triangle_offset,
        })?;
    attribution.check_coverage(mesh)?;

    let triangle_run = contiguous_run(&attribution.triangles.offsets_of(&block), "triangle")?;
    let vertex_run = contiguous_run(&attribution.vertices.offsets_of(&block), "vertex")?;

    let mut triangles = mesh.triangles.clone();
    triangles.drain(triangle_run.clone());
    reindex(&mut triangles, &vertex_run)?;

    let mut vertices = mesh.vertices.clone();
    vertices.drain(vertex_run.clone());

    let edited = BlockMesh {
        vertices,
        triangles,
    };
    edited.validate()?;

    let mut edited_attribution = attribution.clone();
    edited_attribution.triangles.remove_run(triangle_run.clone());
    edited_attribution.vertices.remove_run(vertex_run.clone());
    edited_attribution.check_coverage(&edited)?;

    *mesh = edited;
    *attribution = edited_attribution;

    tracing::debug!(
        block = %block.index,
        triangles_removed = triangle_run.len(),
        vertices_removed = vertex_run.len(),
        vertices_left = mesh.vertices.len(),
        "removed block geometry"
    );

    Ok(RemovedBlock {
        block,
        triangle_run,
        vertex_run,
    })
}

/// Removes the block hit by a ray cast that reported `triangle_index`.
///
/// Ray casts report whole triangles; the attribution table is keyed by
/// triangle-buffer offset, which is `triangle_index * 3`.
pub fn remove_picked_triangle(
    mesh: &mut BlockMesh,
    attribution: &mut MeshAttribution,
    triangle_index: usize,
) -> Result<RemovedBlock, MeshError> {
    remove_block(mesh, attribution, triangle_index.saturating_mul(3))
}

/// Returns `offsets` as a half-open range, or fails if they have a gap.
fn contiguous_run(offsets: &BTreeSet<usize>, buffer: &str) -> Result<Range<usize>, MeshError> {
    let (Some(&first), Some(&last)) = (offsets.first(), offsets.last()) else {
        return Err(MeshError::InvariantViolation(format!(
            "block has no {buffer} offsets"
        )));
    };
    if last - first + 1 != offsets.len() {
        return Err(MeshError::InvariantViolation(format!(
            "{} {buffer} offsets of one block span {first}..={last}",
            offsets.len()
        )));
    }
    Ok(first..last + 1)
}

/// Lowers every index past `removed` by its length.
fn reindex(triangles: &mut [u32], removed: &Range<usize>) -> Result<(), MeshError> {
    let shift = vertex_index(removed.len())?;
    for index in triangles.iter_mut() {
        let offset = *index as usize;
        if offset >= removed.end {
            *index -= shift;
        } else if offset >= removed.start {
            return Err(MeshError::InvariantViolation(format!(
                "surviving triangle references removed vertex {index}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_run() {
        assert_eq!(contiguous_run(&BTreeSet::from([4, 5, 6]), "t"), Ok(4..7));
        assert!(contiguous_run(&BTreeSet::from([4, 6]), "t").is_err());
        assert!(contiguous_run(&BTreeSet::new(), "t").is_err());
    }

    #[test]
    fn test_reindex_shifts_only_past_the_run() {
        let mut triangles = vec![0, 1, 2, 10, 11, 12];
        reindex(&mut triangles, &(3..10)).unwrap();
        assert_eq!(triangles, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reindex_rejects_reference_into_run() {
        let mut triangles = vec![0, 4, 2];
        assert!(reindex(&mut triangles, &(3..10)).is_err());
    }
}
