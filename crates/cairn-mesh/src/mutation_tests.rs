//! Scenario tests for removing blocks from synthesized meshes.

use cairn_voxel::{BlockColor, BlockGrid, BlockIndex};

use crate::error::MeshError;
use crate::mutation::remove_picked_triangle;
use crate::synthesis::{INDICES_PER_BLOCK, SynthesizedMesh, synthesize};

fn synthesized(dimension: usize, unit_length: f32) -> (BlockGrid, SynthesizedMesh) {
    let grid = BlockGrid::generate(dimension, unit_length, BlockColor::GREEN);
    let out = synthesize(&grid).unwrap();
    (grid, out)
}

/// First triangle offset owned by the block at `index`.
fn offset_of(out: &SynthesizedMesh, grid: &BlockGrid, index: BlockIndex) -> usize {
    let block = grid.get(index.x, index.y, index.z).unwrap();
    *out.attribution.triangles.offsets_of(&block).first().unwrap()
}

fn assert_consistent(out: &SynthesizedMesh) {
    out.mesh.validate().unwrap();
    out.attribution.check_coverage(&out.mesh).unwrap();
}

#[test]
fn test_single_block_round_trip_empties_mesh() {
    let (_, mut out) = synthesized(1, 1.0);
    let removed = out.remove_block(0).unwrap();

    assert_eq!(removed.block.index, BlockIndex::new(0, 0, 0));
    assert!(out.mesh.is_empty());
    assert!(out.attribution.triangles.is_empty());
    assert!(out.attribution.vertices.is_empty());
}

#[test]
fn test_remove_origin_block_from_2x2x2() {
    let (grid, mut out) = synthesized(2, 1.0);
    let vertices_before = out.mesh.vertices.len();
    let origin = grid.get(0, 0, 0).unwrap();
    let contributed = out.attribution.vertices.count_of(&origin);

    let removed = out
        .remove_block(offset_of(&out, &grid, BlockIndex::new(0, 0, 0)))
        .unwrap();

    assert_eq!(removed.block, origin);
    assert_eq!(removed.vertex_count(), contributed);
    assert_eq!(out.mesh.triangles.len(), 36 * 7);
    assert_eq!(out.mesh.vertices.len(), vertices_before - contributed);
    let vertex_count = out.mesh.vertices.len() as u32;
    assert!(out.mesh.triangles.iter().all(|&i| i < vertex_count));
    assert_eq!(out.attribution.triangles.count_of(&origin), 0);
    assert_consistent(&out);
}

#[test]
fn test_remove_from_the_middle_keeps_geometry_of_survivors() {
    let (grid, mut out) = synthesized(2, 1.0);
    let survivor = grid.get(1, 1, 1).unwrap();
    let survivor_tris = |out: &SynthesizedMesh| {
        out.attribution
            .triangles
            .offsets_of(&survivor)
            .into_iter()
            .map(|offset| out.mesh.vertices[out.mesh.triangles[offset] as usize])
            .collect::<Vec<_>>()
    };
    let before = survivor_tris(&out);

    out.remove_block(offset_of(&out, &grid, BlockIndex::new(1, 0, 1)))
        .unwrap();

    assert_eq!(survivor_tris(&out), before);
    assert_consistent(&out);
}

#[test]
fn test_unknown_offset_is_not_found_and_changes_nothing() {
    let (_, mut out) = synthesized(2, 1.0);
    let before = out.clone();

    let err = out.remove_block(36 * 8).unwrap_err();

    assert_eq!(err, MeshError::NotFound { offset: 36 * 8 });
    assert_eq!(out, before);
}

#[test]
fn test_second_removal_of_same_block_is_rejected() {
    let (_, mut out) = synthesized(1, 1.0);
    out.remove_block(5).unwrap();
    assert_eq!(
        out.remove_block(5),
        Err(MeshError::NotFound { offset: 5 })
    );
}

#[test]
fn test_removing_every_block_in_any_order() {
    let (grid, mut out) = synthesized(3, 1.0);
    // Remove from the back, the middle and the front alternately.
    let mut order: Vec<_> = grid.iter().map(|b| b.index).collect();
    order.reverse();
    order.rotate_left(13);

    for (removed, index) in order.iter().enumerate() {
        let offset = offset_of(&out, &grid, *index);
        out.remove_block(offset).unwrap();
        assert_eq!(
            out.mesh.triangles.len(),
            INDICES_PER_BLOCK * (grid.len() - removed - 1)
        );
        assert_consistent(&out);
    }
    assert!(out.mesh.is_empty());
}

#[test]
fn test_non_contiguous_run_is_invariant_violation() {
    let (grid, mut out) = synthesized(2, 1.0);
    // Attribute a stray triangle of block (1,0,0) to the origin block.
    let origin = grid.get(0, 0, 0).unwrap();
    let mut owners: Vec<_> = (0..out.attribution.triangles.len())
        .map(|offset| *out.attribution.triangles.get(offset).unwrap())
        .collect();
    owners[40] = origin;
    out.attribution.triangles = Default::default();
    for owner in owners {
        out.attribution.triangles.push_run(owner, 1);
    }
    let before = out.clone();

    let result = out.remove_block(0);

    assert!(matches!(result, Err(MeshError::InvariantViolation(_))));
    assert_eq!(out, before);
}

#[test]
fn test_short_triangle_buffer_is_invariant_violation() {
    let (_, mut out) = synthesized(2, 1.0);
    out.mesh.triangles.truncate(INDICES_PER_BLOCK);
    let before = out.clone();

    let result = out.remove_block(INDICES_PER_BLOCK);

    assert!(matches!(result, Err(MeshError::InvariantViolation(_))));
    assert_eq!(out, before);
}

#[test]
fn test_short_vertex_buffer_is_invariant_violation() {
    let (_, mut out) = synthesized(2, 1.0);
    out.mesh.vertices.truncate(8);
    let before = out.clone();

    let result = out.remove_block(INDICES_PER_BLOCK);

    assert!(matches!(result, Err(MeshError::InvariantViolation(_))));
    assert_eq!(out, before);
}

#[test]
fn test_picked_triangle_maps_to_offset() {
    let (grid, mut out) = synthesized(2, 1.0);
    // Triangle 12 is the first triangle of the second block.
    let removed =
        remove_picked_triangle(&mut out.mesh, &mut out.attribution, 12).unwrap();
    assert_eq!(removed.block, grid.get(1, 0, 0).unwrap());
    assert_eq!(removed.triangle_run, 36..72);
    assert_eq!(removed.vertex_run, 8..16);
}

#[test]
fn test_odd_vertex_counts_are_reindexed_exactly() {
    // A unit length that is not a power of two can leave some corners unwelded.
    let (grid, mut out) = synthesized(2, 0.3);
    let first = grid.get(0, 0, 0).unwrap();
    let contributed = out.attribution.vertices.count_of(&first);
    let vertices_before = out.mesh.vertices.len();

    out.remove_block(0).unwrap();

    assert_eq!(out.mesh.vertices.len(), vertices_before - contributed);
    assert_consistent(&out);
}
