//! Block records stored by value inside a [`crate::BlockGrid`].

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifies one chunk instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkId(pub u32);

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chunk#{}", self.0)
    }
}

/// Integer cell coordinate inside a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockIndex {
    /// X cell coordinate.
    pub x: usize,
    /// Y cell coordinate.
    pub y: usize,
    /// Z cell coordinate.
    pub z: usize,
}

impl BlockIndex {
    /// Creates a new cell coordinate.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Linear RGBA colour, each channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockColor {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl BlockColor {
    /// Opaque green, the default voxel colour.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Fully transparent black, used for cells that were never populated.
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a colour from its four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for BlockColor {
    fn default() -> Self {
        Self::GREEN
    }
}

/// One cubic cell of the voxel grid.
///
/// `position` is the world-space centre of the cell's bottom face; the cell
/// occupies `position.y..position.y + unit_length` vertically and extends half
/// a unit either side of `position` along x and z.
///
/// Two blocks are equal only when position, colour and all three grid
/// coordinates match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    /// World-space bottom-centre of the cell.
    pub position: Vec3,
    /// Display colour.
    pub color: BlockColor,
    /// Coordinate of this block inside its grid.
    pub index: BlockIndex,
}

impl Block {
    /// Creates a block record.
    pub fn new(position: Vec3, color: BlockColor, index: BlockIndex) -> Self {
        Self {
            position,
            color,
            index,
        }
    }

    /// Creates the block for `index` on a lattice of `unit_length` spacing.
    pub fn on_lattice(index: BlockIndex, unit_length: f32, color: BlockColor) -> Self {
        let position = Vec3::new(
            index.x as f32 * unit_length,
            index.y as f32 * unit_length,
            index.z as f32 * unit_length,
        );
        Self::new(position, color, index)
    }

    /// Returns the geometric centre of the cell.
    pub fn center(&self, unit_length: f32) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y + unit_length / 2.0,
            self.position.z,
        )
    }
}
