//! The six faces of a block and the planar basis each one is meshed in.

use glam::Vec3;

/// One of the six faces of a block, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockFace {
    /// Face on the block's bottom plane.
    Bottom = 0,
    /// Face one unit above the bottom.
    Top = 1,
    /// Face on the +X side.
    Left = 2,
    /// Face on the −X side.
    Right = 3,
    /// Face on the +Z side.
    Front = 4,
    /// Face on the −Z side.
    Back = 5,
}

impl BlockFace {
    /// All six faces in the order they are emitted for each block.
    pub const ALL: [BlockFace; 6] = [
        Self::Bottom,
        Self::Top,
        Self::Left,
        Self::Right,
        Self::Front,
        Self::Back,
    ];

    /// Returns the centre of this face for a block whose bottom-centre is `position`.
    pub fn center(self, position: Vec3, unit_length: f32) -> Vec3 {
        let half = unit_length / 2.0;
        let offset = match self {
            Self::Bottom => Vec3::ZERO,
            Self::Top => Vec3::new(0.0, unit_length, 0.0),
            Self::Left => Vec3::new(half, half, 0.0),
            Self::Right => Vec3::new(-half, half, 0.0),
            Self::Front => Vec3::new(0.0, half, half),
            Self::Back => Vec3::new(0.0, half, -half),
        };
        position + offset
    }

    /// Returns the face index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Half-length "up" and "left" vectors spanning a face plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBasis {
    /// In-plane up direction, half a unit long.
    pub up: Vec3,
    /// In-plane left direction, half a unit long.
    pub left: Vec3,
}

impl FaceBasis {
    /// Classifies a face by comparing its centre against the block.
    ///
    /// A face whose centre is not at the cell's mid-height is horizontal; of
    /// the lateral faces, those displaced along x use the y/z basis and the
    /// rest use the y/x basis.
    pub fn classify(face_center: Vec3, block_position: Vec3, unit_length: f32) -> Self {
        let half = unit_length / 2.0;
        if face_center.y != block_position.y + half {
            Self {
                up: Vec3::new(0.0, 0.0, half),
                left: Vec3::new(half, 0.0, 0.0),
            }
        } else if face_center.x != block_position.x {
            Self {
                up: Vec3::new(0.0, half, 0.0),
                left: Vec3::new(0.0, 0.0, -half),
            }
        } else {
            Self {
                up: Vec3::new(0.0, half, 0.0),
                left: Vec3::new(-half, 0.0, 0.0),
            }
        }
    }

    /// Returns the four face corners as `[top_left, top_right, bottom_left, bottom_right]`.
    pub fn corners(&self, face_center: Vec3) -> [Vec3; 4] {
        [
            face_center + self.up + self.left,
            face_center + self.up - self.left,
            face_center - self.up + self.left,
            face_center - self.up - self.left,
        ]
    }
}
