use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Side length of the square height map, in cells.
pub const GRID_SIZE: i32 = 32;

/// Offset between world and grid coordinates. World origin sits at grid center.
pub const GRID_HALF: i32 = GRID_SIZE / 2;

/// Tallest column a cell can hold.
pub const MAX_BLOCK_HEIGHT: u8 = 4;

/// A 2D cell coordinate in the height map (Y is the column height, not an index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub z: i32,
}

impl GridCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Grid cell containing the world-space point `(x, z)`.
    pub fn from_world(x: f32, z: f32) -> Self {
        Self {
            x: (x + GRID_HALF as f32).floor() as i32,
            z: (z + GRID_HALF as f32).floor() as i32,
        }
    }

    /// Grid cell containing the XZ projection of a world-space position.
    pub fn from_position(pos: Vec3) -> Self {
        Self::from_world(pos.x, pos.z)
    }

    /// World-space corner `(x - 16, z - 16)` of this cell.
    pub fn world_origin(&self) -> (f32, f32) {
        ((self.x - GRID_HALF) as f32, (self.z - GRID_HALF) as f32)
    }

    /// Whether the coordinate lies inside `[0, GRID_SIZE) x [0, GRID_SIZE)`.
    pub fn in_bounds(&self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.z)
    }

    /// Max of the absolute coordinate differences.
    pub fn chebyshev_distance(&self, other: GridCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.z.abs_diff(other.z))
    }

    /// Offset by a cell delta.
    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.z.saturating_add(dz))
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Model matrix, applied as scale, then rotation, then translation.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
