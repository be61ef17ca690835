//! Fixed-step vertical motion against the height map.
//!
//! One call to [`step_vertical`] is one frame. Nothing is scaled by elapsed
//! time, so jump height and duration depend on how often the host ticks.

use serde::{Deserialize, Serialize};
use voxelwalk_common::GridCoord;
use voxelwalk_kernel::HeightMap;

/// Eye height above the top of an occupied column.
pub const EYE_OFFSET: f32 = 0.5;

/// How close to the ground level the eye must be for a jump to arm.
pub const GROUND_TOLERANCE: f32 = 0.01;

/// Extra height the eye must clear above a column to pass over it.
pub const HEAD_CLEARANCE: f32 = 0.3;

/// Jump tuning. `ground_height` doubles as the eye height on empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpParams {
    pub gravity: f32,
    pub jump_strength: f32,
    pub ground_height: f32,
}

impl Default for JumpParams {
    fn default() -> Self {
        Self {
            gravity: 0.015,
            jump_strength: 0.35,
            ground_height: 0.5,
        }
    }
}

/// The vertical part of the camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalBody {
    pub y: f32,
    pub velocity: f32,
    pub is_jumping: bool,
}

impl VerticalBody {
    pub fn at_rest(y: f32) -> Self {
        Self {
            y,
            velocity: 0.0,
            is_jumping: false,
        }
    }

    pub fn motion_state(&self) -> MotionState {
        if self.is_jumping || self.velocity != 0.0 {
            MotionState::Airborne
        } else {
            MotionState::Grounded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Grounded,
    Airborne,
}

/// Eye height when standing on `cell`.
///
/// Occupied columns put the eye `EYE_OFFSET` above their top; empty and
/// out-of-bounds cells use the base ground height.
pub fn ground_level(map: &HeightMap, cell: GridCoord, params: &JumpParams) -> f32 {
    match map.height(cell) {
        0 => params.ground_height,
        h => h as f32 + EYE_OFFSET,
    }
}

/// Arm a jump if the body is resting on `ground`. Returns the body unchanged otherwise.
pub fn try_jump(body: VerticalBody, params: &JumpParams, ground: f32) -> VerticalBody {
    if body.is_jumping || (body.y - ground).abs() >= GROUND_TOLERANCE {
        return body;
    }
    VerticalBody {
        y: body.y,
        velocity: params.jump_strength,
        is_jumping: true,
    }
}

/// Advance the body one frame: apply gravity, integrate, and land on `ground`.
///
/// Integration runs while jumping or whenever the eye is above the base
/// ground height, which is what makes the camera fall off ledges and settle
/// back onto column tops.
pub fn step_vertical(body: VerticalBody, params: &JumpParams, ground: f32) -> VerticalBody {
    if !body.is_jumping && body.y <= params.ground_height {
        return body;
    }

    let velocity = body.velocity - params.gravity;
    let y = body.y + velocity;
    if y <= ground {
        return VerticalBody::at_rest(ground);
    }
    VerticalBody {
        y,
        velocity,
        is_jumping: body.is_jumping,
    }
}
