use glam::Vec3;
use voxelwalk_common::GridCoord;

/// How far ahead of the eye, in world units, block edits land.
pub const BLOCK_REACH: f32 = 2.0;

/// Which way a block edit changes a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEdit {
    Raise,
    Lower,
}

/// A high-level command for one frame.
///
/// The scene applies actions in the order the router produces them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    /// Discrete yaw step to the left.
    PanLeft,
    /// Discrete yaw step to the right.
    PanRight,
    Jump,
    /// Mouse-look rotation in degrees (already scaled by sensitivity).
    Look { yaw_degrees: f32, pitch_degrees: f32 },
    /// Edit the column in front of the camera.
    EditBlock(BlockEdit),
    ToggleLighting,
    ToggleSpotlight,
    ToggleNormals,
    ToggleLightAnimation,
    /// Move the point light by hand. Stops its orbit.
    PlaceLight(Vec3),
}

/// Cell hit by a block edit: `BLOCK_REACH` units along `forward` from `eye`, on the ground plane.
pub fn block_target(eye: Vec3, forward: Vec3) -> GridCoord {
    let reach = eye + forward * BLOCK_REACH;
    GridCoord::from_world(reach.x, reach.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_carries_degrees() {
        let a = Action::Look {
            yaw_degrees: -3.0,
            pitch_degrees: 1.5,
        };
        assert!(matches!(a, Action::Look { yaw_degrees, .. } if yaw_degrees == -3.0));
    }

    #[test]
    fn block_target_is_two_units_ahead() {
        assert_eq!(
            block_target(Vec3::new(0.5, 0.5, 0.5), Vec3::NEG_Z),
            GridCoord::new(16, 14)
        );
        assert_eq!(
            block_target(Vec3::new(0.5, 0.5, 0.5), Vec3::X),
            GridCoord::new(18, 16)
        );
    }

    #[test]
    fn block_target_ignores_vertical_component() {
        let f = Vec3::new(0.0, 0.8, -0.6);
        assert_eq!(block_target(Vec3::new(0.5, 3.0, 0.5), f), GridCoord::new(16, 15));
    }
}
