//! First-person camera for walking a height map.
//!
//! The camera moves horizontally against the grid (rejecting blocked moves
//! outright) and integrates a fixed per-frame jump arc against the ground
//! level of the cell it occupies.
//!
//! # Invariants
//! - `up` is never rotated; yaw and pitch only rotate the forward vector.
//! - Forward and right are recomputed from `at - eye` on every use.
//! - View and projection matrices are cached and refreshed on every pose or
//!   viewport change.
//! - Out-of-bounds cells always block movement.

mod camera;
pub mod physics;

pub use camera::{Camera, CameraSettings, PAN_STEP_DEGREES};
pub use physics::{JumpParams, MotionState, VerticalBody};

pub fn crate_info() -> &'static str {
    "voxelwalk-camera v0.1.0"
}
