use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use voxelwalk_common::GridCoord;
use voxelwalk_kernel::HeightMap;

use crate::physics::{self, HEAD_CLEARANCE, JumpParams, MotionState, VerticalBody};

/// Yaw applied by one discrete pan step.
pub const PAN_STEP_DEGREES: f32 = 5.0;

/// Construction parameters for [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Distance moved per movement command.
    pub speed: f32,
    /// Degrees of rotation per pixel of pointer motion.
    pub mouse_sensitivity: f32,
    pub near: f32,
    pub far: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub jump: JumpParams,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            speed: 0.1,
            mouse_sensitivity: 0.3,
            near: 0.1,
            far: 1000.0,
            viewport_width: 800,
            viewport_height: 600,
            jump: JumpParams::default(),
        }
    }
}

/// First-person eye/look-at camera walking on a [`HeightMap`].
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    at: Vec3,
    up: Vec3,
    settings: CameraSettings,
    aspect: f32,
    is_jumping: bool,
    jump_velocity: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(settings: CameraSettings, eye: Vec3, at: Vec3) -> Self {
        let mut camera = Self {
            eye,
            at,
            up: Vec3::Y,
            settings,
            aspect: 1.0,
            is_jumping: false,
            jump_velocity: 0.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.set_viewport(settings.viewport_width, settings.viewport_height);
        camera.update_view_matrix();
        camera
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn at(&self) -> Vec3 {
        self.at
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn speed(&self) -> f32 {
        self.settings.speed
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.settings.mouse_sensitivity
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Place the camera. Vertical velocity and jump state are left untouched.
    pub fn set_pose(&mut self, eye: Vec3, at: Vec3) {
        self.eye = eye;
        self.at = at;
        self.update_view_matrix();
    }

    /// Recompute the projection for a new viewport. A zero-height viewport keeps the old aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
        self.projection = Mat4::perspective_rh(
            self.settings.fov_degrees.to_radians(),
            self.aspect,
            self.settings.near,
            self.settings.far,
        );
    }

    fn update_view_matrix(&mut self) {
        self.view = Mat4::look_at_rh(self.eye, self.at, self.up);
    }

    /// Unit vector from eye toward the look-at point.
    pub fn forward(&self) -> Vec3 {
        (self.at - self.eye).normalize_or_zero()
    }

    /// Unit vector to the camera's right (`forward x up`). Zero when looking straight up or down.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    /// Forward flattened onto the ground plane.
    pub fn horizontal_forward(&self) -> Vec3 {
        let f = self.forward();
        Vec3::new(f.x, 0.0, f.z).normalize_or_zero()
    }

    /// Grid cell under the eye.
    pub fn grid_cell(&self) -> GridCoord {
        GridCoord::from_position(self.eye)
    }

    /// Resting eye height for the cell currently under the camera.
    pub fn ground_level(&self, map: &HeightMap) -> f32 {
        physics::ground_level(map, self.grid_cell(), &self.settings.jump)
    }

    pub fn motion_state(&self) -> MotionState {
        self.vertical_body().motion_state()
    }

    fn vertical_body(&self) -> VerticalBody {
        VerticalBody {
            y: self.eye.y,
            velocity: self.jump_velocity,
            is_jumping: self.is_jumping,
        }
    }

    /// Whether the eye may not enter world point `(x, z)`.
    ///
    /// Cells outside the grid always block. An occupied column blocks unless
    /// the eye is at least `HEAD_CLEARANCE` above its top.
    pub fn check_collision(&self, x: f32, z: f32, map: &HeightMap) -> bool {
        let cell = GridCoord::from_world(x, z);
        if !cell.in_bounds() {
            return true;
        }
        let height = map.height(cell);
        height > 0 && self.eye.y < height as f32 + HEAD_CLEARANCE
    }

    pub fn move_forward(&mut self, map: &HeightMap) -> bool {
        let delta = self.horizontal_forward() * self.settings.speed;
        self.try_move(delta, map)
    }

    pub fn move_backward(&mut self, map: &HeightMap) -> bool {
        let delta = self.horizontal_forward() * -self.settings.speed;
        self.try_move(delta, map)
    }

    pub fn move_left(&mut self, map: &HeightMap) -> bool {
        let delta = self.right() * -self.settings.speed;
        self.try_move(delta, map)
    }

    pub fn move_right(&mut self, map: &HeightMap) -> bool {
        let delta = self.right() * self.settings.speed;
        self.try_move(delta, map)
    }

    /// Translate eye and look-at together by a horizontal delta, unless the
    /// destination collides. Blocked moves are dropped whole; there is no sliding.
    fn try_move(&mut self, delta: Vec3, map: &HeightMap) -> bool {
        let delta = Vec3::new(delta.x, 0.0, delta.z);
        let target = self.eye + delta;
        if self.check_collision(target.x, target.z, map) {
            tracing::trace!(x = target.x, z = target.z, "move blocked");
            return false;
        }
        self.eye += delta;
        self.at += delta;
        self.update_view_matrix();
        true
    }

    /// Yaw by `degrees` about the world up axis. Positive turns left.
    pub fn rotate_horizontal(&mut self, degrees: f32) {
        self.rotate_forward(self.up, degrees);
    }

    /// Pitch by `degrees` about the camera's right axis. Positive looks up.
    ///
    /// Pitch is not clamped; enough rotation carries the view past vertical.
    pub fn rotate_vertical(&mut self, degrees: f32) {
        self.rotate_forward(self.right(), degrees);
    }

    pub fn pan_left(&mut self, degrees: f32) {
        self.rotate_horizontal(degrees);
    }

    pub fn pan_right(&mut self, degrees: f32) {
        self.rotate_horizontal(-degrees);
    }

    fn rotate_forward(&mut self, axis: Vec3, degrees: f32) {
        if axis == Vec3::ZERO {
            return;
        }
        let rotated = Quat::from_axis_angle(axis, degrees.to_radians()) * self.forward();
        self.at = self.eye + rotated;
        self.update_view_matrix();
    }

    /// Start a jump if standing on the current cell's ground level. Returns whether it armed.
    pub fn jump(&mut self, map: &HeightMap) -> bool {
        let ground = self.ground_level(map);
        let body = physics::try_jump(self.vertical_body(), &self.settings.jump, ground);
        if !body.is_jumping || self.is_jumping {
            return false;
        }
        self.is_jumping = true;
        self.jump_velocity = body.velocity;
        true
    }

    /// Run one frame of vertical integration. Call every frame, with or without input.
    ///
    /// The look-at point moves by the same vertical delta as the eye, so
    /// pitch survives the arc.
    pub fn update_jump(&mut self, map: &HeightMap) {
        let ground = self.ground_level(map);
        let before = self.vertical_body();
        let after = physics::step_vertical(before, &self.settings.jump, ground);
        if after == before {
            return;
        }
        if before.is_jumping && !after.is_jumping {
            tracing::trace!(y = after.y, "landed");
        }
        let dy = after.y - before.y;
        self.eye.y = after.y;
        self.at.y += dy;
        self.jump_velocity = after.velocity;
        self.is_jumping = after.is_jumping;
        self.update_view_matrix();
    }
}
