use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use voxelwalk_assets::{AssetStore, TextureSlot};
use voxelwalk_camera::Camera;
use voxelwalk_common::{GRID_SIZE, GridCoord, Transform};
use voxelwalk_kernel::{HeightMap, Items};

use crate::culling::{DEFAULT_RENDER_DISTANCE, visible_columns};
use crate::lighting::{Lighting, LightingUniforms};

const SKY_SIZE: f32 = 500.0;
const GROUND_THICKNESS: f32 = 0.1;

const ITEM_COLOR: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
const ITEM_SCALE: f32 = 0.3;
const ITEM_BOB_AMPLITUDE: f32 = 0.1;
const ITEM_BOB_RATE: f32 = 3.0;
const ITEM_SPIN_DEGREES_PER_SECOND: f32 = 50.0;

const LIGHT_MARKER_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const LIGHT_MARKER_SIZE: f32 = 0.2;

const SPHERE_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const SPHERE_POSITION: Vec3 = Vec3::new(-1.0, 1.0, -5.0);
const SPHERE_SCALE: f32 = 0.7;

const MODEL_COLOR: [f32; 4] = [0.8, 0.6, 0.4, 1.0];
const MODEL_POSITION: Vec3 = Vec3::new(-1.0, 0.0, -2.0);
const MODEL_SCALE: f32 = 0.5;

/// Geometry the rasterizer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Unit cube spanning `[0, 1]` on every axis.
    Cube,
    Sphere,
    /// The loaded display mesh.
    Mesh,
}

/// How a primitive is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    Color([f32; 4]),
    Texture(TextureSlot),
}

/// Everything the scene draws, as a closed set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Sky,
    Ground,
    Block { cell: GridCoord, layer: u8 },
    Item { cell: GridCoord },
    LightMarker,
    Sphere,
    Model,
}

impl Primitive {
    pub fn shape(&self) -> Shape {
        match self {
            Self::Sphere => Shape::Sphere,
            Self::Model => Shape::Mesh,
            _ => Shape::Cube,
        }
    }
}

/// One draw call: what, where, and how it is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub transform: Transform,
    pub surface: Surface,
}

impl DrawCommand {
    pub fn shape(&self) -> Shape {
        self.primitive.shape()
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }
}

/// The external graphics backend.
///
/// Implementations own all GPU state; the scene renderer only describes the frame.
pub trait Rasterizer {
    fn clear(&mut self);
    fn set_camera(&mut self, view: Mat4, projection: Mat4);
    fn set_lighting(&mut self, lighting: &LightingUniforms);
    fn draw(&mut self, command: &DrawCommand);
}

/// Read-only inputs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub camera: &'a Camera,
    pub map: &'a HeightMap,
    pub items: &'a Items,
    pub lighting: &'a Lighting,
    pub assets: &'a AssetStore,
    /// Seconds since the scene started; drives item bob and spin.
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Chebyshev radius, in cells, of the block window around the camera.
    pub render_distance: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            render_distance: DEFAULT_RENDER_DISTANCE,
        }
    }
}

/// Per-frame emission counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub columns_drawn: usize,
    pub columns_culled: usize,
    pub cubes_drawn: usize,
    pub items_drawn: usize,
    pub model_drawn: bool,
    pub commands: usize,
}

/// Emits the scene to a [`Rasterizer`] once per frame.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    config: RenderConfig,
}

impl SceneRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Describe one frame: clear, camera, lighting, then backdrop, blocks, items and props.
    pub fn render_frame<R: Rasterizer>(&self, frame: &FrameView<'_>, target: &mut R) -> FrameStats {
        let _span = tracing::trace_span!("render_frame").entered();
        let mut stats = FrameStats::default();
        let mut emitted = 0;
        let mut emit = |target: &mut dyn Rasterizer, command: DrawCommand| {
            target.draw(&command);
            emitted += 1;
        };

        let camera = frame.camera;
        target.clear();
        target.set_camera(camera.view_matrix(), camera.projection_matrix());
        target.set_lighting(&frame.lighting.uniforms(camera.eye(), camera.forward()));

        emit(target, sky(frame.assets));
        emit(target, ground(frame.assets));

        let center = camera.grid_cell();
        let wall = texture_surface(frame.assets, TextureSlot::Wall);
        let mut columns_drawn = 0;
        let mut cubes_drawn = 0;
        for (cell, height) in visible_columns(frame.map, center, self.config.render_distance) {
            columns_drawn += 1;
            let (x, z) = cell.world_origin();
            for layer in 0..height {
                emit(
                    target,
                    DrawCommand {
                        primitive: Primitive::Block { cell, layer },
                        transform: Transform::from_position(Vec3::new(x, layer as f32, z)),
                        surface: wall,
                    },
                );
                cubes_drawn += 1;
            }
        }

        let mut items_drawn = 0;
        for item in frame.items.uncollected() {
            emit(target, item_command(item.cell, item.world_position(), frame.elapsed));
            items_drawn += 1;
        }

        emit(target, light_marker(frame.lighting.position));
        emit(
            target,
            DrawCommand {
                primitive: Primitive::Sphere,
                transform: Transform::from_position(SPHERE_POSITION)
                    .with_scale(Vec3::splat(SPHERE_SCALE)),
                surface: Surface::Color(SPHERE_COLOR),
            },
        );

        let model_drawn = frame.assets.mesh().is_some();
        if model_drawn {
            emit(
                target,
                DrawCommand {
                    primitive: Primitive::Model,
                    transform: Transform::from_position(MODEL_POSITION)
                        .with_scale(Vec3::splat(MODEL_SCALE)),
                    surface: Surface::Color(MODEL_COLOR),
                },
            );
        }

        stats.commands = emitted;
        stats.columns_drawn = columns_drawn;
        stats.columns_culled = frame.map.column_count() - columns_drawn;
        stats.cubes_drawn = cubes_drawn;
        stats.items_drawn = items_drawn;
        stats.model_drawn = model_drawn;
        tracing::trace!(
            columns = stats.columns_drawn,
            culled = stats.columns_culled,
            cubes = stats.cubes_drawn,
            items = stats.items_drawn,
            "frame emitted"
        );
        stats
    }
}

/// Textured when the image has arrived, otherwise the slot's flat fallback color.
fn texture_surface(assets: &AssetStore, slot: TextureSlot) -> Surface {
    if assets.is_texture_ready(slot) {
        Surface::Texture(slot)
    } else {
        Surface::Color(slot.placeholder_color())
    }
}

fn sky(assets: &AssetStore) -> DrawCommand {
    DrawCommand {
        primitive: Primitive::Sky,
        transform: Transform::from_position(Vec3::splat(-SKY_SIZE / 2.0))
            .with_scale(Vec3::splat(SKY_SIZE)),
        surface: texture_surface(assets, TextureSlot::Sky),
    }
}

fn ground(assets: &AssetStore) -> DrawCommand {
    let half = (GRID_SIZE / 2) as f32;
    DrawCommand {
        primitive: Primitive::Ground,
        transform: Transform::from_position(Vec3::new(-half, -GROUND_THICKNESS, -half))
            .with_scale(Vec3::new(GRID_SIZE as f32, GROUND_THICKNESS, GRID_SIZE as f32)),
        surface: texture_surface(assets, TextureSlot::Ground),
    }
}

fn item_command(cell: GridCoord, anchor: Vec3, elapsed: f32) -> DrawCommand {
    let bob = (elapsed * ITEM_BOB_RATE).sin() * ITEM_BOB_AMPLITUDE;
    let spin = (elapsed * ITEM_SPIN_DEGREES_PER_SECOND).to_radians();
    DrawCommand {
        primitive: Primitive::Item { cell },
        transform: Transform::from_position(anchor + Vec3::Y * bob)
            .with_rotation(Quat::from_rotation_y(spin))
            .with_scale(Vec3::splat(ITEM_SCALE)),
        surface: Surface::Color(ITEM_COLOR),
    }
}

fn light_marker(light: Vec3) -> DrawCommand {
    DrawCommand {
        primitive: Primitive::LightMarker,
        transform: Transform::from_position(light - Vec3::splat(LIGHT_MARKER_SIZE / 2.0))
            .with_scale(Vec3::splat(LIGHT_MARKER_SIZE)),
        surface: Surface::Color(LIGHT_MARKER_COLOR),
    }
}
