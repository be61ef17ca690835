use std::fmt::Write as _;

use glam::Mat4;
use voxelwalk_common::GridCoord;

use crate::lighting::LightingUniforms;
use crate::renderer::{DrawCommand, Primitive, Rasterizer, Shape, Surface};

/// Rasterizer that keeps everything it is handed. Used by tests and tooling.
#[derive(Debug, Default)]
pub struct RecordingRasterizer {
    pub clears: usize,
    pub view: Option<Mat4>,
    pub projection: Option<Mat4>,
    pub lighting: Option<LightingUniforms>,
    pub commands: Vec<DrawCommand>,
}

impl RecordingRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells that received at least one block cube, without duplicates.
    pub fn block_cells(&self) -> Vec<GridCoord> {
        let mut cells: Vec<GridCoord> = Vec::new();
        for command in &self.commands {
            if let Primitive::Block { cell, .. } = command.primitive {
                if cells.last() != Some(&cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    pub fn count_shape(&self, shape: Shape) -> usize {
        self.commands.iter().filter(|c| c.shape() == shape).count()
    }
}

impl Rasterizer for RecordingRasterizer {
    fn clear(&mut self) {
        self.clears += 1;
        self.commands.clear();
    }

    fn set_camera(&mut self, view: Mat4, projection: Mat4) {
        self.view = Some(view);
        self.projection = Some(projection);
    }

    fn set_lighting(&mut self, lighting: &LightingUniforms) {
        self.lighting = Some(*lighting);
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(*command);
    }
}

/// Rasterizer that writes one text line per call. Handy for headless runs.
#[derive(Debug, Default)]
pub struct DebugTextRasterizer {
    out: String,
}

impl DebugTextRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

impl Rasterizer for DebugTextRasterizer {
    fn clear(&mut self) {
        self.out.push_str("=== Frame ===\n");
    }

    fn set_camera(&mut self, view: Mat4, _projection: Mat4) {
        let eye = view.inverse().w_axis;
        let _ = writeln!(
            self.out,
            "Camera: eye=({:.1}, {:.1}, {:.1})",
            eye.x, eye.y, eye.z
        );
    }

    fn set_lighting(&mut self, lighting: &LightingUniforms) {
        let p = lighting.position;
        let _ = writeln!(
            self.out,
            "Light: enabled={} pos=({:.1}, {:.1}, {:.1}) spotlight={}",
            lighting.enabled,
            p.x,
            p.y,
            p.z,
            lighting.spotlight.is_some()
        );
    }

    fn draw(&mut self, command: &DrawCommand) {
        let p = command.transform.position;
        let surface = match command.surface {
            Surface::Color([r, g, b, _]) => format!("color({r:.2}, {g:.2}, {b:.2})"),
            Surface::Texture(slot) => format!("texture({})", slot.file_name()),
        };
        let _ = writeln!(
            self.out,
            "  {:?} {:?} pos=({:.2}, {:.2}, {:.2}) {}",
            command.shape(),
            command.primitive,
            p.x,
            p.y,
            p.z,
            surface
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use voxelwalk_assets::TextureSlot;
    use voxelwalk_common::Transform;

    fn block(x: i32, z: i32, layer: u8) -> DrawCommand {
        DrawCommand {
            primitive: Primitive::Block {
                cell: GridCoord::new(x, z),
                layer,
            },
            transform: Transform::from_position(Vec3::new(
                x as f32 - 16.0,
                layer as f32,
                z as f32 - 16.0,
            )),
            surface: Surface::Texture(TextureSlot::Wall),
        }
    }

    #[test]
    fn recording_clear_drops_previous_frame() {
        let mut rec = RecordingRasterizer::new();
        rec.draw(&block(1, 1, 0));
        rec.clear();
        assert!(rec.commands.is_empty());
        assert_eq!(rec.clears, 1);
    }

    #[test]
    fn block_cells_are_deduplicated_per_column() {
        let mut rec = RecordingRasterizer::new();
        rec.draw(&block(1, 1, 0));
        rec.draw(&block(1, 1, 1));
        rec.draw(&block(2, 1, 0));
        assert_eq!(rec.block_cells(), vec![GridCoord::new(1, 1), GridCoord::new(2, 1)]);
        assert_eq!(rec.count_shape(Shape::Cube), 3);
    }

    #[test]
    fn text_rasterizer_lists_draws() {
        let mut text = DebugTextRasterizer::new();
        text.clear();
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 2.0), Vec3::ZERO, Vec3::Y);
        text.set_camera(view, Mat4::IDENTITY);
        text.draw(&block(3, 4, 1));
        let out = text.take_output();
        assert!(out.starts_with("=== Frame ==="));
        assert!(out.contains("Camera: eye=("));
        assert!(out.contains("texture(wall"));
        assert!(text.output().is_empty());
    }
}
