//! Rendering Adapter: turns scene state into draw commands for an external rasterizer.
//!
//! # Invariants
//! - The renderer never mutates camera, map or items.
//! - Block culling is a square (Chebyshev) radius around the camera's cell,
//!   not an occlusion test.
//! - Missing assets degrade the frame (flat colors, skipped mesh); they never abort it.

mod culling;
mod debug;
mod lighting;
mod renderer;

pub use culling::{DEFAULT_RENDER_DISTANCE, visible_columns};
pub use debug::{DebugTextRasterizer, RecordingRasterizer};
pub use lighting::{Lighting, LightingUniforms, Spotlight};
pub use renderer::{
    DrawCommand, FrameStats, FrameView, Primitive, Rasterizer, RenderConfig, SceneRenderer, Shape,
    Surface,
};

pub fn crate_info() -> &'static str {
    "voxelwalk-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
