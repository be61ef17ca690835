//! Developer Tooling: HUD inspector and frame-rate counter.
//!
//! # Invariants
//! - Tools only read scene state.

mod fps;
mod hud;

pub use fps::FpsCounter;
pub use hud::{HudSummary, SceneInspector, WIN_MESSAGE};

pub fn crate_info() -> &'static str {
    "voxelwalk-tools v0.1.0"
}
