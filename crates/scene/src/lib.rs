//! Scene: owns the camera, height map, items and lighting, and runs the frame.
//!
//! # Invariants
//! - Frame order is fixed: input actions, jump integration, item pickup, light
//!   orbit. Rendering happens after the tick and never mutates.
//! - The win is declared once, on the tick that picks up the last item.
//! - Every mutation is appended to the event log.

mod clock;
mod config;
mod scene;

pub use clock::{Clock, FixedStepClock, SystemClock};
pub use config::{ConfigError, SceneConfig};
pub use scene::{Scene, SceneEvent};

pub fn crate_info() -> &'static str {
    "voxelwalk-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
