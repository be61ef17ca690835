//! Shared types for voxelwalk: grid coordinates, the world/grid mapping, transforms.
//!
//! # Invariants
//! - World origin sits at the grid center: `grid = floor(world + GRID_SIZE / 2)`.

mod types;

pub use types::{GRID_HALF, GRID_SIZE, GridCoord, MAX_BLOCK_HEIGHT, Transform};

pub fn crate_info() -> &'static str {
    "voxelwalk-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
