//! World Kernel: the height map grid, its procedural generation, and collectible items.
//!
//! # Invariants
//! - Cell heights stay in `[0, MAX_BLOCK_HEIGHT]`; the grid is never resized.
//! - Reads outside the grid return 0. Blocking semantics for out-of-bounds
//!   cells belong to movement code, not to the map.
//! - Items are never removed, only flagged as collected.

pub mod heightmap;
pub mod items;

pub use heightmap::HeightMap;
pub use items::{COLLECT_RADIUS, ITEM_HEIGHT, ITEM_SPOTS, ItemPosition, Items};

pub fn crate_info() -> &'static str {
    "voxelwalk-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
