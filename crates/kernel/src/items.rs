use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelwalk_common::GridCoord;

/// Vertical offset of every item above the ground plane.
pub const ITEM_HEIGHT: f32 = 0.5;

/// Pickup distance, measured in 3D from the camera eye.
pub const COLLECT_RADIUS: f32 = 1.0;

/// Spawn cells: center, three corners, and one mid-field spot.
pub const ITEM_SPOTS: [GridCoord; 5] = [
    GridCoord { x: 15, z: 15 },
    GridCoord { x: 5, z: 5 },
    GridCoord { x: 26, z: 5 },
    GridCoord { x: 5, z: 26 },
    GridCoord { x: 16, z: 8 },
];

/// A collectible anchored to a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemPosition {
    pub cell: GridCoord,
    pub y: f32,
    pub collected: bool,
}

impl ItemPosition {
    pub fn new(cell: GridCoord) -> Self {
        Self {
            cell,
            y: ITEM_HEIGHT,
            collected: false,
        }
    }

    /// World-space anchor: the cell corner lifted by the item height.
    pub fn world_position(&self) -> Vec3 {
        let (x, z) = self.cell.world_origin();
        Vec3::new(x, self.y, z)
    }
}

/// The session's collectibles plus a running pickup count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Items {
    items: Vec<ItemPosition>,
    collected: usize,
}

impl Items {
    /// Spawn one item per spot.
    pub fn spawn(spots: &[GridCoord]) -> Self {
        Self {
            items: spots.iter().copied().map(ItemPosition::new).collect(),
            collected: 0,
        }
    }

    /// The standard five-item layout.
    pub fn standard() -> Self {
        Self::spawn(&ITEM_SPOTS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemPosition> {
        self.items.iter()
    }

    /// Items still waiting to be picked up.
    pub fn uncollected(&self) -> impl Iterator<Item = &ItemPosition> {
        self.items.iter().filter(|item| !item.collected)
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn collected(&self) -> usize {
        self.collected
    }

    pub fn all_collected(&self) -> bool {
        !self.items.is_empty() && self.collected == self.items.len()
    }

    /// Flag every uncollected item strictly within `COLLECT_RADIUS` of `eye`.
    /// Returns the cells of the items picked up by this call.
    pub fn collect_near(&mut self, eye: Vec3) -> Vec<GridCoord> {
        let mut picked = Vec::new();
        for item in self.items.iter_mut().filter(|item| !item.collected) {
            if eye.distance(item.world_position()) < COLLECT_RADIUS {
                item.collected = true;
                picked.push(item.cell);
            }
        }
        self.collected += picked.len();
        for cell in &picked {
            tracing::debug!(
                x = cell.x,
                z = cell.z,
                collected = self.collected,
                total = self.items.len(),
                "item collected"
            );
        }
        picked
    }
}
