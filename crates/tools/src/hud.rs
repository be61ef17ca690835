use glam::Vec3;
use voxelwalk_kernel::ITEM_SPOTS;
use voxelwalk_scene::Scene;

pub const WIN_MESSAGE: &str = "YOU WIN!";

/// Read-only queries against a running scene for the HUD and debugging.
pub struct SceneInspector;

impl SceneInspector {
    /// Snapshot of what the status line shows.
    pub fn summary(scene: &Scene) -> HudSummary {
        let items = scene.items();
        HudSummary {
            position: scene.camera().eye(),
            collected: items.collected(),
            total: items.total(),
            won: scene.has_won(),
        }
    }

    /// Height of the column under the camera, or `None` outside the grid.
    pub fn column_under_camera(scene: &Scene) -> Option<u8> {
        let cell = scene.camera().grid_cell();
        cell.in_bounds().then(|| scene.map().height(cell))
    }

    /// World positions of items not yet picked up.
    pub fn remaining_items(scene: &Scene) -> Vec<Vec3> {
        scene
            .items()
            .uncollected()
            .map(|item| item.world_position())
            .collect()
    }

    /// Distance from the camera to the closest remaining item.
    pub fn nearest_item_distance(scene: &Scene) -> Option<f32> {
        let eye = scene.camera().eye();
        Self::remaining_items(scene)
            .into_iter()
            .map(|p| eye.distance(p))
            .min_by(f32::total_cmp)
    }

    /// Number of spawn points in the standard layout.
    pub fn standard_item_count() -> usize {
        ITEM_SPOTS.len()
    }
}

/// The status line: camera position, item progress and the win banner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSummary {
    pub position: Vec3,
    pub collected: usize,
    pub total: usize,
    pub won: bool,
}

impl std::fmt::Display for HudSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.position;
        write!(
            f,
            "Position: ({:.1}, {:.1}, {:.1}) | Items Collected: {}/{}",
            p.x, p.y, p.z, self.collected, self.total
        )?;
        if self.won {
            write!(f, " | {WIN_MESSAGE}")?;
        }
        Ok(())
    }
}
