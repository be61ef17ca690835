use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelwalk_assets::AssetStore;
use voxelwalk_camera::{Camera, PAN_STEP_DEGREES};
use voxelwalk_common::GridCoord;
use voxelwalk_input::{Action, BlockEdit, block_target};
use voxelwalk_kernel::{HeightMap, Items};
use voxelwalk_render::{FrameStats, FrameView, Lighting, Rasterizer, SceneRenderer};

use crate::config::SceneConfig;

/// A record of every map or item change the scene makes.
///
/// Ticks that change neither append nothing, so an idle session keeps an empty log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    BlockRaised { cell: GridCoord, height: u8 },
    BlockLowered { cell: GridCoord, height: u8 },
    ItemCollected { cell: GridCoord, collected: usize },
    /// Last item picked up. Logged once.
    Won { frame: u64 },
}

/// The explorer's authoritative state.
///
/// All mutations go through [`Scene::apply`] and [`Scene::tick`]; rendering
/// only reads.
#[derive(Debug)]
pub struct Scene {
    camera: Camera,
    map: HeightMap,
    items: Items,
    lighting: Lighting,
    assets: AssetStore,
    renderer: SceneRenderer,
    seed: u64,
    frame: u64,
    elapsed: f32,
    won: bool,
    event_log: Vec<SceneEvent>,
}

impl Scene {
    /// Generate a level from the config's seed (or a fresh one) and place the camera.
    pub fn new(config: &SceneConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        let mut rng = fastrand::Rng::with_seed(seed);
        let map = HeightMap::generate(&mut rng);
        Self::with_map(config, map, seed)
    }

    /// Build a scene around an existing map.
    pub fn with_map(config: &SceneConfig, map: HeightMap, seed: u64) -> Self {
        let camera = Camera::new(config.camera, config.start_eye, config.start_at);
        let items = Items::standard();
        tracing::info!(
            seed,
            blocks = map.block_count(),
            items = items.total(),
            "scene ready"
        );
        Self {
            camera,
            map,
            items,
            lighting: config.lighting,
            assets: AssetStore::new(),
            renderer: SceneRenderer::new(config.render),
            seed,
            frame: 0,
            elapsed: 0.0,
            won: false,
            event_log: Vec::new(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn map(&self) -> &HeightMap {
        &self.map
    }

    pub fn items(&self) -> &Items {
        &self.items
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Asset completions land here from outside the tick.
    pub fn assets_mut(&mut self) -> &mut AssetStore {
        &mut self.assets
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of completed ticks.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Clock reading passed to the latest tick, in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Move the camera without collision. Vertical motion resumes on the next tick.
    pub fn teleport(&mut self, eye: Vec3, at: Vec3) {
        self.camera.set_pose(eye, at);
    }

    /// Apply one input action immediately.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::MoveForward => {
                self.camera.move_forward(&self.map);
            }
            Action::MoveBackward => {
                self.camera.move_backward(&self.map);
            }
            Action::MoveLeft => {
                self.camera.move_left(&self.map);
            }
            Action::MoveRight => {
                self.camera.move_right(&self.map);
            }
            Action::PanLeft => self.camera.pan_left(PAN_STEP_DEGREES),
            Action::PanRight => self.camera.pan_right(PAN_STEP_DEGREES),
            Action::Jump => {
                self.camera.jump(&self.map);
            }
            Action::Look {
                yaw_degrees,
                pitch_degrees,
            } => {
                self.camera.rotate_horizontal(yaw_degrees);
                self.camera.rotate_vertical(pitch_degrees);
            }
            Action::EditBlock(edit) => self.edit_block(edit),
            Action::ToggleLighting => {
                self.lighting.enabled = !self.lighting.enabled;
                tracing::debug!(enabled = self.lighting.enabled, "lighting toggled");
            }
            Action::ToggleSpotlight => {
                self.lighting.spotlight = !self.lighting.spotlight;
                tracing::debug!(enabled = self.lighting.spotlight, "spotlight toggled");
            }
            Action::ToggleNormals => {
                self.lighting.show_normals = !self.lighting.show_normals;
            }
            Action::ToggleLightAnimation => {
                self.lighting.animate = !self.lighting.animate;
            }
            Action::PlaceLight(position) => self.lighting.place(position),
        }
    }

    fn edit_block(&mut self, edit: BlockEdit) {
        let cell = block_target(self.camera.eye(), self.camera.forward());
        let changed = match edit {
            BlockEdit::Raise => self.map.raise(cell.x, cell.z),
            BlockEdit::Lower => self.map.lower(cell.x, cell.z),
        };
        if !changed {
            return;
        }
        let height = self.map.height(cell);
        self.event_log.push(match edit {
            BlockEdit::Raise => SceneEvent::BlockRaised { cell, height },
            BlockEdit::Lower => SceneEvent::BlockLowered { cell, height },
        });
    }

    /// Run one frame: actions, jump integration, item pickup, light orbit.
    ///
    /// `elapsed` is the clock reading in seconds; it only drives animation.
    pub fn tick(&mut self, actions: impl IntoIterator<Item = Action>, elapsed: f32) {
        let _span = tracing::info_span!("tick", frame = self.frame).entered();

        for action in actions {
            self.apply(action);
        }
        self.camera.update_jump(&self.map);
        self.collect_items();
        self.lighting.advance(elapsed);

        self.elapsed = elapsed;
        self.frame += 1;
    }

    fn collect_items(&mut self) {
        for cell in self.items.collect_near(self.camera.eye()) {
            self.event_log.push(SceneEvent::ItemCollected {
                cell,
                collected: self.items.collected(),
            });
        }
        if !self.won && self.items.all_collected() {
            self.won = true;
            tracing::info!(frame = self.frame, "all items collected, you win");
            self.event_log.push(SceneEvent::Won { frame: self.frame });
        }
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            camera: &self.camera,
            map: &self.map,
            items: &self.items,
            lighting: &self.lighting,
            assets: &self.assets,
            elapsed: self.elapsed,
        }
    }

    pub fn render<R: Rasterizer>(&self, target: &mut R) -> FrameStats {
        self.renderer.render_frame(&self.frame_view(), target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelwalk_kernel::ITEM_SPOTS;
    use voxelwalk_render::RecordingRasterizer;

    const NO_INPUT: [Action; 0] = [];

    fn open_scene() -> Scene {
        let mut scene = Scene::with_map(&SceneConfig::default(), HeightMap::new(), 0);
        scene.teleport(Vec3::new(0.5, 0.5, 0.5), Vec3::new(0.5, 0.5, -0.5));
        scene
    }

    #[test]
    fn same_seed_same_level() {
        let config = SceneConfig {
            seed: Some(42),
            ..SceneConfig::default()
        };
        let a = Scene::new(&config);
        let b = Scene::new(&config);
        assert_eq!(a.map(), b.map());
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn start_inside_wall_snaps_on_top_after_first_tick() {
        let mut map = HeightMap::new();
        map.set(GridCoord::new(16, 18), 2);
        let mut scene = Scene::with_map(&SceneConfig::default(), map, 0);
        assert_eq!(scene.camera().eye().y, 1.0);
        scene.tick(NO_INPUT, 0.0);
        assert_eq!(scene.camera().eye().y, 2.5);
        assert!(!scene.camera().is_jumping());
    }

    #[test]
    fn item_picked_up_at_its_world_position() {
        let mut scene = open_scene();
        scene.teleport(Vec3::new(-1.0, 0.5, -1.0), Vec3::new(-1.0, 0.5, -2.0));
        scene.tick(NO_INPUT, 0.0);
        assert_eq!(scene.items().collected(), 1);
        assert!(scene.events().contains(&SceneEvent::ItemCollected {
            cell: GridCoord::new(15, 15),
            collected: 1,
        }));
        assert!(!scene.has_won());
    }

    #[test]
    fn collecting_every_item_wins_once() {
        let mut scene = open_scene();
        for (i, spot) in ITEM_SPOTS.iter().enumerate() {
            let (x, z) = spot.world_origin();
            scene.teleport(Vec3::new(x, 0.5, z), Vec3::new(x, 0.5, z - 1.0));
            scene.tick(NO_INPUT, i as f32);
        }
        scene.tick(NO_INPUT, 10.0);
        assert!(scene.has_won());
        let wins = scene
            .events()
            .iter()
            .filter(|e| matches!(e, SceneEvent::Won { .. }))
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn jump_arms_and_integrates_in_the_same_tick() {
        let mut scene = open_scene();
        scene.tick([Action::Jump], 0.0);
        assert!(scene.camera().is_jumping());
        assert!((scene.camera().eye().y - (0.5 + 0.35 - 0.015)).abs() < 1e-5);

        for _ in 0..100 {
            scene.tick(NO_INPUT, 0.0);
        }
        assert!(!scene.camera().is_jumping());
        assert_eq!(scene.camera().eye().y, 0.5);
    }

    #[test]
    fn right_click_raises_then_shift_lowers() {
        let mut scene = open_scene();
        let target = GridCoord::new(16, 14);

        scene.apply(Action::EditBlock(BlockEdit::Raise));
        assert_eq!(scene.map().height(target), 1);
        scene.apply(Action::EditBlock(BlockEdit::Lower));
        assert_eq!(scene.map().height(target), 0);
        scene.apply(Action::EditBlock(BlockEdit::Lower));

        assert_eq!(
            scene.drain_events(),
            vec![
                SceneEvent::BlockRaised {
                    cell: target,
                    height: 1
                },
                SceneEvent::BlockLowered {
                    cell: target,
                    height: 0
                },
            ]
        );
        assert!(scene.events().is_empty());
    }

    #[test]
    fn raised_block_stops_walking() {
        let mut scene = open_scene();
        scene.apply(Action::EditBlock(BlockEdit::Raise));
        let start = scene.camera().eye();
        for _ in 0..20 {
            scene.tick([Action::MoveForward], 0.0);
        }
        let eye = scene.camera().eye();
        assert!(eye.z < start.z);
        // Cell (16, 14) spans world z in [-2, -1).
        assert!(eye.z >= -1.0);
    }

    #[test]
    fn pan_actions_step_yaw() {
        let mut scene = open_scene();
        scene.apply(Action::PanLeft);
        scene.apply(Action::PanRight);
        let f = scene.camera().forward();
        assert!((f - Vec3::NEG_Z).length() < 1e-5);

        scene.apply(Action::PanLeft);
        let f = scene.camera().forward();
        let angle = f.angle_between(Vec3::NEG_Z).to_degrees();
        assert!((angle - PAN_STEP_DEGREES).abs() < 1e-3);
    }

    #[test]
    fn toggles_flip_lighting_switches() {
        let mut scene = open_scene();
        let before = *scene.lighting();
        scene.apply(Action::ToggleLighting);
        scene.apply(Action::ToggleSpotlight);
        scene.apply(Action::ToggleNormals);
        scene.apply(Action::ToggleLightAnimation);
        let after = scene.lighting();
        assert_eq!(after.enabled, !before.enabled);
        assert_eq!(after.spotlight, !before.spotlight);
        assert_eq!(after.show_normals, !before.show_normals);
        assert_eq!(after.animate, !before.animate);
    }

    #[test]
    fn light_orbits_with_elapsed_time() {
        let mut scene = open_scene();
        scene.tick(NO_INPUT, 0.0);
        assert!((scene.lighting().position.x - 5.0).abs() < 1e-5);
        scene.apply(Action::ToggleLightAnimation);
        scene.tick(NO_INPUT, 1.0);
        assert!((scene.lighting().position.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn placing_the_light_stops_its_orbit() {
        let mut scene = open_scene();
        scene.tick([Action::PlaceLight(Vec3::new(1.0, 4.0, -2.0))], 2.0);
        assert!(!scene.lighting().animate);
        scene.tick(NO_INPUT, 3.0);
        assert_eq!(scene.lighting().position, Vec3::new(1.0, 4.0, -2.0));

        let mut rec = RecordingRasterizer::new();
        scene.render(&mut rec);
        assert_eq!(rec.lighting.unwrap().position, Vec3::new(1.0, 4.0, -2.0));
    }

    #[test]
    fn render_reads_current_state() {
        let mut scene = open_scene();
        scene.apply(Action::EditBlock(BlockEdit::Raise));
        scene.tick(NO_INPUT, 0.5);

        let mut rec = RecordingRasterizer::new();
        let stats = scene.render(&mut rec);
        assert_eq!(stats.cubes_drawn, 1);
        assert_eq!(stats.items_drawn, 5);
        assert_eq!(rec.view, Some(scene.camera().view_matrix()));
        assert_eq!(scene.frame_view().elapsed, 0.5);
    }

    #[test]
    fn idle_ticks_do_not_grow_the_log() {
        let mut scene = open_scene();
        for i in 0..10_000 {
            scene.tick(NO_INPUT, i as f32 / 60.0);
        }
        assert_eq!(scene.frame(), 10_000);
        assert!(scene.events().is_empty());

        scene.apply(Action::EditBlock(BlockEdit::Raise));
        for _ in 0..100 {
            scene.tick(NO_INPUT, 0.0);
        }
        assert_eq!(scene.events().len(), 1);
    }
}
