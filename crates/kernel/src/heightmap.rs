use serde::{Deserialize, Serialize};
use voxelwalk_common::{GRID_SIZE, GridCoord, MAX_BLOCK_HEIGHT};

const BOUNDARY_HEIGHT: u8 = 3;
const MAZE_HEIGHT: u8 = 2;
const PILLAR_HEIGHT: u8 = 4;
const PILLAR_SHOULDER_HEIGHT: u8 = 3;
const COVER_HEIGHT: u8 = 1;

/// Maze stripes run along Z at every 4th column, with a gap each time `z % 8 == 4`.
const MAZE_STRIDE: usize = 4;
const MAZE_GAP_PERIOD: i32 = 8;
const MAZE_GAP_PHASE: i32 = 4;

/// Cleared 4x4 spawn arena at the grid center, on both axes.
const ARENA: std::ops::Range<i32> = 14..18;

const PILLAR_COUNT: i32 = 10;
const COVER_ATTEMPTS: usize = 15;

/// Square grid of integer column heights, indexed by `(x, z)`.
///
/// Reads outside the grid return 0 and edits outside it are ignored. The map
/// itself never treats out-of-bounds cells as solid; that is a movement rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightMap {
    cells: Vec<u8>,
}

impl Default for HeightMap {
    fn default() -> Self {
        Self::new()
    }
}

impl HeightMap {
    /// An all-empty map.
    pub fn new() -> Self {
        Self {
            cells: vec![0; (GRID_SIZE * GRID_SIZE) as usize],
        }
    }

    /// Build the explorable level.
    ///
    /// Everything except the low-cover pass is deterministic; cover placement
    /// draws from `rng` and only ever raises empty cells to height 1.
    pub fn generate(rng: &mut fastrand::Rng) -> Self {
        let mut map = Self::new();
        map.build_boundary();
        map.build_maze();
        map.build_pillars();
        map.clear_rect(ARENA, ARENA);
        map.scatter_cover(rng);
        map.clear_rect(1..4, 1..4);

        tracing::debug!(
            columns = map.column_count(),
            blocks = map.block_count(),
            "height map generated"
        );
        map
    }

    fn index(coord: GridCoord) -> Option<usize> {
        coord
            .in_bounds()
            .then(|| (coord.x * GRID_SIZE + coord.z) as usize)
    }

    /// Column height at `(x, z)`, or 0 outside the grid.
    pub fn height_at(&self, x: i32, z: i32) -> u8 {
        self.height(GridCoord::new(x, z))
    }

    /// Column height at a cell, or 0 outside the grid.
    pub fn height(&self, coord: GridCoord) -> u8 {
        Self::index(coord).map_or(0, |i| self.cells[i])
    }

    /// Overwrite a cell, clamping to `MAX_BLOCK_HEIGHT`. Returns false outside the grid.
    pub fn set(&mut self, coord: GridCoord, height: u8) -> bool {
        match Self::index(coord) {
            Some(i) => {
                self.cells[i] = height.min(MAX_BLOCK_HEIGHT);
                true
            }
            None => false,
        }
    }

    /// Stack one more block on `(x, z)`. Returns whether the height changed.
    pub fn raise(&mut self, x: i32, z: i32) -> bool {
        let coord = GridCoord::new(x, z);
        let Some(i) = Self::index(coord) else {
            return false;
        };
        if self.cells[i] >= MAX_BLOCK_HEIGHT {
            return false;
        }
        self.cells[i] += 1;
        tracing::debug!(x, z, height = self.cells[i], "block added");
        true
    }

    /// Remove the top block from `(x, z)`. Returns whether the height changed.
    pub fn lower(&mut self, x: i32, z: i32) -> bool {
        let coord = GridCoord::new(x, z);
        let Some(i) = Self::index(coord) else {
            return false;
        };
        if self.cells[i] == 0 {
            return false;
        }
        self.cells[i] -= 1;
        tracing::debug!(x, z, height = self.cells[i], "block removed");
        true
    }

    /// All cells with their heights, in `(x, z)` order.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoord, u8)> + '_ {
        self.cells.iter().enumerate().map(|(i, &h)| {
            let i = i as i32;
            (GridCoord::new(i / GRID_SIZE, i % GRID_SIZE), h)
        })
    }

    /// Number of cells with at least one block.
    pub fn column_count(&self) -> usize {
        self.cells.iter().filter(|&&h| h > 0).count()
    }

    /// Total number of unit blocks across all columns.
    pub fn block_count(&self) -> usize {
        self.cells.iter().map(|&h| h as usize).sum()
    }

    /// Top-down view, one row per Z, `.` for empty and the digit height otherwise.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((GRID_SIZE + 1) * GRID_SIZE) as usize);
        for z in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                match self.height_at(x, z) {
                    0 => out.push('.'),
                    h => out.push(char::from(b'0' + h)),
                }
            }
            out.push('\n');
        }
        out
    }

    fn build_boundary(&mut self) {
        let last = GRID_SIZE - 1;
        for i in 0..GRID_SIZE {
            self.set(GridCoord::new(i, 0), BOUNDARY_HEIGHT);
            self.set(GridCoord::new(i, last), BOUNDARY_HEIGHT);
            self.set(GridCoord::new(0, i), BOUNDARY_HEIGHT);
            self.set(GridCoord::new(last, i), BOUNDARY_HEIGHT);
        }
    }

    fn build_maze(&mut self) {
        for x in (4..GRID_SIZE - 4).step_by(MAZE_STRIDE) {
            for z in 2..GRID_SIZE - 2 {
                if z % MAZE_GAP_PERIOD != MAZE_GAP_PHASE {
                    self.set(GridCoord::new(x, z), MAZE_HEIGHT);
                }
            }
        }
    }

    fn build_pillars(&mut self) {
        for i in 0..PILLAR_COUNT {
            let x = 6 + i * 2;
            let z = 6 + (i % 3) * 8;
            if x < 26 && z < 26 {
                self.set(GridCoord::new(x, z), PILLAR_HEIGHT);
                self.set(GridCoord::new(x + 1, z), PILLAR_SHOULDER_HEIGHT);
            }
        }
    }

    fn scatter_cover(&mut self, rng: &mut fastrand::Rng) {
        for _ in 0..COVER_ATTEMPTS {
            let coord = GridCoord::new(rng.i32(3..29), rng.i32(3..29));
            if ARENA.contains(&coord.x) && ARENA.contains(&coord.z) {
                continue;
            }
            if self.height(coord) == 0 {
                self.set(coord, COVER_HEIGHT);
            }
        }
    }

    fn clear_rect(&mut self, xs: std::ops::Range<i32>, zs: std::ops::Range<i32>) {
        for x in xs {
            for z in zs.clone() {
                self.set(GridCoord::new(x, z), 0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(seed: u64) -> HeightMap {
        HeightMap::generate(&mut fastrand::Rng::with_seed(seed))
    }

    #[test]
    fn new_map_is_empty() {
        let map = HeightMap::new();
        assert_eq!(map.column_count(), 0);
        assert_eq!(map.cells().count(), (GRID_SIZE * GRID_SIZE) as usize);
    }

    #[test]
    fn out_of_bounds_reads_are_empty() {
        let mut map = HeightMap::new();
        for x in 0..GRID_SIZE {
            map.set(GridCoord::new(x, 0), 4);
        }
        assert_eq!(map.height_at(-1, 0), 0);
        assert_eq!(map.height_at(32, 0), 0);
        assert_eq!(map.height_at(0, 1000), 0);
    }

    #[test]
    fn raise_then_lower_restores_height() {
        let mut map = HeightMap::new();
        map.set(GridCoord::new(5, 7), 2);
        assert!(map.raise(5, 7));
        assert_eq!(map.height_at(5, 7), 3);
        assert!(map.lower(5, 7));
        assert_eq!(map.height_at(5, 7), 2);
    }

    #[test]
    fn raise_clamps_at_max() {
        let mut map = HeightMap::new();
        map.set(GridCoord::new(1, 1), MAX_BLOCK_HEIGHT);
        assert!(!map.raise(1, 1));
        assert_eq!(map.height_at(1, 1), MAX_BLOCK_HEIGHT);
    }

    #[test]
    fn lower_clamps_at_zero() {
        let mut map = HeightMap::new();
        assert!(!map.lower(1, 1));
        assert_eq!(map.height_at(1, 1), 0);
    }

    #[test]
    fn edits_outside_grid_are_ignored() {
        let mut map = HeightMap::new();
        let before = map.clone();
        assert!(!map.raise(-1, 3));
        assert!(!map.raise(32, 3));
        assert!(!map.lower(3, -5));
        assert!(!map.lower(i32::MAX, i32::MIN));
        assert_eq!(map, before);
    }

    #[test]
    fn set_clamps_to_max_height() {
        let mut map = HeightMap::new();
        assert!(map.set(GridCoord::new(2, 2), 9));
        assert_eq!(map.height_at(2, 2), MAX_BLOCK_HEIGHT);
    }

    #[test]
    fn generation_builds_solid_boundary_ring() {
        for seed in 0..20 {
            let map = generated(seed);
            for i in 0..GRID_SIZE {
                assert_eq!(map.height_at(i, 0), 3);
                assert_eq!(map.height_at(i, GRID_SIZE - 1), 3);
                assert_eq!(map.height_at(0, i), 3);
                assert_eq!(map.height_at(GRID_SIZE - 1, i), 3);
            }
        }
    }

    #[test]
    fn generation_clears_center_arena_and_start_corner() {
        for seed in 0..20 {
            let map = generated(seed);
            for x in 14..18 {
                for z in 14..18 {
                    assert_eq!(map.height_at(x, z), 0, "arena cell ({x}, {z})");
                }
            }
            for x in 1..4 {
                for z in 1..4 {
                    assert_eq!(map.height_at(x, z), 0, "start cell ({x}, {z})");
                }
            }
        }
    }

    #[test]
    fn cover_never_lands_in_arena() {
        for seed in 0..1000 {
            let map = generated(seed);
            for x in ARENA {
                for z in ARENA {
                    assert_eq!(map.height_at(x, z), 0, "seed {seed} arena cell ({x}, {z})");
                }
            }
        }
    }

    #[test]
    fn generation_lays_maze_stripes_with_gaps() {
        let map = generated(1);
        // z = 4, 12, 20, 28 are passages
        assert_eq!(map.height_at(4, 3), 2);
        assert_ne!(map.height_at(4, 4), 2);
        assert_eq!(map.height_at(8, 10), 2);
        assert_ne!(map.height_at(8, 12), 2);
    }

    #[test]
    fn generation_places_pillars_with_shoulder() {
        let map = generated(3);
        assert_eq!(map.height_at(6, 6), 4);
        assert_eq!(map.height_at(7, 6), 3);
        assert_eq!(map.height_at(8, 14), 4);
        assert_eq!(map.height_at(9, 14), 3);
        assert_eq!(map.height_at(10, 22), 4);
    }

    #[test]
    fn cover_only_fills_empty_cells() {
        // Replay generation without the cover pass and compare cell by cell.
        let mut base = HeightMap::new();
        base.build_boundary();
        base.build_maze();
        base.build_pillars();
        base.clear_rect(14..18, 14..18);

        for seed in 0..20 {
            let map = generated(seed);
            for ((coord, before), (_, after)) in base.cells().zip(map.cells()) {
                let in_start = (1..4).contains(&coord.x) && (1..4).contains(&coord.z);
                if in_start {
                    continue;
                }
                if before != after {
                    assert_eq!(before, 0, "cover overwrote {coord:?}");
                    assert_eq!(after, 1);
                }
            }
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        assert_eq!(generated(42), generated(42));
    }

    #[test]
    fn ascii_view_has_one_row_per_z() {
        let map = generated(0);
        let ascii = map.to_ascii();
        let rows: Vec<&str> = ascii.lines().collect();
        assert_eq!(rows.len(), GRID_SIZE as usize);
        assert!(rows[0].chars().all(|c| c == '3'));
        assert_eq!(&rows[16][14..18], "....");
    }
}
