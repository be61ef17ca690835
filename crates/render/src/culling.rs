use voxelwalk_common::GridCoord;
use voxelwalk_kernel::HeightMap;

/// Columns further than this (in cells, per axis) from the camera are skipped.
pub const DEFAULT_RENDER_DISTANCE: u32 = 20;

/// Occupied columns within a square radius of `center`, in `(x, z)` order.
///
/// `center` may lie outside the grid; the window then covers fewer cells or
/// none at all.
pub fn visible_columns(
    map: &HeightMap,
    center: GridCoord,
    radius: u32,
) -> impl Iterator<Item = (GridCoord, u8)> + '_ {
    map.cells()
        .filter(move |&(coord, height)| height > 0 && coord.chebyshev_distance(center) <= radius)
}
