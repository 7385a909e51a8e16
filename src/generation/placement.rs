//! Seed placement, one seed per grid cell
//!
//! The x offset is hashed from the cell coordinates; the y offset is hashed from
//! the x offset (and the row, for the ChaCha hash), which decorrelates the two axes.

use crate::config::GridConfig;
use crate::geometry::Point;
use crate::grid::CellGrid;

use super::hash::CellHasher;

/// Place the seed of cell `(nx, ny)`
///
/// The result lies in `[nx*cw + mx, (nx+1)*cw - mx)` × `[ny*ch + my, (ny+1)*ch - my)`.
/// Identical inputs always yield the identical point.
pub fn place_seed(config: &GridConfig, hasher: &CellHasher, nx: u32, ny: u32) -> Point {
    let ox = u64::from(config.margin_x)
        + hasher.hash(i64::from(nx), i64::from(ny)) % u64::from(config.span_x());
    let oy = u64::from(config.margin_y)
        + hasher.offset_hash(ox as i64, i64::from(ny)) % u64::from(config.span_y());

    let x = u64::from(nx) * u64::from(config.cell_width) + ox;
    let y = u64::from(ny) * u64::from(config.cell_height) + oy;
    Point::new(x as f64, y as f64)
}

/// Place every seed of the grid, in row-major cell order
pub fn place_seeds(config: &GridConfig, grid: &CellGrid) -> Vec<Point> {
    let hasher = CellHasher::new(config);
    (0..grid.len())
        .map(|index| {
            let (nx, ny) = grid.cell_coords(index);
            place_seed(config, &hasher, nx, ny)
        })
        .collect()
}
