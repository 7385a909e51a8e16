//! Uniform cell grid over the domain
//!
//! Cells are addressed by `(nx, ny)` and stored row-major, so the seed owned by a
//! cell shares the cell's linear index.

use crate::config::GridConfig;
use crate::geometry::Point;

/// Offsets of the 3×3 block around a cell, row by row
const BLOCK: [(i64, i64); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Fixed partition of the domain into `columns × rows` cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGrid {
    columns: u32,
    rows: u32,
    cell_width: f64,
    cell_height: f64,
}

impl CellGrid {
    /// Create the grid described by a validated configuration
    pub fn new(config: &GridConfig) -> Self {
        Self {
            columns: config.columns(),
            rows: config.rows(),
            cell_width: f64::from(config.cell_width),
            cell_height: f64::from(config.cell_height),
        }
    }

    /// Number of cells along x
    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cells along y
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Always false for a grid built from a validated configuration
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell coordinates containing `point`
    ///
    /// Points outside the domain map to out-of-range (possibly negative) coordinates.
    /// Coordinates too large for `i64` saturate; NaN maps to 0, so callers must
    /// reject non-finite points first.
    #[inline]
    pub fn cell_of(&self, point: Point) -> (i64, i64) {
        (
            (point.x / self.cell_width).floor() as i64,
            (point.y / self.cell_height).floor() as i64,
        )
    }

    /// Linear index of cell `(nx, ny)`, or `None` outside the grid
    #[inline]
    pub fn cell_index(&self, nx: i64, ny: i64) -> Option<usize> {
        let in_x = (0..i64::from(self.columns)).contains(&nx);
        let in_y = (0..i64::from(self.rows)).contains(&ny);
        (in_x && in_y).then(|| ny as usize * self.columns as usize + nx as usize)
    }

    /// Cell coordinates of a linear index
    #[inline]
    pub fn cell_coords(&self, index: usize) -> (u32, u32) {
        let columns = self.columns as usize;
        ((index % columns) as u32, (index / columns) as u32)
    }

    /// Linear indices of the 3×3 block centered on `(nx, ny)`, clipped to the grid
    ///
    /// Yields between 0 and 9 indices. The block is empty only when `(nx, ny)`
    /// lies two or more cells outside the grid, including saturated coordinates.
    pub fn block(&self, nx: i64, ny: i64) -> impl Iterator<Item = usize> + '_ {
        BLOCK.iter().filter_map(move |&(dx, dy)| {
            let x = nx.checked_add(dx)?;
            let y = ny.checked_add(dy)?;
            self.cell_index(x, y)
        })
    }

    /// Block around the cell containing `point`
    pub fn block_around(&self, point: Point) -> impl Iterator<Item = usize> + '_ {
        let (nx, ny) = self.cell_of(point);
        self.block(nx, ny)
    }
}
