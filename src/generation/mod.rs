//! Construction pipeline
//!
//! Places one seed per cell, then computes every seed's neighbor graph and
//! inscribed radius in a single pass over the placed positions.

mod hash;
mod neighbors;
mod placement;

pub use hash::CellHasher;
pub use neighbors::find_neighbors;
pub use placement::{place_seed, place_seeds};

use std::time::Instant;

use tracing::{debug, warn};

use crate::config::GridConfig;
use crate::error::Result;
use crate::grid::CellGrid;
use crate::seed::Seed;

/// Cell aspect ratio above which the local neighbor test regularly accepts
/// edges whose midpoint is nearer to a seed outside the 3×3 block
pub const MAX_WELL_CONDITIONED_ASPECT: f64 = 2.0;

/// Generate the grid and its finished seeds from a configuration
///
/// Seeds are returned in row-major cell order, so `seeds[i].index == i`.
///
/// # Errors
///
/// Returns `InvalidConfig` if the configuration fails validation. No partial
/// structure is produced.
pub fn generate_seeds(config: &GridConfig) -> Result<(CellGrid, Vec<Seed>)> {
    config.validate()?;
    let grid = CellGrid::new(config);

    let aspect = f64::from(config.cell_width.max(config.cell_height))
        / f64::from(config.cell_width.min(config.cell_height));
    if aspect > MAX_WELL_CONDITIONED_ASPECT {
        warn!(
            cell_width = config.cell_width,
            cell_height = config.cell_height,
            aspect,
            "elongated cells; the neighbor graph may keep non-Delaunay edges"
        );
    }

    // Step 1: Place one seed per cell
    let placement_start = Instant::now();
    let positions = place_seeds(config, &grid);
    let placement_time = placement_start.elapsed();

    // Step 2: Neighbor graph and radius per seed, reading positions only
    let graph_start = Instant::now();
    let seeds: Vec<Seed> = positions
        .iter()
        .enumerate()
        .map(|(index, &position)| {
            let (nx, ny) = grid.cell_coords(index);
            let neighbors = find_neighbors(&grid, &positions, index);
            if neighbors.is_empty() {
                warn!(index, nx, ny, "seed has no accepted neighbors; radius undefined");
            }
            Seed::new(index, position, nx, ny, neighbors)
        })
        .collect();
    let graph_time = graph_start.elapsed();

    let edge_ends: usize = seeds.iter().map(Seed::neighbor_count).sum();
    debug!(
        columns = grid.columns(),
        rows = grid.rows(),
        seeds = seeds.len(),
        edges = edge_ends / 2,
        ?placement_time,
        ?graph_time,
        "generated seed grid"
    );

    Ok((grid, seeds))
}
