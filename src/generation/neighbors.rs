//! Approximate Delaunay neighbor graph
//!
//! A candidate `C` from the 3×3 block around seed `S` is accepted when the two
//! nearest seeds of the midpoint `M = (S + C) / 2`, searched within `M`'s own
//! block, are exactly `{S, C}`. The midpoint then lies on the shared boundary of
//! the two regions.
//!
//! The local search can miss a real Delaunay edge whose shared boundary does not
//! cross the segment `SC` (false negative). Such edges are dropped.
//!
//! It can also accept an edge whose midpoint is nearer to a seed outside `M`'s
//! block (false positive). With square cells this has not been observed. With
//! elongated cells it grows with the aspect ratio, to several percent of the
//! edges at 4:1. See [`MAX_WELL_CONDITIONED_ASPECT`](super::MAX_WELL_CONDITIONED_ASPECT).

use crate::geometry::Point;
use crate::grid::CellGrid;
use crate::query::two_nearest;
use crate::seed::Neighbor;

/// Compute the accepted neighbors of seed `index`, nearest first
///
/// `positions` must hold every seed of the grid; the result depends only on
/// those positions, never on other seeds' neighbor lists.
pub fn find_neighbors(grid: &CellGrid, positions: &[Point], index: usize) -> Vec<Neighbor> {
    let (nx, ny) = grid.cell_coords(index);
    let seed = positions[index];

    let mut neighbors: Vec<Neighbor> = grid
        .block(i64::from(nx), i64::from(ny))
        .filter(|&candidate| candidate != index)
        .filter(|&candidate| {
            let middle = seed.midway(positions[candidate]);
            two_nearest(grid, positions, middle)
                .map(|two| two.is_pair(index, candidate))
                .unwrap_or(false)
        })
        .map(|candidate| Neighbor {
            index: candidate,
            distance: seed.distance_to(positions[candidate]),
        })
        .collect();

    neighbors.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then(a.index.cmp(&b.index))
    });
    neighbors
}
