//! Core/boundary classification and boundary blending
//!
//! A point closer to its nearest seed than that seed's inscribed radius is
//! `Core` and takes the seed's attribute directly. Any other point is
//! `Boundary` and blends the seed with up to two flanking neighbors, one on
//! each side of the ray from the seed through the point.

use crate::error::Result;
use crate::geometry::Point;
use crate::grid::CellGrid;
use crate::query::nearest;
use crate::seed::Seed;

/// Classification of a query point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    /// Strictly inside the nearest seed's inscribed disk
    Core {
        /// Nearest seed index
        seed: usize,
        /// Distance from the point to the seed
        distance: f64,
    },
    /// In the boundary zone of the nearest seed
    Boundary {
        /// Nearest seed index
        seed: usize,
        /// Distance from the point to the seed
        distance: f64,
    },
}

impl Region {
    /// Index of the nearest seed
    #[inline]
    pub fn seed(&self) -> usize {
        match *self {
            Region::Core { seed, .. } | Region::Boundary { seed, .. } => seed,
        }
    }

    /// Distance from the query point to the nearest seed
    #[inline]
    pub fn distance(&self) -> f64 {
        match *self {
            Region::Core { distance, .. } | Region::Boundary { distance, .. } => distance,
        }
    }

    /// Check if the point is in the core zone
    #[inline]
    pub fn is_core(&self) -> bool {
        matches!(self, Region::Core { .. })
    }
}

/// Seeds whose attributes are averaged for one point
///
/// Always contains the nearest seed; boundary points add the best-aligned
/// neighbor from each side of the seed→point line when that side is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendRecipe {
    /// Nearest seed
    pub seed: usize,
    /// Selected neighbor with positive cross-side projection
    pub side_a: Option<usize>,
    /// Selected neighbor with non-positive cross-side projection
    pub side_b: Option<usize>,
}

impl BlendRecipe {
    /// Recipe that uses a single seed's attribute
    #[inline]
    pub fn single(seed: usize) -> Self {
        Self {
            seed,
            side_a: None,
            side_b: None,
        }
    }

    /// Member seed indices: the seed first, then side A, then side B
    pub fn members(&self) -> impl Iterator<Item = usize> {
        std::iter::once(self.seed)
            .chain(self.side_a)
            .chain(self.side_b)
    }

    /// Number of member seeds (1 to 3)
    #[inline]
    pub fn len(&self) -> usize {
        1 + usize::from(self.side_a.is_some()) + usize::from(self.side_b.is_some())
    }

    /// Never empty: the nearest seed is always a member
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Classify `point` as core or boundary of its nearest seed
///
/// Seeds without an inscribed radius have no core zone.
///
/// # Errors
///
/// Returns `OutOfRange` when the point has no addressable cells around it.
pub fn classify(grid: &CellGrid, seeds: &[Seed], point: Point) -> Result<Region> {
    let hit = nearest(grid, seeds, point)?;
    let in_core = seeds[hit.index]
        .radius
        .is_some_and(|radius| hit.distance < radius);

    Ok(if in_core {
        Region::Core {
            seed: hit.index,
            distance: hit.distance,
        }
    } else {
        Region::Boundary {
            seed: hit.index,
            distance: hit.distance,
        }
    })
}

/// Select the flanking neighbors of seed `index` for a boundary point
///
/// With `r` the unit vector from `point` toward the seed and `n` its 90°
/// counter-clockwise rotation, neighbors split by the sign of `v·n`
/// (`v` = unit vector seed→neighbor). On each side the neighbor maximizing
/// `v·r` is kept; ties keep the nearer neighbor.
pub fn flanking_neighbors(seeds: &[Seed], index: usize, point: Point) -> BlendRecipe {
    let seed = &seeds[index];
    let r = point.to(seed.position).normalize();
    let n = r.rotate90ccw();

    let mut side_a: Option<(usize, f64)> = None;
    let mut side_b: Option<(usize, f64)> = None;

    for neighbor in &seed.neighbors {
        let v = seed.position.to(seeds[neighbor.index].position).normalize();
        let projection = v.dot(r);
        let side = if v.dot(n) > 0.0 { &mut side_a } else { &mut side_b };
        if side.map_or(true, |(_, best)| projection > best) {
            *side = Some((neighbor.index, projection));
        }
    }

    BlendRecipe {
        seed: index,
        side_a: side_a.map(|(neighbor, _)| neighbor),
        side_b: side_b.map(|(neighbor, _)| neighbor),
    }
}

/// Build the blend recipe for `point`
///
/// Core points use the nearest seed alone; boundary points add flanking neighbors.
///
/// # Errors
///
/// Returns `OutOfRange` when the point has no addressable cells around it.
pub fn blend_recipe(grid: &CellGrid, seeds: &[Seed], point: Point) -> Result<BlendRecipe> {
    Ok(match classify(grid, seeds, point)? {
        Region::Core { seed, .. } => BlendRecipe::single(seed),
        Region::Boundary { seed, .. } => flanking_neighbors(seeds, seed, point),
    })
}
