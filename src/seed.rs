//! Seed structure
//!
//! A seed is the generating point of one Voronoi-like region. Seeds live in a
//! single arena owned by [`VoronoiGrid`](crate::VoronoiGrid); neighbor links are
//! indices into that arena.

use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Accepted neighbor of a seed
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index of the neighboring seed
    pub index: usize,
    /// Distance between the two seeds
    pub distance: f64,
}

/// A single seed and its approximate Delaunay neighborhood
///
/// # Invariants
///
/// - `position` lies strictly inside cell `(nx, ny)` minus the configured margins
/// - `neighbors` is sorted ascending by `(distance, index)` and holds at most 8 entries
/// - `radius` is half the distance to `neighbors[0]`, or `None` when no neighbor was accepted
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    /// Unique identifier, equal to the owning cell's row-major index
    pub index: usize,

    /// Location in the domain
    pub position: Point,

    /// Owning cell column
    pub nx: u32,

    /// Owning cell row
    pub ny: u32,

    /// Inscribed safe radius
    ///
    /// A disk of this radius around the seed never crosses the boundary shared
    /// with its nearest accepted neighbor.
    pub radius: Option<f64>,

    /// Accepted neighbors, nearest first
    pub neighbors: Vec<Neighbor>,
}

impl Seed {
    /// Create a seed from its parts
    ///
    /// The radius is derived from the first neighbor, so `neighbors` must already
    /// be sorted.
    pub fn new(index: usize, position: Point, nx: u32, ny: u32, neighbors: Vec<Neighbor>) -> Self {
        let radius = neighbors.first().map(|n| n.distance / 2.0);
        Self {
            index,
            position,
            nx,
            ny,
            radius,
            neighbors,
        }
    }

    /// Horizontal coordinate of the seed
    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Vertical coordinate of the seed
    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Get the number of accepted neighbors
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if another seed is an accepted neighbor
    #[inline]
    pub fn is_neighbor_of(&self, other_index: usize) -> bool {
        self.neighbors.iter().any(|n| n.index == other_index)
    }

    /// Closest accepted neighbor
    #[inline]
    pub fn nearest_neighbor(&self) -> Option<Neighbor> {
        self.neighbors.first().copied()
    }

    /// Distance from the seed to `point`
    #[inline]
    pub fn distance_to(&self, point: Point) -> f64 {
        self.position.distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_seed() -> Seed {
        Seed::new(
            8,
            Point::from_pixel(123, 63),
            2,
            1,
            vec![
                Neighbor { index: 7, distance: 40.0 },
                Neighbor { index: 1, distance: 55.0 },
                Neighbor { index: 2, distance: 57.0 },
            ],
        )
    }

    #[test]
    fn test_seed_creation() {
        let seed = sample_seed();

        assert_eq!(seed.index, 8);
        assert_eq!(seed.x(), 123.0);
        assert_eq!(seed.y(), 63.0);
        assert_eq!((seed.nx, seed.ny), (2, 1));
        assert_eq!(seed.neighbor_count(), 3);
        assert!(seed.is_neighbor_of(1));
        assert!(!seed.is_neighbor_of(99));
    }

    #[test]
    fn test_radius_from_nearest_neighbor() {
        let seed = sample_seed();
        assert_eq!(seed.radius, Some(20.0));
        assert_eq!(seed.nearest_neighbor().map(|n| n.index), Some(7));
    }

    #[test]
    fn test_isolated_seed_has_no_radius() {
        let seed = Seed::new(0, Point::new(5.0, 5.0), 0, 0, vec![]);
        assert_eq!(seed.radius, None);
        assert_eq!(seed.nearest_neighbor(), None);
    }

    #[test]
    fn test_distance_to() {
        let seed = Seed::new(0, Point::new(0.0, 0.0), 0, 0, vec![]);
        assert_eq!(seed.distance_to(Point::new(3.0, 4.0)), 5.0);
    }
}
