//! Exact global nearest-seed lookups
//!
//! This module is only available with the `spatial-index` feature. The grid
//! block search is the primary query path; the KD-tree answers the same question
//! over every seed and serves as an independent check.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

#[cfg(feature = "spatial-index")]
use crate::geometry::Point;

/// Wrapper around a 2D KD-tree of seed positions
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build the index from seed positions
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let positions = vec![
    ///     Point::new(10.0, 10.0),
    ///     Point::new(60.0, 10.0),
    ///     Point::new(35.0, 60.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&positions);
    /// assert_eq!(index.find_nearest(Point::new(55.0, 20.0)), 1);
    /// # }
    /// ```
    pub fn new(positions: &[Point]) -> Self {
        let points: Vec<[f64; 2]> = positions.iter().map(|p| [p.x, p.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the seed nearest to `point`
    ///
    /// When several seeds are equally near, any one of them may be returned.
    pub fn find_nearest(&self, point: Point) -> usize {
        let query = [point.x, point.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item
    }
}

#[cfg(feature = "spatial-index")]
impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let positions = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
        ];

        let index = SpatialIndex::new(&positions);

        assert_eq!(index.find_nearest(Point::new(10.0, 5.0)), 0);
        assert_eq!(index.find_nearest(Point::new(95.0, 1.0)), 1);
        assert_eq!(index.find_nearest(Point::new(3.0, 80.0)), 2);
        assert_eq!(index.find_nearest(Point::new(70.0, 70.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let positions = vec![Point::new(5.0, 23.0), Point::new(86.0, 22.0)];

        let index = SpatialIndex::new(&positions);

        assert_eq!(index.find_nearest(positions[0]), 0);
        assert_eq!(index.find_nearest(positions[1]), 1);
    }
}
