//! VoronoiGrid main structure

use std::collections::HashSet;

use crate::blend::{blend, Attribute, AttributeSource};
use crate::config::GridConfig;
use crate::error::{Result, VoronoiError};
use crate::generation::generate_seeds;
use crate::geometry::Point;
use crate::grid::CellGrid;
use crate::query::{self, SeedHit, TwoNearest};
use crate::region::{self, BlendRecipe, Region};
use crate::seed::{Neighbor, Seed};

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A complete grid-accelerated approximate Voronoi diagram
///
/// Built once from a [`GridConfig`] and immutable afterwards. Every query is a
/// pure read touching at most nine cells, so a shared reference can serve any
/// number of threads.
///
/// # Examples
///
/// ```
/// use grid_voronoi::*;
///
/// let diagram = VoronoiGrid::build(GridConfig::article()).unwrap();
/// println!("Generated {} seeds", diagram.seed_count());
///
/// let hit = diagram.nearest(Point::new(120.0, 60.0)).unwrap();
/// let seed = diagram.get_seed(hit.index).unwrap();
/// println!("Nearest seed {} has {} neighbors", seed.index, seed.neighbor_count());
/// ```
#[derive(Debug, Clone)]
pub struct VoronoiGrid {
    /// Configuration used to build this diagram
    config: GridConfig,

    /// Cell partition of the domain
    grid: CellGrid,

    /// All seeds, indexed by seed index (= row-major cell index)
    seeds: Vec<Seed>,

    /// Global nearest-seed index (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl VoronoiGrid {
    /// Build a diagram from a configuration
    ///
    /// Places one seed per cell, then computes each seed's neighbor graph and
    /// inscribed radius.
    ///
    /// # Arguments
    ///
    /// * `config` - Grid configuration (domain, cells, margins, hash)
    ///
    /// # Returns
    ///
    /// `Result<VoronoiGrid>` - Finished diagram or error
    ///
    /// # Performance
    ///
    /// O(n) in the number of cells: each seed checks at most 8 candidates, and
    /// each check is a 9-cell search.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration is not servable.
    ///
    /// # Example
    ///
    /// ```
    /// use grid_voronoi::*;
    ///
    /// let config = GridConfigBuilder::new()
    ///     .domain(640, 480)
    ///     .square_cells(32)
    ///     .unwrap()
    ///     .margins(3, 3)
    ///     .hash(SeedHash::ChaCha)
    ///     .hash_seed(12345)
    ///     .build()
    ///     .unwrap();
    ///
    /// let diagram = VoronoiGrid::build(config).unwrap();
    /// assert_eq!(diagram.seed_count(), 20 * 15);
    /// ```
    pub fn build(config: GridConfig) -> Result<Self> {
        let (grid, seeds) = generate_seeds(&config)?;

        // Build spatial index (requires spatial-index feature)
        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let positions: Vec<Point> = seeds.iter().map(|s| s.position).collect();
            SpatialIndex::new(&positions)
        };

        Ok(Self {
            config,
            grid,
            seeds,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to build this diagram
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Get the cell partition
    #[inline]
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Get the number of seeds
    #[inline]
    pub fn seed_count(&self) -> usize {
        self.seeds.len()
    }

    /// Get a seed by index
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get_seed(&self, index: usize) -> Option<&Seed> {
        self.seeds.get(index)
    }

    /// Get the seed owned by cell `(nx, ny)`
    #[inline]
    pub fn seed_at_cell(&self, nx: i64, ny: i64) -> Option<&Seed> {
        self.grid.cell_index(nx, ny).map(|index| &self.seeds[index])
    }

    /// Get all seeds as a slice
    #[inline]
    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    /// Get the accepted neighbors of a seed, nearest first
    ///
    /// Returns an empty slice if the index is invalid.
    pub fn get_neighbors(&self, index: usize) -> &[Neighbor] {
        self.seeds
            .get(index)
            .map(|s| s.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Inscribed safe radius of a seed
    ///
    /// # Errors
    ///
    /// Returns `SeedNotFound` for an invalid index.
    pub fn radius(&self, index: usize) -> Result<Option<f64>> {
        self.seeds
            .get(index)
            .map(|s| s.radius)
            .ok_or(VoronoiError::SeedNotFound(index))
    }

    /// Find the nearest seed to `point`
    ///
    /// Searches the 3×3 cell block around the point; ties go to the lowest index.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the point is not finite or lies two or more cells
    /// outside the grid.
    #[inline]
    pub fn nearest(&self, point: Point) -> Result<SeedHit> {
        query::nearest(&self.grid, self.seeds.as_slice(), point)
    }

    /// Find the two nearest seeds to `point` within its 3×3 cell block
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the point is not finite or lies two or more cells
    /// outside the grid.
    #[inline]
    pub fn two_nearest(&self, point: Point) -> Result<TwoNearest> {
        query::two_nearest(&self.grid, self.seeds.as_slice(), point)
    }

    /// Find the nearest seed by scanning every seed
    ///
    /// O(n) reference for the block search, with the same tie-break.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the point is not finite.
    pub fn nearest_linear(&self, point: Point) -> Result<SeedHit> {
        if !point.is_finite() {
            return Err(VoronoiError::OutOfRange { x: point.x, y: point.y });
        }
        query::nearest_linear(self.seeds.as_slice(), point)
            .ok_or(VoronoiError::OutOfRange { x: point.x, y: point.y })
    }

    /// Find the nearest seed with the KD-tree (requires spatial-index feature)
    ///
    /// Not limited to the 3×3 block, so it also answers points far outside the domain.
    ///
    /// # Performance
    ///
    /// O(log n) per query.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the point is not finite.
    #[cfg(feature = "spatial-index")]
    pub fn nearest_exact(&self, point: Point) -> Result<SeedHit> {
        if !point.is_finite() {
            return Err(VoronoiError::OutOfRange { x: point.x, y: point.y });
        }
        let index = self.spatial_index.find_nearest(point);
        Ok(SeedHit {
            index,
            distance: self.seeds[index].distance_to(point),
        })
    }

    /// Classify `point` as core or boundary of its nearest seed
    ///
    /// # Arguments
    ///
    /// * `point` - Query position, usually a pixel inside the domain
    ///
    /// # Returns
    ///
    /// `Region::Core` when the point is strictly inside the nearest seed's
    /// inscribed radius, `Region::Boundary` otherwise. Both carry the seed index
    /// and the distance to it.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the point is not finite or lies two or more cells
    /// outside the grid.
    ///
    /// # Example
    ///
    /// ```
    /// # use grid_voronoi::*;
    /// let diagram = VoronoiGrid::build(GridConfig::article()).unwrap();
    /// let seed = diagram.get_seed(8).unwrap();
    ///
    /// let region = diagram.classify(seed.position).unwrap();
    /// assert!(region.is_core());
    /// assert_eq!(region.seed(), 8);
    /// ```
    #[inline]
    pub fn classify(&self, point: Point) -> Result<Region> {
        region::classify(&self.grid, &self.seeds, point)
    }

    /// Seeds whose attributes make up the value at `point`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the point is not finite or lies two or more cells
    /// outside the grid.
    #[inline]
    pub fn blend_recipe(&self, point: Point) -> Result<BlendRecipe> {
        region::blend_recipe(&self.grid, &self.seeds, point)
    }

    /// Evaluate a seed attribute at `point`
    ///
    /// Core points take the nearest seed's attribute unchanged; boundary points
    /// average it with the flanking neighbors.
    ///
    /// # Arguments
    ///
    /// * `point` - Query position
    /// * `source` - Attribute lookup per seed (closure, [`IndexedAttributes`](crate::IndexedAttributes), ...)
    ///
    /// # Returns
    ///
    /// The arithmetic mean of the attributes of the 1 to 3 recipe members
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` when the point is not finite or lies two or more cells
    /// outside the grid.
    ///
    /// # Example
    ///
    /// ```
    /// # use grid_voronoi::*;
    /// let diagram = VoronoiGrid::build(GridConfig::article()).unwrap();
    /// let count = diagram.seed_count() as f32;
    /// let hue = |seed: &Seed| 2.0 * seed.index as f32 / (count + 1.0);
    ///
    /// let value = diagram.sample(Point::new(150.0, 50.0), &hue).unwrap();
    /// assert!(value > 0.0 && value < 2.0);
    /// ```
    pub fn sample<A, S>(&self, point: Point, source: &S) -> Result<A>
    where
        A: Attribute,
        S: AttributeSource<A> + ?Sized,
    {
        let recipe = self.blend_recipe(point)?;
        Ok(blend(&recipe, &self.seeds, source))
    }

    /// Unique undirected edges of the neighbor graph as `(low, high)` index pairs
    ///
    /// Sorted, each edge listed once.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .seeds
            .iter()
            .flat_map(|seed| {
                seed.neighbors
                    .iter()
                    .filter(move |n| n.index > seed.index)
                    .map(move |n| (seed.index, n.index))
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// Find seeds within a given hop count from a start seed (BFS)
    ///
    /// Includes the start seed. Returns an empty vec if `start` is invalid.
    pub fn find_seeds_within_hops(&self, start: usize, hops: usize) -> Vec<usize> {
        if start >= self.seeds.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut current = vec![start];
        visited.insert(start);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &index in &current {
                for neighbor in self.get_neighbors(index) {
                    if visited.insert(neighbor.index) {
                        next.push(neighbor.index);
                    }
                }
            }
            current = next;
        }

        let mut found: Vec<usize> = visited.into_iter().collect();
        found.sort_unstable();
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridConfigBuilder, SeedHash};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn article() -> VoronoiGrid {
        VoronoiGrid::build(GridConfig::article()).unwrap()
    }

    fn random_config(rng: &mut ChaCha8Rng) -> GridConfig {
        let cell_w = rng.gen_range(12..80);
        let cell_h = rng.gen_range(12..80);
        GridConfigBuilder::new()
            .domain(cell_w * rng.gen_range(2..10), cell_h * rng.gen_range(2..10))
            .cell_size(cell_w, cell_h)
            .margins(rng.gen_range(1..cell_w / 4), rng.gen_range(1..cell_h / 4))
            .hash(if rng.gen_bool(0.5) { SeedHash::ChaCha } else { SeedHash::Legacy })
            .hash_seed(rng.gen())
            .build()
            .unwrap()
    }

    #[test]
    fn test_build() {
        let diagram = article();
        assert_eq!(diagram.seed_count(), 24);
        assert_eq!(diagram.config(), &GridConfig::article());
        assert_eq!(diagram.grid().columns(), 6);
        assert_eq!(diagram.seeds().len(), 24);
    }

    #[test]
    fn test_build_rejects_bad_config() {
        let config = GridConfig {
            domain_width: 60,
            ..GridConfig::article()
        };
        assert!(matches!(
            VoronoiGrid::build(config),
            Err(VoronoiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_get_seed() {
        let diagram = article();

        assert!(diagram.get_seed(0).is_some());
        assert!(diagram.get_seed(diagram.seed_count()).is_none());

        let seed = diagram.seed_at_cell(2, 1).unwrap();
        assert_eq!(seed.index, 8);
        assert_eq!(seed.position, Point::new(123.0, 88.0));
        assert!(diagram.seed_at_cell(6, 0).is_none());
    }

    #[test]
    fn test_invalid_seed_index() {
        let diagram = article();

        assert!(diagram.get_neighbors(999).is_empty());
        assert_eq!(diagram.radius(999), Err(VoronoiError::SeedNotFound(999)));
        assert!(diagram.find_seeds_within_hops(999, 3).is_empty());
    }

    #[test]
    fn test_radius_is_half_nearest_neighbor() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let diagram = VoronoiGrid::build(random_config(&mut rng)).unwrap();
            for seed in diagram.seeds() {
                match seed.nearest_neighbor() {
                    Some(nearest) => {
                        let radius = diagram.radius(seed.index).unwrap().unwrap();
                        assert_eq!(radius * 2.0, nearest.distance);
                        for neighbor in &seed.neighbors {
                            assert!(radius * 2.0 <= neighbor.distance);
                        }
                    }
                    None => assert_eq!(seed.radius, None),
                }
            }
        }
    }

    #[test]
    fn test_neighbor_lists_sorted_and_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let diagram = VoronoiGrid::build(random_config(&mut rng)).unwrap();
            for seed in diagram.seeds() {
                assert!(seed.neighbor_count() <= 8);
                for pair in seed.neighbors.windows(2) {
                    assert!(pair[0].distance <= pair[1].distance);
                    assert_ne!(pair[0].index, pair[1].index);
                }
                for neighbor in &seed.neighbors {
                    assert_ne!(neighbor.index, seed.index);
                    assert!(neighbor.distance > 0.0);
                    let other = diagram.get_seed(neighbor.index).unwrap();
                    assert!((i64::from(other.nx) - i64::from(seed.nx)).abs() <= 1);
                    assert!((i64::from(other.ny) - i64::from(seed.ny)).abs() <= 1);
                }
            }
        }
    }

    #[test]
    fn test_neighbor_symmetry() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..20 {
            let diagram = VoronoiGrid::build(random_config(&mut rng)).unwrap();
            for seed in diagram.seeds() {
                for neighbor in &seed.neighbors {
                    assert!(
                        diagram.seeds()[neighbor.index].is_neighbor_of(seed.index),
                        "edge {} -> {} has no reverse",
                        seed.index,
                        neighbor.index
                    );
                }
            }
        }
    }

    /// Two nearest seeds of `point` over the whole grid, ranked by `(distance, index)`
    fn global_two_nearest(diagram: &VoronoiGrid, point: Point) -> [usize; 2] {
        let mut hits: Vec<(f64, usize)> = diagram
            .seeds()
            .iter()
            .map(|s| (s.distance_to(point), s.index))
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        [hits[0].1, hits[1].1]
    }

    #[test]
    fn test_square_cell_edges_match_global_two_nearest() {
        let mut checked = 0;
        for cell in [12u32, 16, 20, 25, 32, 40, 50, 64, 80] {
            let mut margins = vec![0, 1, cell / 8, cell / 5, cell / 4];
            margins.sort_unstable();
            margins.dedup();

            for margin in margins {
                for hash_seed in 0..8 {
                    let config = GridConfigBuilder::new()
                        .domain(cell * 6, cell * 5)
                        .square_cells(cell)
                        .unwrap()
                        .margins(margin, margin)
                        .hash(SeedHash::Legacy)
                        .hash_seed(hash_seed)
                        .build()
                        .unwrap();
                    let diagram = VoronoiGrid::build(config).unwrap();

                    for (a, b) in diagram.edges() {
                        let middle = diagram.seeds()[a].position.midway(diagram.seeds()[b].position);
                        let mut pair = global_two_nearest(&diagram, middle);
                        pair.sort_unstable();
                        assert_eq!(pair, [a, b], "edge ({a}, {b}) not Delaunay in {config:?}");
                        checked += 1;
                    }
                }
            }
        }
        assert!(checked > 10_000);
    }

    #[test]
    fn test_determinism() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..5 {
            let config = random_config(&mut rng);
            let a = VoronoiGrid::build(config).unwrap();
            let b = VoronoiGrid::build(config).unwrap();
            assert_eq!(a.seeds(), b.seeds());
            assert_eq!(a.edges(), b.edges());
        }
    }

    #[test]
    fn test_nearest_matches_linear_scan() {
        let diagram = article();

        let mut checked = 0;
        for j in 0..100 {
            for i in 0..100 {
                let point = Point::new(f64::from(i) * 3.0 + 0.5, f64::from(j) * 2.0 + 0.25);
                let block = diagram.nearest(point).unwrap();
                let linear = diagram.nearest_linear(point).unwrap();
                assert_eq!(block, linear, "mismatch at {point:?}");
                checked += 1;
            }
        }
        assert_eq!(checked, 10_000);
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_nearest_exact_agrees_on_distance() {
        let diagram = article();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..2_000 {
            let point = Point::new(rng.gen_range(0.0..300.0), rng.gen_range(0.0..200.0));
            let exact = diagram.nearest_exact(point).unwrap();
            let linear = diagram.nearest_linear(point).unwrap();
            assert!((exact.distance - linear.distance).abs() < 1e-9);
        }

        // The KD-tree also answers far outside the grid
        let far = Point::new(-500.0, -500.0);
        assert!(diagram.nearest(far).is_err());
        assert_eq!(diagram.nearest_exact(far).unwrap().index, 0);
    }

    #[test]
    fn test_two_nearest() {
        let diagram = article();

        let two = diagram.two_nearest(Point::new(130.0, 70.0)).unwrap();
        assert_eq!(two.first.index, 8);
        assert_eq!(two.second.map(|h| h.index), Some(14));
        assert!(two.first.distance <= two.second.unwrap().distance);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let diagram = article();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..500 {
            let point = Point::new(rng.gen_range(-40.0..340.0), rng.gen_range(-40.0..240.0));
            assert_eq!(diagram.nearest(point), diagram.nearest(point));
            assert_eq!(diagram.classify(point), diagram.classify(point));
            assert_eq!(diagram.blend_recipe(point), diagram.blend_recipe(point));
        }
    }

    #[test]
    fn test_light_out_of_domain_queries() {
        let diagram = article();

        // Inside the one-cell apron around the grid
        assert_eq!(diagram.nearest(Point::new(-20.0, -20.0)).unwrap().index, 0);
        assert_eq!(diagram.nearest(Point::new(320.0, 210.0)).unwrap().index, 23);

        assert_eq!(
            diagram.classify(Point::new(-120.0, 10.0)),
            Err(VoronoiError::OutOfRange { x: -120.0, y: 10.0 })
        );
    }

    #[test]
    fn test_unaddressable_points_are_rejected() {
        let diagram = article();

        for point in [
            Point::new(f64::INFINITY, 10.0),
            Point::new(1e300, 10.0),
            Point::new(10.0, -1e300),
            Point::new(f64::NAN, f64::NAN),
            Point::new(f64::NAN, 10.0),
        ] {
            assert!(matches!(diagram.nearest(point), Err(VoronoiError::OutOfRange { .. })));
            assert!(matches!(diagram.two_nearest(point), Err(VoronoiError::OutOfRange { .. })));
            assert!(matches!(diagram.classify(point), Err(VoronoiError::OutOfRange { .. })));
            assert!(matches!(diagram.blend_recipe(point), Err(VoronoiError::OutOfRange { .. })));
            assert!(diagram.sample(point, &|seed: &Seed| seed.index as f64).is_err());
        }

        // The full scans still answer points far outside the grid
        let far = Point::new(1e6, 10.0);
        assert!(diagram.nearest(far).is_err());
        assert_eq!(diagram.nearest_linear(far).unwrap().index, 17);
        for point in [Point::new(f64::NAN, 10.0), Point::new(0.0, f64::NEG_INFINITY)] {
            assert!(diagram.nearest_linear(point).is_err());
            #[cfg(feature = "spatial-index")]
            assert!(diagram.nearest_exact(point).is_err());
        }
    }

    #[test]
    fn test_sample() {
        let diagram = article();
        let values: Vec<f64> = (0..diagram.seed_count()).map(|i| i as f64).collect();
        let source = crate::blend::IndexedAttributes(&values);

        // Core point: exact seed value
        assert_eq!(diagram.sample(Point::new(125.0, 95.0), &source).unwrap(), 8.0);

        // Boundary point: mean of seeds 14, 20 and 15
        let value = diagram.sample(Point::new(100.0, 100.0), &source).unwrap();
        assert!((value - 49.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_edges() {
        let diagram = article();
        let edges = diagram.edges();

        let ends: usize = diagram.seeds().iter().map(Seed::neighbor_count).sum();
        assert_eq!(edges.len() * 2, ends);
        assert!(edges.iter().all(|&(a, b)| a < b));
        assert!(edges.contains(&(7, 8)));
        assert!(edges.contains(&(0, 1)));
        assert!(!edges.contains(&(0, 7)));
    }

    #[test]
    fn test_find_seeds_within_hops() {
        let diagram = article();

        assert_eq!(diagram.find_seeds_within_hops(0, 0), vec![0]);
        assert_eq!(diagram.find_seeds_within_hops(0, 1), vec![0, 1, 6]);

        let two_hops = diagram.find_seeds_within_hops(0, 2);
        assert!(two_hops.len() > 3);
        assert!(two_hops.contains(&7));
    }

    #[test]
    fn test_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VoronoiGrid>();

        let diagram = article();
        std::thread::scope(|scope| {
            for t in 0..4 {
                let diagram = &diagram;
                scope.spawn(move || {
                    let point = Point::new(40.0 + f64::from(t) * 50.0, 90.0);
                    diagram.classify(point).unwrap()
                });
            }
        });
    }
}
