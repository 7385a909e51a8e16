//! Nearest-seed queries over the clipped 3×3 cell block
//!
//! Candidates are the seeds of the (at most nine) cells around the query point.
//! Ranking is by Euclidean distance with ties broken by lowest seed index, so
//! every query is reproducible.

use std::cmp::Ordering;

use crate::error::{Result, VoronoiError};
use crate::geometry::Point;
use crate::grid::CellGrid;
use crate::seed::Seed;

/// Read access to seed positions by arena index
///
/// Implemented for bare position slices (used while the graph is being built)
/// and for finished seed slices.
pub trait SeedPositions {
    /// Position of the seed at `index`
    fn position(&self, index: usize) -> Point;

    /// Number of seeds
    fn seed_count(&self) -> usize;
}

impl SeedPositions for [Point] {
    #[inline]
    fn position(&self, index: usize) -> Point {
        self[index]
    }

    #[inline]
    fn seed_count(&self) -> usize {
        self.len()
    }
}

impl SeedPositions for [Seed] {
    #[inline]
    fn position(&self, index: usize) -> Point {
        self[index].position
    }

    #[inline]
    fn seed_count(&self) -> usize {
        self.len()
    }
}

/// A seed found by a query, with its distance to the query point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedHit {
    /// Seed index
    pub index: usize,
    /// Distance from the query point
    pub distance: f64,
}

impl SeedHit {
    /// Order by distance, then by index
    #[inline]
    fn rank(&self, other: &SeedHit) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.index.cmp(&other.index))
    }
}

/// Result of a two-nearest query
///
/// `second` is `None` when the block held a single seed. That is a partial
/// result, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoNearest {
    /// Nearest seed
    pub first: SeedHit,
    /// Runner-up, if the block had one
    pub second: Option<SeedHit>,
}

impl TwoNearest {
    /// Check whether the two nearest seeds are exactly the unordered pair `{a, b}`
    pub fn is_pair(&self, a: usize, b: usize) -> bool {
        match self.second {
            Some(second) => {
                (self.first.index == a && second.index == b)
                    || (self.first.index == b && second.index == a)
            }
            None => false,
        }
    }
}

fn hits<'a, P>(
    grid: &'a CellGrid,
    seeds: &'a P,
    point: Point,
) -> Result<impl Iterator<Item = SeedHit> + 'a>
where
    P: SeedPositions + ?Sized,
{
    // Non-finite points have no cell
    if !point.is_finite() {
        return Err(out_of_range(point));
    }
    Ok(grid.block_around(point).map(move |index| SeedHit {
        index,
        distance: seeds.position(index).distance_to(point),
    }))
}

#[inline]
fn out_of_range(point: Point) -> VoronoiError {
    VoronoiError::OutOfRange { x: point.x, y: point.y }
}

/// Find the nearest seed to `point` among the 3×3 block around its cell
///
/// # Errors
///
/// Returns `OutOfRange` when the point is not finite or the clipped block is empty.
pub fn nearest<P>(grid: &CellGrid, seeds: &P, point: Point) -> Result<SeedHit>
where
    P: SeedPositions + ?Sized,
{
    hits(grid, seeds, point)?
        .min_by(SeedHit::rank)
        .ok_or_else(|| out_of_range(point))
}

/// Find the two nearest seeds to `point` among the 3×3 block around its cell
///
/// # Errors
///
/// Returns `OutOfRange` when the point is not finite or the clipped block is empty.
pub fn two_nearest<P>(grid: &CellGrid, seeds: &P, point: Point) -> Result<TwoNearest>
where
    P: SeedPositions + ?Sized,
{
    let mut first: Option<SeedHit> = None;
    let mut second: Option<SeedHit> = None;

    for hit in hits(grid, seeds, point)? {
        match first {
            Some(best) if hit.rank(&best) != Ordering::Less => {
                if second.map_or(true, |runner_up| hit.rank(&runner_up) == Ordering::Less) {
                    second = Some(hit);
                }
            }
            _ => {
                second = first;
                first = Some(hit);
            }
        }
    }

    let first = first.ok_or_else(|| out_of_range(point))?;
    Ok(TwoNearest { first, second })
}

/// Find the nearest seed by scanning every seed
///
/// Reference implementation for cross-checking the block search. Returns `None`
/// only for an empty seed set.
pub fn nearest_linear<P>(seeds: &P, point: Point) -> Option<SeedHit>
where
    P: SeedPositions + ?Sized,
{
    (0..seeds.seed_count())
        .map(|index| SeedHit {
            index,
            distance: seeds.position(index).distance_to(point),
        })
        .min_by(SeedHit::rank)
}
