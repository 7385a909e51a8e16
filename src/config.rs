//! Grid configuration and builder
//!
//! All tunables of the engine live in one immutable [`GridConfig`] value that is
//! passed into construction. A config can only be obtained through
//! [`GridConfigBuilder::build`], which rejects every layout the engine cannot serve.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};

/// Hash family used to derive per-cell seed offsets
///
/// Both variants are deterministic in `(hash_seed, a, b)`. They produce different
/// layouts for the same seed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeedHash {
    /// First word of a ChaCha8 stream keyed by the hash seed, one stream per `(a, b)`
    #[default]
    ChaCha,
    /// Integer multiply-xorshift mixer (`0x45d9f3b`)
    ///
    /// With `hash_seed = 0` this reproduces the article's seed positions.
    Legacy,
}

/// Configuration for deterministic grid construction
///
/// The same configuration always produces the identical seed layout and
/// neighbor graph.
///
/// # Example
///
/// ```rust
/// use grid_voronoi::*;
///
/// let config = GridConfigBuilder::new()
///     .domain(300, 200)
///     .cell_size(50, 50)
///     .margins(5, 5)
///     .hash_seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.columns(), 6);
/// assert_eq!(config.rows(), 4);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Domain width in pixels/units
    pub domain_width: u32,
    /// Domain height in pixels/units
    pub domain_height: u32,
    /// Width of one grid cell
    pub cell_width: u32,
    /// Height of one grid cell
    pub cell_height: u32,
    /// Horizontal keep-out distance from cell edges for seed placement
    pub margin_x: u32,
    /// Vertical keep-out distance from cell edges for seed placement
    pub margin_y: u32,
    /// Seed of the offset hash
    pub hash_seed: u64,
    /// Offset hash family
    pub hash: SeedHash,
}

impl GridConfig {
    /// Layout used by the illustrated article: 300×200 domain, 50×50 cells, margin 5,
    /// legacy hash with seed 0
    pub fn article() -> Self {
        Self {
            domain_width: 300,
            domain_height: 200,
            cell_width: 50,
            cell_height: 50,
            margin_x: 5,
            margin_y: 5,
            hash_seed: 0,
            hash: SeedHash::Legacy,
        }
    }

    /// Number of whole cells along x
    #[inline]
    pub fn columns(&self) -> u32 {
        self.domain_width / self.cell_width
    }

    /// Number of whole cells along y
    #[inline]
    pub fn rows(&self) -> u32 {
        self.domain_height / self.cell_height
    }

    /// Total number of cells, and therefore of seeds
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Range of x offsets a seed may take inside its cell
    #[inline]
    pub(crate) fn span_x(&self) -> u32 {
        self.cell_width - 2 * self.margin_x
    }

    /// Range of y offsets a seed may take inside its cell
    #[inline]
    pub(crate) fn span_y(&self) -> u32 {
        self.cell_height - 2 * self.margin_y
    }

    /// Check every cross-field constraint of the configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for zero dimensions, margins of half a cell or more,
    /// and grids with fewer than two cells along an axis.
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("domain width", self.domain_width),
            ("domain height", self.domain_height),
            ("cell width", self.cell_width),
            ("cell height", self.cell_height),
        ];
        for (name, value) in dims {
            if value == 0 {
                return Err(VoronoiError::InvalidConfig(format!("{name} must be positive")));
            }
        }

        if u64::from(self.cell_width) <= 2 * u64::from(self.margin_x) {
            return Err(VoronoiError::InvalidConfig(format!(
                "cell width {} leaves no room inside margin {}",
                self.cell_width, self.margin_x
            )));
        }
        if u64::from(self.cell_height) <= 2 * u64::from(self.margin_y) {
            return Err(VoronoiError::InvalidConfig(format!(
                "cell height {} leaves no room inside margin {}",
                self.cell_height, self.margin_y
            )));
        }

        if self.columns() < 2 || self.rows() < 2 {
            return Err(VoronoiError::InvalidConfig(format!(
                "grid must have at least 2x2 cells (got {}x{})",
                self.columns(),
                self.rows()
            )));
        }

        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::article()
    }
}

/// Builder for creating a validated [`GridConfig`]
///
/// # Example
///
/// ```rust
/// use grid_voronoi::*;
///
/// // Use defaults (the article layout)
/// let config = GridConfigBuilder::new().build().unwrap();
/// assert_eq!(config, GridConfig::article());
///
/// // Square cells everywhere, ChaCha offsets
/// let config = GridConfigBuilder::new()
///     .domain(640, 480)
///     .square_cells(40)
///     .unwrap()
///     .margins(4, 4)
///     .hash(SeedHash::ChaCha)
///     .hash_seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(config.cell_count(), 16 * 12);
/// ```
#[derive(Debug, Clone)]
pub struct GridConfigBuilder {
    domain_width: u32,
    domain_height: u32,
    cell_width: u32,
    cell_height: u32,
    margin_x: u32,
    margin_y: u32,
    hash_seed: u64,
    hash: SeedHash,
}

impl GridConfigBuilder {
    /// Create a new builder starting from the article layout
    ///
    /// Defaults:
    /// - domain: 300×200
    /// - cells: 50×50
    /// - margins: 5
    /// - hash: legacy mixer with seed 0
    pub fn new() -> Self {
        let base = GridConfig::article();
        Self {
            domain_width: base.domain_width,
            domain_height: base.domain_height,
            cell_width: base.cell_width,
            cell_height: base.cell_height,
            margin_x: base.margin_x,
            margin_y: base.margin_y,
            hash_seed: base.hash_seed,
            hash: base.hash,
        }
    }

    /// Set the domain size
    pub fn domain(mut self, width: u32, height: u32) -> Self {
        self.domain_width = width;
        self.domain_height = height;
        self
    }

    /// Set the cell size
    pub fn cell_size(mut self, width: u32, height: u32) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Set square cells of the given side
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `side` is zero
    pub fn square_cells(self, side: u32) -> Result<Self> {
        if side == 0 {
            return Err(VoronoiError::InvalidConfig(
                "cell side must be positive (got 0)".to_string(),
            ));
        }
        Ok(self.cell_size(side, side))
    }

    /// Set the placement margins
    pub fn margins(mut self, x: u32, y: u32) -> Self {
        self.margin_x = x;
        self.margin_y = y;
        self
    }

    /// Set the hash seed
    pub fn hash_seed(mut self, seed: u64) -> Self {
        self.hash_seed = seed;
        self
    }

    /// Set the hash family
    pub fn hash(mut self, hash: SeedHash) -> Self {
        self.hash = hash;
        self
    }

    /// Build and validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the layout fails [`GridConfig::validate`].
    pub fn build(self) -> Result<GridConfig> {
        let config = GridConfig {
            domain_width: self.domain_width,
            domain_height: self.domain_height,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            margin_x: self.margin_x,
            margin_y: self.margin_y,
            hash_seed: self.hash_seed,
            hash: self.hash,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for GridConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
