//! Grid-accelerated approximate Voronoi diagrams
//!
//! A standalone library that partitions a rectangular domain into a regular
//! grid, places one hashed seed per cell, and answers nearest-seed, neighbor
//! and boundary-blend queries by looking at the 3×3 cells around a point only.
//! Suited to procedural texture and terrain work where every pixel needs a
//! region and a smooth transition between regions.
//!
//! # Quick Start
//!
//! ```rust
//! use grid_voronoi::*;
//!
//! // Build a diagram
//! let config = GridConfigBuilder::new()
//!     .domain(300, 200)
//!     .square_cells(50).unwrap()
//!     .margins(5, 5)
//!     .hash_seed(42)
//!     .build().unwrap();
//!
//! let diagram = VoronoiGrid::build(config).unwrap();
//!
//! // Color each region, blending across borders
//! let colors: Vec<Rgba> = diagram
//!     .seeds()
//!     .iter()
//!     .map(|s| [s.x() as f32 / 300.0, s.y() as f32 / 200.0, 0.5, 1.0])
//!     .collect();
//! let color = diagram.sample(Point::new(120.0, 80.0), &IndexedAttributes(&colors)).unwrap();
//! println!("Pixel color: {:?}", color);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables exact global nearest-seed lookups using KD-tree
//! - `serde`: Enables serialization support for configuration and seeds

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod seed;
pub mod query;
pub mod generation;
pub mod region;
pub mod blend;
pub mod diagram;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{GridConfig, GridConfigBuilder, SeedHash};
pub use geometry::{Point, Vector};
pub use grid::CellGrid;
pub use seed::{Seed, Neighbor};
pub use query::{SeedHit, SeedPositions, TwoNearest};
pub use region::{Region, BlendRecipe};
pub use blend::{blend, Attribute, AttributeSource, IndexedAttributes, Rgba};
pub use diagram::VoronoiGrid;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
