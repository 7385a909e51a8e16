//! Error types for grid construction and queries

use thiserror::Error;

/// Errors that can occur while building or querying a [`VoronoiGrid`](crate::VoronoiGrid)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// Configuration validation failed; no structure was produced
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The 3×3 cell block around the query point lies entirely outside the grid
    #[error("query point ({x}, {y}) has no addressable grid cells around it")]
    OutOfRange {
        /// Query x coordinate
        x: f64,
        /// Query y coordinate
        y: f64,
    },

    /// Requested seed index does not exist
    #[error("seed not found: {0}")]
    SeedNotFound(usize),
}

/// Result type alias for grid operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
