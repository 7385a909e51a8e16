//! 2D point and vector primitives
//!
//! Thin value types over `glam::DVec2`. [`Point`] is a position in the domain,
//! [`Vector`] a direction/magnitude between positions.

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position in the grid domain
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point from real coordinates
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point from integer pixel coordinates
    #[inline]
    pub fn from_pixel(x: i32, y: i32) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }

    /// Check that both coordinates are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance_to(self, other: Point) -> f64 {
        self.to_vec2().distance(other.to_vec2())
    }

    /// Point halfway between `self` and `other`
    #[inline]
    pub fn midway(self, other: Point) -> Point {
        ((self.to_vec2() + other.to_vec2()) * 0.5).into()
    }

    /// Vector pointing from `self` to `other`
    #[inline]
    pub fn to(self, other: Point) -> Vector {
        Vector(other.to_vec2() - self.to_vec2())
    }

    /// Translate by a vector
    #[inline]
    pub fn offset(self, v: Vector) -> Point {
        (self.to_vec2() + v.0).into()
    }

    /// Convert to a glam vector
    #[inline]
    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Point {
    #[inline]
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::from_pixel(x, y)
    }
}

/// Real 2D direction/magnitude value
///
/// Arithmetic is exposed as named methods rather than operators.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector(DVec2);

impl Vector {
    /// Create a vector from components
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Horizontal component
    #[inline]
    pub fn x(self) -> f64 {
        self.0.x
    }

    /// Vertical component
    #[inline]
    pub fn y(self) -> f64 {
        self.0.y
    }

    /// Component-wise sum
    #[inline]
    pub fn add(self, other: Vector) -> Vector {
        Vector(self.0 + other.0)
    }

    /// Multiply by a scalar
    #[inline]
    pub fn scale(self, factor: f64) -> Vector {
        Vector(self.0 * factor)
    }

    /// Divide by a scalar
    #[inline]
    pub fn div(self, divisor: f64) -> Vector {
        Vector(self.0 / divisor)
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// Euclidean length
    #[inline]
    pub fn length(self) -> f64 {
        self.0.length()
    }

    /// Unit vector in the same direction, or zero for a zero vector
    #[inline]
    pub fn normalize(self) -> Vector {
        Vector(self.0.normalize_or_zero())
    }

    /// Rotate by 90° counter-clockwise: `(x, y) -> (-y, x)`
    #[inline]
    pub fn rotate90ccw(self) -> Vector {
        Vector(self.0.perp())
    }
}

impl From<DVec2> for Vector {
    #[inline]
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl From<Vector> for DVec2 {
    #[inline]
    fn from(v: Vector) -> Self {
        v.0
    }
}
