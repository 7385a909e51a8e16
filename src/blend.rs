//! Attribute lookup and averaging
//!
//! The engine never owns attributes. Callers supply them per seed through an
//! [`AttributeSource`], and boundary points average the recipe members with
//! [`Attribute::mean`].

use glam::{Vec3, Vec4};

use crate::region::BlendRecipe;
use crate::seed::Seed;

/// RGBA color, matching the layout renderers usually expect
pub type Rgba = [f32; 4];

/// Value that can be averaged in its own linear domain
///
/// Cyclic quantities such as hue are averaged linearly too, so blends across
/// the wraparound point are not corrected.
pub trait Attribute: Copy {
    /// Component-wise sum
    fn sum(self, other: Self) -> Self;

    /// Divide by a member count
    fn divide(self, count: usize) -> Self;

    /// Arithmetic mean of a non-empty set of values
    fn mean<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let (total, count) = iter.fold((first, 1usize), |(acc, n), v| (acc.sum(v), n + 1));
        Some(total.divide(count))
    }
}

impl Attribute for f32 {
    #[inline]
    fn sum(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn divide(self, count: usize) -> Self {
        self / count as f32
    }
}

impl Attribute for f64 {
    #[inline]
    fn sum(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn divide(self, count: usize) -> Self {
        self / count as f64
    }
}

impl Attribute for Vec3 {
    #[inline]
    fn sum(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn divide(self, count: usize) -> Self {
        self / count as f32
    }
}

impl Attribute for Vec4 {
    #[inline]
    fn sum(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn divide(self, count: usize) -> Self {
        self / count as f32
    }
}

impl<const N: usize> Attribute for [f32; N] {
    #[inline]
    fn sum(self, other: Self) -> Self {
        let mut out = self;
        for (o, v) in out.iter_mut().zip(other) {
            *o += v;
        }
        out
    }

    #[inline]
    fn divide(self, count: usize) -> Self {
        self.map(|v| v / count as f32)
    }
}

/// Trait for looking up the attribute of a seed
pub trait AttributeSource<A> {
    /// Attribute carried by `seed`
    fn attribute(&self, seed: &Seed) -> A;
}

impl<A, F> AttributeSource<A> for F
where
    F: Fn(&Seed) -> A,
{
    fn attribute(&self, seed: &Seed) -> A {
        self(seed)
    }
}

/// Attributes stored in a slice indexed by seed index
#[derive(Debug, Clone, Copy)]
pub struct IndexedAttributes<'a, A>(pub &'a [A]);

impl<A: Copy> AttributeSource<A> for IndexedAttributes<'_, A> {
    fn attribute(&self, seed: &Seed) -> A {
        self.0[seed.index]
    }
}

/// Average the attributes of every member of `recipe`
pub fn blend<A, S>(recipe: &BlendRecipe, seeds: &[Seed], source: &S) -> A
where
    A: Attribute,
    S: AttributeSource<A> + ?Sized,
{
    let members = recipe.members().map(|index| source.attribute(&seeds[index]));
    // A recipe always holds its seed, so the mean exists
    A::mean(members).unwrap_or_else(|| source.attribute(&seeds[recipe.seed]))
}
