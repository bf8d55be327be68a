// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Sentinel-encoded edge costs.
//!
//! `EdgeCost<T>` is the value a `CostOracle` hands out for an ordered pair of
//! points. It is either a concrete, non-negative cost or the absence of an
//! edge, which solvers treat as an infinite cost.

use num_traits::{PrimInt, Signed};

/// The cost of travelling along a directed edge, or the absence of that edge.
///
/// Instead of using `Option<T>`, this type uses a sentinel encoding to avoid
/// the additional discriminant that `Option` introduces for integer types.
/// Cost matrices are scanned row by row in the hot loops of the solvers, so
/// keeping each entry a single machine word matters.
///
/// Encoding:
/// - Non-negative values (>= 0) represent a concrete cost.
/// - Negative values (<= -1) are reserved to indicate a missing edge.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeCost<T>(T);

impl<T> EdgeCost<T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn sentinel() -> T {
        -T::one()
    }

    /// Creates an `EdgeCost` from an `Option<T>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::cost::EdgeCost;
    ///
    /// let c = EdgeCost::from_option(Some(5i64));
    /// assert!(c.is_some());
    /// assert_eq!(c.raw(), 5);
    /// ```
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => EdgeCost(v),
            None => Self::none(),
        }
    }

    /// Creates an `EdgeCost` from a raw value. Negative values are treated as
    /// a missing edge.
    #[inline]
    pub const fn from_raw(value: T) -> Self {
        EdgeCost(value)
    }

    /// Creates an `EdgeCost` for an existing edge.
    ///
    /// # Panics
    ///
    /// This function will panic if `value` is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::cost::EdgeCost;
    ///
    /// let c = EdgeCost::some(12i64);
    /// assert_eq!(c.into_option(), Some(12));
    /// ```
    pub fn some(value: T) -> Self
    where
        T: std::fmt::Display,
    {
        assert!(
            value >= T::zero(),
            "called `EdgeCost::some` with a negative value: {}",
            value
        );

        EdgeCost(value)
    }

    /// Creates an `EdgeCost` representing a missing edge.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::cost::EdgeCost;
    ///
    /// let c: EdgeCost<i64> = EdgeCost::none();
    /// assert!(c.is_none());
    /// ```
    #[inline]
    pub fn none() -> Self {
        EdgeCost(Self::sentinel())
    }

    /// Returns `true` if the edge does not exist.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.0 <= Self::sentinel()
    }

    /// Returns `true` if the edge exists.
    #[inline]
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Returns the raw value, including the sentinel if present.
    #[inline]
    pub fn raw(&self) -> T {
        self.0
    }

    /// Converts the `EdgeCost` into an `Option<T>`.
    #[inline]
    pub fn into_option(&self) -> Option<T> {
        if self.is_none() { None } else { Some(self.0) }
    }

    /// Returns the cost, or `infinity` if the edge does not exist.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::cost::EdgeCost;
    ///
    /// let missing: EdgeCost<i64> = EdgeCost::none();
    /// assert_eq!(missing.unwrap_or(i64::MAX), i64::MAX);
    /// assert_eq!(EdgeCost::some(3i64).unwrap_or(i64::MAX), 3);
    /// ```
    #[inline]
    pub fn unwrap_or(&self, infinity: T) -> T {
        if self.is_none() { infinity } else { self.0 }
    }
}

impl<T> std::fmt::Debug for EdgeCost<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "EdgeCost(None)")
        } else {
            write!(f, "EdgeCost(Some({:?}))", self.0)
        }
    }
}

impl<T> std::fmt::Display for EdgeCost<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl<T> From<Option<T>> for EdgeCost<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    fn from(value: Option<T>) -> Self {
        EdgeCost::from_option(value)
    }
}

impl<T> From<EdgeCost<T>> for Option<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    fn from(val: EdgeCost<T>) -> Self {
        val.into_option()
    }
}
