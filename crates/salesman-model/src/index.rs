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

//! Typed point indices.
//!
//! A `PointIndex` wraps the position of a point in the instance. Keeping it
//! distinct from a bare `usize` stops tour positions and point identifiers
//! from being mixed up.

/// The index of a point (city) in an instance.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointIndex(usize);

impl PointIndex {
    /// Creates a new `PointIndex`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::index::PointIndex;
    ///
    /// let p = PointIndex::new(3);
    /// assert_eq!(p.get(), 3);
    /// ```
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Returns `true` if this is the first point, which every tour starts from.
    #[inline(always)]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Debug for PointIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PointIndex({})", self.0)
    }
}

impl std::fmt::Display for PointIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PointIndex({})", self.0)
    }
}

impl From<usize> for PointIndex {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<PointIndex> for usize {
    #[inline(always)]
    fn from(index: PointIndex) -> Self {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_get_and_zero() {
        assert!(PointIndex::new(0).is_zero());
        assert!(!PointIndex::new(7).is_zero());
        assert_eq!(PointIndex::new(7).get(), 7);
    }

    #[test]
    fn test_conversions_and_formatting() {
        let p: PointIndex = 4usize.into();
        let raw: usize = p.into();
        assert_eq!(raw, 4);
        assert_eq!(format!("{}", p), "PointIndex(4)");
        assert_eq!(format!("{:?}", p), "PointIndex(4)");
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        let mut points = vec![PointIndex::new(2), PointIndex::new(0), PointIndex::new(1)];
        points.sort();
        assert_eq!(
            points,
            vec![PointIndex::new(0), PointIndex::new(1), PointIndex::new(2)]
        );
    }
}
