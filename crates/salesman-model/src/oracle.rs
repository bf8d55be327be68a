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

//! The cost oracle abstraction.
//!
//! Solvers never look at coordinates or any other point payload. They only
//! ask a `CostOracle` what it costs to travel from one point to another. The
//! matrix need not be symmetric and edges may be missing.
//!
//! Queries are fallible: an oracle backed by a computation (for example a
//! conversion from floating point geometry) can fail for a valid pair, and
//! solvers surface that failure before they start searching.

use crate::{cost::EdgeCost, index::PointIndex};
use num_traits::{PrimInt, Signed};

/// The error type for failed cost queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostOracleError {
    /// A point index outside `0..num_points` was queried.
    OutOfBounds {
        index: PointIndex,
        num_points: usize,
    },
    /// The cost of the edge exists but cannot be represented in the cost type.
    Unrepresentable { from: PointIndex, to: PointIndex },
}

impl std::fmt::Display for CostOracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { index, num_points } => write!(
                f,
                "Point {} is out of bounds for an instance with {} points",
                index.get(),
                num_points
            ),
            Self::Unrepresentable { from, to } => write!(
                f,
                "The cost of edge {} -> {} cannot be represented",
                from.get(),
                to.get()
            ),
        }
    }
}

impl std::error::Error for CostOracleError {}

/// A source of pairwise travel costs.
pub trait CostOracle<T>
where
    T: PrimInt + Signed,
{
    /// Returns the number of points known to the oracle.
    fn num_points(&self) -> usize;

    /// Returns the cost of travelling from `from` to `to`, or
    /// `EdgeCost::none()` if there is no such edge.
    fn cost(&self, from: PointIndex, to: PointIndex) -> Result<EdgeCost<T>, CostOracleError>;

    /// Checks that both indices are valid for this oracle.
    #[inline]
    fn check_bounds(&self, from: PointIndex, to: PointIndex) -> Result<(), CostOracleError> {
        let num_points = self.num_points();
        for index in [from, to] {
            if index.get() >= num_points {
                return Err(CostOracleError::OutOfBounds { index, num_points });
            }
        }
        Ok(())
    }
}

impl<T, O> CostOracle<T> for &O
where
    T: PrimInt + Signed,
    O: CostOracle<T> + ?Sized,
{
    #[inline]
    fn num_points(&self) -> usize {
        (**self).num_points()
    }

    #[inline]
    fn cost(&self, from: PointIndex, to: PointIndex) -> Result<EdgeCost<T>, CostOracleError> {
        (**self).cost(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ring {
        n: usize,
    }

    impl CostOracle<i64> for Ring {
        fn num_points(&self) -> usize {
            self.n
        }

        fn cost(&self, from: PointIndex, to: PointIndex) -> Result<EdgeCost<i64>, CostOracleError> {
            self.check_bounds(from, to)?;
            if (from.get() + 1) % self.n == to.get() {
                Ok(EdgeCost::some(1))
            } else {
                Ok(EdgeCost::none())
            }
        }
    }

    #[test]
    fn test_check_bounds_reports_offending_index() {
        let ring = Ring { n: 3 };
        let err = ring
            .cost(PointIndex::new(1), PointIndex::new(5))
            .unwrap_err();
        assert_eq!(
            err,
            CostOracleError::OutOfBounds {
                index: PointIndex::new(5),
                num_points: 3
            }
        );
        assert!(format!("{}", err).contains("out of bounds"));
    }

    #[test]
    fn test_reference_forwards_queries() {
        let ring = Ring { n: 3 };
        let by_ref = &ring;
        assert_eq!(CostOracle::<i64>::num_points(&by_ref), 3);
        assert_eq!(
            by_ref
                .cost(PointIndex::new(2), PointIndex::new(0))
                .unwrap()
                .into_option(),
            Some(1)
        );
        assert!(
            by_ref
                .cost(PointIndex::new(0), PointIndex::new(2))
                .unwrap()
                .is_none()
        );
    }
}
