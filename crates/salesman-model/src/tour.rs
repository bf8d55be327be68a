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

//! Hamiltonian tours.
//!
//! A `Tour` is an ordering of all points in which every point appears exactly
//! once. The closing edge from the last point back to the first is implicit.
//! The cost of a tour is never stored: it is derived from a cost source when
//! asked for, and it is `None` whenever a required edge is missing.

use crate::{
    index::PointIndex,
    matrix::CostMatrix,
    oracle::{CostOracle, CostOracleError},
};
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};

/// The error type for rejected tours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourError {
    /// The tour does not visit exactly `num_points` points.
    LengthMismatch { expected: usize, actual: usize },
    /// The tour references a point outside `0..num_points`.
    PointOutOfRange { point: PointIndex, num_points: usize },
    /// The tour visits a point twice.
    DuplicatePoint { point: PointIndex },
}

impl std::fmt::Display for TourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourError::LengthMismatch { expected, actual } => write!(
                f,
                "Tour length mismatch: expected {} points but got {}",
                expected, actual
            ),
            TourError::PointOutOfRange { point, num_points } => write!(
                f,
                "Tour point {} is out of range for {} points",
                point.get(),
                num_points
            ),
            TourError::DuplicatePoint { point } => {
                write!(f, "Tour visits point {} more than once", point.get())
            }
        }
    }
}

impl std::error::Error for TourError {}

/// An ordered cycle that visits every point exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tour {
    points: Vec<PointIndex>,
}

impl Tour {
    /// Creates a validated tour over `num_points` points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::tour::{Tour, TourError};
    /// # use salesman_model::index::PointIndex;
    ///
    /// let points = [0, 2, 1].map(PointIndex::new).to_vec();
    /// assert!(Tour::new(points, 3).is_ok());
    ///
    /// let points = [0, 0, 1].map(PointIndex::new).to_vec();
    /// assert!(matches!(Tour::new(points, 3), Err(TourError::DuplicatePoint { .. })));
    /// ```
    pub fn new(points: Vec<PointIndex>, num_points: usize) -> Result<Self, TourError> {
        if points.len() != num_points {
            return Err(TourError::LengthMismatch {
                expected: num_points,
                actual: points.len(),
            });
        }

        let mut seen = FixedBitSet::with_capacity(num_points);
        for &point in &points {
            if point.get() >= num_points {
                return Err(TourError::PointOutOfRange { point, num_points });
            }
            if seen.put(point.get()) {
                return Err(TourError::DuplicatePoint { point });
            }
        }

        Ok(Self { points })
    }

    /// Creates a tour without validating it.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if a point is visited twice.
    pub fn new_unchecked(points: Vec<PointIndex>) -> Self {
        debug_assert!(
            {
                let mut seen = FixedBitSet::with_capacity(points.len());
                points
                    .iter()
                    .all(|p| p.get() < points.len() && !seen.put(p.get()))
            },
            "called `Tour::new_unchecked` with a sequence that is not a permutation"
        );

        Self { points }
    }

    /// Returns the visiting order.
    #[inline]
    pub fn points(&self) -> &[PointIndex] {
        &self.points
    }

    /// Returns the number of points in the tour.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the tour is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the directed edges of the tour, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (PointIndex, PointIndex)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Returns the total cost of the tour under `matrix`, or `None` if an edge
    /// is missing or the sum does not fit into `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::tour::Tour;
    /// # use salesman_model::matrix::CostMatrixBuilder;
    /// # use salesman_model::index::PointIndex;
    ///
    /// let matrix = CostMatrixBuilder::from_rows(&[
    ///     vec![0i64, 1, 9],
    ///     vec![9, 0, 2],
    ///     vec![3, 9, 0],
    /// ])
    /// .build();
    /// let tour = Tour::new([0, 1, 2].map(PointIndex::new).to_vec(), 3).unwrap();
    /// assert_eq!(tour.cost(&matrix), Some(6));
    /// ```
    pub fn cost<T>(&self, matrix: &CostMatrix<T>) -> Option<T>
    where
        T: PrimInt + Signed,
    {
        self.edges().try_fold(T::zero(), |acc, (from, to)| {
            acc.checked_add(&matrix.edge(from, to).into_option()?)
        })
    }

    /// Returns the total cost of the tour by querying `oracle` edge by edge.
    ///
    /// The outer result reports failed queries, the inner option a missing
    /// edge or an overflowing sum.
    pub fn try_cost<T, O>(&self, oracle: &O) -> Result<Option<T>, CostOracleError>
    where
        T: PrimInt + Signed,
        O: CostOracle<T> + ?Sized,
    {
        let mut total = Some(T::zero());
        for (from, to) in self.edges() {
            let edge = oracle.cost(from, to)?.into_option();
            total = match (total, edge) {
                (Some(acc), Some(c)) => acc.checked_add(&c),
                _ => None,
            };
        }
        Ok(total)
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self.points.iter().map(|p| p.get().to_string()).collect();
        write!(f, "[{}]", ids.join(" -> "))
    }
}

impl From<Tour> for Vec<PointIndex> {
    fn from(tour: Tour) -> Self {
        tour.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CostMatrixBuilder;

    fn tour(ids: &[usize]) -> Vec<PointIndex> {
        ids.iter().copied().map(PointIndex::new).collect()
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(
            Tour::new(tour(&[0, 1]), 3),
            Err(TourError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_rejects_out_of_range_and_duplicates() {
        assert!(matches!(
            Tour::new(tour(&[0, 1, 5]), 3),
            Err(TourError::PointOutOfRange { num_points: 3, .. })
        ));
        assert_eq!(
            Tour::new(tour(&[2, 1, 2]), 3),
            Err(TourError::DuplicatePoint {
                point: PointIndex::new(2)
            })
        );
    }

    #[test]
    fn test_edges_include_closing_edge() {
        let t = Tour::new(tour(&[2, 0, 1]), 3).unwrap();
        let edges: Vec<(usize, usize)> = t.edges().map(|(a, b)| (a.get(), b.get())).collect();
        assert_eq!(edges, vec![(2, 0), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_cost_is_none_on_missing_edge() {
        let m = CostMatrixBuilder::from_rows(&[vec![0i64, 1, 1], vec![1, 0, 1], vec![-1, 1, 0]])
            .build();
        let t = Tour::new(tour(&[0, 1, 2]), 3).unwrap();
        assert_eq!(t.cost(&m), None);
        assert_eq!(t.try_cost(&m), Ok(None));

        let reversed = Tour::new(tour(&[0, 2, 1]), 3).unwrap();
        assert_eq!(reversed.cost(&m), Some(3));
        assert_eq!(reversed.try_cost(&m), Ok(Some(3)));
    }

    #[test]
    fn test_cost_is_none_on_overflow() {
        let big = i8::MAX;
        let m = CostMatrixBuilder::from_rows(&[vec![0i8, big], vec![big, 0]]).build();
        let t = Tour::new(tour(&[0, 1]), 2).unwrap();
        assert_eq!(t.cost(&m), None);
    }

    #[test]
    fn test_display() {
        let t = Tour::new(tour(&[0, 2, 1]), 3).unwrap();
        assert_eq!(t.to_string(), "[0 -> 2 -> 1]");
    }
}
