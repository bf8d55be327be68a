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

//! Dense cost matrices.
//!
//! `CostMatrix` is the immutable, solver-facing snapshot of an instance: a
//! flat row-major vector of `EdgeCost<T>` with `cost[from * n + to]`. It is
//! built either with `CostMatrixBuilder` or by querying every ordered pair of
//! an arbitrary `CostOracle` once with `CostMatrix::from_oracle`.
//!
//! Self loops never exist: the diagonal always holds `EdgeCost::none()`.

use crate::{
    cost::EdgeCost,
    index::PointIndex,
    oracle::{CostOracle, CostOracleError},
};
use num_traits::{PrimInt, Signed};

#[inline(always)]
fn flatten_index(num_points: usize, from: PointIndex, to: PointIndex) -> usize {
    from.get() * num_points + to.get()
}

/// An immutable, dense matrix of directed edge costs.
#[derive(Clone, PartialEq, Eq)]
pub struct CostMatrix<T> {
    num_points: usize,
    costs: Vec<EdgeCost<T>>, // len = num_points * num_points
}

impl<T> CostMatrix<T>
where
    T: PrimInt + Signed,
{
    /// Builds a matrix by querying `oracle` for every ordered pair of distinct points.
    ///
    /// The first failing query aborts the snapshot and its error is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::matrix::{CostMatrix, CostMatrixBuilder};
    /// # use salesman_model::index::PointIndex;
    ///
    /// let mut builder = CostMatrixBuilder::<i64>::new(2);
    /// builder.set_symmetric_cost(PointIndex::new(0), PointIndex::new(1), 4);
    /// let original = builder.build();
    ///
    /// let copy = CostMatrix::from_oracle(&original).unwrap();
    /// assert_eq!(copy, original);
    /// ```
    pub fn from_oracle<O>(oracle: &O) -> Result<Self, CostOracleError>
    where
        O: CostOracle<T> + ?Sized,
    {
        let num_points = oracle.num_points();
        let mut costs = vec![EdgeCost::none(); num_points * num_points];
        for from in (0..num_points).map(PointIndex::new) {
            for to in (0..num_points).map(PointIndex::new) {
                if from == to {
                    continue;
                }
                costs[flatten_index(num_points, from, to)] = oracle.cost(from, to)?;
            }
        }
        Ok(Self { num_points, costs })
    }

    /// Returns the number of points in the matrix.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Returns the cost of the edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn edge(&self, from: PointIndex, to: PointIndex) -> EdgeCost<T> {
        assert!(
            from.get() < self.num_points && to.get() < self.num_points,
            "called `CostMatrix::edge` with point index out of bounds: the len is {} but the indices are {} and {}",
            self.num_points,
            from.get(),
            to.get()
        );

        self.costs[flatten_index(self.num_points, from, to)]
    }

    /// Returns the cost of the edge `from -> to` without bounds checking.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if either index is out of bounds.
    ///
    /// # Safety
    ///
    /// The caller must ensure that both indices are within `0..num_points()`.
    #[inline]
    pub unsafe fn edge_unchecked(&self, from: PointIndex, to: PointIndex) -> EdgeCost<T> {
        debug_assert!(
            from.get() < self.num_points && to.get() < self.num_points,
            "called `CostMatrix::edge_unchecked` with point index out of bounds: the len is {} but the indices are {} and {}",
            self.num_points,
            from.get(),
            to.get()
        );

        unsafe {
            *self
                .costs
                .get_unchecked(flatten_index(self.num_points, from, to))
        }
    }

    /// Returns the outgoing edge costs of `from` as a slice indexed by destination.
    #[inline]
    pub fn row(&self, from: PointIndex) -> &[EdgeCost<T>] {
        let start = from.get() * self.num_points;
        &self.costs[start..start + self.num_points]
    }

    /// Returns the number of existing directed edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.costs.iter().filter(|c| c.is_some()).count()
    }

    /// Returns `true` if `cost(a, b) == cost(b, a)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.num_points).all(|a| {
            (a + 1..self.num_points).all(|b| {
                let (a, b) = (PointIndex::new(a), PointIndex::new(b));
                self.edge(a, b) == self.edge(b, a)
            })
        })
    }
}

impl<T> CostOracle<T> for CostMatrix<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    fn num_points(&self) -> usize {
        self.num_points
    }

    #[inline]
    fn cost(&self, from: PointIndex, to: PointIndex) -> Result<EdgeCost<T>, CostOracleError> {
        self.check_bounds(from, to)?;
        Ok(self.costs[flatten_index(self.num_points, from, to)])
    }
}

impl<T> std::fmt::Debug for CostMatrix<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostMatrix")
            .field("num_points", &self.num_points)
            .field("num_edges", &self.num_edges())
            .finish()
    }
}

impl<T> std::fmt::Display for CostMatrix<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for from in 0..self.num_points {
            let row = self.row(PointIndex::new(from));
            let cells: Vec<String> = row.iter().map(|c| format!("{:>6}", c.to_string())).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// A mutable builder for `CostMatrix`.
///
/// The builder starts **disconnected**: every edge is missing until it is set
/// explicitly. This keeps impossible connections from sneaking into a
/// matrix as silently large numbers.
#[derive(Clone)]
pub struct CostMatrixBuilder<T> {
    num_points: usize,
    costs: Vec<EdgeCost<T>>,
}

impl<T> std::fmt::Debug for CostMatrixBuilder<T>
where
    T: PrimInt + Signed + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostMatrixBuilder")
            .field("num_points", &self.num_points)
            .field("costs", &self.costs)
            .finish()
    }
}

impl<T> CostMatrixBuilder<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    /// Creates a builder for `num_points` points with no edges.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::matrix::CostMatrixBuilder;
    ///
    /// let matrix = CostMatrixBuilder::<i64>::new(3).build();
    /// assert_eq!(matrix.num_points(), 3);
    /// assert_eq!(matrix.num_edges(), 0);
    /// ```
    pub fn new(num_points: usize) -> Self {
        Self {
            num_points,
            costs: vec![EdgeCost::none(); num_points * num_points],
        }
    }

    /// Creates a builder from a square table of raw costs. Negative entries
    /// and the diagonal become missing edges.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is not square.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use salesman_model::matrix::CostMatrixBuilder;
    /// # use salesman_model::index::PointIndex;
    ///
    /// let matrix = CostMatrixBuilder::from_rows(&[
    ///     vec![0i64, 3],
    ///     vec![-1, 0],
    /// ])
    /// .build();
    /// assert_eq!(matrix.edge(PointIndex::new(0), PointIndex::new(1)).into_option(), Some(3));
    /// assert!(matrix.edge(PointIndex::new(1), PointIndex::new(0)).is_none());
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[T]>,
    {
        let num_points = rows.len();
        let mut builder = Self::new(num_points);
        for (from, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(
                row.len(),
                num_points,
                "called `CostMatrixBuilder::from_rows` with a non-square table: row {} has {} entries but {} were expected",
                from,
                row.len(),
                num_points
            );
            for (to, &raw) in row.iter().enumerate() {
                builder.set_edge(
                    PointIndex::new(from),
                    PointIndex::new(to),
                    EdgeCost::from_raw(raw),
                );
            }
        }
        builder
    }

    /// Returns the number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Sets the edge `from -> to`. Writes to the diagonal are ignored.
    #[inline]
    pub fn set_edge(&mut self, from: PointIndex, to: PointIndex, cost: EdgeCost<T>) -> &mut Self {
        debug_assert!(
            from.get() < self.num_points && to.get() < self.num_points,
            "called `CostMatrixBuilder::set_edge` with point index out of bounds: the len is {} but the indices are {} and {}",
            self.num_points,
            from.get(),
            to.get()
        );

        if from != to {
            self.costs[flatten_index(self.num_points, from, to)] = cost;
        }
        self
    }

    /// Sets an existing edge `from -> to` with the given cost.
    ///
    /// # Panics
    ///
    /// Panics if `cost` is negative.
    #[inline]
    pub fn set_cost(&mut self, from: PointIndex, to: PointIndex, cost: T) -> &mut Self {
        self.set_edge(from, to, EdgeCost::some(cost))
    }

    /// Sets both `a -> b` and `b -> a` to `cost`.
    #[inline]
    pub fn set_symmetric_cost(&mut self, a: PointIndex, b: PointIndex, cost: T) -> &mut Self {
        self.set_cost(a, b, cost);
        self.set_cost(b, a, cost)
    }

    /// Removes the edge `from -> to`.
    #[inline]
    pub fn remove_edge(&mut self, from: PointIndex, to: PointIndex) -> &mut Self {
        self.set_edge(from, to, EdgeCost::none())
    }

    /// Builds the immutable `CostMatrix`.
    pub fn build(self) -> CostMatrix<T> {
        CostMatrix {
            num_points: self.num_points,
            costs: self.costs,
        }
    }
}
