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

//! Reduced cost matrices
//!
//! `ReducedCostMatrix<T>` is the residual cost structure owned by one search
//! node. Cells hold the remaining (reduced) edge costs as `EdgeCost<T>`, so a
//! missing edge stays distinct from every finite cost, `T::max_value()`
//! included. Rows of points that have already been left and columns of
//! points that have already been entered are *excluded*: their cells are
//! cleared and every reduction skips them.
//!
//! Reducing subtracts each live row's minimum from that row and then each
//! live column's minimum from that column. The subtracted total is a lower
//! bound on the cost of any assignment of the remaining rows to the remaining
//! columns, and therefore on the cost of completing the node's partial tour.
//! After a reduction every live row and column contains a zero and every
//! finite entry is non-negative.
//!
//! Sums never wrap: bound arithmetic saturates at `T::max_value()`, which is
//! still a valid lower bound.

use fixedbitset::FixedBitSet;
use salesman_model::{cost::EdgeCost, index::PointIndex, matrix::CostMatrix};
use salesman_search::num::SolverNumeric;

/// A square residual cost matrix with row and column exclusion.
#[derive(Clone, PartialEq, Eq)]
pub struct ReducedCostMatrix<T> {
    num_points: usize,
    cells: Vec<EdgeCost<T>>, // len = num_points * num_points, row-major
    excluded_rows: FixedBitSet,
    excluded_cols: FixedBitSet,
}

impl<T> ReducedCostMatrix<T>
where
    T: SolverNumeric,
{
    /// Creates an unreduced copy of `matrix`. The diagonal is never an edge.
    pub fn new(matrix: &CostMatrix<T>) -> Self {
        let n = matrix.num_points();
        let mut cells = Vec::with_capacity(n * n);
        for from in (0..n).map(PointIndex::new) {
            cells.extend_from_slice(matrix.row(from));
        }
        Self {
            num_points: n,
            cells,
            excluded_rows: FixedBitSet::with_capacity(n),
            excluded_cols: FixedBitSet::with_capacity(n),
        }
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Returns the residual cost of `from -> to`, or `None` if there is no
    /// such edge left.
    #[inline]
    pub fn get(&self, from: PointIndex, to: PointIndex) -> Option<T> {
        self.cells[self.flat(from.get(), to.get())].into_option()
    }

    #[inline]
    pub fn is_row_excluded(&self, row: PointIndex) -> bool {
        self.excluded_rows[row.get()]
    }

    #[inline]
    pub fn is_col_excluded(&self, col: PointIndex) -> bool {
        self.excluded_cols[col.get()]
    }

    #[inline(always)]
    fn flat(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.num_points && col < self.num_points,
            "called `ReducedCostMatrix::flat` with index out of bounds: the len is {} but the indices are {} and {}",
            self.num_points,
            row,
            col
        );
        row * self.num_points + col
    }

    /// Subtracts `min` from every finite cell yielded by `indices`.
    #[inline(always)]
    fn subtract(cells: &mut [EdgeCost<T>], indices: impl Iterator<Item = usize>, min: T) {
        for i in indices {
            if let Some(value) = cells[i].into_option() {
                cells[i] = EdgeCost::from_raw(value - min);
            }
        }
    }

    /// Reduces every live row, then every live column.
    ///
    /// Returns the total amount subtracted, or `None` if some live row or
    /// column has no finite entry left, in which case no completion exists.
    /// On `None` the matrix is left partially reduced and must be discarded.
    pub fn reduce_full(&mut self) -> Option<T> {
        let n = self.num_points;
        let mut total = T::zero();

        for row in self.excluded_rows.zeroes() {
            let min = self
                .excluded_cols
                .zeroes()
                .filter_map(|col| self.cells[row * n + col].into_option())
                .min()?;
            if min > T::zero() {
                let indices = self.excluded_cols.zeroes().map(|col| row * n + col);
                Self::subtract(&mut self.cells, indices, min);
                total = total.saturating_add(min);
            }
        }

        for col in self.excluded_cols.zeroes() {
            let min = self
                .excluded_rows
                .zeroes()
                .filter_map(|row| self.cells[row * n + col].into_option())
                .min()?;
            if min > T::zero() {
                let indices = self.excluded_rows.zeroes().map(|row| row * n + col);
                Self::subtract(&mut self.cells, indices, min);
                total = total.saturating_add(min);
            }
        }

        Some(total)
    }

    /// Commits the edge `from -> to` and returns the bound increment.
    ///
    /// The increment is the residual cost of the edge plus, unless
    /// `is_final`, the amount a full re-reduction subtracts afterwards.
    /// Row `from`, column `to` and the reverse entry `to -> from` are
    /// cleared. The final edge skips the re-reduction: the only cell left
    /// after it is the return to the start, which the reverse entry may
    /// have just cleared on two points. Returns `None` if the edge is
    /// missing or the remaining matrix cannot be completed.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if row `from` or column
    /// `to` is already excluded.
    pub fn commit_edge(&mut self, from: PointIndex, to: PointIndex, is_final: bool) -> Option<T> {
        debug_assert!(
            !self.is_row_excluded(from),
            "called `ReducedCostMatrix::commit_edge` with excluded row {}",
            from.get()
        );
        debug_assert!(
            !self.is_col_excluded(to),
            "called `ReducedCostMatrix::commit_edge` with excluded column {}",
            to.get()
        );

        let edge = self.get(from, to)?;
        self.exclude(from, to);

        if is_final {
            return Some(edge);
        }
        let reduction = self.reduce_full()?;
        Some(edge.saturating_add(reduction))
    }

    fn exclude(&mut self, from: PointIndex, to: PointIndex) {
        let n = self.num_points;
        let (from, to) = (from.get(), to.get());

        self.cells[from * n..(from + 1) * n].fill(EdgeCost::none());
        for row in 0..n {
            self.cells[row * n + to] = EdgeCost::none();
        }
        self.cells[to * n + from] = EdgeCost::none();

        self.excluded_rows.insert(from);
        self.excluded_cols.insert(to);
    }
}

impl<T> std::fmt::Debug for ReducedCostMatrix<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReducedCostMatrix")
            .field("num_points", &self.num_points)
            .field("excluded_rows", &self.excluded_rows.count_ones(..))
            .field("excluded_cols", &self.excluded_cols.count_ones(..))
            .finish()
    }
}

impl<T> std::fmt::Display for ReducedCostMatrix<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.num_points;
        for row in 0..n {
            let cells: Vec<String> = self.cells[row * n..(row + 1) * n]
                .iter()
                .map(|c| format!("{:>6}", c.to_string()))
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_model::matrix::CostMatrixBuilder;

    fn p(i: usize) -> PointIndex {
        PointIndex::new(i)
    }

    fn example() -> CostMatrix<i64> {
        CostMatrixBuilder::from_rows(&[
            vec![-1i64, 10, 15, 20],
            vec![10, -1, 35, 25],
            vec![15, 35, -1, 30],
            vec![20, 25, 30, -1],
        ])
        .build()
    }

    #[test]
    fn test_root_reduction_of_example() {
        let mut m = ReducedCostMatrix::new(&example());
        // rows: 10 + 10 + 15 + 20 = 55, then columns 2 and 3: 5 + 10
        assert_eq!(m.reduce_full(), Some(70));
        for row in 0..4 {
            let live: Vec<i64> = (0..4).filter_map(|c| m.get(p(row), p(c))).collect();
            assert!(live.iter().all(|&v| v >= 0));
            assert!(live.contains(&0), "row {} has no zero", row);
        }
        for col in 0..4 {
            assert!((0..4).any(|r| m.get(p(r), p(col)) == Some(0)));
        }
    }

    #[test]
    fn test_reduce_detects_row_without_edges() {
        let m = CostMatrixBuilder::from_rows(&[
            vec![0i64, 1, 1],
            vec![1, 0, 1],
            vec![-1, -1, 0],
        ])
        .build();
        assert_eq!(ReducedCostMatrix::new(&m).reduce_full(), None);
    }

    #[test]
    fn test_reduce_detects_column_without_edges() {
        let m = CostMatrixBuilder::from_rows(&[
            vec![0i64, -1, 1],
            vec![1, 0, 1],
            vec![1, -1, 0],
        ])
        .build();
        assert_eq!(ReducedCostMatrix::new(&m).reduce_full(), None);
    }

    #[test]
    fn test_commit_excludes_row_column_and_reverse() {
        let mut m = ReducedCostMatrix::new(&example());
        m.reduce_full().unwrap();
        let inc = m.commit_edge(p(0), p(1), false).unwrap();
        assert!(inc >= 0);
        assert!(m.is_row_excluded(p(0)));
        assert!(m.is_col_excluded(p(1)));
        for k in 0..4 {
            assert_eq!(m.get(p(0), p(k)), None);
            assert_eq!(m.get(p(k), p(1)), None);
        }
        assert_eq!(m.get(p(1), p(0)), None);
    }

    #[test]
    fn test_commit_missing_edge_is_rejected() {
        let m = CostMatrixBuilder::from_rows(&[
            vec![0i64, -1, 4],
            vec![3, 0, 2],
            vec![1, 5, 0],
        ])
        .build();
        let mut r = ReducedCostMatrix::new(&m);
        r.reduce_full().unwrap();
        assert_eq!(r.commit_edge(p(0), p(1), false), None);
    }

    #[test]
    fn test_final_commit_skips_reduction() {
        let m = CostMatrixBuilder::from_rows(&[vec![0i64, 7], vec![3, 0]]).build();
        let mut r = ReducedCostMatrix::new(&m);
        assert_eq!(r.reduce_full(), Some(10));
        // residual of 0 -> 1 is 0 after reducing row 0 by 7
        assert_eq!(r.commit_edge(p(0), p(1), true), Some(0));
    }

    #[test]
    fn test_bound_along_optimal_path_of_example() {
        // 0 -> 1 -> 3 -> 2 -> 0 costs 80
        let mut m = ReducedCostMatrix::new(&example());
        let mut bound = m.reduce_full().unwrap();
        for (from, to, last) in [(0, 1, false), (1, 3, false), (3, 2, true)] {
            let inc = m.commit_edge(p(from), p(to), last).unwrap();
            assert!(inc >= 0);
            bound += inc;
            assert!(bound <= 80);
        }
    }

    #[test]
    fn test_saturates_instead_of_wrapping() {
        let big = i8::MAX - 1;
        let m = CostMatrixBuilder::from_rows(&[
            vec![0i8, big, big],
            vec![big, 0, big],
            vec![big, big, 0],
        ])
        .build();
        let mut r = ReducedCostMatrix::new(&m);
        assert_eq!(r.reduce_full(), Some(i8::MAX));
    }

    #[test]
    fn test_edge_of_maximal_cost_is_kept() {
        let m = CostMatrixBuilder::from_rows(&[vec![0i8, i8::MAX], vec![0, 0]]).build();
        let mut r = ReducedCostMatrix::new(&m);
        assert_eq!(r.get(p(0), p(1)), Some(i8::MAX));
        assert_eq!(r.reduce_full(), Some(i8::MAX));
        assert_eq!(r.get(p(0), p(1)), Some(0));
    }
}
