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

//! Search nodes
//!
//! A `SearchNode` is a partial tour that starts at point 0, together with the
//! reduced cost matrix of its remaining choices and the resulting lower bound.
//! Nodes are immutable once built: children are produced by copying the
//! parent's matrix and committing one more edge on the copy.

use crate::matrix::ReducedCostMatrix;
use fixedbitset::FixedBitSet;
use salesman_model::{index::PointIndex, matrix::CostMatrix, solution::Solution, tour::Tour};
use salesman_search::num::SolverNumeric;

/// A partial tour with its residual costs and lower bound.
#[derive(Clone)]
pub struct SearchNode<T> {
    path: Vec<PointIndex>,
    visited: FixedBitSet,
    matrix: ReducedCostMatrix<T>,
    bound: T,
}

impl<T> SearchNode<T>
where
    T: SolverNumeric,
{
    /// Builds the root node, the one-point path `[0]`.
    ///
    /// Returns `None` if the full reduction proves that no tour exists.
    ///
    /// # Panics
    ///
    /// Panics if `matrix` has no points.
    pub fn root(matrix: &CostMatrix<T>) -> Option<Self> {
        let n = matrix.num_points();
        assert!(n > 0, "called `SearchNode::root` with an empty matrix");

        let mut reduced = ReducedCostMatrix::new(matrix);
        let bound = reduced.reduce_full()?;
        let mut visited = FixedBitSet::with_capacity(n);
        visited.insert(0);

        Some(Self {
            path: vec![PointIndex::new(0)],
            visited,
            matrix: reduced,
            bound,
        })
    }

    /// The number of points on the path.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn bound(&self) -> T {
        self.bound
    }

    #[inline]
    pub fn path(&self) -> &[PointIndex] {
        &self.path
    }

    /// The point the path currently ends at.
    #[inline]
    pub fn last(&self) -> PointIndex {
        // the path always holds at least the start point
        self.path[self.path.len() - 1]
    }

    #[inline]
    pub fn is_visited(&self, point: PointIndex) -> bool {
        self.visited[point.get()]
    }

    #[inline]
    pub fn matrix(&self) -> &ReducedCostMatrix<T> {
        &self.matrix
    }

    /// Iterates over the points not yet on the path, in ascending order.
    #[inline]
    pub fn unvisited(&self) -> impl Iterator<Item = PointIndex> + '_ {
        self.visited.zeroes().map(PointIndex::new)
    }

    /// Extends the path by `next` and returns the child node.
    ///
    /// Returns `None` if the edge is missing or the child provably has no
    /// completion.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if `next` is already visited.
    pub fn child(&self, next: PointIndex) -> Option<Self> {
        debug_assert!(
            !self.is_visited(next),
            "called `SearchNode::child` with visited point {}",
            next.get()
        );

        let is_final = self.depth() + 1 == self.matrix.num_points();
        let mut matrix = self.matrix.clone();
        let increment = matrix.commit_edge(self.last(), next, is_final)?;

        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(next);
        let mut visited = self.visited.clone();
        visited.insert(next.get());

        Some(Self {
            path,
            visited,
            matrix,
            bound: self.bound.saturating_add(increment),
        })
    }

    /// Returns `true` if the path visits every point.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.depth() == self.matrix.num_points()
    }

    /// Prices the tour of a leaf on the original costs.
    ///
    /// The leaf must come from [`SearchNode::child`], whose final commit has
    /// already checked the edge into the last point. The closing edge back to
    /// the start is checked here. Returns `None` if that edge is missing or
    /// the cost does not fit into `T`.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if the node is not a leaf
    /// of `original`.
    pub fn complete(&self, original: &CostMatrix<T>) -> Option<Solution<T>> {
        debug_assert!(
            self.is_leaf() && self.depth() == original.num_points(),
            "called `SearchNode::complete` on a node at depth {} with {} points",
            self.depth(),
            original.num_points()
        );

        let tour = Tour::new_unchecked(self.path.clone());
        let cost = tour.cost(original)?;
        Some(Solution::new(cost, tour))
    }
}

impl<T> std::fmt::Debug for SearchNode<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchNode")
            .field("path", &self.path)
            .field("bound", &self.bound)
            .field("matrix", &self.matrix)
            .finish()
    }
}

impl<T> std::fmt::Display for SearchNode<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<String> = self.path.iter().map(|p| p.get().to_string()).collect();
        write!(
            f,
            "SearchNode(path: [{}], bound: {})",
            ids.join(" "),
            self.bound
        )
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
            vec![0i64, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .build()
    }

    #[test]
    fn test_root_starts_at_zero() {
        let root = SearchNode::root(&example()).unwrap();
        assert_eq!(root.depth(), 1);
        assert_eq!(root.last(), p(0));
        assert_eq!(root.bound(), 70);
        assert_eq!(root.unvisited().collect::<Vec<_>>(), vec![p(1), p(2), p(3)]);
    }

    #[test]
    fn test_children_do_not_lower_the_bound() {
        let m = example();
        let root = SearchNode::root(&m).unwrap();
        for q in root.unvisited() {
            let child = root.child(q).unwrap();
            assert_eq!(child.depth(), 2);
            assert_eq!(child.last(), q);
            assert!(child.bound() >= root.bound());
            assert!(child.is_visited(q));
            assert!(!root.is_visited(q));
        }
    }

    #[test]
    fn test_complete_prices_the_original_tour() {
        let m = example();
        let leaf = SearchNode::root(&m)
            .and_then(|n| n.child(p(1)))
            .and_then(|n| n.child(p(3)))
            .and_then(|n| n.child(p(2)))
            .unwrap();
        assert!(leaf.is_leaf());
        assert!(leaf.bound() <= 80);
        let solution = leaf.complete(&m).unwrap();
        assert_eq!(solution.objective_value(), 80);
        assert_eq!(
            solution.points().iter().map(|p| p.get()).collect::<Vec<_>>(),
            vec![0, 1, 3, 2]
        );
    }

    #[test]
    fn test_two_point_leaf_keeps_the_return_edge() {
        let m = CostMatrixBuilder::from_rows(&[vec![0i64, 7], vec![3, 0]]).build();
        let leaf = SearchNode::root(&m).and_then(|n| n.child(p(1))).unwrap();
        assert!(leaf.is_leaf());
        assert_eq!(leaf.bound(), 10);
        assert_eq!(leaf.complete(&m).map(|s| s.objective_value()), Some(10));
    }

    #[test]
    fn test_complete_rejects_overflowing_cost() {
        let m = CostMatrixBuilder::from_rows(&[vec![0i8, 100], vec![100, 0]]).build();
        let root = SearchNode::root(&m).unwrap();
        assert_eq!(root.bound(), i8::MAX);
        let leaf = root.child(p(1)).unwrap();
        assert!(leaf.complete(&m).is_none());
    }

    #[test]
    fn test_missing_return_edge_cuts_the_branch() {
        let m = CostMatrixBuilder::from_rows(&[
            vec![0i64, 1, 1],
            vec![1, 0, 1],
            vec![-1, 1, 0],
        ])
        .build();
        let root = SearchNode::root(&m).unwrap();
        // after 0 -> 1 the point 2 has no way out
        assert!(root.child(p(1)).is_none());
        let leaf = root
            .child(p(2))
            .and_then(|n| n.child(p(1)))
            .unwrap();
        assert_eq!(leaf.complete(&m).map(|s| s.objective_value()), Some(3));
    }

    #[test]
    fn test_root_of_disconnected_instance() {
        let m = CostMatrixBuilder::<i64>::new(3).build();
        assert!(SearchNode::root(&m).is_none());
    }

    #[test]
    fn test_display() {
        let root = SearchNode::root(&example()).unwrap();
        assert_eq!(root.to_string(), "SearchNode(path: [0], bound: 70)");
    }

    #[test]
    fn test_debug_shows_path_and_bound() {
        let root = SearchNode::root(&example()).unwrap();
        let debug = format!("{:?}", root);
        assert!(debug.starts_with("SearchNode"));
        assert!(debug.contains("bound: 70"));
    }
}
